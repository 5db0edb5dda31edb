use chrono::Utc;
use radar_core::config::{
    ChangePattern, ConfidenceTierBounds, DetectionConfig, FieldCondition, MovementRule,
};
use radar_core::models::{ConfidenceTier, EntityRef, EntityState, MovementType, Snapshot, StateField};
use radar_movement::{confidence, ChangeDetector, MovementClassifier};

fn config() -> DetectionConfig {
    DetectionConfig {
        hash_fields: vec![
            StateField::Employer,
            StateField::Title,
            StateField::Department,
        ],
        movement_rules: vec![
            MovementRule {
                id: "hire-employer-gained".to_string(),
                movement: MovementType::Hire,
                base_confidence: 0.9,
                conditions: vec![FieldCondition {
                    field: StateField::Employer,
                    change: ChangePattern::Gained,
                    new_value_pattern: None,
                }],
            },
            MovementRule {
                id: "exit-employer-cleared".to_string(),
                movement: MovementType::Exit,
                base_confidence: 0.85,
                conditions: vec![FieldCondition {
                    field: StateField::Employer,
                    change: ChangePattern::Cleared,
                    new_value_pattern: None,
                }],
            },
            MovementRule {
                id: "transfer-department-changed".to_string(),
                movement: MovementType::Transfer,
                base_confidence: 0.6,
                conditions: vec![FieldCondition {
                    field: StateField::Department,
                    change: ChangePattern::Changed,
                    new_value_pattern: None,
                }],
            },
            MovementRule {
                id: "promotion-title-senior".to_string(),
                movement: MovementType::Promotion,
                base_confidence: 0.7,
                conditions: vec![FieldCondition {
                    field: StateField::Title,
                    change: ChangePattern::Changed,
                    new_value_pattern: Some("(?i)senior|vp|head|director".to_string()),
                }],
            },
        ],
        contradiction_rules: vec![],
        confidence_tiers: ConfidenceTierBounds {
            medium_min: 0.5,
            high_min: 0.8,
        },
        movement_modifiers: Default::default(),
    }
}

fn detect(old: &EntityState, new: &EntityState) -> radar_core::models::ChangeSet {
    let detector = ChangeDetector::new(&config()).unwrap();
    let snapshot = Snapshot {
        entity: EntityRef::new("p1", "o1"),
        state: old.clone(),
        content_hash: detector.hash(old),
        observed_at: Utc::now(),
    };
    detector.detect(Some(&snapshot), new)
}

// ── Hire detection ───────────────────────────────────────────────────────

#[test]
fn null_to_employer_classifies_as_hire() {
    let old = EntityState::default();
    let new = EntityState {
        employer: Some("Acme".to_string()),
        ..Default::default()
    };
    let change_set = detect(&old, &new);

    let classifier = MovementClassifier::new(&config()).unwrap();
    let matched = classifier.classify(&new, &change_set).expect("should classify");
    assert_eq!(matched.movement_type, MovementType::Hire);
    assert_eq!(matched.matched_rules, vec!["hire-employer-gained"]);
    assert!(matched.base_confidence >= 0.9);
}

#[test]
fn hire_confidence_reaches_high_tier_on_complete_record() {
    let cfg = config();
    let new = EntityState {
        employer: Some("Acme".to_string()),
        title: Some("VP Sales".to_string()),
        seniority: Some("vp".to_string()),
        department: Some("sales".to_string()),
        location: Some("NYC".to_string()),
        employment_status: Some("active".to_string()),
    };
    let final_confidence = confidence::compose(0.9, MovementType::Hire, &new, &cfg);
    assert_eq!(confidence::tier(final_confidence, &cfg), ConfidenceTier::High);
}

// ── Exit / transfer / promotion ──────────────────────────────────────────

#[test]
fn employer_cleared_classifies_as_exit() {
    let old = EntityState {
        employer: Some("Acme".to_string()),
        ..Default::default()
    };
    let new = EntityState::default();
    let change_set = detect(&old, &new);

    let classifier = MovementClassifier::new(&config()).unwrap();
    let matched = classifier.classify(&new, &change_set).unwrap();
    assert_eq!(matched.movement_type, MovementType::Exit);
}

#[test]
fn title_change_to_senior_classifies_as_promotion() {
    let old = EntityState {
        employer: Some("Acme".to_string()),
        title: Some("Account Executive".to_string()),
        ..Default::default()
    };
    let new = EntityState {
        title: Some("Senior Account Executive".to_string()),
        ..old.clone()
    };
    let change_set = detect(&old, &new);

    let classifier = MovementClassifier::new(&config()).unwrap();
    let matched = classifier.classify(&new, &change_set).unwrap();
    assert_eq!(matched.movement_type, MovementType::Promotion);
}

// ── Rule ordering ────────────────────────────────────────────────────────

#[test]
fn earlier_rule_wins_when_both_match() {
    // Department change plus a senior title change: the transfer rule is
    // declared before the promotion rule, so transfer wins.
    let old = EntityState {
        employer: Some("Acme".to_string()),
        title: Some("AE".to_string()),
        department: Some("smb".to_string()),
        ..Default::default()
    };
    let new = EntityState {
        title: Some("Senior AE".to_string()),
        department: Some("enterprise".to_string()),
        ..old.clone()
    };
    let change_set = detect(&old, &new);

    let classifier = MovementClassifier::new(&config()).unwrap();
    let matched = classifier.classify(&new, &change_set).unwrap();
    assert_eq!(matched.movement_type, MovementType::Transfer);
}

// ── Misses ───────────────────────────────────────────────────────────────

#[test]
fn unmatched_change_returns_none_without_error() {
    // Title changed to something no pattern matches; no other rule applies.
    let old = EntityState {
        employer: Some("Acme".to_string()),
        title: Some("AE".to_string()),
        ..Default::default()
    };
    let new = EntityState {
        title: Some("Account Manager".to_string()),
        ..old.clone()
    };
    let change_set = detect(&old, &new);
    assert!(change_set.is_different);

    let classifier = MovementClassifier::new(&config()).unwrap();
    assert!(classifier.classify(&new, &change_set).is_none());
}

#[test]
fn first_seen_never_classifies() {
    let detector = ChangeDetector::new(&config()).unwrap();
    let new = EntityState {
        employer: Some("Acme".to_string()),
        ..Default::default()
    };
    let change_set = detector.detect(None, &new);
    assert!(change_set.first_seen);

    let classifier = MovementClassifier::new(&config()).unwrap();
    assert!(classifier.classify(&new, &change_set).is_none());
}

use std::sync::Arc;

use chrono::Utc;
use radar_core::config::RadarConfig;
use radar_core::models::{Candidate, EntityContext, EntityRef, EntityState};
use radar_core::traits::IIntentStorage;
use radar_pipeline::Runner;
use radar_storage::StorageEngine;

const CONFIG: &str = r#"
[detection]
hash_fields = ["employer", "title", "employment_status"]

[detection.confidence_tiers]
medium_min = 0.5
high_min = 0.8

[[detection.movement_rules]]
id = "hire-employer-gained"
movement = "hire"
base_confidence = 0.9
[[detection.movement_rules.conditions]]
field = "employer"
change = "gained"

[scoring]
decay_floor = 0.1

[scoring.weights]
movement_hire = 30.0
movement_exit = 25.0
movement_promotion = 20.0
movement_transfer = 15.0
profile_view = 5.0
email_open = 3.0
email_click = 8.0
website_visit = 6.0
content_download = 10.0

[[scoring.decay_bands]]
max_age_days = 30
factor = 1.0

[scoring.safety_cap]
max_delta = 25.0
window_hours = 24

[trigger]
dedup_window_hours = 72

[trigger.score_tiers]
warm_min = 40.0
hot_min = 50.0

[[trigger.thresholds]]
tier = "warm"
action = "outreach_log"
priority = "medium"

[trigger.meeting]
min_score = 50.0

[run]
lookback_hours = 24
batch_size = 100
parallelism = 4
"#;

fn seed_entity(store: &StorageEngine, person: &str, employer: Option<&str>) {
    let candidate = Candidate {
        entity: EntityRef::new(person, "o1"),
        state: EntityState {
            employer: employer.map(str::to_string),
            title: Some("AE".to_string()),
            ..Default::default()
        },
        context: EntityContext {
            full_name: Some(person.to_string()),
            email: Some(format!("{person}@test.example")),
            company_name: Some("Acme".to_string()),
        },
    };
    store.upsert_entity(&candidate, Utc::now()).unwrap();
}

#[tokio::test]
async fn run_processes_every_candidate_in_the_window() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(StorageEngine::open(&dir.path().join("radar.db")).unwrap());
    for i in 0..12 {
        seed_entity(&store, &format!("p{i}"), Some("Acme"));
    }

    let runner = Runner::new(RadarConfig::from_toml_str(CONFIG).unwrap()).unwrap();
    let report = runner.run(Arc::clone(&store) as Arc<dyn IIntentStorage>).await.unwrap();

    assert_eq!(report.processed, 12);
    assert_eq!(report.errored, 0);
    assert_eq!(report.skipped, 0);
    for i in 0..12 {
        let entity = EntityRef::new(format!("p{i}"), "o1");
        assert!(store.get_snapshot(&entity).unwrap().is_some());
    }
}

#[tokio::test]
async fn empty_window_yields_an_empty_report() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let runner = Runner::new(RadarConfig::from_toml_str(CONFIG).unwrap()).unwrap();

    let report = runner.run(store as Arc<dyn IIntentStorage>).await.unwrap();
    assert_eq!(report.processed, 0);
    assert!(report.finished_at.is_some());
}

#[tokio::test]
async fn second_run_detects_movements_across_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(StorageEngine::open(&dir.path().join("radar.db")).unwrap());
    for i in 0..5 {
        seed_entity(&store, &format!("p{i}"), None);
    }

    let runner = Runner::new(RadarConfig::from_toml_str(CONFIG).unwrap()).unwrap();
    runner.run(Arc::clone(&store) as Arc<dyn IIntentStorage>).await.unwrap();

    // Everyone got hired between runs.
    for i in 0..5 {
        seed_entity(&store, &format!("p{i}"), Some("Acme"));
    }
    let report = runner.run(Arc::clone(&store) as Arc<dyn IIntentStorage>).await.unwrap();

    assert_eq!(report.processed, 5);
    assert_eq!(report.movements, 5);
    assert_eq!(report.signals_scored, 5);
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable external identifier pair for a tracked entity:
/// a person at an organization. The engine reads entities, never creates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub person_id: String,
    pub org_id: String,
}

impl EntityRef {
    pub fn new(person_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            org_id: org_id.into(),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.person_id, self.org_id)
    }
}

/// The observable fields of an entity that change detection operates on.
/// Volatile fields (import timestamps, sync cursors) deliberately have no
/// place here — only fields whose change is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityState {
    pub employer: Option<String>,
    pub title: Option<String>,
    pub seniority: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_status: Option<String>,
}

impl EntityState {
    /// Access a field by its closed-enum name.
    pub fn field(&self, field: StateField) -> Option<&str> {
        match field {
            StateField::Employer => self.employer.as_deref(),
            StateField::Title => self.title.as_deref(),
            StateField::Seniority => self.seniority.as_deref(),
            StateField::Department => self.department.as_deref(),
            StateField::Location => self.location.as_deref(),
            StateField::EmploymentStatus => self.employment_status.as_deref(),
        }
    }
}

/// Closed enumeration of observable fields. Rules and the hash-field
/// configuration address fields through this, never by raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateField {
    Employer,
    Title,
    Seniority,
    Department,
    Location,
    EmploymentStatus,
}

impl StateField {
    /// All fields, in canonical order. Diffing iterates this so change
    /// sets come out in a stable order.
    pub const ALL: [StateField; 6] = [
        StateField::Employer,
        StateField::Title,
        StateField::Seniority,
        StateField::Department,
        StateField::Location,
        StateField::EmploymentStatus,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateField::Employer => "employer",
            StateField::Title => "title",
            StateField::Seniority => "seniority",
            StateField::Department => "department",
            StateField::Location => "location",
            StateField::EmploymentStatus => "employment_status",
        }
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact context used by trigger eligibility checks (meeting requests
/// require a reachable contact).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityContext {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub company_name: Option<String>,
}

impl EntityContext {
    /// A contact is reachable when it has a non-empty email address.
    pub fn has_contact_info(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
    }
}

/// A candidate row returned by the lookback query: the entity, its
/// currently observed state, and its contact context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub entity: EntityRef,
    pub state: EntityState,
    pub context: EntityContext,
}

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub use models::student::Gender;

/// Registration input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub gender: Gender,
}

/// A new student together with the data fetched from the integrations,
/// ready to be persisted. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedStudent {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub joke: String,
    pub booking_id: i32,
}

impl EnrichedStudent {
    pub fn new(input: NewStudent, joke: String, booking_id: i32) -> Self {
        Self { name: input.name, email: input.email, gender: input.gender, joke, booking_id }
    }
}

/// Persisted student record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub joke: String,
    pub booking_id: i32,
    pub created_at: DateTime<FixedOffset>,
}

impl From<models::student::Model> for Student {
    fn from(m: models::student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            gender: m.gender,
            joke: m.joke,
            booking_id: m.booking_id,
            created_at: m.created_at,
        }
    }
}

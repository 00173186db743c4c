//! Clinic patient model.

use super::QueueRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A patient waiting for an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub issue: String,
    pub appointment_date: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied on create and full update.
#[derive(Debug, Clone)]
pub struct NewPatient {
    pub name: String,
    pub issue: String,
    pub appointment_date: String,
}

impl QueueRecord for Patient {
    fn id(&self) -> i64 {
        self.id
    }
}

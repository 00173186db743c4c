//! Restaurant reservation model.

use super::QueueRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A party waiting for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub name: String,
    pub party_size: i64,
    pub reservation_time: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub name: String,
    pub party_size: i64,
    pub reservation_time: String,
}

impl QueueRecord for Reservation {
    fn id(&self) -> i64 {
        self.id
    }
}

use super::QueueRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bank customer waiting at the counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BankCustomer {
    pub id: i64,
    pub name: String,
    pub service: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBankCustomer {
    pub name: String,
    pub service: String,
}

impl QueueRecord for BankCustomer {
    fn id(&self) -> i64 {
        self.id
    }
}

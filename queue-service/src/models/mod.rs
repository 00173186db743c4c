//! Domain models for queue-service.

mod bank;
mod kind;
mod patient;
mod restaurant;

pub use bank::{BankCustomer, NewBankCustomer};
pub use kind::{InvalidKind, RecordKind};
pub use patient::{NewPatient, Patient};
pub use restaurant::{NewReservation, Reservation};

/// Status every record starts with.
pub const DEFAULT_STATUS: &str = "Waiting";

/// A stored queue entry of any kind.
pub trait QueueRecord: serde::Serialize + Send + Sync {
    fn id(&self) -> i64;
}

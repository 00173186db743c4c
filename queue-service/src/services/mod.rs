//! Services module for queue-service.

pub mod database;
pub mod metrics;
pub mod providers;
pub mod repository;
pub mod suggestion;

pub use database::Database;
pub use metrics::{get_metrics, init_metrics};
pub use repository::{BankRepository, PatientRepository, QueueRepository, RestaurantRepository};
pub use suggestion::{SuggestionKind, SuggestionService};

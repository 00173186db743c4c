//! Typed repositories, one per record kind.
//!
//! Every repository exposes the same narrow surface so handlers can treat the
//! three kinds uniformly while each query names its own table.

use crate::models::{
    BankCustomer, NewBankCustomer, NewPatient, NewReservation, Patient, QueueRecord, RecordKind,
    Reservation,
};
use crate::services::metrics::{DB_QUERY_DURATION, RECORD_OPERATIONS_TOTAL};
use async_trait::async_trait;
use chrono::Utc;
use prometheus::HistogramTimer;
use service_core::error::AppError;
use sqlx::SqlitePool;
use tracing::{info, instrument};

#[async_trait]
pub trait QueueRepository: Send + Sync {
    type Record: QueueRecord;
    type New: Send + Sync;

    const KIND: RecordKind;

    /// All rows, newest first.
    async fn list(&self) -> Result<Vec<Self::Record>, AppError>;

    /// Insert with the default status.
    async fn insert(&self, input: &Self::New) -> Result<Self::Record, AppError>;

    /// Replace every field except id, status and created_at.
    /// `None` when no row has `id`.
    async fn update(&self, id: i64, input: &Self::New) -> Result<Option<Self::Record>, AppError>;

    /// Overwrite status only. `None` when no row has `id`.
    async fn patch_status(&self, id: i64, status: &str)
        -> Result<Option<Self::Record>, AppError>;

    /// `false` when no row has `id`.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

fn start_timer(kind: RecordKind, operation: &str) -> HistogramTimer {
    DB_QUERY_DURATION
        .with_label_values(&[kind.as_str(), operation])
        .start_timer()
}

fn count<T>(kind: RecordKind, operation: &str, result: &Result<T, AppError>, found: bool) {
    let outcome = match result {
        Ok(_) if found => "ok",
        Ok(_) => "not_found",
        Err(_) => "error",
    };
    RECORD_OPERATIONS_TOTAL
        .with_label_values(&[kind.as_str(), operation, outcome])
        .inc();
}

fn count_optional<T>(kind: RecordKind, operation: &str, result: &Result<Option<T>, AppError>) {
    let found = matches!(result, Ok(Some(_)));
    count(kind, operation, result, found);
}

// -------------------------------------------------------------------------
// Patients
// -------------------------------------------------------------------------

#[derive(Clone)]
pub struct PatientRepository {
    pool: SqlitePool,
}

impl PatientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for PatientRepository {
    type Record = Patient;
    type New = NewPatient;

    const KIND: RecordKind = RecordKind::Patient;

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Patient>, AppError> {
        let timer = start_timer(Self::KIND, "list");
        let result = sqlx::query_as::<_, Patient>(
            r#"
            SELECT id, name, issue, appointment_date, status, created_at
            FROM patients
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "list", &result, true);
        result
    }

    #[instrument(skip(self, input))]
    async fn insert(&self, input: &NewPatient) -> Result<Patient, AppError> {
        let timer = start_timer(Self::KIND, "insert");
        let result = sqlx::query_as::<_, Patient>(
            r#"
            INSERT INTO patients (name, issue, appointment_date, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, issue, appointment_date, status, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.issue)
        .bind(&input.appointment_date)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "insert", &result, true);

        let patient = result?;
        info!(patient_id = patient.id, "Patient added");
        Ok(patient)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: i64, input: &NewPatient) -> Result<Option<Patient>, AppError> {
        let timer = start_timer(Self::KIND, "update");
        let result = sqlx::query_as::<_, Patient>(
            r#"
            UPDATE patients
            SET name = $2, issue = $3, appointment_date = $4
            WHERE id = $1
            RETURNING id, name, issue, appointment_date, status, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.issue)
        .bind(&input.appointment_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count_optional(Self::KIND, "update", &result);
        result
    }

    #[instrument(skip(self))]
    async fn patch_status(&self, id: i64, status: &str) -> Result<Option<Patient>, AppError> {
        let timer = start_timer(Self::KIND, "patch_status");
        let result = sqlx::query_as::<_, Patient>(
            r#"
            UPDATE patients
            SET status = $2
            WHERE id = $1
            RETURNING id, name, issue, appointment_date, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count_optional(Self::KIND, "patch_status", &result);
        result
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let timer = start_timer(Self::KIND, "delete");
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|done| done.rows_affected() > 0)
            .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "delete", &result, matches!(result, Ok(true)));
        result
    }
}

// -------------------------------------------------------------------------
// Restaurant reservations
// -------------------------------------------------------------------------

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for RestaurantRepository {
    type Record = Reservation;
    type New = NewReservation;

    const KIND: RecordKind = RecordKind::Restaurant;

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Reservation>, AppError> {
        let timer = start_timer(Self::KIND, "list");
        let result = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, name, party_size, reservation_time, status, created_at
            FROM restaurants
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "list", &result, true);
        result
    }

    #[instrument(skip(self, input))]
    async fn insert(&self, input: &NewReservation) -> Result<Reservation, AppError> {
        let timer = start_timer(Self::KIND, "insert");
        let result = sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO restaurants (name, party_size, reservation_time, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, party_size, reservation_time, status, created_at
            "#,
        )
        .bind(&input.name)
        .bind(input.party_size)
        .bind(&input.reservation_time)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "insert", &result, true);

        let reservation = result?;
        info!(
            reservation_id = reservation.id,
            party_size = reservation.party_size,
            "Reservation added"
        );
        Ok(reservation)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: i64,
        input: &NewReservation,
    ) -> Result<Option<Reservation>, AppError> {
        let timer = start_timer(Self::KIND, "update");
        let result = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE restaurants
            SET name = $2, party_size = $3, reservation_time = $4
            WHERE id = $1
            RETURNING id, name, party_size, reservation_time, status, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.party_size)
        .bind(&input.reservation_time)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count_optional(Self::KIND, "update", &result);
        result
    }

    #[instrument(skip(self))]
    async fn patch_status(&self, id: i64, status: &str) -> Result<Option<Reservation>, AppError> {
        let timer = start_timer(Self::KIND, "patch_status");
        let result = sqlx::query_as::<_, Reservation>(
            r#"
            UPDATE restaurants
            SET status = $2
            WHERE id = $1
            RETURNING id, name, party_size, reservation_time, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count_optional(Self::KIND, "patch_status", &result);
        result
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let timer = start_timer(Self::KIND, "delete");
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|done| done.rows_affected() > 0)
            .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "delete", &result, matches!(result, Ok(true)));
        result
    }
}

// -------------------------------------------------------------------------
// Bank customers
// -------------------------------------------------------------------------

#[derive(Clone)]
pub struct BankRepository {
    pool: SqlitePool,
}

impl BankRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for BankRepository {
    type Record = BankCustomer;
    type New = NewBankCustomer;

    const KIND: RecordKind = RecordKind::Bank;

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<BankCustomer>, AppError> {
        let timer = start_timer(Self::KIND, "list");
        let result = sqlx::query_as::<_, BankCustomer>(
            r#"
            SELECT id, name, service, status, created_at
            FROM banks
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "list", &result, true);
        result
    }

    #[instrument(skip(self, input))]
    async fn insert(&self, input: &NewBankCustomer) -> Result<BankCustomer, AppError> {
        let timer = start_timer(Self::KIND, "insert");
        let result = sqlx::query_as::<_, BankCustomer>(
            r#"
            INSERT INTO banks (name, service, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, name, service, status, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.service)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "insert", &result, true);

        let customer = result?;
        info!(customer_id = customer.id, service = %customer.service, "Bank customer added");
        Ok(customer)
    }

    #[instrument(skip(self, input))]
    async fn update(
        &self,
        id: i64,
        input: &NewBankCustomer,
    ) -> Result<Option<BankCustomer>, AppError> {
        let timer = start_timer(Self::KIND, "update");
        let result = sqlx::query_as::<_, BankCustomer>(
            r#"
            UPDATE banks
            SET name = $2, service = $3
            WHERE id = $1
            RETURNING id, name, service, status, created_at
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.service)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count_optional(Self::KIND, "update", &result);
        result
    }

    #[instrument(skip(self))]
    async fn patch_status(&self, id: i64, status: &str) -> Result<Option<BankCustomer>, AppError> {
        let timer = start_timer(Self::KIND, "patch_status");
        let result = sqlx::query_as::<_, BankCustomer>(
            r#"
            UPDATE banks
            SET status = $2
            WHERE id = $1
            RETURNING id, name, service, status, created_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from);
        timer.observe_duration();
        count_optional(Self::KIND, "patch_status", &result);
        result
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let timer = start_timer(Self::KIND, "delete");
        let result = sqlx::query("DELETE FROM banks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map(|done| done.rows_affected() > 0)
            .map_err(AppError::from);
        timer.observe_duration();
        count(Self::KIND, "delete", &result, matches!(result, Ok(true)));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_STATUS;
    use crate::services::Database;

    async fn setup() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("repo.db").display());
        let db = Database::new(&url, 2, 1).await.unwrap();
        db.ensure_schema().await.unwrap();
        (dir, db)
    }

    fn patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.to_string(),
            issue: "Fever".to_string(),
            appointment_date: "2026-10-20".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids_and_default_status() {
        let (_dir, db) = setup().await;
        let repo = db.patients();

        let first = repo.insert(&patient("Ada")).await.unwrap();
        let second = repo.insert(&patient("Grace")).await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.status, DEFAULT_STATUS);
        assert_eq!(second.status, DEFAULT_STATUS);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (_dir, db) = setup().await;
        let repo = db.banks();

        for name in ["first", "second", "third"] {
            repo.insert(&NewBankCustomer {
                name: name.to_string(),
                service: "Deposit".to_string(),
            })
            .await
            .unwrap();
        }

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_update_keeps_status_and_created_at() {
        let (_dir, db) = setup().await;
        let repo = db.restaurants();

        let created = repo
            .insert(&NewReservation {
                name: "Smith".to_string(),
                party_size: 4,
                reservation_time: "19:00".to_string(),
            })
            .await
            .unwrap();
        repo.patch_status(created.id, "Seated").await.unwrap();

        let updated = repo
            .update(
                created.id,
                &NewReservation {
                    name: "Smith-Jones".to_string(),
                    party_size: 6,
                    reservation_time: "20:30".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Smith-Jones");
        assert_eq!(updated.party_size, 6);
        assert_eq!(updated.reservation_time, "20:30");
        assert_eq!(updated.status, "Seated");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_patch_status_changes_only_status() {
        let (_dir, db) = setup().await;
        let repo = db.patients();

        let created = repo.insert(&patient("Ada")).await.unwrap();
        let patched = repo
            .patch_status(created.id, "In Progress")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            patched,
            Patient {
                status: "In Progress".to_string(),
                ..created
            }
        );
    }

    #[tokio::test]
    async fn test_missing_rows_are_reported() {
        let (_dir, db) = setup().await;
        let repo = db.patients();

        assert!(repo.update(42, &patient("Nobody")).await.unwrap().is_none());
        assert!(repo.patch_status(42, "Done").await.unwrap().is_none());
        assert!(!repo.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_row_and_ids_are_not_reused() {
        let (_dir, db) = setup().await;
        let repo = db.patients();

        let created = repo.insert(&patient("Ada")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());

        let next = repo.insert(&patient("Grace")).await.unwrap();
        assert!(next.id > created.id);
    }

    #[tokio::test]
    async fn test_kinds_are_isolated() {
        let (_dir, db) = setup().await;

        db.patients().insert(&patient("Ada")).await.unwrap();

        assert_eq!(db.patients().list().await.unwrap().len(), 1);
        assert!(db.restaurants().list().await.unwrap().is_empty());
        assert!(db.banks().list().await.unwrap().is_empty());
    }
}

use crate::models::{NewBankCustomer, NewPatient, NewReservation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

/// A create/replace body for one record kind.
///
/// Fields are optional at the serde level so an absent field surfaces as a
/// 400 from validation rather than a deserialization rejection.
pub trait RecordPayload: DeserializeOwned + Validate {
    type New;

    fn into_new(self) -> Result<Self::New, AppError>;

    /// Deserialize, validate and convert a raw JSON body.
    fn parse(body: serde_json::Value) -> Result<Self::New, AppError> {
        let payload: Self = serde_json::from_value(body)
            .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid request body: {}", e)))?;
        payload.validate()?;
        payload.into_new()
    }
}

fn missing_fields() -> AppError {
    AppError::BadRequest(anyhow::anyhow!("Missing required fields"))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PatientPayload {
    #[validate(required, length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(required, length(min = 1, message = "Issue is required"))]
    pub issue: Option<String>,

    #[serde(rename = "appointmentDate")]
    #[validate(required, length(min = 1, message = "Appointment date is required"))]
    pub appointment_date: Option<String>,
}

impl RecordPayload for PatientPayload {
    type New = NewPatient;

    fn into_new(self) -> Result<NewPatient, AppError> {
        match (self.name, self.issue, self.appointment_date) {
            (Some(name), Some(issue), Some(appointment_date)) => Ok(NewPatient {
                name,
                issue,
                appointment_date,
            }),
            _ => Err(missing_fields()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    #[validate(required, length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[serde(rename = "partySize")]
    #[validate(required, range(min = 1, message = "Party size must be at least 1"))]
    pub party_size: Option<i64>,

    #[serde(rename = "reservationTime")]
    #[validate(required, length(min = 1, message = "Reservation time is required"))]
    pub reservation_time: Option<String>,
}

impl RecordPayload for ReservationPayload {
    type New = NewReservation;

    fn into_new(self) -> Result<NewReservation, AppError> {
        match (self.name, self.party_size, self.reservation_time) {
            (Some(name), Some(party_size), Some(reservation_time)) => Ok(NewReservation {
                name,
                party_size,
                reservation_time,
            }),
            _ => Err(missing_fields()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BankCustomerPayload {
    #[validate(required, length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    #[validate(required, length(min = 1, message = "Service is required"))]
    pub service: Option<String>,
}

impl RecordPayload for BankCustomerPayload {
    type New = NewBankCustomer;

    fn into_new(self) -> Result<NewBankCustomer, AppError> {
        match (self.name, self.service) {
            (Some(name), Some(service)) => Ok(NewBankCustomer { name, service }),
            _ => Err(missing_fields()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(required, length(min = 1, message = "Status is required"))]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

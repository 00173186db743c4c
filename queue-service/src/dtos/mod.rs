//! Request/response bodies. Client-facing keys are camelCase.

mod records;
mod suggestion;

pub use records::{
    BankCustomerPayload, CreatedResponse, MessageResponse, PatientPayload, RecordPayload,
    ReservationPayload, UpdateStatusRequest,
};
pub use suggestion::{SuggestionRequest, SuggestionResponse};

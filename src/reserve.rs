use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::model::ConsolidatedBooking;

/// Wire arguments of a single reservation call.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationRequest {
    pub email: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub seat_id: String,
}

impl ReservationRequest {
    pub fn from_booking(booking: &ConsolidatedBooking) -> Self {
        Self {
            email: booking.email.clone(),
            date: booking.date,
            start_time: booking.span.start_hhmm(),
            end_time: booking.span.end_hhmm(),
            seat_id: booking.seat_id.clone(),
        }
    }
}

/// A reservation call that did not produce a confirmed booking.
#[derive(Debug, Clone)]
pub enum ReservationError {
    /// The service answered and rejected the reservation.
    Service { message: String },
    /// The call never got a service answer.
    Transport { message: String },
}

impl ReservationError {
    pub fn into_message(self) -> String {
        match self {
            ReservationError::Service { message } | ReservationError::Transport { message } => {
                message
            }
        }
    }
}

impl std::fmt::Display for ReservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationError::Service { message } => write!(f, "reservation rejected: {message}"),
            ReservationError::Transport { message } => {
                write!(f, "reservation call failed: {message}")
            }
        }
    }
}

impl std::error::Error for ReservationError {}

/// The external reservation endpoint. Implementations own every transport
/// concern, timeouts included; the engine only sequences calls and
/// classifies their outcomes. An issued call must be allowed to finish:
/// aborting client-side would leave the reservation in an unknown state.
#[async_trait]
pub trait ReservationClient: Send + Sync {
    /// Returns the service success message on a confirmed booking.
    async fn reserve(&self, request: &ReservationRequest) -> Result<String, ReservationError>;
}

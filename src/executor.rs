use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::confirm::confirmation_required;
use crate::model::{BookingResult, ConsolidatedBooking, FailureKind, RunReport};
use crate::observability;
use crate::reserve::{ReservationClient, ReservationError, ReservationRequest};

/// Executor tunables.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Idle delay inserted before every call after the first, as a
    /// self-imposed rate limit toward the reservation service.
    pub pacing: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self { pacing: Duration::from_secs(1) }
    }
}

/// Fixed-interval gate: the first pass is free, every later pass waits out
/// the full interval. Runs on tokio time, so tests pace under
/// `start_paused` without wall-clock waits.
pub struct Pacer {
    interval: Duration,
    first: bool,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, first: true }
    }

    pub async fn wait(&mut self) {
        if self.first {
            self.first = false;
            return;
        }
        tokio::time::sleep(self.interval).await;
    }
}

/// Execute bookings strictly in order, one reservation call at a time.
///
/// Failures never abort the run. A cancellation signal is observed only
/// between iterations: bookings not yet dispatched are reported as failed
/// with `FailureKind::Cancelled`, and an in-flight call always completes.
/// Every submitted booking gets exactly one result, in submission order.
pub async fn run(
    client: &dyn ReservationClient,
    bookings: &[ConsolidatedBooking],
    config: &ExecutorConfig,
    cancel: &CancellationToken,
) -> RunReport {
    let mut results = Vec::with_capacity(bookings.len());
    let mut pacer = Pacer::new(config.pacing);

    for booking in bookings {
        if cancel.is_cancelled() {
            info!(seat = %booking.seat_name, "cancelled before dispatch");
            results.push(BookingResult {
                booking: booking.clone(),
                succeeded: false,
                message: "cancelled before dispatch".to_string(),
                error_kind: Some(FailureKind::Cancelled),
            });
            continue;
        }

        pacer.wait().await;

        metrics::counter!(observability::BOOKINGS_ATTEMPTED_TOTAL).increment(1);
        let request = ReservationRequest::from_booking(booking);
        let started = std::time::Instant::now();
        let outcome = client.reserve(&request).await;
        metrics::histogram!(observability::BOOKING_CALL_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());

        let result = match outcome {
            Ok(message) => {
                info!(
                    seat = %booking.seat_name,
                    date = %booking.date,
                    start = %booking.span.start_hhmm(),
                    end = %booking.span.end_hhmm(),
                    "booked"
                );
                metrics::counter!(observability::BOOKINGS_SUCCEEDED_TOTAL).increment(1);
                BookingResult {
                    booking: booking.clone(),
                    succeeded: true,
                    message,
                    error_kind: None,
                }
            }
            Err(err) => {
                warn!(seat = %booking.seat_name, error = %err, "booking failed");
                metrics::counter!(observability::BOOKINGS_FAILED_TOTAL).increment(1);
                let error_kind = match &err {
                    ReservationError::Service { message } if confirmation_required(message) => {
                        Some(FailureKind::EmailConfirmationRequired)
                    }
                    _ => None,
                };
                BookingResult {
                    booking: booking.clone(),
                    succeeded: false,
                    message: err.into_message(),
                    error_kind,
                }
            }
        };
        results.push(result);
    }

    RunReport { results }
}

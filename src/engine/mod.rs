mod blocks;
mod error;
mod proximity;
mod rank;
mod search;

pub use blocks::available_blocks;
pub use error::PlanError;
pub use proximity::proximity;
pub use rank::summarize;

use tracing::debug;

use crate::model::{MAX_BOOKING_MINUTES, Minutes, ScoredPlan, Seat, Span};
use crate::observability;

use search::SeatBlocks;

/// Weights of the plan-ranking score. Lower total is better.
#[derive(Debug, Clone)]
pub struct ScoreWeights {
    /// Per-booking penalty.
    pub segment_count: f64,
    /// Per-minute penalty for target time left uncovered.
    pub uncovered_minute: f64,
    /// Scale of the penalty for moving between distant seats.
    pub seat_change: f64,
    /// Per-minute penalty for segments under an hour.
    pub short_segment: f64,
    /// Bonus when the mean segment duration lands in the 2-4 h band.
    pub ideal_shape_bonus: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            segment_count: 100.0,
            uncovered_minute: 5.0,
            seat_change: 50.0,
            short_segment: 0.5,
            ideal_shape_bonus: 30.0,
        }
    }
}

/// Tunables of the combination search. The defaults mirror the reservation
/// service's constraints and the empirically chosen search bounds.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Hard cap on a single reservation.
    pub max_booking_minutes: Minutes,
    /// Recommendations returned to the caller.
    pub max_options: usize,
    /// Minimum share of the target window a plan must cover, in percent.
    pub min_coverage_percent: f64,
    /// Largest tolerated idle gap between consecutive segments.
    pub max_gap_minutes: Minutes,
    /// Greedy extension steps per seed.
    pub max_depth: usize,
    /// Segments per plan.
    pub max_segments: usize,
    /// Seats whose description contains one of these are never planned.
    pub reserved_keywords: Vec<String>,
    pub weights: ScoreWeights,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_booking_minutes: MAX_BOOKING_MINUTES,
            max_options: 5,
            min_coverage_percent: 80.0,
            max_gap_minutes: 60,
            max_depth: 10,
            max_segments: 6,
            reserved_keywords: vec!["riservat".to_string(), "reserved".to_string()],
            weights: ScoreWeights::default(),
        }
    }
}

/// Rank covering plans for `[start, end)` over the given seat snapshot.
///
/// The snapshot is treated as immutable for the duration of the call; no
/// network is involved. Validation failures and an empty result are terminal.
pub fn recommend(
    seats: &[Seat],
    start: Minutes,
    end: Minutes,
    config: &PlannerConfig,
) -> Result<Vec<ScoredPlan>, PlanError> {
    if start >= end {
        return Err(PlanError::InvalidWindow { start, end });
    }
    if seats.is_empty() {
        return Err(PlanError::NoSeats);
    }
    let window = Span::new(start, end);

    let avail: Vec<SeatBlocks> = seats
        .iter()
        .enumerate()
        .filter(|(_, seat)| !seat.is_reserved(&config.reserved_keywords))
        .map(|(i, seat)| SeatBlocks {
            seat: i,
            blocks: available_blocks(&seat.sorted_slots(), window, config.max_booking_minutes),
        })
        .filter(|sa| !sa.blocks.is_empty())
        .collect();

    if avail.is_empty() {
        return Err(PlanError::NoCoverage {
            reason: "no seat has availability in this window; try another time or date",
        });
    }

    let candidates = search::build_candidates(&avail, seats, window, config);
    debug!(
        seats = avail.len(),
        candidates = candidates.len(),
        "combination search finished"
    );

    let ranked = rank::rank(candidates, seats, window.duration_minutes(), config);
    metrics::counter!(observability::PLANS_RANKED_TOTAL).increment(ranked.len() as u64);

    if ranked.is_empty() {
        return Err(PlanError::NoCoverage {
            reason: "no combination covers enough of the window; try a shorter window",
        });
    }
    Ok(ranked)
}

use crate::model::{Minutes, Seat, Segment, Span};

use super::PlannerConfig;
use super::proximity::proximity;

// Step-selection weights: prefer small gaps and nearby seats, reward longer
// blocks. These shape which block is taken next, not the final plan ranking.
const GAP_WEIGHT: f64 = 2.0;
const DISTANCE_WEIGHT: f64 = 30.0;
const DURATION_REWARD: f64 = 0.1;

/// Availability blocks of one seat, indexed into the caller's seat slice.
#[derive(Debug, Clone)]
pub(super) struct SeatBlocks {
    pub seat: usize,
    pub blocks: Vec<Span>,
}

/// One candidate plan per seed: every block of every seat starts one greedy
/// forward extension. Deliberately greedy rather than exhaustive, so work
/// stays bounded on datasets with hundreds of seats.
pub(super) fn build_candidates(
    avail: &[SeatBlocks],
    seats: &[Seat],
    window: Span,
    config: &PlannerConfig,
) -> Vec<Vec<Segment>> {
    let mut candidates = Vec::new();
    for seed in avail {
        for &block in &seed.blocks {
            let seed_segment = Segment { seat: seed.seat, span: block };
            candidates.push(extend(seed_segment, avail, seats, window.end, config));
        }
    }
    candidates
}

/// Iterative greedy extension carrying `(plan, covered_until, depth)`:
/// repeatedly take the cheapest block starting at or after the covered point
/// until the window is covered or a bound trips.
fn extend(
    seed: Segment,
    avail: &[SeatBlocks],
    seats: &[Seat],
    target_end: Minutes,
    config: &PlannerConfig,
) -> Vec<Segment> {
    let mut plan = vec![seed];
    let mut covered_until = seed.span.end;
    let mut depth = 0usize;

    while covered_until < target_end {
        depth += 1;
        if depth > config.max_depth || plan.len() > config.max_segments {
            break;
        }

        let last_seat = plan.last().expect("plan is never empty").seat;
        let mut best: Option<(f64, Segment)> = None;
        for sa in avail {
            let prox = proximity(&seats[last_seat], &seats[sa.seat]);
            for &block in &sa.blocks {
                if block.start < covered_until {
                    continue;
                }
                let gap = (block.start - covered_until) as f64;
                let duration = block.duration_minutes() as f64;
                let step_score =
                    gap * GAP_WEIGHT + (1.0 - prox) * DISTANCE_WEIGHT - duration * DURATION_REWARD;
                if best.as_ref().is_none_or(|(s, _)| step_score < *s) {
                    best = Some((step_score, Segment { seat: sa.seat, span: block }));
                }
            }
        }

        let Some((_, next)) = best else { break };
        if next.span.start - covered_until > config.max_gap_minutes {
            break;
        }
        covered_until = next.span.end;
        plan.push(next);
    }

    plan
}

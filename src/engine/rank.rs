use crate::model::{Minutes, PlanSummary, ScoredPlan, Seat, Segment, SegmentSummary, Span};

use super::proximity::proximity;
use super::{PlannerConfig, ScoreWeights};

/// Score candidates, drop everything under the coverage threshold, and keep
/// the best `max_options`.
pub(super) fn rank(
    candidates: Vec<Vec<Segment>>,
    seats: &[Seat],
    target_minutes: Minutes,
    config: &PlannerConfig,
) -> Vec<ScoredPlan> {
    let mut scored: Vec<ScoredPlan> = candidates
        .into_iter()
        .filter(|segments| !segments.is_empty())
        .map(|segments| {
            let covered: Minutes = segments.iter().map(|s| s.span.duration_minutes()).sum();
            ScoredPlan {
                score: score_plan(&segments, seats, target_minutes, &config.weights),
                covered_minutes: covered,
                coverage_percent: covered as f64 / target_minutes as f64 * 100.0,
                segments,
            }
        })
        .filter(|plan| plan.coverage_percent >= config.min_coverage_percent)
        .collect();

    scored.sort_by(|a, b| a.score.total_cmp(&b.score));
    scored.truncate(config.max_options);
    scored
}

/// Lower is better: fewer bookings, less uncovered time, nearby seats on
/// each transition, few sub-hour fragments, and a bonus for a 2-4 h mean
/// segment shape.
fn score_plan(
    segments: &[Segment],
    seats: &[Seat],
    target_minutes: Minutes,
    weights: &ScoreWeights,
) -> f64 {
    let covered: Minutes = segments.iter().map(|s| s.span.duration_minutes()).sum();

    let mut score = segments.len() as f64 * weights.segment_count;
    score += (target_minutes - covered).max(0) as f64 * weights.uncovered_minute;

    for pair in segments.windows(2) {
        let prox = proximity(&seats[pair[0].seat], &seats[pair[1].seat]);
        score += (1.0 - prox) * weights.seat_change;
    }

    for segment in segments {
        let duration = segment.span.duration_minutes();
        if duration < 60 {
            score += (60 - duration) as f64 * weights.short_segment;
        }
    }

    let mean_duration = covered as f64 / segments.len() as f64;
    if (120.0..=240.0).contains(&mean_duration) {
        score -= weights.ideal_shape_bonus;
    }

    score
}

/// Resolve a ranked plan against the seat snapshot for display. Seat changes
/// count only transitions where the seat id actually differs.
pub fn summarize(seats: &[Seat], plan: &ScoredPlan) -> PlanSummary {
    let segments: Vec<SegmentSummary> = plan
        .segments
        .iter()
        .map(|segment| {
            let seat = &seats[segment.seat];
            SegmentSummary {
                seat_id: seat.resource_id.clone(),
                seat_name: seat.resource_name.clone(),
                floor_name: seat.floor_name.clone().unwrap_or_else(|| "Room".to_string()),
                start_time: segment.span.start_hhmm(),
                end_time: segment.span.end_hhmm(),
                duration_minutes: segment.span.duration_minutes(),
            }
        })
        .collect();

    let seat_changes = plan
        .segments
        .windows(2)
        .filter(|pair| seats[pair[0].seat].resource_id != seats[pair[1].seat].resource_id)
        .count();

    PlanSummary {
        segments,
        total_bookings: plan.segments.len(),
        total_minutes: plan.covered_minutes,
        coverage_percent: plan.coverage_percent.round() as u32,
        seat_changes,
    }
}

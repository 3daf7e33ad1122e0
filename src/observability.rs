//! Metric names recorded through the `metrics` facade. Installing an
//! exporter is the embedding application's job.

// ── Executor metrics ────────────────────────────────────────────

/// Counter: reservation calls dispatched.
pub const BOOKINGS_ATTEMPTED_TOTAL: &str = "perch_bookings_attempted_total";

/// Counter: bookings confirmed by the service.
pub const BOOKINGS_SUCCEEDED_TOTAL: &str = "perch_bookings_succeeded_total";

/// Counter: bookings rejected by the service or failed in transit.
pub const BOOKINGS_FAILED_TOTAL: &str = "perch_bookings_failed_total";

/// Histogram: reservation call latency in seconds.
pub const BOOKING_CALL_DURATION_SECONDS: &str = "perch_booking_call_duration_seconds";

// ── Planner metrics ─────────────────────────────────────────────

/// Counter: plans that survived ranking.
pub const PLANS_RANKED_TOTAL: &str = "perch_plans_ranked_total";

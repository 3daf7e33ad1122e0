use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Minutes since midnight — the only time-of-day type.
pub type Minutes = i32;

/// Granule size of the external availability service.
pub const SLOT_MINUTES: Minutes = 30;

/// Hard per-reservation duration cap imposed by the reservation service.
pub const MAX_BOOKING_MINUTES: Minutes = 240;

/// Parse a `HH:MM` clock label into minutes since midnight.
///
/// Accepts `00:00` through `24:00`; returns `None` for anything malformed.
pub fn minutes_from_hhmm(label: &str) -> Option<Minutes> {
    let (h, m) = label.split_once(':')?;
    let h: Minutes = h.parse().ok()?;
    let m: Minutes = m.parse().ok()?;
    if !(0..=24).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    let total = h * 60 + m;
    if total > 24 * 60 {
        return None;
    }
    Some(total)
}

/// Render minutes since midnight as zero-padded `HH:MM`.
pub fn hhmm_from_minutes(minutes: Minutes) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Half-open interval `[start, end)` in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Minutes,
    pub end: Minutes,
}

impl Span {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration_minutes(&self) -> Minutes {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn start_hhmm(&self) -> String {
        hhmm_from_minutes(self.start)
    }

    pub fn end_hhmm(&self) -> String {
        hhmm_from_minutes(self.end)
    }
}

/// One 30-minute availability granule as served by the availability fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Clock label of the slot start, `"HH:MM"`.
    pub hour: String,
    /// Remaining capacity; `0` means unavailable.
    pub places_available: u32,
}

impl SlotRecord {
    /// Slot start in minutes since midnight; `None` for a malformed label.
    pub fn start_minutes(&self) -> Option<Minutes> {
        minutes_from_hhmm(&self.hour)
    }
}

/// A bookable seat snapshot for one day, as assembled by the availability
/// fetch layer. Owned by the caller; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub resource_id: String,
    pub resource_name: String,
    pub floor_id: i64,
    #[serde(default)]
    pub floor_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hours: Vec<SlotRecord>,
}

impl Seat {
    /// Slot list sorted ascending by start time, malformed labels dropped.
    /// No assumption is made on the wire order.
    pub fn sorted_slots(&self) -> Vec<(Minutes, u32)> {
        let mut slots: Vec<(Minutes, u32)> = self
            .hours
            .iter()
            .filter_map(|s| s.start_minutes().map(|m| (m, s.places_available)))
            .collect();
        slots.sort_by_key(|&(m, _)| m);
        slots
    }

    /// True when the seat description carries one of the reserved keywords.
    pub fn is_reserved(&self, keywords: &[String]) -> bool {
        let Some(description) = &self.description else {
            return false;
        };
        let description = description.to_lowercase();
        keywords
            .iter()
            .any(|k| description.contains(&k.to_lowercase()))
    }
}

/// One leg of a plan: a seat (index into the caller's seat slice) and the
/// interval it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub seat: usize,
    pub span: Span,
}

/// A ranked candidate plan. Lower score is better.
#[derive(Debug, Clone)]
pub struct ScoredPlan {
    /// Segments ordered by start time.
    pub segments: Vec<Segment>,
    pub score: f64,
    pub covered_minutes: Minutes,
    pub coverage_percent: f64,
}

/// Display form of a plan segment, resolved against the seat snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentSummary {
    pub seat_id: String,
    pub seat_name: String,
    pub floor_name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: Minutes,
}

/// Display form of a whole plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub segments: Vec<SegmentSummary>,
    pub total_bookings: usize,
    pub total_minutes: Minutes,
    pub coverage_percent: u32,
    /// Transitions where the seat id actually changes; a plan may revisit a
    /// seat across non-adjacent segments without counting one.
    pub seat_changes: usize,
}

/// Atomic user selection: one slot on one seat for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: Ulid,
    pub seat_id: String,
    pub seat_name: String,
    pub date: NaiveDate,
    pub span: Span,
    pub email: String,
}

/// Maximal legal booking derived from contiguous cart selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsolidatedBooking {
    pub seat_id: String,
    pub seat_name: String,
    pub date: NaiveDate,
    pub span: Span,
    pub duration_minutes: Minutes,
    /// Every cart item merged into this booking, exactly once.
    pub source_slot_ids: Vec<Ulid>,
    pub email: String,
}

/// Why a booking failed, when the failure has a dedicated remediation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The service wants the email address verified before it will book.
    EmailConfirmationRequired,
    /// The run was cancelled before this booking was dispatched.
    Cancelled,
}

/// Outcome of one executed booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResult {
    pub booking: ConsolidatedBooking,
    pub succeeded: bool,
    pub message: String,
    pub error_kind: Option<FailureKind>,
}

/// Ordered outcome of one executor run; results match submission order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub results: Vec<BookingResult>,
}

impl RunReport {
    /// True when the caller may clear the selection.
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.succeeded)
    }

    pub fn failures(&self) -> impl Iterator<Item = &BookingResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hhmm_round_trip() {
        assert_eq!(minutes_from_hhmm("09:00"), Some(540));
        assert_eq!(minutes_from_hhmm("00:00"), Some(0));
        assert_eq!(minutes_from_hhmm("23:30"), Some(1410));
        assert_eq!(minutes_from_hhmm("24:00"), Some(1440));
        assert_eq!(hhmm_from_minutes(540), "09:00");
        assert_eq!(hhmm_from_minutes(5), "00:05");
        assert_eq!(hhmm_from_minutes(1410), "23:30");
    }

    #[test]
    fn hhmm_rejects_malformed() {
        assert_eq!(minutes_from_hhmm(""), None);
        assert_eq!(minutes_from_hhmm("0900"), None);
        assert_eq!(minutes_from_hhmm("9:75"), None);
        assert_eq!(minutes_from_hhmm("25:00"), None);
        assert_eq!(minutes_from_hhmm("24:30"), None);
        assert_eq!(minutes_from_hhmm("ab:cd"), None);
    }

    #[test]
    fn hhmm_accepts_unpadded_hour() {
        assert_eq!(minutes_from_hhmm("9:00"), Some(540));
    }

    #[test]
    fn span_basics() {
        let s = Span::new(540, 600);
        assert_eq!(s.duration_minutes(), 60);
        assert_eq!(s.start_hhmm(), "09:00");
        assert_eq!(s.end_hhmm(), "10:00");
    }

    #[test]
    fn span_overlap_is_half_open() {
        let a = Span::new(540, 600);
        let b = Span::new(600, 660);
        let c = Span::new(570, 630);
        assert!(!a.overlaps(&b)); // adjacent, not overlapping
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn sorted_slots_sorts_and_drops_malformed() {
        let seat = Seat {
            resource_id: "r1".into(),
            resource_name: "Seat 1".into(),
            floor_id: 7,
            floor_name: None,
            description: None,
            hours: vec![
                SlotRecord { hour: "10:00".into(), places_available: 1 },
                SlotRecord { hour: "bogus".into(), places_available: 1 },
                SlotRecord { hour: "09:00".into(), places_available: 0 },
            ],
        };
        assert_eq!(seat.sorted_slots(), vec![(540, 0), (600, 1)]);
    }

    #[test]
    fn reserved_keyword_match_is_case_insensitive() {
        let keywords = vec!["riservat".to_string(), "reserved".to_string()];
        let mut seat = Seat {
            resource_id: "r1".into(),
            resource_name: "Seat 1".into(),
            floor_id: 7,
            floor_name: None,
            description: Some("Posto RISERVATO ai docenti".into()),
            hours: vec![],
        };
        assert!(seat.is_reserved(&keywords));
        seat.description = Some("window seat".into());
        assert!(!seat.is_reserved(&keywords));
        seat.description = None;
        assert!(!seat.is_reserved(&keywords));
    }

    #[test]
    fn seat_deserializes_from_wire_shape() {
        let json = r#"{
            "resource_id": "c1a2",
            "resource_name": "E-101",
            "floor_id": 3,
            "floor_name": "Reading room",
            "description": null,
            "hours": [
                { "hour": "09:00", "places_available": 1 },
                { "hour": "09:30", "places_available": 0 }
            ]
        }"#;
        let seat: Seat = serde_json::from_str(json).unwrap();
        assert_eq!(seat.resource_name, "E-101");
        assert_eq!(seat.hours.len(), 2);
        assert_eq!(seat.hours[0].start_minutes(), Some(540));
    }

    #[test]
    fn run_report_success_and_failures() {
        let booking = ConsolidatedBooking {
            seat_id: "r1".into(),
            seat_name: "Seat 1".into(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            span: Span::new(540, 600),
            duration_minutes: 60,
            source_slot_ids: vec![Ulid::new()],
            email: "x@y.z".into(),
        };
        let ok = BookingResult {
            booking: booking.clone(),
            succeeded: true,
            message: "ok".into(),
            error_kind: None,
        };
        let bad = BookingResult {
            booking,
            succeeded: false,
            message: "rejected".into(),
            error_kind: None,
        };
        let report = RunReport { results: vec![ok.clone(), bad] };
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().count(), 1);
        let report = RunReport { results: vec![ok] };
        assert!(report.all_succeeded());
    }
}

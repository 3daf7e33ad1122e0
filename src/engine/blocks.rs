use crate::model::{Minutes, SLOT_MINUTES, Span};

// ── Availability Block Extraction ─────────────────────────────────

/// Contiguous bookable intervals for one seat within `window`, each capped
/// at `max_minutes`.
///
/// `slots` must be sorted ascending by start minute (see
/// `Seat::sorted_slots`). A slot is usable when its 30-minute span overlaps
/// the window and its capacity is above zero. Usable slots extend the open
/// interval only when strictly contiguous with it; an unusable slot, a hole
/// in the slot list, or the end of input closes the interval.
pub fn available_blocks(slots: &[(Minutes, u32)], window: Span, max_minutes: Minutes) -> Vec<Span> {
    let mut blocks = Vec::new();
    let mut open: Option<Span> = None;

    for &(start, capacity) in slots {
        if start >= window.end {
            break; // sorted input: nothing later can overlap
        }
        let slot_end = start + SLOT_MINUTES;
        if slot_end <= window.start {
            continue; // entirely before the window
        }
        if capacity == 0 {
            if let Some(raw) = open.take() {
                split_capped(raw, max_minutes, &mut blocks);
            }
            continue;
        }

        let clamped = Span::new(start.max(window.start), slot_end.min(window.end));
        open = match open.take() {
            Some(raw) if raw.end == clamped.start => Some(Span::new(raw.start, clamped.end)),
            Some(raw) => {
                split_capped(raw, max_minutes, &mut blocks);
                Some(clamped)
            }
            None => Some(clamped),
        };
    }

    if let Some(raw) = open {
        split_capped(raw, max_minutes, &mut blocks);
    }
    blocks
}

/// Split a raw interval into consecutive `max_minutes` chunks; the final
/// chunk may be shorter. Mirrors the reservation service's hard cap on a
/// single booking.
fn split_capped(raw: Span, max_minutes: Minutes, out: &mut Vec<Span>) {
    let mut start = raw.start;
    while start < raw.end {
        let end = raw.end.min(start + max_minutes);
        out.push(Span::new(start, end));
        start = end;
    }
}

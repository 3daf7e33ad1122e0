use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use dashmap::DashMap;
use ulid::{Generator, Ulid};

use crate::model::{CartItem, ConsolidatedBooking, Minutes, Span, minutes_from_hhmm};

#[derive(Debug)]
pub enum CartError {
    /// A slot time label failed to parse as `HH:MM`.
    BadTime(String),
    /// The slot's end does not come after its start.
    InvertedSlot { start: String, end: String },
    /// The exact same slot for the same seat and date is already selected.
    Duplicate,
}

impl std::fmt::Display for CartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartError::BadTime(label) => write!(f, "bad time label: {label:?}"),
            CartError::InvertedSlot { start, end } => {
                write!(f, "slot start {start} is not before end {end}")
            }
            CartError::Duplicate => write!(f, "slot is already in the cart"),
        }
    }
}

impl std::error::Error for CartError {}

/// A user slot selection as it arrives from the UI layer.
#[derive(Debug, Clone)]
pub struct Selection {
    pub seat_id: String,
    pub seat_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub email: String,
}

/// The selection store, the engine's only mutable shared state. The map
/// serializes individual mutations; callers keep mutations single-writer.
pub struct CartStore {
    items: DashMap<Ulid, CartItem>,
    /// Monotonic id source: ids sort in generation order even within one
    /// millisecond.
    ids: Mutex<Generator>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            ids: Mutex::new(Generator::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a selection. Rejects malformed times and duplicate slots.
    pub fn add(&self, selection: Selection) -> Result<Ulid, CartError> {
        let start = minutes_from_hhmm(&selection.start_time)
            .ok_or_else(|| CartError::BadTime(selection.start_time.clone()))?;
        let end = minutes_from_hhmm(&selection.end_time)
            .ok_or_else(|| CartError::BadTime(selection.end_time.clone()))?;
        if start >= end {
            return Err(CartError::InvertedSlot {
                start: selection.start_time,
                end: selection.end_time,
            });
        }
        let span = Span::new(start, end);

        let duplicate = self.items.iter().any(|item| {
            item.seat_id == selection.seat_id && item.date == selection.date && item.span == span
        });
        if duplicate {
            return Err(CartError::Duplicate);
        }

        let id = self
            .ids
            .lock()
            .expect("id generator lock")
            .generate()
            .unwrap_or_else(|_| Ulid::new());
        self.items.insert(
            id,
            CartItem {
                id,
                seat_id: selection.seat_id,
                seat_name: selection.seat_name,
                date: selection.date,
                span,
                email: selection.email,
            },
        );
        Ok(id)
    }

    pub fn remove(&self, id: &Ulid) -> Option<CartItem> {
        self.items.remove(id).map(|(_, item)| item)
    }

    pub fn clear(&self) {
        self.items.clear();
    }

    /// Current selections in insertion order (ulids sort by creation time).
    pub fn items(&self) -> Vec<CartItem> {
        let mut items: Vec<CartItem> = self.items.iter().map(|e| e.value().clone()).collect();
        items.sort_by_key(|item| item.id);
        items
    }

    /// Merge the current selection into the fewest legal bookings.
    pub fn consolidate(&self, max_minutes: Minutes) -> Vec<ConsolidatedBooking> {
        consolidate_items(&self.items(), max_minutes)
    }
}

/// Per seat and date, sort selections by start time and chunk strictly
/// contiguous slots up to `max_minutes`. Every item lands in exactly one
/// emitted booking; consolidation never drops a selection.
pub fn consolidate_items(items: &[CartItem], max_minutes: Minutes) -> Vec<ConsolidatedBooking> {
    let mut groups: BTreeMap<(&str, NaiveDate), Vec<&CartItem>> = BTreeMap::new();
    for item in items {
        groups
            .entry((item.seat_id.as_str(), item.date))
            .or_default()
            .push(item);
    }

    let mut bookings = Vec::new();
    for (_, mut group) in groups {
        group.sort_by_key(|item| item.span.start);

        let mut chunk: Vec<&CartItem> = Vec::new();
        for item in group {
            let extends = chunk.last().is_some_and(|last| {
                last.span.end == item.span.start
                    && chunk_duration(&chunk) + item.span.duration_minutes() <= max_minutes
            });
            if !extends && !chunk.is_empty() {
                bookings.push(close_chunk(&chunk));
                chunk.clear();
            }
            chunk.push(item);
        }
        if !chunk.is_empty() {
            bookings.push(close_chunk(&chunk));
        }
    }
    bookings
}

fn chunk_duration(chunk: &[&CartItem]) -> Minutes {
    chunk.iter().map(|item| item.span.duration_minutes()).sum()
}

fn close_chunk(chunk: &[&CartItem]) -> ConsolidatedBooking {
    let first = chunk.first().expect("chunk is never empty");
    let last = chunk.last().expect("chunk is never empty");
    ConsolidatedBooking {
        seat_id: first.seat_id.clone(),
        seat_name: first.seat_name.clone(),
        date: first.date,
        span: Span::new(first.span.start, last.span.end),
        duration_minutes: chunk_duration(chunk),
        source_slot_ids: chunk.iter().map(|item| item.id).collect(),
        email: first.email.clone(),
    }
}

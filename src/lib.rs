//! Booking optimization & execution engine for 30-minute study-seat
//! reservations.
//!
//! The pipeline: a seat snapshot (fetched and cached by the caller) goes
//! through [`engine::recommend`] to produce ranked multi-seat covering
//! plans; the user's selections land in a [`cart::CartStore`], are merged
//! into the fewest legal bookings by consolidation, and [`executor::run`]
//! executes those sequentially (paced, with failures isolated per booking)
//! against a [`reserve::ReservationClient`].

pub mod cart;
pub mod confirm;
pub mod engine;
pub mod executor;
pub mod model;
pub mod observability;
pub mod reserve;

pub use cart::{CartError, CartStore, Selection};
pub use engine::{PlanError, PlannerConfig, ScoreWeights, recommend, summarize};
pub use executor::{ExecutorConfig, Pacer, run};
pub use reserve::{ReservationClient, ReservationError, ReservationRequest};

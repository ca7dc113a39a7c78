//! Deterministic estimation engines
//!
//! Cost and timeline estimates are pure lookups over static tables - no
//! network, no caching, identical inputs always produce identical output.

mod cost;
mod timeline;

use thiserror::Error;

pub use cost::{estimate_cost, rate_for, CostEstimate, RateRange, RoomType, ScopeLevel};
pub use timeline::{calculate_timeline, timeline_for, timeline_reply};

/// Errors from the estimation engines
///
/// Unrecognized room/scope labels are not errors - they coerce to
/// documented fallbacks. Only caller-contract violations appear here.
#[derive(Debug, Error)]
pub enum EstimateError {
    #[error("Area must be a positive number of square feet, got {area}")]
    InvalidArea { area: i64 },

    #[error("Area of {area} sq ft is too large to estimate")]
    AreaTooLarge { area: i64 },
}

//! Renovation cost estimation
//!
//! A deterministic lookup engine: (room type, scope, area) -> cost range.
//! Unknown room types and scopes coerce silently to documented fallbacks so
//! that fuzzy free-text input never fails; only a non-positive area is a
//! caller error.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EstimateError;

/// Room categories with known rate tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Kitchen,
    Bathroom,
    Bedroom,
    LivingRoom,
}

impl RoomType {
    /// All room types, in rate-table order
    pub const ALL: [RoomType; 4] = [
        RoomType::Kitchen,
        RoomType::Bathroom,
        RoomType::Bedroom,
        RoomType::LivingRoom,
    ];

    /// Parse a free-text room label
    ///
    /// Lowercases, maps spaces to underscores, and falls back to
    /// `LivingRoom` for anything unrecognized.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(' ', "_");
        debug!(%label, %normalized, "RoomType::parse: called");
        match normalized.as_str() {
            "kitchen" => RoomType::Kitchen,
            "bathroom" => RoomType::Bathroom,
            "bedroom" => RoomType::Bedroom,
            "living_room" => RoomType::LivingRoom,
            _ => {
                debug!(%normalized, "RoomType::parse: unknown label, falling back to living_room");
                RoomType::LivingRoom
            }
        }
    }

    /// Canonical name as used in the rate table
    pub fn name(&self) -> &'static str {
        match self {
            RoomType::Kitchen => "kitchen",
            RoomType::Bathroom => "bathroom",
            RoomType::Bedroom => "bedroom",
            RoomType::LivingRoom => "living_room",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Renovation intensity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeLevel {
    Cosmetic,
    Moderate,
    Full,
    Luxury,
}

impl ScopeLevel {
    /// All scope levels, in increasing intensity order
    pub const ALL: [ScopeLevel; 4] = [
        ScopeLevel::Cosmetic,
        ScopeLevel::Moderate,
        ScopeLevel::Full,
        ScopeLevel::Luxury,
    ];

    /// Parse a free-text scope label, falling back to `Moderate`
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        debug!(%label, %normalized, "ScopeLevel::parse: called");
        match normalized.as_str() {
            "cosmetic" => ScopeLevel::Cosmetic,
            "moderate" => ScopeLevel::Moderate,
            "full" => ScopeLevel::Full,
            "luxury" => ScopeLevel::Luxury,
            _ => {
                debug!(%normalized, "ScopeLevel::parse: unknown label, falling back to moderate");
                ScopeLevel::Moderate
            }
        }
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            ScopeLevel::Cosmetic => "cosmetic",
            ScopeLevel::Moderate => "moderate",
            ScopeLevel::Full => "full",
            ScopeLevel::Luxury => "luxury",
        }
    }
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-square-foot rate range in USD
pub type RateRange = (i64, i64);

/// Look up the (low, high) USD/sqft rate for a room and scope
///
/// Total: every room type has a rate for every scope level, with
/// `low <= high` and rates non-decreasing from cosmetic to luxury.
pub fn rate_for(room: RoomType, scope: ScopeLevel) -> RateRange {
    use RoomType::*;
    use ScopeLevel::*;
    match (room, scope) {
        (Kitchen, Cosmetic) => (50, 100),
        (Kitchen, Moderate) => (150, 250),
        (Kitchen, Full) => (300, 500),
        (Kitchen, Luxury) => (600, 1200),
        (Bathroom, Cosmetic) => (75, 125),
        (Bathroom, Moderate) => (200, 350),
        (Bathroom, Full) => (400, 600),
        (Bathroom, Luxury) => (800, 1500),
        (Bedroom, Cosmetic) => (30, 60),
        (Bedroom, Moderate) => (75, 150),
        (Bedroom, Full) => (150, 300),
        (Bedroom, Luxury) => (400, 800),
        (LivingRoom, Cosmetic) => (40, 80),
        (LivingRoom, Moderate) => (100, 200),
        (LivingRoom, Full) => (200, 400),
        (LivingRoom, Luxury) => (500, 1000),
    }
}

/// A computed cost estimate
///
/// Immutable once computed. Keeps both the resolved enum values (for
/// downstream logic) and the caller's original room label (for display
/// fidelity - the user should see the words they typed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostEstimate {
    pub total_low: i64,
    pub total_high: i64,
    pub room_type: RoomType,
    pub scope: ScopeLevel,
    pub room_label: String,
    pub area: i64,
}

impl fmt::Display for CostEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Estimated Cost: ${} - ${} ({} {} renovation, ~{} sq ft)",
            format_thousands(self.total_low),
            format_thousands(self.total_high),
            self.scope,
            self.room_label,
            self.area
        )
    }
}

/// Estimate a renovation cost range
///
/// `room_type` and `scope` are fuzzy free-text labels; unrecognized values
/// coerce to `living_room` / `moderate`. Fails when `area <= 0` or when the
/// totals would not fit in an i64.
pub fn estimate_cost(room_type: &str, scope: &str, area: i64) -> Result<CostEstimate, EstimateError> {
    debug!(%room_type, %scope, %area, "estimate_cost: called");
    if area <= 0 {
        debug!(%area, "estimate_cost: invalid area");
        return Err(EstimateError::InvalidArea { area });
    }

    let room = RoomType::parse(room_type);
    let scope_level = ScopeLevel::parse(scope);
    let (low, high) = rate_for(room, scope_level);

    let total_low = low
        .checked_mul(area)
        .ok_or(EstimateError::AreaTooLarge { area })?;
    let total_high = high
        .checked_mul(area)
        .ok_or(EstimateError::AreaTooLarge { area })?;

    Ok(CostEstimate {
        total_low,
        total_high,
        room_type: room,
        scope: scope_level,
        room_label: room_type.trim().to_string(),
        area,
    })
}

/// Render an integer with comma thousands separators
fn format_thousands(n: i64) -> String {
    let digits = n.abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

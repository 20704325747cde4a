//! Fixed schedule data and application defaults.
//!
//! The cycle grid and event catalog are process-wide constants: the Arms Race
//! rotation is baked into the game and never changes at runtime. Everything
//! configurable lives in `armswatch.toml` and falls back to the defaults here.

use crate::schedule::EventKind::{
    self, CityBuilding, DroneBoost, HeroAdvancement, TechResearch, UnitProgression,
};

// ============================================================================
// Schedule Geometry
// ============================================================================

/// Days in one full Arms Race cycle.
pub const CYCLE_DAYS: usize = 7;

/// Event slots per cycle day.
pub const SLOTS_PER_DAY: usize = 6;

/// Length of one event slot in hours. Six slots cover the 24-hour day.
pub const SLOT_LENGTH_HOURS: i64 = 4;

/// Which event runs in each slot of each cycle day.
///
/// Rows are cycle days 1-7, columns are slots 0-5. The rotation steps one
/// event per day and wraps within the five-event catalog, which is why days
/// 6 and 7 repeat days 1 and 2.
pub const EVENT_CYCLE: [[EventKind; SLOTS_PER_DAY]; CYCLE_DAYS] = [
    [HeroAdvancement, CityBuilding, UnitProgression, TechResearch, DroneBoost, HeroAdvancement],
    [CityBuilding, UnitProgression, TechResearch, DroneBoost, HeroAdvancement, CityBuilding],
    [UnitProgression, TechResearch, DroneBoost, HeroAdvancement, CityBuilding, UnitProgression],
    [TechResearch, DroneBoost, HeroAdvancement, CityBuilding, UnitProgression, TechResearch],
    [DroneBoost, HeroAdvancement, CityBuilding, UnitProgression, TechResearch, DroneBoost],
    [HeroAdvancement, CityBuilding, UnitProgression, TechResearch, DroneBoost, HeroAdvancement],
    [CityBuilding, UnitProgression, TechResearch, DroneBoost, HeroAdvancement, CityBuilding],
];

// ============================================================================
// Schedule Anchoring
// ============================================================================

/// Calendar date of cycle day 1 at server-local midnight.
pub const DEFAULT_REFERENCE_DATE: &str = "2025-10-21";

/// The game server's fixed UTC offset in hours.
pub const DEFAULT_SERVER_UTC_OFFSET: i32 = -2;

/// Server offsets outside this range are rejected by config validation.
pub const MINIMUM_UTC_OFFSET: i32 = -12;
pub const MAXIMUM_UTC_OFFSET: i32 = 14;

// ============================================================================
// Display
// ============================================================================

/// Seconds between display refreshes.
pub const DEFAULT_UPDATE_INTERVAL: u64 = 1;
pub const MINIMUM_UPDATE_INTERVAL: u64 = 1;
pub const MAXIMUM_UPDATE_INTERVAL: u64 = 60;

/// Whether slot times are shown with AM/PM by default.
pub const DEFAULT_USE_12_HOUR_CLOCK: bool = false;

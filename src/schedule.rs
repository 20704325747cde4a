//! Arms Race cycle arithmetic.
//!
//! This module holds the core logic for mapping a wall-clock instant to the
//! state of the repeating Arms Race event cycle: which day of the 7-day cycle
//! is current on the game server, which of the day's six 4-hour slots is
//! running, what event occupies each slot, and how long the current slot has
//! left.
//!
//! ## Key Functionality
//! - **Cycle Day Derivation**: Whole-day difference from the reference instant,
//!   computed at server-local midnight rather than UTC midnight
//! - **Slot Derivation**: Translating the server's most recent midnight into
//!   the viewer's local clock and slicing the day into 4-hour slots
//! - **Status Assignment**: Completed/current/upcoming per slot, with signed
//!   time-remaining for countdown display
//!
//! Every query is a pure function of the supplied `now` and the scheduler's
//! two constants (reference instant and server UTC offset). Nothing is cached
//! and no query can fail: out-of-range intermediate values are clamped rather
//! than reported.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

use crate::constants::{CYCLE_DAYS, EVENT_CYCLE, SLOT_LENGTH_HOURS, SLOTS_PER_DAY};

/// One of the five Arms Race event types.
///
/// The cycle grid in [`crate::constants::EVENT_CYCLE`] assigns one of these to
/// each slot of each cycle day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    HeroAdvancement,
    CityBuilding,
    UnitProgression,
    TechResearch,
    DroneBoost,
}

impl EventKind {
    /// Returns the in-game display name for this event.
    pub fn name(self) -> &'static str {
        match self {
            Self::HeroAdvancement => "Hero Advancement",
            Self::CityBuilding => "City Building",
            Self::UnitProgression => "Unit Progression",
            Self::TechResearch => "Tech Research",
            Self::DroneBoost => "Drone Boost",
        }
    }
}

/// A 1-indexed day (1-7) within the repeating weekly cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDay(u8);

impl CycleDay {
    /// Create a cycle day from a 1-indexed value, rejecting anything outside 1-7.
    pub fn new(day: u8) -> Option<Self> {
        (1..=CYCLE_DAYS as u8).contains(&day).then_some(Self(day))
    }

    /// Map a signed whole-day distance from the reference instant onto the
    /// cycle. Works for instants before the reference as well: `-1` maps to
    /// day 7, `-8` also maps to day 7.
    pub fn from_day_count(days: i64) -> Self {
        Self(days.rem_euclid(CYCLE_DAYS as i64) as u8 + 1)
    }

    /// The 1-indexed day number (1-7).
    pub fn get(self) -> u8 {
        self.0
    }

    /// The six events scheduled for this cycle day, in slot order.
    pub fn events(self) -> &'static [EventKind; SLOTS_PER_DAY] {
        &EVENT_CYCLE[(self.0 - 1) as usize]
    }
}

impl std::fmt::Display for CycleDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.0, CYCLE_DAYS)
    }
}

/// A 0-indexed slot position (0-5) within a cycle day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotIndex(u8);

impl SlotIndex {
    pub const FIRST: SlotIndex = SlotIndex(0);
    pub const LAST: SlotIndex = SlotIndex(SLOTS_PER_DAY as u8 - 1);

    /// Create a slot index, rejecting anything outside 0-5.
    pub fn new(index: u8) -> Option<Self> {
        (index < SLOTS_PER_DAY as u8).then_some(Self(index))
    }

    /// The 0-indexed position.
    pub fn get(self) -> u8 {
        self.0
    }

    /// The 1-indexed slot number used in display output.
    pub fn number(self) -> u8 {
        self.0 + 1
    }

    /// Iterate over all six slot indices in order.
    pub fn all() -> impl Iterator<Item = SlotIndex> {
        (0..SLOTS_PER_DAY as u8).map(SlotIndex)
    }
}

/// Status of a slot relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// The slot's window has already passed today.
    Completed,
    /// The slot is running right now.
    Current,
    /// The slot's window has not started yet.
    Upcoming,
}

impl SlotStatus {
    /// The label shown in the events list, matching the in-game wording.
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "FINISHED",
            Self::Current => "ACTUAL",
            Self::Upcoming => "NEXT",
        }
    }
}

/// One fully derived slot of today's schedule.
///
/// `start` and `end` are expressed in the viewer's local clock (the offset of
/// the `now` the snapshot was computed from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub index: SlotIndex,
    pub event: EventKind,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub status: SlotStatus,
}

/// Today's complete schedule as seen at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySnapshot {
    pub cycle_day: CycleDay,
    pub slots: [Slot; SLOTS_PER_DAY],
    /// Index of the slot with [`SlotStatus::Current`]. Always present with the
    /// current slot geometry, but optional so a schedule without a running
    /// slot stays representable.
    pub current: Option<SlotIndex>,
}

impl DaySnapshot {
    /// The currently running slot, if any.
    pub fn current_slot(&self) -> Option<&Slot> {
        self.current.map(|index| &self.slots[index.get() as usize])
    }
}

/// Deterministic mapping from a wall-clock instant to Arms Race cycle state.
///
/// Holds two constants: the reference instant (cycle day 1 at midnight in the
/// server's fixed-offset timezone) and the server's UTC offset. Every method
/// takes `now` explicitly so callers and tests control the clock; the
/// application shell feeds it from [`crate::time_source`].
#[derive(Debug, Clone)]
pub struct EventScheduler {
    /// Cycle day 1 at 00:00 in the server's timezone.
    reference: DateTime<FixedOffset>,
    server_offset_hours: i32,
}

impl EventScheduler {
    /// Create a scheduler anchoring cycle day 1 at server-local midnight of
    /// `reference_date` in a server timezone of `server_offset_hours` (signed,
    /// whole hours, e.g. -2 for UTC-2).
    pub fn new(reference_date: NaiveDate, server_offset_hours: i32) -> Self {
        let offset = FixedOffset::east_opt(server_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
        let naive = reference_date.and_time(NaiveTime::MIN);
        let reference = match offset.from_local_datetime(&naive) {
            chrono::LocalResult::Single(instant) => instant,
            // Fixed offsets have no gaps or folds, so this arm never runs
            _ => DateTime::from_naive_utc_and_offset(
                naive - Duration::seconds(i64::from(offset.local_minus_utc())),
                offset,
            ),
        };
        Self {
            reference,
            server_offset_hours,
        }
    }

    /// The server's fixed UTC offset in hours.
    pub fn server_offset_hours(&self) -> i32 {
        self.server_offset_hours
    }

    /// The viewer's UTC offset in hours, taken from `now`'s embedded offset.
    /// Fractional for half-hour zones; positive means ahead of UTC.
    pub fn local_utc_offset_hours(&self, now: DateTime<FixedOffset>) -> f64 {
        f64::from(now.offset().local_minus_utc()) / 3600.0
    }

    /// Hours the viewer's clock leads the server's.
    pub fn offset_delta_hours(&self, now: DateTime<FixedOffset>) -> f64 {
        self.local_utc_offset_hours(now) - f64::from(self.server_offset_hours)
    }

    /// Same delta in whole minutes, exact for half-hour zones.
    fn offset_delta_minutes(&self, now: DateTime<FixedOffset>) -> i64 {
        i64::from(now.offset().local_minus_utc()) / 60 - i64::from(self.server_offset_hours) * 60
    }

    /// `now` reprojected into the server's fixed-offset timezone.
    pub fn server_now(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        now.with_timezone(&self.reference.timezone())
    }

    /// The current cycle day (1-7).
    ///
    /// Computed as the whole-day difference between the server-local calendar
    /// dates of `now` and of the reference instant, wrapped onto the cycle.
    pub fn current_cycle_day(&self, now: DateTime<FixedOffset>) -> CycleDay {
        let days = (self.server_now(now).date_naive() - self.reference.date_naive()).num_days();
        CycleDay::from_day_count(days)
    }

    /// The instant, in the viewer's local clock, of the server's most recent
    /// midnight.
    ///
    /// Takes the viewer's current-day midnight and shifts it by the offset
    /// delta. When the viewer is far enough ahead of the server the shifted
    /// midnight lands in the viewer's future; in that case the previous
    /// server day is the one still running, so back up 24 hours.
    pub fn local_day_start(&self, now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
        let naive_midnight = now.date_naive().and_time(NaiveTime::MIN);
        let midnight = match now.timezone().from_local_datetime(&naive_midnight) {
            chrono::LocalResult::Single(instant) => instant,
            // Unreachable for fixed offsets
            _ => DateTime::from_naive_utc_and_offset(
                naive_midnight - Duration::seconds(i64::from(now.offset().local_minus_utc())),
                now.timezone(),
            ),
        };
        let mut day_start = midnight + Duration::minutes(self.offset_delta_minutes(now));
        if day_start > now {
            day_start -= Duration::hours(24);
        }
        day_start
    }

    /// The slot (0-5) running at `now`.
    pub fn current_slot_index(&self, now: DateTime<FixedOffset>) -> SlotIndex {
        let elapsed = now - self.local_day_start(now);
        let index = elapsed.num_hours().div_euclid(SLOT_LENGTH_HOURS);
        // The clamp can only engage when the day-start adjustment leaves more
        // than 24h of elapsed day (extreme viewer/server offset combinations,
        // e.g. UTC+14 against UTC-12). Kept rather than trusted: if the upper
        // bound ever fires outside that case, local_day_start is wrong.
        SlotIndex(index.clamp(0, SlotIndex::LAST.get() as i64) as u8)
    }

    /// Start and end instants of slot `index`, in the viewer's local clock.
    pub fn slot_time_range(
        &self,
        index: SlotIndex,
        now: DateTime<FixedOffset>,
    ) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
        let day_start = self.local_day_start(now);
        let start = day_start + Duration::hours(i64::from(index.get()) * SLOT_LENGTH_HOURS);
        (start, start + Duration::hours(SLOT_LENGTH_HOURS))
    }

    /// Time until slot `index` ends. Negative once the slot has finished;
    /// callers render non-positive values as "Finished".
    pub fn time_remaining_in_slot(&self, index: SlotIndex, now: DateTime<FixedOffset>) -> Duration {
        let slot_end = self.local_day_start(now)
            + Duration::hours(i64::from(index.number()) * SLOT_LENGTH_HOURS);
        slot_end - now
    }

    /// Today's full schedule: cycle day, all six slots with event, time range
    /// and status, and the currently running slot.
    pub fn todays_schedule(&self, now: DateTime<FixedOffset>) -> DaySnapshot {
        let cycle_day = self.current_cycle_day(now);
        let current_index = self.current_slot_index(now);
        let events = cycle_day.events();

        let slots = std::array::from_fn(|i| {
            let index = SlotIndex(i as u8);
            let (start, end) = self.slot_time_range(index, now);
            let status = match index.cmp(&current_index) {
                std::cmp::Ordering::Less => SlotStatus::Completed,
                std::cmp::Ordering::Equal => SlotStatus::Current,
                std::cmp::Ordering::Greater => SlotStatus::Upcoming,
            };
            Slot {
                index,
                event: events[i],
                start,
                end,
                status,
            }
        });

        let current = slots
            .iter()
            .find(|slot| slot.status == SlotStatus::Current)
            .map(|slot| slot.index);

        DaySnapshot {
            cycle_day,
            slots,
            current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_day_wraps_in_both_directions() {
        assert_eq!(CycleDay::from_day_count(0).get(), 1);
        assert_eq!(CycleDay::from_day_count(6).get(), 7);
        assert_eq!(CycleDay::from_day_count(7).get(), 1);
        assert_eq!(CycleDay::from_day_count(9).get(), 3);
        assert_eq!(CycleDay::from_day_count(-1).get(), 7);
        assert_eq!(CycleDay::from_day_count(-8).get(), 7);
    }

    #[test]
    fn cycle_day_rejects_out_of_range() {
        assert!(CycleDay::new(0).is_none());
        assert!(CycleDay::new(8).is_none());
        assert!(CycleDay::new(1).is_some());
        assert!(CycleDay::new(7).is_some());
    }

    #[test]
    fn slot_index_bounds() {
        assert!(SlotIndex::new(5).is_some());
        assert!(SlotIndex::new(6).is_none());
        assert_eq!(SlotIndex::LAST.number(), 6);
        assert_eq!(SlotIndex::all().count(), SLOTS_PER_DAY);
    }

    #[test]
    fn event_names_match_catalog() {
        assert_eq!(EventKind::HeroAdvancement.name(), "Hero Advancement");
        assert_eq!(EventKind::UnitProgression.name(), "Unit Progression");
        assert_eq!(EventKind::DroneBoost.name(), "Drone Boost");
    }

    #[test]
    fn status_labels_match_display_wording() {
        assert_eq!(SlotStatus::Completed.label(), "FINISHED");
        assert_eq!(SlotStatus::Current.label(), "ACTUAL");
        assert_eq!(SlotStatus::Upcoming.label(), "NEXT");
    }
}

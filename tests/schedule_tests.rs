use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use proptest::prelude::*;

use armswatch::display::format_countdown;
use armswatch::schedule::{EventKind, EventScheduler, SlotIndex, SlotStatus};

// Helpers pinning the shipped schedule: cycle day 1 on 2025-10-21, server UTC-2.

fn scheduler() -> EventScheduler {
    EventScheduler::new(
        NaiveDate::from_ymd_opt(2025, 10, 21).expect("valid reference date"),
        -2,
    )
}

/// The reference instant as seen on the server's clock.
fn reference() -> DateTime<FixedOffset> {
    FixedOffset::west_opt(2 * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2025, 10, 21, 0, 0, 0)
        .single()
        .expect("valid instant")
}

/// A viewer clock at the given UTC offset (in seconds), observing `instant`.
fn viewed_at(instant: DateTime<FixedOffset>, offset_secs: i32) -> DateTime<FixedOffset> {
    instant.with_timezone(&FixedOffset::east_opt(offset_secs).expect("valid offset"))
}

proptest! {
    #[test]
    fn cycle_day_follows_mod_seven_arithmetic(d in -5000i64..5000) {
        let s = scheduler();
        let now = reference() + Duration::days(d) + Duration::hours(2);
        prop_assert_eq!(i64::from(s.current_cycle_day(now).get()), d.rem_euclid(7) + 1);
    }

    #[test]
    fn cycle_day_ignores_the_viewer_timezone(d in -400i64..400, offset_hours in -12i32..=14) {
        let s = scheduler();
        let instant = reference() + Duration::days(d) + Duration::hours(12);
        let from_server_clock = s.current_cycle_day(instant);
        let from_viewer_clock = s.current_cycle_day(viewed_at(instant, offset_hours * 3600));
        prop_assert_eq!(from_server_clock, from_viewer_clock);
    }
}

#[test]
fn two_hours_into_day_one() {
    let s = scheduler();
    let now = reference() + Duration::hours(2);

    assert_eq!(s.current_cycle_day(now).get(), 1);
    assert_eq!(s.current_slot_index(now), SlotIndex::FIRST);

    let snapshot = s.todays_schedule(now);
    assert_eq!(snapshot.slots[0].status, SlotStatus::Current);
    assert_eq!(
        s.time_remaining_in_slot(SlotIndex::FIRST, now),
        Duration::hours(2)
    );
}

#[test]
fn nine_days_in_is_cycle_day_three() {
    let s = scheduler();
    let now = reference() + Duration::days(9) + Duration::minutes(30);

    let snapshot = s.todays_schedule(now);
    assert_eq!(snapshot.cycle_day.get(), 3);
    // Day 3 rotation starts at the third catalog entry
    assert_eq!(snapshot.slots[0].event, EventKind::UnitProgression);
    let events: Vec<EventKind> = snapshot.slots.iter().map(|slot| slot.event).collect();
    assert_eq!(
        events,
        vec![
            EventKind::UnitProgression,
            EventKind::TechResearch,
            EventKind::DroneBoost,
            EventKind::HeroAdvancement,
            EventKind::CityBuilding,
            EventKind::UnitProgression,
        ]
    );
}

#[test]
fn statuses_partition_around_the_current_slot() {
    let s = scheduler();
    // 10:00 server time falls in slot 2 (08:00-12:00)
    let now = reference() + Duration::days(9) + Duration::hours(10);

    let snapshot = s.todays_schedule(now);
    let current = snapshot.current.expect("a slot is always running");
    assert_eq!(current.get(), 2);
    assert_eq!(
        snapshot.current_slot().expect("current slot").index,
        current
    );

    for slot in &snapshot.slots {
        let expected = match slot.index.cmp(&current) {
            std::cmp::Ordering::Less => SlotStatus::Completed,
            std::cmp::Ordering::Equal => SlotStatus::Current,
            std::cmp::Ordering::Greater => SlotStatus::Upcoming,
        };
        assert_eq!(slot.status, expected, "slot {}", slot.index.get());
    }
    let current_count = snapshot
        .slots
        .iter()
        .filter(|slot| slot.status == SlotStatus::Current)
        .count();
    assert_eq!(current_count, 1);
}

#[test]
fn remaining_time_shrinks_as_the_slot_runs() {
    let s = scheduler();
    let start = reference() + Duration::hours(4); // slot 1 begins

    assert_eq!(s.current_slot_index(start).get(), 1);
    assert_eq!(
        s.time_remaining_in_slot(SlotIndex::new(1).expect("valid"), start),
        Duration::hours(4)
    );

    let mut previous = Duration::hours(4) + Duration::seconds(1);
    for minutes in [0i64, 30, 90, 239] {
        let now = start + Duration::minutes(minutes);
        let remaining = s.time_remaining_in_slot(SlotIndex::new(1).expect("valid"), now);
        assert!(remaining > Duration::zero());
        assert!(remaining <= Duration::hours(4));
        assert!(remaining < previous);
        previous = remaining;
    }
}

#[test]
fn finished_slots_report_negative_time() {
    let s = scheduler();
    let now = reference() + Duration::hours(10);

    let remaining = s.time_remaining_in_slot(SlotIndex::FIRST, now);
    assert_eq!(remaining, Duration::hours(-6));
    assert_eq!(format_countdown(remaining), "Finished");
}

#[test]
fn queries_are_pure_functions_of_now() {
    let s = scheduler();
    let now = reference() + Duration::days(3) + Duration::hours(7);

    assert_eq!(s.todays_schedule(now), s.todays_schedule(now));
    assert_eq!(s.current_slot_index(now), s.current_slot_index(now));
    assert_eq!(s.local_day_start(now), s.local_day_start(now));
}

#[test]
fn half_hour_zones_keep_fractional_offsets() {
    let s = scheduler();
    // Viewer in a UTC+5:30 zone
    let now = viewed_at(reference() + Duration::hours(12), 5 * 3600 + 1800);

    assert_eq!(s.local_utc_offset_hours(now), 5.5);
    assert_eq!(s.offset_delta_hours(now), 7.5);
}

#[test]
fn day_start_rolls_back_when_shifted_midnight_is_in_the_future() {
    let s = scheduler();
    // Viewer at UTC+2 leads the server by 4h, so the server's midnight maps
    // to 04:00 on the viewer's clock. At 01:00 local the naive day start is
    // still ahead, and yesterday's server day is the one running.
    let now = FixedOffset::east_opt(2 * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2025, 10, 22, 1, 0, 0)
        .single()
        .expect("valid instant");

    let day_start = s.local_day_start(now);
    assert!(day_start <= now);
    assert_eq!(
        day_start,
        FixedOffset::east_opt(2 * 3600)
            .expect("valid offset")
            .with_ymd_and_hms(2025, 10, 21, 4, 0, 0)
            .single()
            .expect("valid instant")
    );
    // 21 hours into the server day puts us in the last slot
    assert_eq!(s.current_slot_index(now), SlotIndex::LAST);
}

#[test]
fn slot_ranges_tile_the_day_contiguously() {
    let s = scheduler();
    let now = viewed_at(reference() + Duration::hours(9), 3 * 3600);
    let day_start = s.local_day_start(now);

    let mut expected_start = day_start;
    for index in SlotIndex::all() {
        let (start, end) = s.slot_time_range(index, now);
        assert_eq!(start, expected_start);
        assert_eq!(end - start, Duration::hours(4));
        expected_start = end;
    }
    assert_eq!(expected_start, day_start + Duration::hours(24));
}

#[test]
fn day_boundary_starts_a_fresh_slot_zero() {
    let s = scheduler();
    let now = reference() + Duration::days(1);

    assert_eq!(s.current_cycle_day(now).get(), 2);
    assert_eq!(s.current_slot_index(now), SlotIndex::FIRST);
    assert_eq!(s.local_day_start(now), now);
    assert_eq!(
        s.time_remaining_in_slot(SlotIndex::FIRST, now),
        Duration::hours(4)
    );
}

#[test]
fn server_now_reprojects_without_moving_the_instant() {
    let s = scheduler();
    let now = viewed_at(reference() + Duration::hours(5), 9 * 3600);
    let server_now = s.server_now(now);

    assert_eq!(server_now, now); // same instant
    assert_eq!(server_now.offset().local_minus_utc(), -2 * 3600);
}

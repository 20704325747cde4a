//! Terminal rendering of the Arms Race schedule.
//!
//! Composes a full schedule frame (timezone line, date and cycle day, the
//! running event with its countdown, and the six-slot list) as a string, then
//! repaints it in place by moving the cursor back over the previous frame.
//! Composition is kept separate from painting so the formatting logic is
//! testable without a terminal.

use std::io::{Write, stdout};

use anyhow::Result;
use chrono::{DateTime, Duration, FixedOffset};
use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveToPreviousLine, Show},
    terminal::{Clear, ClearType},
};

use crate::config::Config;
use crate::schedule::{EventScheduler, Slot};

/// Widest catalog name ("Hero Advancement", 16 chars) plus breathing room.
const EVENT_NAME_WIDTH: usize = 18;

/// RAII guard that hides the cursor while the live display runs.
///
/// Errors are ignored in both directions: when stdout is not a terminal there
/// is simply no cursor to manage.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn new() -> Self {
        let _ = stdout().execute(Hide);
        Self
    }
}

impl Default for TerminalGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = stdout().execute(Show);
    }
}

/// Schedule frame renderer with in-place repaint.
pub struct Display {
    use_12_hour_clock: bool,
    previous_frame_lines: u16,
}

impl Display {
    pub fn new(config: &Config) -> Self {
        Self {
            use_12_hour_clock: config.use_12_hour_clock(),
            previous_frame_lines: 0,
        }
    }

    /// Compose and paint one frame for `now`, replacing the previous frame.
    pub fn render_frame(&mut self, scheduler: &EventScheduler, now: DateTime<FixedOffset>) -> Result<()> {
        let frame = self.compose_frame(scheduler, now);
        self.repaint(&frame)
    }

    /// Build the complete frame as a string.
    fn compose_frame(&self, scheduler: &EventScheduler, now: DateTime<FixedOffset>) -> String {
        let snapshot = scheduler.todays_schedule(now);
        let mut frame = String::new();

        frame.push_str(&format!(
            "Your time zone: {} • Server: {} • Time offset: {}\n",
            format_offset(scheduler.local_utc_offset_hours(now)),
            format_offset(f64::from(scheduler.server_offset_hours())),
            format_delta(scheduler.offset_delta_hours(now)),
        ));
        frame.push_str(&format!(
            "{} • Arms Race day {}\n\n",
            now.format("%A, %B %-d, %Y"),
            snapshot.cycle_day,
        ));

        match snapshot.current_slot() {
            Some(slot) => {
                let remaining = scheduler.time_remaining_in_slot(slot.index, now);
                frame.push_str(&format!("Current event: {}\n", slot.event.name()));
                frame.push_str(&format!("{}\n\n", format_countdown(remaining)));
            }
            None => frame.push_str("No event in progress\n\n"),
        }

        for slot in &snapshot.slots {
            frame.push_str(&self.format_slot_line(slot));
        }

        frame.push_str(&format!("\nLast update: {}\n", now.format("%H:%M:%S")));
        frame
    }

    fn format_slot_line(&self, slot: &Slot) -> String {
        format!(
            " {}  {:<width$} {} - {}   {}\n",
            slot.index.number(),
            slot.event.name(),
            self.format_clock(slot.start),
            self.format_clock(slot.end),
            slot.status.label(),
            width = EVENT_NAME_WIDTH,
        )
    }

    fn format_clock(&self, instant: DateTime<FixedOffset>) -> String {
        if self.use_12_hour_clock {
            instant.format("%I:%M %p").to_string()
        } else {
            instant.format("%H:%M").to_string()
        }
    }

    /// Move back over the previous frame, clear it, and write the new one.
    fn repaint(&mut self, frame: &str) -> Result<()> {
        let mut out = stdout();
        if self.previous_frame_lines > 0 {
            out.queue(MoveToPreviousLine(self.previous_frame_lines))?;
            out.queue(Clear(ClearType::FromCursorDown))?;
        }
        out.write_all(frame.as_bytes())?;
        out.flush()?;
        self.previous_frame_lines = frame.lines().count() as u16;
        Ok(())
    }
}

/// Format a UTC offset in hours for display, e.g. "UTC+2", "UTC-2", "UTC+5.5".
pub fn format_offset(hours: f64) -> String {
    let sign = if hours >= 0.0 { "+" } else { "" };
    if hours.fract() == 0.0 {
        format!("UTC{sign}{}", hours as i64)
    } else {
        format!("UTC{sign}{hours}")
    }
}

/// Format the viewer-to-server offset delta, e.g. "+4h", "-1.5h", "0h".
pub fn format_delta(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{:+}h", hours as i64)
    } else {
        format!("{hours:+}h")
    }
}

/// Format the time remaining in a slot, e.g. "Ending in 1h 05m".
///
/// Non-positive durations mean the slot is already over and render as
/// "Finished".
pub fn format_countdown(remaining: Duration) -> String {
    if remaining <= Duration::zero() {
        return "Finished".to_string();
    }
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    format!("Ending in {hours}h {minutes:02}m")
}

// 🕐 Clock Module - Live wall-clock display with timezone selection
// Repaints once per second from the host tick; timezone identifiers are
// validated against the IANA database before use.

use crate::prefs::{PreferenceStore, KEY_PREFERRED_TIMEZONE};
use crate::view::{Control, PageView};
use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use chrono_tz::Tz;

/// Sentinel selection meaning "use the viewer's system-resolved zone".
pub const LOCAL_TIMEZONE: &str = "local";

/// en-US display format: two-digit 12-hour clock with AM/PM.
const CLOCK_FORMAT: &str = "%I:%M:%S %p";

/// Zones offered by the selector, local sentinel first. Every entry parses
/// against the IANA database, so selection can never fail at format time.
pub fn available_timezones() -> &'static [&'static str] {
    &[
        LOCAL_TIMEZONE,
        "America/New_York",
        "America/Chicago",
        "America/Denver",
        "America/Los_Angeles",
        "America/Mexico_City",
        "America/Sao_Paulo",
        "Europe/London",
        "Europe/Paris",
        "Europe/Berlin",
        "Asia/Dubai",
        "Asia/Kolkata",
        "Asia/Shanghai",
        "Asia/Tokyo",
        "Australia/Sydney",
        "UTC",
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimezoneChoice {
    /// System-resolved zone
    Local,
    /// Explicit IANA zone
    Named(Tz),
}

impl TimezoneChoice {
    /// Parses a selection string, rejecting identifiers the IANA database
    /// does not know instead of letting formatting fail later.
    pub fn parse(selection: &str) -> Result<Self> {
        if selection == LOCAL_TIMEZONE {
            return Ok(TimezoneChoice::Local);
        }
        selection
            .parse::<Tz>()
            .map(TimezoneChoice::Named)
            .map_err(|_| anyhow!("Unknown timezone identifier: {}", selection))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimezoneChoice::Local => LOCAL_TIMEZONE,
            TimezoneChoice::Named(tz) => tz.name(),
        }
    }
}

pub struct ClockModule {
    enabled: bool,
    choice: TimezoneChoice,
}

impl ClockModule {
    /// Restores a persisted timezone selection into the selector when one
    /// exists, then paints once. With no selector on the page the module is
    /// inert: no restore, no painting, no error.
    pub fn init(
        store: &dyn PreferenceStore,
        view: &mut dyn PageView,
        now: DateTime<Utc>,
    ) -> Self {
        if !view.has_control(Control::TimezoneSelector) {
            return ClockModule {
                enabled: false,
                choice: TimezoneChoice::Local,
            };
        }

        // A stored identifier that no longer parses falls back to local
        let choice = store
            .get(KEY_PREFERRED_TIMEZONE)
            .and_then(|saved| TimezoneChoice::parse(&saved).ok())
            .unwrap_or(TimezoneChoice::Local);
        view.set_selection(Control::TimezoneSelector, choice.as_str());

        let module = ClockModule {
            enabled: true,
            choice,
        };
        module.update_clock(view, now);
        module
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn choice(&self) -> TimezoneChoice {
        self.choice
    }

    /// Formats the instant in the effective timezone.
    pub fn format_time(&self, now: DateTime<Utc>) -> String {
        match self.choice {
            TimezoneChoice::Local => now.with_timezone(&Local).format(CLOCK_FORMAT).to_string(),
            TimezoneChoice::Named(tz) => now.with_timezone(&tz).format(CLOCK_FORMAT).to_string(),
        }
    }

    /// Writes the formatted current instant into the clock display. Called
    /// once per second by the host loop for the life of the page.
    pub fn update_clock(&self, view: &mut dyn PageView, now: DateTime<Utc>) {
        if !self.enabled {
            return;
        }
        view.set_clock_text(&self.format_time(now));
    }

    /// Persists the selection and repaints immediately. Invalid identifiers
    /// are rejected without touching the store or the display.
    pub fn on_timezone_change(
        &mut self,
        selection: &str,
        store: &mut dyn PreferenceStore,
        view: &mut dyn PageView,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let choice = TimezoneChoice::parse(selection)?;
        store.set(KEY_PREFERRED_TIMEZONE, selection)?;
        view.set_selection(Control::TimezoneSelector, selection);
        self.choice = choice;
        self.update_clock(view, now);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

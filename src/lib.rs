// Registration Kiosk - Core Library
// Exposes the feature modules for use in the TUI, CLI, and tests

pub mod clock;
pub mod palette;
pub mod prefs;
pub mod registration;
pub mod theme;
pub mod view;

// Re-export commonly used types
pub use clock::{available_timezones, ClockModule, TimezoneChoice, LOCAL_TIMEZONE};
pub use palette::{available_palettes, PaletteModule, DEFAULT_PALETTE};
pub use prefs::{
    setup_preferences, MemoryPrefs, PreferenceStore, PreferencesSnapshot, SqlitePrefs,
    KEY_COLOR_THEME, KEY_PREFERRED_TIMEZONE, KEY_THEME,
};
pub use registration::{
    available_roles, RegistrationForm, RegistrationValidator, SubmissionOutcome, ValidationError,
};
pub use theme::{ThemeMode, ThemeModule};
pub use view::{Control, PageView, ViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

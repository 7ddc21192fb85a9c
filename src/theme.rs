// 🌗 Theme Module - Light/dark mode toggle with persisted preference

use crate::prefs::{PreferenceStore, KEY_THEME};
use crate::view::{Control, PageView};
use anyhow::Result;

/// The two mutually exclusive visual modes. Flipping is total; there is no
/// third state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn flipped(&self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// Anything that is not "dark" reads as light, matching the default.
    pub fn from_class(class: &str) -> Self {
        if class == "dark" {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }
}

pub struct ThemeModule {
    enabled: bool,
    mode: ThemeMode,
}

impl ThemeModule {
    /// Restores the persisted mode (default light) and applies it. Inert
    /// when the toggle control is missing from the page.
    pub fn init(store: &mut dyn PreferenceStore, view: &mut dyn PageView) -> Result<Self> {
        if !view.has_control(Control::ThemeToggle) {
            return Ok(ThemeModule {
                enabled: false,
                mode: ThemeMode::Light,
            });
        }

        let saved = store
            .get(KEY_THEME)
            .map(|class| ThemeMode::from_class(&class))
            .unwrap_or(ThemeMode::Light);

        let mut module = ThemeModule {
            enabled: true,
            mode: saved,
        };
        module.set_theme(saved, store, view)?;
        Ok(module)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Applies the mode to the page and persists it.
    pub fn set_theme(
        &mut self,
        mode: ThemeMode,
        store: &mut dyn PreferenceStore,
        view: &mut dyn PageView,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        view.set_style_class(mode.as_str());
        store.set(KEY_THEME, mode.as_str())?;
        self.mode = mode;
        Ok(())
    }

    /// Flips whatever mode the page currently shows.
    pub fn on_toggle(
        &mut self,
        store: &mut dyn PreferenceStore,
        view: &mut dyn PageView,
    ) -> Result<ThemeMode> {
        let next = ThemeMode::from_class(view.style_class()).flipped();
        self.set_theme(next, store, view)?;
        Ok(next)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryPrefs;
    use crate::view::ViewState;

    #[test]
    fn test_init_defaults_to_light() {
        let mut store = MemoryPrefs::new();
        let mut view = ViewState::new();
        let module = ThemeModule::init(&mut store, &mut view).unwrap();

        assert_eq!(module.mode(), ThemeMode::Light);
        assert_eq!(view.style_class(), "light");
        // Applying on init also persists, like the original setTheme call
        assert_eq!(store.get(KEY_THEME).as_deref(), Some("light"));
    }

    #[test]
    fn test_init_restores_persisted_dark() {
        let mut store = MemoryPrefs::new();
        store.set(KEY_THEME, "dark").unwrap();
        let mut view = ViewState::new();
        let module = ThemeModule::init(&mut store, &mut view).unwrap();

        assert_eq!(module.mode(), ThemeMode::Dark);
        assert_eq!(view.style_class(), "dark");
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let mut store = MemoryPrefs::new();
        let mut view = ViewState::new();
        let mut module = ThemeModule::init(&mut store, &mut view).unwrap();

        let next = module.on_toggle(&mut store, &mut view).unwrap();
        assert_eq!(next, ThemeMode::Dark);
        assert_eq!(view.style_class(), "dark");
        assert_eq!(store.get(KEY_THEME).as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_twice_is_involution() {
        let mut store = MemoryPrefs::new();
        let mut view = ViewState::new();
        let mut module = ThemeModule::init(&mut store, &mut view).unwrap();

        let original = module.mode();
        module.on_toggle(&mut store, &mut view).unwrap();
        module.on_toggle(&mut store, &mut view).unwrap();
        assert_eq!(module.mode(), original);
        assert_eq!(view.style_class(), original.as_str());
    }

    #[test]
    fn test_mode_is_always_exactly_one_of_the_pair() {
        assert_eq!(ThemeMode::from_class("light"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_class("dark"), ThemeMode::Dark);
        // Unrecognized classifications collapse to the default
        assert_eq!(ThemeMode::from_class("sepia"), ThemeMode::Light);
        assert_eq!(ThemeMode::from_class(""), ThemeMode::Light);
    }

    #[test]
    fn test_missing_toggle_makes_module_inert() {
        let mut store = MemoryPrefs::new();
        let mut view = ViewState::without_controls();
        let mut module = ThemeModule::init(&mut store, &mut view).unwrap();

        assert!(!module.enabled());
        assert_eq!(store.get(KEY_THEME), None);

        module
            .set_theme(ThemeMode::Dark, &mut store, &mut view)
            .unwrap();
        assert_eq!(store.get(KEY_THEME), None);
    }
}

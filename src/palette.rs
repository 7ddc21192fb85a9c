// 🎨 Color Theme Module - Named palette selection, orthogonal to light/dark

use crate::prefs::{PreferenceStore, KEY_COLOR_THEME};
use crate::view::{Control, PageView};
use anyhow::Result;

pub const DEFAULT_PALETTE: &str = "default";

/// Palettes offered by the selector. The persisted identifier is an open
/// set; anything outside this list still round-trips verbatim and the
/// renderer falls back to default colors.
pub fn available_palettes() -> &'static [&'static str] {
    &["default", "ocean", "forest", "sunset"]
}

pub struct PaletteModule {
    enabled: bool,
    palette: String,
}

impl PaletteModule {
    /// Restores the persisted palette name (default "default") and applies
    /// it to both the page attribute and the selector's displayed value.
    /// Inert when the selector is missing. No store write on init.
    pub fn init(store: &dyn PreferenceStore, view: &mut dyn PageView) -> Self {
        if !view.has_control(Control::PaletteSelector) {
            return PaletteModule {
                enabled: false,
                palette: DEFAULT_PALETTE.to_string(),
            };
        }

        let saved = store
            .get(KEY_COLOR_THEME)
            .unwrap_or_else(|| DEFAULT_PALETTE.to_string());
        view.set_selection(Control::PaletteSelector, &saved);
        view.set_palette_attr(&saved);

        PaletteModule {
            enabled: true,
            palette: saved,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn palette(&self) -> &str {
        &self.palette
    }

    /// Applies the selection and persists it verbatim.
    pub fn on_palette_change(
        &mut self,
        selection: &str,
        store: &mut dyn PreferenceStore,
        view: &mut dyn PageView,
    ) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        view.set_palette_attr(selection);
        view.set_selection(Control::PaletteSelector, selection);
        store.set(KEY_COLOR_THEME, selection)?;
        self.palette = selection.to_string();
        Ok(())
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
    fn test_init_defaults_to_default_palette() {
        let store = MemoryPrefs::new();
        let mut view = ViewState::new();
        let module = PaletteModule::init(&store, &mut view);

        assert_eq!(module.palette(), "default");
        assert_eq!(view.palette_attr(), "default");
        // Init only applies; it never writes the store
        assert_eq!(store.get(KEY_COLOR_THEME), None);
    }

    #[test]
    fn test_init_restores_selector_and_attribute() {
        let mut store = MemoryPrefs::new();
        store.set(KEY_COLOR_THEME, "forest").unwrap();
        let mut view = ViewState::new();
        let module = PaletteModule::init(&store, &mut view);

        assert_eq!(module.palette(), "forest");
        assert_eq!(view.palette_attr(), "forest");
        assert_eq!(
            view.selection(Control::PaletteSelector).as_deref(),
            Some("forest")
        );
    }

    #[test]
    fn test_change_persists_exact_identifier() {
        let mut store = MemoryPrefs::new();
        let mut view = ViewState::new();
        let mut module = PaletteModule::init(&store, &mut view);

        module
            .on_palette_change("ocean", &mut store, &mut view)
            .unwrap();
        assert_eq!(store.get(KEY_COLOR_THEME).as_deref(), Some("ocean"));
        assert_eq!(view.palette_attr(), "ocean");
    }

    #[test]
    fn test_unknown_identifier_round_trips_verbatim() {
        let mut store = MemoryPrefs::new();
        let mut view = ViewState::new();
        let mut module = PaletteModule::init(&store, &mut view);

        module
            .on_palette_change("solarized-ultraviolet", &mut store, &mut view)
            .unwrap();
        assert_eq!(
            store.get(KEY_COLOR_THEME).as_deref(),
            Some("solarized-ultraviolet")
        );

        // A fresh page restores the identical string
        let mut fresh_view = ViewState::new();
        let restored = PaletteModule::init(&store, &mut fresh_view);
        assert_eq!(restored.palette(), "solarized-ultraviolet");
        assert_eq!(fresh_view.palette_attr(), "solarized-ultraviolet");
    }

    #[test]
    fn test_missing_selector_makes_module_inert() {
        let mut store = MemoryPrefs::new();
        store.set(KEY_COLOR_THEME, "sunset").unwrap();
        let mut view = ViewState::without_controls();
        let mut module = PaletteModule::init(&store, &mut view);

        assert!(!module.enabled());
        assert_eq!(view.palette_attr(), "default");

        module
            .on_palette_change("ocean", &mut store, &mut view)
            .unwrap();
        assert_eq!(store.get(KEY_COLOR_THEME).as_deref(), Some("sunset"));
    }
}

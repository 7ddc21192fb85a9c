// 🖼️ View Seam - What the feature modules see of the page
// Each module talks to the page through this trait only, so tests run
// against plain state and the TUI renders from the same state.

use crate::palette::DEFAULT_PALETTE;
use crate::theme::ThemeMode;

/// Page controls a module may depend on. A control can be absent, in which
/// case the dependent module stays inert for the life of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    TimezoneSelector,
    ThemeToggle,
    PaletteSelector,
}

pub trait PageView {
    /// Overwrites the clock display text.
    fn set_clock_text(&mut self, text: &str);

    fn clock_text(&self) -> &str;

    fn has_control(&self, control: Control) -> bool;

    /// Current displayed value of a selector, or None when the control is
    /// absent from the page.
    fn selection(&self, control: Control) -> Option<String>;

    /// No-op when the control is absent.
    fn set_selection(&mut self, control: Control, value: &str);

    /// Top-level style classification ("light" / "dark").
    fn style_class(&self) -> &str;

    fn set_style_class(&mut self, class: &str);

    /// Style-scoped color palette attribute.
    fn palette_attr(&self) -> &str;

    fn set_palette_attr(&mut self, name: &str);
}

// ============================================================================
// CONCRETE VIEW STATE
// ============================================================================

#[derive(Debug, Clone)]
struct SelectorControl {
    value: String,
}

/// In-memory page state. The TUI renders from it; tests assert against it.
#[derive(Debug, Clone)]
pub struct ViewState {
    clock_text: String,
    timezone_selector: Option<SelectorControl>,
    theme_toggle_present: bool,
    palette_selector: Option<SelectorControl>,
    style_class: String,
    palette_attr: String,
}

impl ViewState {
    /// A page with every control present.
    pub fn new() -> Self {
        ViewState {
            clock_text: String::new(),
            timezone_selector: Some(SelectorControl {
                value: crate::clock::LOCAL_TIMEZONE.to_string(),
            }),
            theme_toggle_present: true,
            palette_selector: Some(SelectorControl {
                value: DEFAULT_PALETTE.to_string(),
            }),
            style_class: ThemeMode::Light.as_str().to_string(),
            palette_attr: DEFAULT_PALETTE.to_string(),
        }
    }

    /// A page with no optional controls; every dependent module is inert.
    pub fn without_controls() -> Self {
        ViewState {
            timezone_selector: None,
            theme_toggle_present: false,
            palette_selector: None,
            ..ViewState::new()
        }
    }

    fn selector(&self, control: Control) -> Option<&SelectorControl> {
        match control {
            Control::TimezoneSelector => self.timezone_selector.as_ref(),
            Control::PaletteSelector => self.palette_selector.as_ref(),
            Control::ThemeToggle => None,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView for ViewState {
    fn set_clock_text(&mut self, text: &str) {
        self.clock_text = text.to_string();
    }

    fn clock_text(&self) -> &str {
        &self.clock_text
    }

    fn has_control(&self, control: Control) -> bool {
        match control {
            Control::TimezoneSelector => self.timezone_selector.is_some(),
            Control::ThemeToggle => self.theme_toggle_present,
            Control::PaletteSelector => self.palette_selector.is_some(),
        }
    }

    fn selection(&self, control: Control) -> Option<String> {
        self.selector(control).map(|c| c.value.clone())
    }

    fn set_selection(&mut self, control: Control, value: &str) {
        let selector = match control {
            Control::TimezoneSelector => self.timezone_selector.as_mut(),
            Control::PaletteSelector => self.palette_selector.as_mut(),
            Control::ThemeToggle => None,
        };
        if let Some(selector) = selector {
            selector.value = value.to_string();
        }
    }

    fn style_class(&self) -> &str {
        &self.style_class
    }

    fn set_style_class(&mut self, class: &str) {
        self.style_class = class.to_string();
    }

    fn palette_attr(&self) -> &str {
        &self.palette_attr
    }

    fn set_palette_attr(&mut self, name: &str) {
        self.palette_attr = name.to_string();
    }
}

// ============================================================================
// TESTS
// ============================================================================

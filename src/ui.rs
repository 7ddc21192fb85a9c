use anyhow::Result;
use chrono::{Local, Utc};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

use registration_kiosk::clock::{available_timezones, ClockModule};
use registration_kiosk::palette::{available_palettes, PaletteModule};
use registration_kiosk::prefs::PreferenceStore;
use registration_kiosk::registration::{
    available_roles, RegistrationForm, RegistrationValidator,
};
use registration_kiosk::theme::{ThemeMode, ThemeModule};
use registration_kiosk::view::{PageView, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Clock,
    Appearance,
    Register,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Clock => Page::Appearance,
            Page::Appearance => Page::Register,
            Page::Register => Page::Clock,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Page::Clock => Page::Register,
            Page::Appearance => Page::Clock,
            Page::Register => Page::Appearance,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Clock => "Clock",
            Page::Appearance => "Appearance",
            Page::Register => "Register",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Username,
    Email,
    DateOfBirth,
    Phone,
    Password,
    ConfirmPassword,
    Role,
    Submit,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::Name,
        FormField::Username,
        FormField::Email,
        FormField::DateOfBirth,
        FormField::Phone,
        FormField::Password,
        FormField::ConfirmPassword,
        FormField::Role,
        FormField::Submit,
    ];

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let i = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(&self) -> &str {
        match self {
            FormField::Name => "Name",
            FormField::Username => "Username",
            FormField::Email => "Email",
            FormField::DateOfBirth => "Date of birth (YYYY-MM-DD)",
            FormField::Phone => "Phone",
            FormField::Password => "Password",
            FormField::ConfirmPassword => "Confirm password",
            FormField::Role => "Role",
            FormField::Submit => "Register",
        }
    }
}

pub struct App<S: PreferenceStore> {
    store: S,
    view: ViewState,
    clock: ClockModule,
    theme: ThemeModule,
    palette: PaletteModule,
    validator: RegistrationValidator,
    form: RegistrationForm,
    current_page: Page,
    tz_index: usize,
    palette_index: usize,
    active_field: FormField,
    role_index: usize,
    /// Blocking notification; input goes nowhere else while open
    modal: Option<String>,
}

impl<S: PreferenceStore> App<S> {
    pub fn new(store: S) -> Result<Self> {
        let mut store = store;
        let mut view = ViewState::new();

        let clock = ClockModule::init(&store, &mut view, Utc::now());
        let theme = ThemeModule::init(&mut store, &mut view)?;
        let palette = PaletteModule::init(&store, &mut view);

        let tz_index = available_timezones()
            .iter()
            .position(|tz| *tz == clock.choice().as_str())
            .unwrap_or(0);
        let palette_index = available_palettes()
            .iter()
            .position(|p| *p == palette.palette())
            .unwrap_or(0);

        Ok(App {
            store,
            view,
            clock,
            theme,
            palette,
            validator: RegistrationValidator::new(),
            form: RegistrationForm::default(),
            current_page: Page::Clock,
            tz_index,
            palette_index,
            active_field: FormField::Name,
            role_index: 0,
            modal: None,
        })
    }

    pub fn on_tick(&mut self) {
        self.clock.update_clock(&mut self.view, Utc::now());
    }

    pub fn toggle_theme(&mut self) -> Result<()> {
        self.theme.on_toggle(&mut self.store, &mut self.view)?;
        Ok(())
    }

    fn apply_timezone(&mut self) -> Result<()> {
        let selection = available_timezones()[self.tz_index];
        self.clock
            .on_timezone_change(selection, &mut self.store, &mut self.view, Utc::now())
    }

    fn apply_palette(&mut self) -> Result<()> {
        let selection = available_palettes()[self.palette_index];
        self.palette
            .on_palette_change(selection, &mut self.store, &mut self.view)
    }

    fn submit_form(&mut self) {
        let today = Local::now().date_naive();
        let outcome = self.validator.submit(&mut self.form, today);
        if outcome.is_accepted() {
            self.active_field = FormField::Name;
            self.role_index = 0;
        }
        self.modal = Some(outcome.report());
    }

    fn cycle_role(&mut self, forward: bool) {
        let roles = available_roles();
        self.role_index = if forward {
            (self.role_index + 1) % roles.len()
        } else {
            (self.role_index + roles.len() - 1) % roles.len()
        };
        self.form.role = roles[self.role_index].to_string();
    }

    fn active_text_field(&mut self) -> Option<&mut String> {
        match self.active_field {
            FormField::Name => Some(&mut self.form.name),
            FormField::Username => Some(&mut self.form.username),
            FormField::Email => Some(&mut self.form.email),
            FormField::DateOfBirth => Some(&mut self.form.date_of_birth),
            FormField::Phone => Some(&mut self.form.phone),
            FormField::Password => Some(&mut self.form.password),
            FormField::ConfirmPassword => Some(&mut self.form.confirm_password),
            FormField::Role | FormField::Submit => None,
        }
    }
}

pub fn run_ui<S: PreferenceStore>(app: &mut App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: PreferenceStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<()> {
    // The clock repaints on this cadence for the life of the page
    let tick_rate = Duration::from_millis(1000);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Returns true when the app should quit.
fn handle_key<S: PreferenceStore>(app: &mut App<S>, key: KeyEvent) -> Result<bool> {
    // An open notification blocks everything until dismissed
    if app.modal.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.modal = None;
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => return Ok(true),
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.toggle_theme()?;
            return Ok(false);
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.current_page = app.current_page.previous();
            } else {
                app.current_page = app.current_page.next();
            }
            return Ok(false);
        }
        KeyCode::BackTab => {
            app.current_page = app.current_page.previous();
            return Ok(false);
        }
        _ => {}
    }

    match app.current_page {
        Page::Clock => match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('t') => app.toggle_theme()?,
            KeyCode::Down | KeyCode::Char('j') => {
                app.tz_index = (app.tz_index + 1) % available_timezones().len();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = available_timezones().len();
                app.tz_index = (app.tz_index + len - 1) % len;
            }
            KeyCode::Enter => app.apply_timezone()?,
            _ => {}
        },
        Page::Appearance => match key.code {
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Char('t') => app.toggle_theme()?,
            KeyCode::Down | KeyCode::Char('j') => {
                app.palette_index = (app.palette_index + 1) % available_palettes().len();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let len = available_palettes().len();
                app.palette_index = (app.palette_index + len - 1) % len;
            }
            KeyCode::Enter => app.apply_palette()?,
            _ => {}
        },
        Page::Register => match key.code {
            KeyCode::Down => app.active_field = app.active_field.next(),
            KeyCode::Up => app.active_field = app.active_field.previous(),
            KeyCode::Left if app.active_field == FormField::Role => app.cycle_role(false),
            KeyCode::Right if app.active_field == FormField::Role => app.cycle_role(true),
            KeyCode::Enter => {
                if app.active_field == FormField::Submit {
                    app.submit_form();
                } else {
                    app.active_field = app.active_field.next();
                }
            }
            KeyCode::Backspace => {
                if let Some(value) = app.active_text_field() {
                    value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(value) = app.active_text_field() {
                    value.push(c);
                }
            }
            _ => {}
        },
    }

    Ok(false)
}

// ============================================================================
// RENDERING
// ============================================================================

fn accent_color(palette_attr: &str) -> Color {
    match palette_attr {
        "ocean" => Color::Cyan,
        "forest" => Color::Green,
        "sunset" => Color::Magenta,
        _ => Color::Yellow,
    }
}

fn base_style(mode: ThemeMode) -> Style {
    match mode {
        ThemeMode::Dark => Style::default().fg(Color::White).bg(Color::Black),
        ThemeMode::Light => Style::default().fg(Color::Black).bg(Color::White),
    }
}

fn ui<S: PreferenceStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    let mode = ThemeMode::from_class(app.view.style_class());
    f.render_widget(
        Block::default().style(base_style(mode)),
        f.size(),
    );

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Clock => render_clock_page(f, chunks[1], app),
        Page::Appearance => render_appearance_page(f, chunks[1], app),
        Page::Register => render_register_page(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);

    if let Some(message) = &app.modal {
        render_modal(f, message, app);
    }
}

fn render_header<S: PreferenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let accent = accent_color(app.view.palette_attr());
    let pages = [Page::Clock, Page::Appearance, Page::Register];

    let mut tab_spans = vec![];
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }

        let style = if *page == app.current_page {
            Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        app.view.clock_text().to_string(),
        Style::default().fg(accent),
    ));
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} / {}", app.view.style_class(), app.view.palette_attr()),
        Style::default().fg(Color::DarkGray),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent)),
    );

    f.render_widget(header, area);
}

fn render_clock_page<S: PreferenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let accent = accent_color(app.view.palette_attr());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    let clock = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            app.view.clock_text().to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("({})", app.clock.choice().as_str()),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Current Time "),
    );
    f.render_widget(clock, chunks[0]);

    let applied = app.clock.choice().as_str();
    let lines: Vec<Line> = available_timezones()
        .iter()
        .enumerate()
        .map(|(i, tz)| {
            let marker = if *tz == applied { "→ " } else { "  " };
            let style = if i == app.tz_index {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
                Span::styled((*tz).to_string(), style),
            ])
        })
        .collect();

    let selector = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Timezone "),
    );
    f.render_widget(selector, chunks[1]);
}

fn render_appearance_page<S: PreferenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let accent = accent_color(app.view.palette_attr());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let mode_info = Paragraph::new(vec![
        Line::from(vec![
            Span::raw("  Mode: "),
            Span::styled(
                app.view.style_class().to_string(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "  Press t to toggle light/dark",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Theme "),
    );
    f.render_widget(mode_info, chunks[0]);

    let applied = app.palette.palette();
    let lines: Vec<Line> = available_palettes()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let marker = if *name == applied { "→ " } else { "  " };
            let style = if i == app.palette_index {
                Style::default().fg(accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(marker.to_string(), Style::default().fg(Color::Green)),
                Span::styled((*name).to_string(), style),
            ])
        })
        .collect();

    let selector = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Color Theme "),
    );
    f.render_widget(selector, chunks[1]);
}

fn render_register_page<S: PreferenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let accent = accent_color(app.view.palette_attr());

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        let value = match field {
            FormField::Name => app.form.name.clone(),
            FormField::Username => app.form.username.clone(),
            FormField::Email => app.form.email.clone(),
            FormField::DateOfBirth => app.form.date_of_birth.clone(),
            FormField::Phone => app.form.phone.clone(),
            FormField::Password => "•".repeat(app.form.password.chars().count()),
            FormField::ConfirmPassword => {
                "•".repeat(app.form.confirm_password.chars().count())
            }
            FormField::Role => format!("← {} →", app.form.role),
            FormField::Submit => String::new(),
        };

        let active = field == app.active_field;
        let label_style = if active {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        if field == FormField::Submit {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                if active { "  [ Register ◄ ]" } else { "  [ Register ]" }.to_string(),
                label_style,
            )));
        } else {
            let cursor = if active { "_" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<28}", field.label()), label_style),
                Span::raw(value),
                Span::styled(cursor.to_string(), Style::default().fg(accent)),
            ]));
        }
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Registration "),
    );
    f.render_widget(form, area);
}

fn render_status_bar<S: PreferenceStore>(f: &mut Frame, area: Rect, app: &App<S>) {
    let accent = accent_color(app.view.palette_attr());

    let mut status_spans = vec![
        Span::styled("Tab", Style::default().fg(accent)),
        Span::raw(" Page | "),
    ];

    match app.current_page {
        Page::Clock | Page::Appearance => {
            status_spans.push(Span::styled("↑/↓", Style::default().fg(accent)));
            status_spans.push(Span::raw(" Select | "));
            status_spans.push(Span::styled("Enter", Style::default().fg(accent)));
            status_spans.push(Span::raw(" Apply | "));
            status_spans.push(Span::styled("t", Style::default().fg(accent)));
            status_spans.push(Span::raw(" Theme | "));
            status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
        Page::Register => {
            status_spans.push(Span::styled("↑/↓", Style::default().fg(accent)));
            status_spans.push(Span::raw(" Field | "));
            status_spans.push(Span::styled("←/→", Style::default().fg(accent)));
            status_spans.push(Span::raw(" Role | "));
            status_spans.push(Span::styled("Ctrl-t", Style::default().fg(accent)));
            status_spans.push(Span::raw(" Theme | "));
            status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
            status_spans.push(Span::raw(" Quit"));
        }
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    f.render_widget(status_bar, area);
}

fn render_modal<S: PreferenceStore>(f: &mut Frame, message: &str, app: &App<S>) {
    let accent = accent_color(app.view.palette_attr());
    let area = centered_rect(60, 40, f.size());

    let body: Vec<Line> = message
        .lines()
        .map(|l| Line::from(l.to_string()))
        .chain([
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to close",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .collect();

    let modal = Paragraph::new(body).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(" Notice "),
    );

    f.render_widget(Clear, area);
    f.render_widget(modal, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

// ============================================================================
// TESTS
// ============================================================================

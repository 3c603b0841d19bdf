// src/tui/app.rs — TUI application state, event loop, and rendering.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, ListState, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};

use crate::api::CvApi;
use crate::controller::tabs::{AUTH_TABS, RESULT_TABS};
use crate::controller::{AlertLevel, Controller, NavTarget, Section};

use super::forms::{self, Control, Forms};
use super::theme::Theme;
use super::widgets::{self, Props};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

// ── Actions ──────────────────────────────────────────────────────

/// Work a key press asks for that needs the network or the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Navigate(NavTarget),
    Upload,
    Analyze,
    Download,
    Login,
    Register,
    ViewResult(i64),
}

// ── App state ────────────────────────────────────────────────────

pub struct App<A: CvApi> {
    pub controller: Controller<A>,
    pub forms: Forms,
    focus: usize,
    history_state: ListState,
    results_scroll: u16,
    busy: Option<&'static str>,
}

impl<A: CvApi> App<A> {
    pub fn new(controller: Controller<A>) -> Self {
        Self {
            controller,
            forms: Forms::default(),
            focus: 0,
            history_state: ListState::default(),
            results_scroll: 0,
            busy: None,
        }
    }

    fn controls(&self) -> Vec<Control> {
        forms::controls(self.controller.section(), self.controller.view())
    }

    pub fn focused(&self) -> Option<Control> {
        let controls = self.controls();
        controls.get(self.focus.min(controls.len().saturating_sub(1))).copied()
    }

    fn focus_next(&mut self) {
        let n = self.controls().len().max(1);
        self.focus = (self.focus + 1) % n;
    }

    fn focus_prev(&mut self) {
        let n = self.controls().len().max(1);
        self.focus = (self.focus + n - 1) % n;
    }

    /// Called whenever the visible section may have changed.
    fn reset_focus(&mut self) {
        self.focus = 0;
        self.results_scroll = 0;
        let has_cards = !self.controller.view().history.cards().is_empty();
        self.history_state.select(if has_cards { Some(0) } else { None });
    }

    /// Translate a key press into local edits and, possibly, an action.
    pub fn on_key(&mut self, key: KeyEvent) -> Action {
        if self.controller.current_alert().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.controller.dismiss_alert();
            }
            return Action::None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match key.code {
            KeyCode::F(n @ 1..=5) => {
                return Action::Navigate(NavTarget::NAV_BAR[(n - 1) as usize]);
            }
            KeyCode::Tab => {
                self.focus_next();
                return Action::None;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return Action::None;
            }
            _ => {}
        }

        let Some(control) = self.focused() else {
            return Action::None;
        };

        if control.is_text() {
            return self.on_text_key(control, key);
        }

        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            return Action::Quit;
        }

        let activate = matches!(key.code, KeyCode::Enter | KeyCode::Char(' '));
        match control {
            Control::GetStarted if activate => Action::Navigate(NavTarget::GetStarted),
            Control::UploadButton if activate => Action::Upload,
            Control::GoToAnalyze if activate => Action::Navigate(NavTarget::GoToAnalyze),
            Control::UploadAnother if activate => {
                self.controller.reset_upload_form();
                self.forms.cv_path.clear();
                self.focus = 0;
                Action::None
            }
            Control::AnalyzeButton if activate => Action::Analyze,
            Control::DownloadButton if activate => Action::Download,
            Control::LoginSubmit if activate => Action::Login,
            Control::RegisterSubmit if activate => Action::Register,
            Control::CvSelect => {
                let select = &mut self.controller.view_mut().cv_select;
                match key.code {
                    KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => select.select_next(),
                    KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => select.select_prev(),
                    _ => {}
                }
                Action::None
            }
            Control::HistoryList => self.on_history_key(key),
            Control::ResultTabs | Control::DownloadButton => {
                self.on_results_key(key);
                Action::None
            }
            Control::AuthTabs => {
                if let Some(group) = self.controller.view_mut().tabs.get_mut(AUTH_TABS) {
                    match key.code {
                        KeyCode::Right | KeyCode::Enter => group.activate_next(),
                        KeyCode::Left => group.activate_prev(),
                        _ => {}
                    }
                }
                Action::None
            }
            _ => Action::None,
        }
    }

    fn on_text_key(&mut self, control: Control, key: KeyEvent) -> Action {
        if key.code == KeyCode::Esc {
            self.focus_next();
            return Action::None;
        }

        let Some(input) = self.forms.input_mut(control) else {
            return Action::None;
        };
        if input.handle_key(key) {
            return Action::None;
        }

        if key.code == KeyCode::Enter {
            return match control {
                Control::CvPath => Action::Upload,
                Control::LoginEmail | Control::LoginPassword => Action::Login,
                Control::RegisterEmail | Control::RegisterPassword | Control::RegisterConfirm => {
                    Action::Register
                }
                _ => Action::None,
            };
        }
        Action::None
    }

    fn on_history_key(&mut self, key: KeyEvent) -> Action {
        let actions = self.controller.view().history.view_actions();
        if actions.is_empty() {
            return Action::None;
        }
        let i = self.history_state.selected().unwrap_or(0);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.history_state.select(Some((i + 1).min(actions.len() - 1)));
                Action::None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.history_state.select(Some(i.saturating_sub(1)));
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => actions
                .get(i)
                .map(|id| Action::ViewResult(*id))
                .unwrap_or(Action::None),
            _ => Action::None,
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Right | KeyCode::Left => {
                if let Some(group) = self.controller.view_mut().tabs.get_mut(RESULT_TABS) {
                    if key.code == KeyCode::Right {
                        group.activate_next();
                    } else {
                        group.activate_prev();
                    }
                }
                self.results_scroll = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.results_scroll = self.results_scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.results_scroll = self.results_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Run an action against the controller. Returns false to quit.
    pub async fn perform(&mut self, action: Action, terminal: &mut Term) -> anyhow::Result<bool> {
        let section_before = self.controller.section();

        match action {
            Action::None => return Ok(true),
            Action::Quit => return Ok(false),
            Action::Navigate(target) => {
                self.show_busy(terminal, "Loading...")?;
                self.controller.navigate(target).await;
            }
            Action::Upload => {
                let raw = self.forms.cv_path.value().trim().to_string();
                let path = (!raw.is_empty()).then(|| PathBuf::from(expand_home(&raw)));
                if let Some(pending) = self.controller.prepare_upload(path.as_deref()).await {
                    self.show_busy(terminal, "Uploading...")?;
                    self.controller.send_upload(pending).await;
                    self.focus = 0;
                }
            }
            Action::Analyze => {
                let cv_id = self.controller.view().cv_select.selected_id();
                let text = self.forms.job_description.value().to_string();
                if let Some(pending) = self.controller.prepare_analysis(cv_id, &text) {
                    self.show_busy(terminal, "Analyzing...")?;
                    self.controller.run_analysis(pending).await;
                }
            }
            Action::Download => {
                self.show_busy(terminal, "Downloading...")?;
                self.controller.download_improved_cv().await;
            }
            Action::Login => {
                let email = self.forms.login_email.value().trim().to_string();
                let password = self.forms.login_password.value().to_string();
                self.show_busy(terminal, "Logging in...")?;
                self.controller.login(&email, &password).await;
                self.forms.clear_passwords();
            }
            Action::Register => {
                let email = self.forms.register_email.value().trim().to_string();
                let password = self.forms.register_password.value().to_string();
                let confirm = self.forms.register_confirm.value().to_string();
                self.show_busy(terminal, "Registering...")?;
                self.controller.register(&email, &password, &confirm).await;
                self.forms.clear_passwords();
            }
            Action::ViewResult(id) => {
                self.show_busy(terminal, "Loading result...")?;
                self.controller.view_result(id).await;
            }
        }

        self.busy = None;
        if self.controller.section() != section_before || matches!(action, Action::Navigate(_)) {
            self.reset_focus();
        }
        Ok(true)
    }

    fn show_busy(&mut self, terminal: &mut Term, label: &'static str) -> anyhow::Result<()> {
        self.busy = Some(label);
        terminal.draw(|f| render(f, self))?;
        Ok(())
    }
}

/// `~/cv.pdf` → `$HOME/cv.pdf`
fn expand_home(raw: &str) -> String {
    match raw.strip_prefix("~/") {
        Some(rest) => crate::infra::paths::dirs_home()
            .join(rest)
            .to_string_lossy()
            .into_owned(),
        None => raw.to_string(),
    }
}

// ── Public entry point ───────────────────────────────────────────

/// Launch the terminal UI. Blocks until the user quits (q / Esc / Ctrl-C).
pub async fn run_ui<A: CvApi>(controller: Controller<A>) -> anyhow::Result<()> {
    let mut app = App::new(controller);
    app.controller.check_health().await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_event_loop<A: CvApi>(terminal: &mut Term, app: &mut App<A>) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != event::KeyEventKind::Press {
                    continue;
                }
                let action = app.on_key(key);
                if !app.perform(action, terminal).await? {
                    return Ok(());
                }
            }
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────

pub fn render<A: CvApi>(f: &mut Frame, app: &mut App<A>) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + nav
            Constraint::Min(10),   // Visible section
            Constraint::Length(1), // Footer / key hints
        ])
        .split(size);

    render_header(f, chunks[0], app);
    render_section(f, chunks[1], app);
    render_footer(f, chunks[2], app);

    if let Some(alert) = app.controller.current_alert() {
        render_alert(f, size, &alert.message, alert.level);
    }
}

fn render_header<A: CvApi>(f: &mut Frame, area: Rect, app: &App<A>) {
    let section = app.controller.section();
    let active = NavTarget::nav_index(section);
    let login_label = app.controller.view().login_label;

    let titles: Vec<Line> = NavTarget::NAV_BAR
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let label = match target {
                NavTarget::LoginControl => login_label,
                other => other.destination().label(),
            };
            let text = format!(" F{} {} ", i + 1, label);
            if Some(i) == active {
                Line::from(Span::styled(text, Theme::nav_active()))
            } else {
                Line::from(Span::styled(text, Theme::nav_inactive()))
            }
        })
        .collect();

    let title = format!(" cvscan \u{00b7} {} ", section.label());
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(title, Theme::header()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .select(active.unwrap_or(0))
        .highlight_style(if active.is_some() {
            Theme::nav_active()
        } else {
            Theme::nav_inactive()
        })
        .divider(Span::styled(" | ", Theme::text_dim()));

    f.render_widget(tabs, area);
}

fn render_section<A: CvApi>(f: &mut Frame, area: Rect, app: &mut App<A>) {
    let focus = app.focused();
    let props = Props {
        view: app.controller.view(),
        session: app.controller.session(),
        forms: &app.forms,
        focus,
    };

    match app.controller.section() {
        Section::Home => widgets::home::render(f, area, &props),
        Section::Upload => widgets::upload::render(f, area, &props),
        Section::Analyze => widgets::analyze::render(f, area, &props),
        Section::Results => widgets::results::render(f, area, &props, app.results_scroll),
        Section::History => widgets::history::render(f, area, &props, &mut app.history_state),
        Section::Login => widgets::account::render(f, area, &props),
    }
}

fn render_footer<A: CvApi>(f: &mut Frame, area: Rect, app: &App<A>) {
    if let Some(busy) = app.busy {
        let p = Paragraph::new(Line::from(Span::styled(format!(" {busy}"), Theme::warning())));
        f.render_widget(p, area);
        return;
    }

    let hints = Line::from(vec![
        Span::styled(" F1-F5", Theme::key_hint()),
        Span::styled(" navigate  ", Theme::key_desc()),
        Span::styled("Tab", Theme::key_hint()),
        Span::styled(" next field  ", Theme::key_desc()),
        Span::styled("Enter", Theme::key_hint()),
        Span::styled(" activate  ", Theme::key_desc()),
        Span::styled("\u{2190}\u{2192}\u{2191}\u{2193}", Theme::key_hint()),
        Span::styled(" choose  ", Theme::key_desc()),
        Span::styled("q/Ctrl-C", Theme::key_hint()),
        Span::styled(" quit", Theme::key_desc()),
    ]);
    f.render_widget(Paragraph::new(hints), area);
}

fn render_alert(f: &mut Frame, area: Rect, message: &str, level: AlertLevel) {
    let popup = widgets::centered(area, 60, 30);
    let (title, style) = match level {
        AlertLevel::Info => (" Notice ", Theme::success()),
        AlertLevel::Error => (" Error ", Theme::error()),
    };
    let block = Block::default()
        .title(Span::styled(title, style))
        .borders(Borders::ALL)
        .border_style(style);

    let p = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), Theme::text())),
        Line::from(""),
        Line::from(Span::styled("[Enter] OK", Theme::key_hint())),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(Clear, popup);
    f.render_widget(p, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockCvApi;
    use crate::controller::ControllerOptions;

    fn app() -> App<MockCvApi> {
        App::new(Controller::new(MockCvApi::new(), ControllerOptions::default()))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_function_keys_navigate() {
        let mut app = app();
        assert_eq!(app.on_key(key(KeyCode::F(1))), Action::Navigate(NavTarget::Home));
        assert_eq!(app.on_key(key(KeyCode::F(4))), Action::Navigate(NavTarget::History));
        assert_eq!(
            app.on_key(key(KeyCode::F(5))),
            Action::Navigate(NavTarget::LoginControl)
        );
    }

    #[test]
    fn test_get_started_button() {
        let mut app = app();
        assert_eq!(app.focused(), Some(Control::GetStarted));
        assert_eq!(
            app.on_key(key(KeyCode::Enter)),
            Action::Navigate(NavTarget::GetStarted)
        );
    }

    #[test]
    fn test_typing_goes_to_focused_input() {
        let mut app = app();
        app.controller.show_section(Section::Login);
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.focused(), Some(Control::LoginEmail));
        for c in "me@x.io".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.forms.login_email.value(), "me@x.io");
        assert_eq!(app.on_key(key(KeyCode::Enter)), Action::Login);
    }

    #[test]
    fn test_q_in_text_field_is_typed_not_quit() {
        let mut app = app();
        app.controller.show_section(Section::Upload);
        assert_eq!(app.focused(), Some(Control::CvPath));
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Action::None);
        assert_eq!(app.forms.cv_path.value(), "q");
    }

    #[test]
    fn test_q_on_button_quits() {
        let mut app = app();
        assert_eq!(app.on_key(key(KeyCode::Char('q'))), Action::Quit);
    }

    #[test]
    fn test_auth_tab_switch_changes_form() {
        let mut app = app();
        app.controller.show_section(Section::Login);
        app.on_key(key(KeyCode::Right));
        assert_eq!(
            app.controller.view().tabs.active_tab(AUTH_TABS),
            Some(crate::controller::tabs::REGISTER_FORM_TAB)
        );
        app.on_key(key(KeyCode::Tab));
        assert_eq!(app.focused(), Some(Control::RegisterEmail));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/abs/cv.pdf"), "/abs/cv.pdf");
        assert!(expand_home("~/cv.pdf").ends_with("cv.pdf"));
        assert!(!expand_home("~/cv.pdf").starts_with('~'));
    }
}

//! Application core: event loop, routing, action dispatch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tui_input::{Input, InputRequest};

use oar_core::routes::paths;
use oar_core::{AppState, Controller, Resolved, resolve};

use crate::action::Action;
use crate::bridge::spawn_store_bridge;
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::history::{History, normalize_path};
use crate::theme;
use crate::tui::Tui;
use crate::views::create_view;
use crate::widgets::{ErrorBoundary, Toasts};

const TOAST_TTL: Duration = Duration::from_secs(6);

/// Navbar entries, reachable with number keys 1-8.
const NAV: [(&str, &str); 8] = [
    ("Map", paths::MAIN),
    ("Facilities", paths::FACILITIES),
    ("Contribute", paths::CONTRIBUTE),
    ("Lists", paths::LISTS),
    ("Dashboard", paths::DASHBOARD),
    ("Claimed", paths::CLAIMED_FACILITIES),
    ("About", paths::ABOUT_PROCESSING),
    ("Log in", paths::AUTH_LOGIN_FORM),
];

pub struct App {
    controller: Controller,
    history: History,
    route: Resolved,
    view: Box<dyn Component>,
    boundary: ErrorBoundary,
    state: Arc<AppState>,
    toasts: Toasts,
    /// Path prompt, open while `Some`.
    prompt: Option<Input>,
    help_visible: bool,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let initial = normalize_path(&controller.config().initial_path).unwrap_or_else(|| "/".into());
        let state = Arc::new(controller.store().snapshot());
        let route = resolve(&initial, &state.feature_flags.flags);
        let view = create_view(route.view);

        Self {
            controller,
            history: History::new(initial),
            route,
            view,
            boundary: ErrorBoundary::new(),
            state,
            toasts: Toasts::new(TOAST_TTL),
            prompt: None,
            help_visible: false,
            running: true,
            action_tx,
            action_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let cancel = CancellationToken::new();
        tokio::spawn(spawn_store_bridge(
            Arc::clone(self.controller.store()),
            self.action_tx.clone(),
            cancel.clone(),
        ));

        self.mount()?;

        let mut events = EventReader::new(Duration::from_millis(250), Duration::from_millis(33));
        info!(path = %self.route.path, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Resize | Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        cancel.cancel();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    // ── Routing ──────────────────────────────────────────────────

    /// Announce the initial route to its view and load its data.
    fn mount(&mut self) -> Result<()> {
        self.forward(&Action::RouteChanged(self.route.clone()))?;
        if let Some(claim_id) = self.route.claim_id() {
            drop(self.controller.fetch_claimed_facility_details(Some(&claim_id)));
        }
        Ok(())
    }

    fn set_route(&mut self, next: Resolved) -> Result<()> {
        if next == self.route {
            return Ok(());
        }
        debug!(from = %self.route.path, to = %next.path, view = %next.view, "route change");

        let old_claim = self.route.claim_id();
        let new_claim = next.claim_id();

        if next.view != self.route.view {
            self.view = create_view(next.view);
            self.forward(&Action::StateChanged(Arc::clone(&self.state)))?;
        }
        self.boundary.reset();
        self.route = next;
        self.forward(&Action::RouteChanged(self.route.clone()))?;

        if old_claim != new_claim {
            if old_claim.is_some() {
                self.controller.clear_claimed_facility_details();
            }
            if let Some(claim_id) = new_claim {
                drop(self.controller.fetch_claimed_facility_details(Some(&claim_id)));
            }
        }
        Ok(())
    }

    fn resolve_current(&self) -> Resolved {
        resolve(self.history.current(), &self.state.feature_flags.flags)
    }

    /// Pass an action to the view and queue its follow-up.
    fn forward(&mut self, action: &Action) -> Result<()> {
        if let Some(follow_up) = self.view.update(action)? {
            self.action_tx.send(follow_up)?;
        }
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl-C quits from any mode, text entry included.
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if let Some(input) = self.prompt.as_mut() {
            let request = match key.code {
                KeyCode::Enter => {
                    let target = normalize_path(input.value());
                    self.prompt = None;
                    return Ok(target.map(Action::Navigate));
                }
                KeyCode::Esc => return Ok(Some(Action::ClosePrompt)),
                KeyCode::Char(c) => InputRequest::InsertChar(c),
                KeyCode::Backspace => InputRequest::DeletePrevChar,
                KeyCode::Delete => InputRequest::DeleteNextChar,
                KeyCode::Left => InputRequest::GoToPrevChar,
                KeyCode::Right => InputRequest::GoToNextChar,
                KeyCode::Home => InputRequest::GoToStart,
                KeyCode::End => InputRequest::GoToEnd,
                _ => return Ok(None),
            };
            input.handle(request);
            return Ok(None);
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        if self.view.captures_input() {
            return self.view.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (_, KeyCode::Char(':')) => return Ok(Some(Action::OpenPrompt)),
            (_, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='8')) => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok());
                if let Some((_, path)) = index.and_then(|i| NAV.get(i - 1)) {
                    return Ok(Some(Action::Navigate((*path).to_owned())));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::Navigate(self.adjacent_tab(1).to_owned())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::Navigate(
                    self.adjacent_tab(NAV.len() - 1).to_owned(),
                )));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),
            _ => {}
        }

        self.view.handle_key_event(key)
    }

    fn active_tab(&self) -> Option<usize> {
        NAV.iter().position(|(_, path)| {
            resolve(path, &self.state.feature_flags.flags).pattern == self.route.pattern
        })
    }

    fn adjacent_tab(&self, step: usize) -> &'static str {
        let next = self.active_tab().map_or(0, |i| (i + step) % NAV.len());
        NAV[next].1
    }

    // ── Actions ──────────────────────────────────────────────────

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Navigate(path) => {
                if self.history.push(path.clone()) {
                    self.set_route(self.resolve_current())?;
                }
            }

            Action::GoBack => {
                if self.history.back().is_some() {
                    self.set_route(self.resolve_current())?;
                }
            }

            Action::StateChanged(state) => {
                self.state = Arc::clone(state);
                self.forward(action)?;
                // Flags may have changed what the current path resolves to.
                self.set_route(self.resolve_current())?;
            }

            Action::OpenPrompt => self.prompt = Some(Input::default()),
            Action::ClosePrompt => self.prompt = None,
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::FetchClaimedFacilityDetails(claim_id) => {
                drop(self.controller.fetch_claimed_facility_details(Some(claim_id)));
            }
            Action::SubmitClaimedFacilityDetails(claim_id) => {
                drop(
                    self.controller
                        .submit_claimed_facility_details_update(Some(claim_id)),
                );
            }
            Action::EditClaimField { field, value } => {
                self.controller
                    .update_claimed_facility_field(*field, value.clone());
            }

            Action::Notify(notification) => {
                self.toasts.push(notification.clone(), Instant::now());
            }

            Action::Tick => {
                self.toasts.prune(Instant::now());
                self.forward(action)?;
            }

            Action::Render => {}

            Action::RouteChanged(_) => self.forward(action)?,
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [nav_area, content_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_navbar(frame, nav_area);
        self.boundary.render(self.view.as_ref(), frame, content_area);
        if !self.toasts.is_empty() {
            self.toasts.render(frame, content_area);
        }

        if self.prompt.is_some() {
            self.render_prompt(frame, status_area);
        } else {
            self.render_status_bar(frame, status_area);
        }

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_navbar(&self, frame: &mut Frame, area: Rect) {
        let active = self.active_tab();
        let titles: Vec<Line> = NAV
            .iter()
            .enumerate()
            .map(|(i, (label, _))| {
                let style = if Some(i) == active {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {label} ", i + 1), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled("│", theme::key_hint()))
            .select(active);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = &self.state.session;
        let who = match (&session.user, session.request.is_pending()) {
            (Some(user), _) => Span::styled(format!("● {}", user.email), theme::success_text()),
            (None, true) => Span::styled("◐ signing in", theme::pending_text()),
            (None, false) => Span::styled("○ guest", theme::key_hint()),
        };
        let country = self
            .state
            .client_info
            .info
            .as_ref()
            .and_then(|i| i.country.as_deref())
            .unwrap_or("--");

        let line = Line::from(vec![
            Span::raw(" "),
            who,
            Span::styled(format!("  {country}  "), theme::field_label()),
            Span::styled(self.route.path.as_str(), theme::text()),
            if self.boundary.failure().is_some() {
                Span::styled("  ✗ view error", theme::error_text())
            } else {
                Span::raw("")
            },
            Span::styled("  │ : go  Esc back  ? help  q quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let Some(input) = &self.prompt else {
            return;
        };
        let line = Line::from(vec![
            Span::styled(":", theme::key_hint_key()),
            Span::styled(input.value(), theme::text()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        let offset = u16::try_from(input.visual_cursor() + 1).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            area.x.saturating_add(offset).min(area.right().saturating_sub(1)),
            area.y,
        ));
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height.saturating_sub(2));
        let help_area = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_PANEL));

        let entry = |key: &'static str, label: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(label, theme::key_hint()),
            ])
        };
        let lines = vec![
            Line::raw(""),
            entry("1-8", "Jump to page"),
            entry("Tab", "Next page"),
            entry(":", "Go to path"),
            entry("Esc", "Back"),
            entry("?", "This help"),
            entry("q", "Quit"),
            Line::raw(""),
            Line::styled("  Claimed facility", Style::default().fg(theme::BRAND_TEAL)),
            entry("j/k", "Move"),
            entry("Enter", "Edit / toggle"),
            entry("s", "Save"),
            entry("r", "Reload"),
        ];

        frame.render_widget(Clear, help_area);
        frame.render_widget(Paragraph::new(lines).block(block), help_area);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use oar_core::{ClientConfig, FeatureFlags, View};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app(initial_path: &str) -> App {
        let config = ClientConfig {
            initial_path: initial_path.into(),
            ..ClientConfig::default()
        };
        App::new(Controller::new(config).unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.process_action(&action).unwrap();
        }
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[tokio::test]
    async fn number_keys_navigate_and_esc_goes_back() {
        let mut app = app("/");
        assert_eq!(app.route.view, View::MapAndSidebar);

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.route.view, View::FacilityLists);
        assert_eq!(app.active_tab(), Some(3));

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route.path, "/");
        assert_eq!(app.active_tab(), Some(0));
    }

    #[tokio::test]
    async fn prompt_navigates_to_typed_path() {
        let mut app = app("/");
        press(&mut app, KeyCode::Char(':'));
        assert!(app.prompt.is_some());
        for c in "lists/7".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert!(app.prompt.is_none());
        assert_eq!(app.route.view, View::FacilityListItems);
        assert_eq!(app.route.params.get("listID"), Some("7"));
    }

    #[tokio::test]
    async fn gated_route_reresolves_when_flags_load() {
        let mut app = app("/facilities/OAR123/claim");
        assert_eq!(app.route.view, View::MapAndSidebar);

        let mut state = AppState::default();
        state.feature_flags.flags = FeatureFlags::from_pairs([(oar_core::CLAIM_A_FACILITY, true)]);
        app.process_action(&Action::StateChanged(Arc::new(state)))
            .unwrap();

        assert_eq!(app.route.view, View::ClaimFacility);
    }

    #[tokio::test]
    async fn notifications_show_as_toasts() {
        let mut app = app("/about/processing");
        app.process_action(&Action::Notify(crate::action::Notification::error(
            "An error prevented fetching client info",
        )))
        .unwrap();

        let text = screen_text(&mut app);
        assert!(text.contains("An error prevented fetching client info"));
        assert!(text.contains("About processing"));
        assert!(text.contains("/about/processing"));
    }

    #[tokio::test]
    async fn ctrl_c_quits_while_editing_a_field() {
        let mut app = app("/claimed/42");
        let mut state = AppState::default();
        state.feature_flags.flags = FeatureFlags::from_pairs([(oar_core::CLAIM_A_FACILITY, true)]);
        let record = serde_json::json!({ "facility_name": "Mill One" });
        state.claimed_facility_details.data =
            Some(oar_core::normalize_nulls(record.as_object().unwrap().clone()));
        app.process_action(&Action::StateChanged(Arc::new(state)))
            .unwrap();
        assert_eq!(app.route.view, View::ClaimedFacilities);

        press(&mut app, KeyCode::Enter);
        assert!(app.view.captures_input());

        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(action, Some(Action::Quit)));

        press(&mut app, KeyCode::Char(':'));
        let action = app
            .handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
            .unwrap();
        assert!(matches!(action, Some(Action::Quit)));
    }

    #[tokio::test]
    async fn unknown_path_renders_not_found() {
        let mut app = app("/nope");
        assert_eq!(app.route.view, View::RouteNotFound);
        app.mount().unwrap();
        assert!(screen_text(&mut app).contains("Nothing lives at /nope"));
    }
}

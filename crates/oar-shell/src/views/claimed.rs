//! Claimed facilities view: editor for the details of one approved claim
//! at `/claimed/:claimID`.

use chrono::{DateTime, Local};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use serde_json::Value;
use strum::IntoEnumIterator;
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::{Input, InputRequest};

use oar_core::{ClaimField, RequestState, store::ClaimedFacilityDetailsState};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const LABEL_WIDTH: u16 = 24;

pub struct ClaimedFacilitiesView {
    claim_id: Option<String>,
    details: ClaimedFacilityDetailsState,
    fields: Vec<ClaimField>,
    selected: usize,
    /// Text field being edited, with its buffer.
    editing: Option<(ClaimField, Input)>,
    saved_at: Option<DateTime<Local>>,
    throbber_state: ThrobberState,
}

impl ClaimedFacilitiesView {
    pub fn new() -> Self {
        Self {
            claim_id: None,
            details: ClaimedFacilityDetailsState::default(),
            fields: ClaimField::iter().collect(),
            selected: 0,
            editing: None,
            saved_at: None,
            throbber_state: ThrobberState::default(),
        }
    }

    fn selected_field(&self) -> Option<ClaimField> {
        self.fields.get(self.selected).copied()
    }

    fn current_value(&self, field: ClaimField) -> Option<&Value> {
        self.details.data.as_ref()?.field(field)
    }

    /// Whether `slice` may be shown under the current claim.
    fn owns(&self, slice: &ClaimedFacilityDetailsState) -> bool {
        slice.claim_id.is_none() || slice.claim_id == self.claim_id
    }

    fn activate_selected(&mut self) -> Option<Action> {
        self.details.data.as_ref()?;
        let field = self.selected_field()?;
        if field.is_toggle() {
            let on = matches!(self.current_value(field), Some(Value::Bool(true)));
            return Some(Action::EditClaimField {
                field,
                value: Value::Bool(!on),
            });
        }
        let text = match self.current_value(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        self.editing = Some((field, Input::new(text)));
        None
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        let (field, input) = self.editing.as_mut()?;
        let request = match key.code {
            KeyCode::Enter => {
                let field = *field;
                let value = Value::String(input.value().to_owned());
                self.editing = None;
                return Some(Action::EditClaimField { field, value });
            }
            KeyCode::Esc => {
                self.editing = None;
                return None;
            }
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return None,
        };
        input.handle(request);
        None
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let rows: Vec<Row> = self
            .fields
            .iter()
            .map(|&field| {
                let value = match self.current_value(field) {
                    Some(value) => display_value(value),
                    None => Span::styled("-", theme::key_hint()),
                };
                Row::new(vec![
                    Cell::from(Span::styled(field.label(), theme::field_label())),
                    Cell::from(value),
                ])
            })
            .collect();

        let table = Table::new(rows, [Constraint::Length(LABEL_WIDTH), Constraint::Min(10)])
            .row_highlight_style(theme::row_selected())
            .highlight_symbol("▸ ");
        let mut state = TableState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some((field, input)) = &self.editing {
            let prefix = format!("{}: ", field.label());
            let line = Line::from(vec![
                Span::styled(prefix.clone(), theme::field_label()),
                Span::styled(input.value(), theme::text()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            let offset = u16::try_from(prefix.chars().count() + input.visual_cursor())
                .unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(
                area.x.saturating_add(offset).min(area.right().saturating_sub(1)),
                area.y,
            ));
            return;
        }

        let line = match &self.details.update {
            RequestState::Pending => Line::styled("Saving…", theme::pending_text()),
            RequestState::Failed(message) => Line::styled(message.as_str(), theme::error_text()),
            RequestState::Fulfilled => Line::styled(
                self.saved_at.map_or_else(
                    || "Saved".to_owned(),
                    |at| format!("Saved at {}", at.format("%H:%M:%S")),
                ),
                theme::success_text(),
            ),
            RequestState::Idle => match &self.details.fetch {
                RequestState::Failed(message) => {
                    Line::styled(message.as_str(), theme::error_text())
                }
                _ => Line::raw(""),
            },
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_hints(frame: &mut Frame, area: Rect, editing: bool) {
        let pairs: &[(&str, &str)] = if editing {
            &[("Enter", "apply"), ("Esc", "cancel")]
        } else {
            &[("j/k", "move"), ("Enter", "edit"), ("s", "save"), ("r", "reload")]
        };
        let mut spans = Vec::new();
        for (key, label) in pairs {
            spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
            spans.push(Span::styled(format!("{label} "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn display_value(value: &Value) -> Span<'static> {
    match value {
        Value::String(s) if s.is_empty() => Span::styled("(empty)", theme::key_hint()),
        Value::String(s) => Span::styled(s.clone(), theme::text()),
        Value::Bool(true) => Span::styled("yes", theme::success_text()),
        Value::Bool(false) => Span::styled("no", theme::key_hint()),
        other => Span::styled(other.to_string(), theme::text()),
    }
}

impl Component for ClaimedFacilitiesView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing.is_some() {
            return Ok(self.handle_editing_key(key));
        }
        let Some(claim_id) = self.claim_id.clone() else {
            return Ok(None);
        };
        let last = self.fields.len().saturating_sub(1);
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.selected = (self.selected + 1).min(last);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                None
            }
            KeyCode::Char('G') => {
                self.selected = last;
                None
            }
            KeyCode::Enter => self.activate_selected(),
            KeyCode::Char('s') => Some(Action::SubmitClaimedFacilityDetails(claim_id)),
            KeyCode::Char('r') => Some(Action::FetchClaimedFacilityDetails(claim_id)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::RouteChanged(resolved) => {
                self.claim_id = resolved.claim_id();
                self.selected = 0;
                self.editing = None;
                self.saved_at = None;
                if !self.owns(&self.details) {
                    self.details = ClaimedFacilityDetailsState::default();
                }
            }
            Action::StateChanged(state) => {
                let next = &state.claimed_facility_details;
                if !self.owns(next) {
                    self.details = ClaimedFacilityDetailsState::default();
                    self.editing = None;
                    return Ok(None);
                }
                if next.update == RequestState::Fulfilled
                    && self.details.update != RequestState::Fulfilled
                {
                    self.saved_at = Some(Local::now());
                }
                self.details = next.clone();
                if self.details.data.is_none() {
                    self.editing = None;
                }
            }
            Action::Tick => {
                if self.details.fetch.is_pending() || self.details.update.is_pending() {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) -> Result<()> {
        let title = match &self.claim_id {
            Some(id) => format!(" Claimed facility {id} "),
            None => " Claimed facilities ".to_owned(),
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.editing.is_some() {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.claim_id.is_none() {
            let lines = vec![
                Line::raw(""),
                Line::styled("Open /claimed/<claim id> to edit an approved claim.", theme::text()),
                Line::styled("Press : and type the path.", theme::key_hint()),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
            return Ok(());
        }

        let [header, body, status, hints] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        if self.details.fetch.is_pending() || self.details.update.is_pending() {
            let label = if self.details.fetch.is_pending() {
                " Loading claim details"
            } else {
                " Saving claim details"
            };
            let throbber = Throbber::default()
                .label(label)
                .style(theme::text())
                .throbber_style(theme::pending_text());
            frame.render_stateful_widget(throbber, header, &mut self.throbber_state.clone());
        } else if let Some(name) = self
            .details
            .data
            .as_ref()
            .and_then(|d| d.field(ClaimField::FacilityName))
            .and_then(Value::as_str)
        {
            frame.render_widget(Paragraph::new(Line::styled(name, theme::title_style())), header);
        }

        if self.details.data.is_some() {
            self.render_table(frame, body);
        }
        self.render_status(frame, status);
        Self::render_hints(frame, hints, self.editing.is_some());
        Ok(())
    }

    fn captures_input(&self) -> bool {
        self.editing.is_some()
    }
}

//! View implementations, one per route target.
//!
//! Only the claimed-facility editor has terminal behavior of its own; the
//! other route targets render a summary of the route they were opened on.

mod claimed;

use color_eyre::eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use oar_core::{Resolved, View};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub use claimed::ClaimedFacilitiesView;

/// Build the component for `view`.
pub fn create_view(view: View) -> Box<dyn Component> {
    match view {
        View::ClaimedFacilities => Box::new(ClaimedFacilitiesView::new()),
        other => Box::new(PlaceholderView::new(other)),
    }
}

pub struct PlaceholderView {
    view: View,
    route: Option<Resolved>,
}

impl PlaceholderView {
    pub fn new(view: View) -> Self {
        Self { view, route: None }
    }
}

impl Component for PlaceholderView {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::RouteChanged(resolved) = action {
            self.route = Some(resolved.clone());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) -> Result<()> {
        let block = Block::default()
            .title(format!(" {} ", self.view))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let mut lines = vec![Line::raw("")];
        if let Some(route) = &self.route {
            if self.view == View::RouteNotFound {
                lines.push(Line::styled(
                    format!("Nothing lives at {}", route.path),
                    theme::error_text(),
                ));
            } else {
                lines.push(Line::from(vec![
                    Span::styled("path  ", theme::field_label()),
                    Span::styled(route.path.as_str(), theme::text()),
                ]));
                let mut params: Vec<_> = route.params.iter().collect();
                params.sort_unstable();
                for (name, value) in params {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{name}  "), theme::field_label()),
                        Span::styled(value.to_owned(), theme::text()),
                    ]));
                }
            }
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "This page is only available in the web app.",
            theme::key_hint(),
        ));

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use oar_core::{FeatureFlags, resolve};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn screen_text(view: &dyn Component) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 10)).unwrap();
        terminal
            .draw(|frame| view.render(frame, frame.area()).unwrap())
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn placeholder_shows_route_params() {
        let resolved = resolve("/lists/42", &FeatureFlags::default());
        let mut view = create_view(resolved.view);
        view.update(&Action::RouteChanged(resolved)).unwrap();

        let text = screen_text(view.as_ref());
        assert!(text.contains("List items"));
        assert!(text.contains("listID"));
        assert!(text.contains("42"));
    }

    #[test]
    fn not_found_names_the_path() {
        let resolved = resolve("/nowhere", &FeatureFlags::default());
        let mut view = create_view(resolved.view);
        view.update(&Action::RouteChanged(resolved)).unwrap();

        assert!(screen_text(view.as_ref()).contains("Nothing lives at /nowhere"));
    }
}

//! Error boundary around view rendering.
//!
//! A view whose `render` returns an error or panics is replaced by an
//! error panel. The boundary stays tripped until [`ErrorBoundary::reset`],
//! which the app calls when it swaps views.

use std::any::Any;

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};
use tracing::error;

use crate::component::Component;
use crate::theme;
use crate::tui;

#[derive(Default)]
pub struct ErrorBoundary {
    failure: Option<String>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn reset(&mut self) {
        self.failure = None;
    }

    /// Render `view`, or the error panel if it has failed.
    pub fn render(&mut self, view: &dyn Component, frame: &mut Frame, area: Rect) {
        if self.failure.is_none() {
            match tui::contain(|| view.render(frame, area)) {
                Ok(Ok(())) => return,
                Ok(Err(e)) => {
                    error!(error = %e, "view failed to render");
                    self.failure = Some(e.to_string());
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    error!(panic = %message, "view panicked while rendering");
                    self.failure = Some(message);
                }
            }
        }

        let message = self.failure.as_deref().unwrap_or_default();
        let block = Block::default()
            .title(" Something went wrong ")
            .title_style(theme::error_text())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_error());
        let body = vec![
            Line::styled(message, theme::text()),
            Line::raw(""),
            Line::styled("Esc to go back, or pick another page.", theme::key_hint()),
        ];

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "view panicked".to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use color_eyre::eyre::{Result, eyre};
    use ratatui::{Terminal, backend::TestBackend, widgets::Paragraph};

    use super::*;

    struct Healthy;
    impl Component for Healthy {
        fn render(&self, frame: &mut Frame, area: Rect) -> Result<()> {
            frame.render_widget(Paragraph::new("all good"), area);
            Ok(())
        }
    }

    struct Failing;
    impl Component for Failing {
        fn render(&self, _frame: &mut Frame, _area: Rect) -> Result<()> {
            Err(eyre!("details are malformed"))
        }
    }

    struct Panicking;
    impl Component for Panicking {
        fn render(&self, _frame: &mut Frame, _area: Rect) -> Result<()> {
            panic!("index out of range")
        }
    }

    fn draw(boundary: &mut ErrorBoundary, view: &dyn Component) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| boundary.render(view, frame, frame.area()))
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
    fn healthy_view_renders_normally() {
        let mut boundary = ErrorBoundary::new();
        assert!(draw(&mut boundary, &Healthy).contains("all good"));
        assert_eq!(boundary.failure(), None);
    }

    #[test]
    fn render_error_shows_panel() {
        let mut boundary = ErrorBoundary::new();
        let screen = draw(&mut boundary, &Failing);
        assert!(screen.contains("Something went wrong"));
        assert!(screen.contains("details are malformed"));
    }

    #[test]
    fn panic_is_contained_and_sticks_until_reset() {
        let mut boundary = ErrorBoundary::new();
        assert!(draw(&mut boundary, &Panicking).contains("index out of range"));

        // Still tripped for a healthy view until reset.
        assert!(draw(&mut boundary, &Healthy).contains("Something went wrong"));
        boundary.reset();
        assert!(draw(&mut boundary, &Healthy).contains("all good"));
    }
}

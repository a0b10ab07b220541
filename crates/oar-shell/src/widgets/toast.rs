//! Toast stack rendered in the bottom-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::action::{Notification, NotificationLevel};
use crate::theme;

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

struct Toast {
    notification: Notification,
    expires_at: Instant,
}

pub struct Toasts {
    items: VecDeque<Toast>,
    ttl: Duration,
}

impl Toasts {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            ttl,
        }
    }

    pub fn push(&mut self, notification: Notification, now: Instant) {
        self.items.push_back(Toast {
            notification,
            expires_at: now + self.ttl,
        });
        while self.items.len() > MAX_VISIBLE {
            self.items.pop_front();
        }
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Newest toast at the bottom.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let mut bottom = area.y + area.height;

        for toast in self.items.iter().rev() {
            if bottom < area.y + TOAST_HEIGHT {
                break;
            }
            bottom -= TOAST_HEIGHT;
            let rect = Rect::new(area.x + area.width - width, bottom, width, TOAST_HEIGHT);

            let (title, color) = match toast.notification.level {
                NotificationLevel::Error => (" Error ", theme::ERROR_RED),
                NotificationLevel::Success => (" Done ", theme::SUCCESS_GREEN),
                NotificationLevel::Info => (" Info ", theme::BRAND_TEAL),
            };
            let block = Block::default()
                .title(Span::styled(title, Style::default().fg(color)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color))
                .style(Style::default().bg(theme::BG_PANEL));

            frame.render_widget(Clear, rect);
            frame.render_widget(
                Paragraph::new(Line::styled(
                    toast.notification.message.as_str(),
                    theme::text(),
                ))
                .wrap(Wrap { trim: true })
                .block(block),
                rect,
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    #[test]
    fn toasts_expire() {
        let start = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(5));
        toasts.push(Notification::error("first"), start);
        toasts.push(Notification::info("second"), start + Duration::from_secs(3));

        toasts.prune(start + Duration::from_secs(4));
        assert_eq!(toasts.len(), 2);
        toasts.prune(start + Duration::from_secs(6));
        assert_eq!(toasts.len(), 1);
        toasts.prune(start + Duration::from_secs(9));
        assert!(toasts.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_past_capacity() {
        let now = Instant::now();
        let mut toasts = Toasts::new(Duration::from_secs(5));
        for i in 0..5 {
            toasts.push(Notification::info(format!("toast {i}")), now);
        }
        assert_eq!(toasts.len(), MAX_VISIBLE);
        assert_eq!(toasts.items.front().unwrap().notification.message, "toast 2");
    }

    #[test]
    fn renders_message() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let mut toasts = Toasts::new(Duration::from_secs(5));
        toasts.push(Notification::error("fetch failed"), Instant::now());

        terminal
            .draw(|frame| toasts.render(frame, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("fetch failed"));
        assert!(text.contains("Error"));
    }
}

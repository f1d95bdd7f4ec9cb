//! Status bar widget: controller phase plus the latest message

use crate::search::SearchPhase;
use crate::ui::ratatui_adapter::state::{MessageLevel, StatusMessage};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Single-line status bar
pub struct StatusBar<'a> {
    phase: SearchPhase,
    message: Option<&'a StatusMessage>,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    /// Create a new status bar widget
    #[must_use]
    pub const fn new(phase: SearchPhase, message: Option<&'a StatusMessage>, theme: &'a Theme) -> Self {
        Self {
            phase,
            message,
            theme,
        }
    }

    /// Get style for a message level
    fn style_for_level(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Success => self.theme.success_style(),
            MessageLevel::Error => self.theme.error_style(),
            MessageLevel::Info => self.theme.info_style(),
        }
    }

    /// Get prefix for a message level
    const fn prefix_for_level(level: MessageLevel) -> &'static str {
        match level {
            MessageLevel::Success => "✓ ",
            MessageLevel::Error => "✗ ",
            MessageLevel::Info => "ℹ ",
        }
    }

    const fn phase_label(phase: SearchPhase) -> &'static str {
        match phase {
            SearchPhase::Idle => "idle",
            SearchPhase::Debouncing => "typing",
            SearchPhase::Searching => "searching",
            SearchPhase::Dismissed => "hidden",
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!("[{}]", Self::phase_label(self.phase)),
                self.theme.dimmed_style(),
            ),
            Span::raw(" "),
        ];

        if let Some(message) = self.message {
            let style = self.style_for_level(message.level);
            spans.push(Span::styled(Self::prefix_for_level(message.level), style));
            spans.push(Span::styled(message.text.as_str(), style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

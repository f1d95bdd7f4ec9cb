//! Scope selector widget

use crate::search::SearchScope;
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shows the active scope; Tab cycles it
pub struct ScopeSelector<'a> {
    scope: SearchScope,
    theme: &'a Theme,
}

impl<'a> ScopeSelector<'a> {
    /// Create a new scope selector widget
    #[must_use]
    pub const fn new(scope: SearchScope, theme: &'a Theme) -> Self {
        Self { scope, theme }
    }
}

impl Widget for ScopeSelector<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(" Scope ");

        let inner = block.inner(area);
        block.render(area, buf);

        let line = Line::from(vec![
            Span::styled("◂ ", self.theme.dimmed_style()),
            Span::styled(self.scope.label(), self.theme.scope_style()),
            Span::styled(" ▸", self.theme.dimmed_style()),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

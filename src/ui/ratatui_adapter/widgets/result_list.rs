//! Dropdown widget: grouped results or a placeholder message

use crate::search::{Dropdown, RenderRow};
use crate::ui::ratatui_adapter::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

/// Results dropdown with group headers and a highlighted row
pub struct ResultList<'a> {
    /// What to show
    dropdown: &'a Dropdown<'a>,
    /// Highlighted result index
    cursor: Option<usize>,
    /// First visible display row
    scroll_offset: usize,
    /// Theme for styling
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    /// Create a new result list widget
    #[must_use]
    pub const fn new(dropdown: &'a Dropdown<'a>, theme: &'a Theme) -> Self {
        Self {
            dropdown,
            cursor: None,
            scroll_offset: 0,
            theme,
        }
    }

    /// Set the highlighted result
    #[must_use]
    pub const fn cursor(mut self, cursor: Option<usize>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set the first visible row
    #[must_use]
    pub const fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Number of display lines the content needs, excluding borders
    #[must_use]
    pub fn content_height(dropdown: &Dropdown<'_>) -> usize {
        match dropdown {
            Dropdown::Hidden => 0,
            Dropdown::Results(rows) => rows.len(),
            Dropdown::NoResults | Dropdown::TooShort { .. } => 1,
        }
    }

    /// Render a single row
    fn render_row(&self, row: &RenderRow<'_>) -> ListItem<'a> {
        match row {
            RenderRow::Header(kind) => {
                ListItem::new(Line::from(Span::styled(kind.as_str(), self.theme.header_style())))
            }
            RenderRow::Item { index, item } => {
                let is_cursor = self.cursor == Some(*index);
                let cursor_char = if is_cursor { ">" } else { " " };
                let title_style = if is_cursor {
                    self.theme.selected_style()
                } else {
                    self.theme.normal_style()
                };

                let mut spans = vec![
                    Span::styled(cursor_char, self.theme.cursor_style()),
                    Span::raw(" "),
                    Span::styled(item.title.clone(), title_style),
                ];
                if let Some(subtitle) = &item.subtitle {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled(subtitle.clone(), self.theme.dimmed_style()));
                }

                let line = Line::from(spans);
                if is_cursor {
                    ListItem::new(line).style(self.theme.selected_style())
                } else {
                    ListItem::new(line)
                }
            }
        }
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.dropdown {
            Dropdown::Results(rows) => {
                let count = rows.iter().filter(|row| row.index().is_some()).count();
                format!(" Results ({count}) ")
            }
            _ => " Results ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(title);

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        match self.dropdown {
            Dropdown::Hidden => {}
            Dropdown::Results(rows) => {
                let visible_height = inner.height as usize;
                let start = self.scroll_offset.min(rows.len());
                let end = (start + visible_height).min(rows.len());

                let items: Vec<ListItem> = rows[start..end]
                    .iter()
                    .map(|row| self.render_row(row))
                    .collect();
                List::new(items).render(inner, buf);
            }
            placeholder => {
                let text = placeholder.message().unwrap_or_default();
                Paragraph::new(Span::styled(text, self.theme.dimmed_style())).render(inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{ResultItem, ResultKind, group_by_kind};

    fn lines(widget: ResultList<'_>, height: u16) -> Vec<String> {
        let area = Rect::new(0, 0, 50, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_header_precedes_items() {
        let theme = Theme::default();
        let results = vec![
            ResultItem::new("1", ResultKind::Patient, "Jane Doe").with_subtitle("MRN 1"),
        ];
        let dropdown = Dropdown::Results(group_by_kind(&results));
        let out = lines(ResultList::new(&dropdown, &theme).cursor(Some(0)), 4);

        assert!(out[0].contains("Results (1)"));
        assert!(out[1].contains("PATIENT"));
        assert!(out[2].contains("> Jane Doe"));
        assert!(out[2].contains("MRN 1"));
    }

    #[test]
    fn test_scroll_offset_skips_rows() {
        let theme = Theme::default();
        let results: Vec<ResultItem> = (0..5)
            .map(|i| ResultItem::new(i.to_string(), ResultKind::Patient, format!("Patient {i}")))
            .collect();
        let dropdown = Dropdown::Results(group_by_kind(&results));
        let out = lines(ResultList::new(&dropdown, &theme).scroll_offset(3), 4);

        assert!(out[1].contains("Patient 2"));
        assert!(out[2].contains("Patient 3"));
    }

    #[test]
    fn test_placeholder_message() {
        let theme = Theme::default();
        let dropdown = Dropdown::TooShort { min_len: 3 };
        let out = lines(ResultList::new(&dropdown, &theme), 3);
        assert!(out[1].contains("Please enter at least 3 characters"));
        assert_eq!(ResultList::content_height(&dropdown), 1);
    }
}

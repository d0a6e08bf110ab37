use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    Frame,
};

use crate::app::App;

/// What a pager column shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// Overscroll area beyond the first or last page
    Gutter,
    Page { index: usize, edge: bool },
}

/// Resolve screen column `col` for content shifted by `offset` columns
pub fn column_at(col: u16, offset: f64, page_cols: f64, pages: i64) -> Column {
    let content_x = f64::from(col) - offset;
    let page = (content_x / page_cols).floor();
    if page < 0.0 || page >= pages as f64 {
        return Column::Gutter;
    }
    let local = content_x - page * page_cols;
    Column::Page {
        index: page as usize,
        edge: local < 1.0 || local >= page_cols - 1.0,
    }
}

/// Horizontally scrolling pages, one viewport wide each
pub struct PagerWidget;

impl PagerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let theme = &app.theme;
        let page_cols = f64::from(app.viewport_cols.max(1));
        let offset = app.offset_cells();
        let pages = app.page_count();
        let buf = frame.buffer_mut();

        for col in 0..area.width {
            let x = area.x + col;
            let (symbol, style) = match column_at(col, offset, page_cols, pages) {
                Column::Gutter => ('░', Style::default().fg(theme.bg2).bg(theme.bg0)),
                Column::Page { index, edge } => (
                    if edge { '│' } else { ' ' },
                    Style::default().fg(theme.grey2).bg(theme.page_color(index)),
                ),
            };
            for y in area.top()..area.bottom() {
                buf[(x, y)].set_char(symbol).set_style(style);
            }
        }

        // Page labels travel with their page
        let label_row = area.y + area.height / 2;
        let label_style = Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD);
        for index in 0..pages {
            let label = format!("Page {}", index + 1);
            let center = index as f64 * page_cols + page_cols / 2.0 + offset;
            let start = (center - label.len() as f64 / 2.0).round();
            for (i, ch) in label.chars().enumerate() {
                let col = start + i as f64;
                if col >= 0.0 && col < f64::from(area.width) {
                    buf[(area.x + col as u16, label_row)]
                        .set_char(ch)
                        .set_style(label_style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_at_rest() {
        assert_eq!(column_at(0, 0.0, 80.0, 3), Column::Page { index: 0, edge: true });
        assert_eq!(column_at(40, 0.0, 80.0, 3), Column::Page { index: 0, edge: false });
        assert_eq!(column_at(79, 0.0, 80.0, 3), Column::Page { index: 0, edge: true });
    }

    #[test]
    fn test_column_at_scrolled() {
        // Half way to page 1
        assert_eq!(column_at(50, -40.0, 80.0, 3), Column::Page { index: 1, edge: false });
        assert_eq!(column_at(10, -40.0, 80.0, 3), Column::Page { index: 0, edge: false });
    }

    #[test]
    fn test_column_at_overscroll() {
        // Pulled 10 columns past the first page
        assert_eq!(column_at(5, 10.0, 80.0, 3), Column::Gutter);
        // Pulled past the last page
        assert_eq!(column_at(75, -170.0, 80.0, 3), Column::Gutter);
    }
}

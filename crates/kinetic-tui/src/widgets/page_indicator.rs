use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use kinetic_core::controller::destination;

use crate::app::App;

/// One dot per page, the visible page filled
pub struct PageIndicatorWidget;

impl PageIndicatorWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let visible = destination::page_index(
            app.controller.rendered_offset(),
            app.controller.page_size(),
        )
        .clamp(0, app.page_count() - 1);

        let spans: Vec<Span> = (0..app.page_count())
            .map(|index| {
                if index == visible {
                    Span::styled("● ", Style::default().fg(app.theme.accent))
                } else {
                    Span::styled("○ ", Style::default().fg(app.theme.grey0))
                }
            })
            .collect();

        let paragraph = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .style(Style::default().bg(app.theme.bg0));
        frame.render_widget(paragraph, area);
    }
}

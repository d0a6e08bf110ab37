use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use kinetic_core::{InteractionState, ScrollMode};

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let controller = &app.controller;

        let mode_str = match controller.config().mode {
            ScrollMode::Free => "FREE",
            ScrollMode::Paging => "PAGING",
        };

        let state = controller.state();
        let state_color = match state {
            InteractionState::Idle => theme.idle,
            InteractionState::Dragging => theme.dragging,
            InteractionState::Flinging => theme.flinging,
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {} ", msg)
        } else {
            let page = match app.last_page_change() {
                Some(change) => format!("page {} → {}", change.old + 1, change.new + 1),
                None => format!("page {}", controller.current_page() + 1),
            };
            format!(
                " offset {:.1} | v {:.0}/s | {} ",
                controller.rendered_offset(),
                controller.velocity(),
                page
            )
        };

        let help_hint = " q:quit h/l:page g/G:first/last m:mode ";
        let used = mode_str.len() + state.as_str().len() + 4
            + status_text.chars().count()
            + help_hint.len();
        let padding_len = (area.width as usize).saturating_sub(used);

        let bar = Style::default().bg(theme.bg2);
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", mode_str),
                Style::default()
                    .fg(theme.bg0)
                    .bg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" {} ", state.as_str()),
                Style::default().fg(theme.bg0).bg(state_color),
            ),
            Span::styled(status_text, bar.fg(theme.fg0)),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, bar.fg(theme.grey2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}

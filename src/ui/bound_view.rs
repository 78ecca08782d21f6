use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Server ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused());

    let url = state.workflow.server_url().unwrap_or_default();
    let lines = vec![
        Line::from(vec![
            Span::styled(" Server URL: ", Theme::secondary()),
            Span::styled(url, Theme::bound_url()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw(" "),
            Span::styled(" Remove Server URL ", Theme::button()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" d", Theme::key_hint()),
            Span::styled("/", Theme::secondary()),
            Span::styled("Del", Theme::key_hint()),
            Span::styled(" Remove  ", Theme::secondary()),
            Span::styled("q", Theme::key_hint()),
            Span::styled(" Quit", Theme::secondary()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

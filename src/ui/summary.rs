use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// The "selected region" block shown under either view.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(region) = state.workflow.selected() else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());

    let name = region.display_name(&state.config.ui.summary_locale);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Selected Region: ", Theme::secondary()),
            Span::styled(name, Theme::title()),
        ]),
        Line::from(vec![
            Span::styled(" Selected Server URL: ", Theme::secondary()),
            Span::styled(region.server_url.as_str(), Theme::text()),
        ]),
        Line::from(vec![
            Span::styled(" Icon: ", Theme::secondary()),
            Span::styled(region.icon_url.as_str(), Theme::muted()),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let status = format!(" {} ", state.status_line());
    let hint = if state.alert.is_some() {
        " [ALERT] "
    } else if state.fetch_in_flight {
        " [FETCHING] "
    } else {
        ""
    };

    // Pad to fill remaining space
    let used = status.chars().count() + hint.len();
    let remaining = (area.width as usize).saturating_sub(used);

    let line = Line::from(vec![
        Span::styled(status, Theme::status_bar()),
        Span::styled(" ".repeat(remaining), Theme::status_bar()),
        Span::styled(
            hint,
            Style::default().fg(Theme::ACCENT_AMBER).bg(Theme::BG_ELEVATED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

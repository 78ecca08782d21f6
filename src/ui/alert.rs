use crate::app::state::Alert;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, alert: &Alert) {
    let area = frame.area();

    // Center the popup: fit the message, min 30 wide, never past the edges
    let text_w = alert.message.chars().count() as u16 + 4;
    let popup_w = text_w.max(30).min(area.width.saturating_sub(4));
    let popup_h = 6u16.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_w)) / 2;
    let popup_y = (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Alert ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_AMBER))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let lines = vec![
        Line::from(Span::styled(alert.message.as_str(), Theme::text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Theme::key_hint()),
            Span::styled(" OK", Theme::secondary()),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

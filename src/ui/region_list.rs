use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use unicode_width::UnicodeWidthStr;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows left for region entries once borders and the help line are taken.
pub fn capacity(area: Rect) -> usize {
    (area.height as usize).saturating_sub(3)
}

/// Pad `text` with spaces to `width` terminal columns.
fn pad_to_width(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Select a region: ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 || inner.width < 10 {
        return;
    }

    let list_h = capacity(area);
    let list_area = Rect::new(inner.x, inner.y, inner.width.saturating_sub(1), list_h as u16);

    let Some(regions) = state.workflow.regions() else {
        let frame_idx = (state.tick_count as usize / 2) % SPINNER.len();
        let line = Line::from(vec![
            Span::styled(format!(" {} ", SPINNER[frame_idx]), Theme::key_hint()),
            Span::styled("Loading regions...", Theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(line), list_area);
        return;
    };

    if regions.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(" No regions available", Theme::muted())),
            list_area,
        );
    } else {
        let locale = &state.config.ui.list_locale;
        let name_w = regions
            .iter()
            .map(|r| UnicodeWidthStr::width(r.display_name(locale)))
            .max()
            .unwrap_or(0)
            .min(32);

        let start = state.list.scroll_offset;
        let end = (start + list_h).min(regions.len());
        let mut lines: Vec<Line> = Vec::new();
        for (i, region) in regions.iter().enumerate().take(end).skip(start) {
            let is_selected = i == state.list.selected;
            let marker = if is_selected { "▸" } else { " " };
            let name = pad_to_width(region.display_name(locale), name_w);

            if is_selected {
                let text = format!("{} {}  {}", marker, name, region.icon_url);
                let padded = pad_to_width(&text, list_area.width as usize);
                lines.push(Line::from(Span::styled(padded, Theme::highlight())));
            } else {
                lines.push(Line::from(vec![
                    Span::styled(format!("{} {}  ", marker, name), Theme::text()),
                    Span::styled(region.icon_url.clone(), Theme::secondary()),
                ]));
            }
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        if regions.len() > list_h {
            let scrollbar_area = Rect::new(
                inner.x + inner.width.saturating_sub(1),
                inner.y,
                1,
                list_h as u16,
            );
            let mut scrollbar_state = ScrollbarState::new(regions.len().saturating_sub(list_h))
                .position(state.list.scroll_offset);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .thumb_style(Theme::scrollbar_thumb())
                    .track_style(Theme::scrollbar_track()),
                scrollbar_area,
                &mut scrollbar_state,
            );
        }
    }

    // Keybinding help
    let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" ↑↓", Theme::key_hint()),
        Span::styled(" Navigate  ", Theme::secondary()),
        Span::styled("Enter", Theme::key_hint()),
        Span::styled(" Select  ", Theme::secondary()),
        Span::styled("q", Theme::key_hint()),
        Span::styled(" Quit", Theme::secondary()),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}

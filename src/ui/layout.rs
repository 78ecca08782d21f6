use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub summary: Rect,
    pub status_bar: Rect,
}

/// Rows taken by the selected-region summary block (borders included).
pub const SUMMARY_HEIGHT: u16 = 5;

pub fn compute_layout(area: Rect, show_summary: bool) -> AppLayout {
    let summary_height = if show_summary { SUMMARY_HEIGHT } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Header
            Constraint::Min(3),                 // Pick list or bound view
            Constraint::Length(summary_height), // Selected region
            Constraint::Length(1),              // Status bar
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        main: chunks[1],
        summary: chunks[2],
        status_bar: chunks[3],
    }
}

mod alert;
mod bound_view;
mod layout;
mod region_list;
mod status_bar;
mod summary;
mod theme;

use crate::app::state::AppState;
use crate::region::Phase;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area, state.workflow.selected().is_some());

    render_header(frame, app_layout.header);
    if state.workflow.phase() == Phase::Bound {
        bound_view::render(frame, app_layout.main, state);
    } else {
        region_list::render(frame, app_layout.main, state);
    }
    summary::render(frame, app_layout.summary, state);
    status_bar::render(frame, app_layout.status_bar, state);

    if let Some(alert) = &state.alert {
        alert::render(frame, alert);
    }
}

/// How many region rows fit on a screen of `area`; the handler pages by it.
pub fn list_capacity(area: Rect, state: &AppState) -> usize {
    let app_layout = layout::compute_layout(area, state.workflow.selected().is_some());
    region_list::capacity(app_layout.main)
}

fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" regionpick ", Theme::title().bg(Theme::BG_ELEVATED)),
        Span::styled(" server region settings", Theme::secondary()),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event::AppEvent;
    use crate::app::handler::handle_event;
    use crate::config::AppConfig;
    use crate::region::testing::{armenia, georgia, Reply, StubDirectory};
    use crate::region::{DirectoryError, MemoryStore, RegionWorkflow};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::sync::Arc;

    async fn state() -> AppState {
        let workflow = RegionWorkflow::new(
            Arc::new(MemoryStore::new()),
            StubDirectory::new(Reply::Regions(vec![])),
        );
        let mut state = AppState::new(AppConfig::default(), workflow);
        state.workflow.activate().await.unwrap();
        state
    }

    fn screen(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[tokio::test]
    async fn test_loading_until_regions_arrive() {
        let state = state().await;
        let text = screen(&state);
        assert!(text.contains("Select a region:"));
        assert!(text.contains("Loading regions..."));
    }

    #[tokio::test]
    async fn test_pick_view_lists_names_and_icons() {
        let mut state = state().await;
        handle_event(&mut state, AppEvent::RegionsFetched(Ok(vec![armenia(), georgia()])));
        let text = screen(&state);
        assert!(text.contains("Armenia"));
        assert!(text.contains("Georgia"));
        assert!(text.contains("u2"));
        assert!(!text.contains("Loading regions..."));
        assert!(!text.contains("Selected Region:"));
    }

    #[tokio::test]
    async fn test_bound_view_and_summary() {
        let mut state = state().await;
        handle_event(&mut state, AppEvent::RegionsFetched(Ok(vec![armenia()])));
        state.workflow.select(armenia()).await.unwrap();

        let text = screen(&state);
        assert!(text.contains("Server URL: a"));
        assert!(text.contains("Remove Server URL"));
        assert!(text.contains("Selected Region: Армения"));
        assert!(text.contains("Selected Server URL: a"));
    }

    #[tokio::test]
    async fn test_not_found_alert_overlays_loading() {
        let mut state = state().await;
        handle_event(&mut state, AppEvent::RegionsFetched(Err(DirectoryError::NotFound)));
        let text = screen(&state);
        assert!(text.contains("API endpoint not found"));
        assert!(text.contains("Loading regions..."));
    }

    #[tokio::test]
    async fn test_summary_locale_is_configurable() {
        let mut state = state().await;
        state.config.ui.summary_locale = "am".into();
        state.workflow.select(armenia()).await.unwrap();
        assert!(screen(&state).contains("Selected Region: Armenia"));
    }

    #[tokio::test]
    async fn test_list_capacity_shrinks_with_summary() {
        let mut state = state().await;
        let area = Rect::new(0, 0, 80, 24);
        let without = list_capacity(area, &state);
        state.workflow.select(armenia()).await.unwrap();
        assert_eq!(list_capacity(area, &state), without - layout::SUMMARY_HEIGHT as usize);
    }
}

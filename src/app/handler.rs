use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::AppState;
use crate::region::{Phase, WorkflowError};
use chrono::Local;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Spinner redraws happen every this many ticks while loading.
const SPINNER_TICKS: u64 = 2;

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => handle_terminal(state, cevent),
        AppEvent::RegionsFetched(result) => {
            state.fetch_in_flight = false;
            state.last_fetch = Some(Local::now());
            state.dirty = true;
            match state.workflow.apply_listing(result) {
                Ok(()) => state.list.reset(),
                Err(e) => report_failure(state, "Error fetching region names", &e),
            }
            vec![]
        }
        AppEvent::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            if state.is_loading() && state.tick_count % SPINNER_TICKS == 0 {
                state.dirty = true;
            }
            vec![]
        }
    }
}

/// Log a workflow failure and surface it if it warrants an alert.
pub fn report_failure(state: &mut AppState, context: &str, err: &WorkflowError) {
    tracing::error!(error = %err, "{}", context);
    if err.is_user_facing() {
        state.show_alert(err.to_string());
    }
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind != KeyEventKind::Release => {
            state.dirty = true;
            handle_key(state, key)
        }
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Alert captures all input when visible
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.alert = None;
        }
        return vec![];
    }

    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
        return vec![Action::Quit];
    }

    match state.workflow.phase() {
        Phase::Selecting => handle_list_key(state, key),
        Phase::Bound => handle_bound_key(key),
        _ => vec![],
    }
}

fn handle_list_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    let total = state.regions().len();
    let visible = state.list_height;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            state.list.move_up();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            state.list.move_down(total);
        }
        KeyCode::PageUp => {
            for _ in 0..10 {
                state.list.move_up();
            }
        }
        KeyCode::PageDown => {
            for _ in 0..10 {
                state.list.move_down(total);
            }
        }
        KeyCode::Home | KeyCode::Char('g') => {
            state.list.home();
        }
        KeyCode::End | KeyCode::Char('G') => {
            state.list.end(total);
        }
        KeyCode::Enter => {
            return match state.highlighted_region() {
                Some(region) => vec![Action::SelectRegion(region.clone())],
                None => vec![],
            };
        }
        _ => {}
    }
    state.list.ensure_visible(visible);
    vec![]
}

fn handle_bound_key(key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Delete
        | KeyCode::Backspace
        | KeyCode::Char('d')
        | KeyCode::Char('r') => vec![Action::RemoveSelection],
        _ => vec![],
    }
}

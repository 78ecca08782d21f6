//! Carries out the actions produced by the handler.
//!
//! Storage work is awaited in place, one action at a time. Directory fetches
//! run on a spawned task and come back as [`AppEvent::RegionsFetched`].

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler::report_failure;
use crate::app::state::AppState;
use std::collections::VecDeque;
use tokio::sync::mpsc::UnboundedSender;

/// Restore the persisted selection and kick off a fetch if there is none.
pub async fn activate(state: &mut AppState, event_tx: &UnboundedSender<AppEvent>) {
    if let Err(e) = state.workflow.activate().await {
        report_failure(state, "Error checking server URL in storage", &e);
    }
    state.dirty = true;
    if state.workflow.needs_listing() {
        run_actions(state, vec![Action::FetchRegions], event_tx).await;
    }
}

/// Execute `actions` in order, including any follow-ups they schedule.
pub async fn run_actions(
    state: &mut AppState,
    actions: Vec<Action>,
    event_tx: &UnboundedSender<AppEvent>,
) {
    let mut queue: VecDeque<Action> = actions.into();
    while let Some(action) = queue.pop_front() {
        match action {
            Action::FetchRegions => spawn_fetch(state, event_tx),
            Action::SelectRegion(region) => {
                if let Err(e) = state.workflow.select(region).await {
                    report_failure(state, "Error storing server URL", &e);
                }
                state.dirty = true;
            }
            Action::RemoveSelection => {
                if let Err(e) = state.workflow.remove().await {
                    report_failure(state, "Error removing server URL", &e);
                }
                state.list.reset();
                state.dirty = true;
                if state.workflow.needs_listing() {
                    queue.push_back(Action::FetchRegions);
                }
            }
            Action::Quit => {
                state.should_quit = true;
            }
        }
    }
}

fn spawn_fetch(state: &mut AppState, event_tx: &UnboundedSender<AppEvent>) {
    if state.fetch_in_flight {
        return;
    }
    state.fetch_in_flight = true;
    state.dirty = true;

    let directory = state.workflow.directory();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = directory.fetch_regions().await;
        // Receiver gone means the app already quit
        let _ = tx.send(AppEvent::RegionsFetched(result));
    });
}

use crate::region::{DirectoryError, RegionDescriptor};
use crossterm::event::Event as CrosstermEvent;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A directory fetch finished (successfully or not)
    RegionsFetched(Result<Vec<RegionDescriptor>, DirectoryError>),

    /// Tick for UI refresh
    Tick,
}

//! The region selection state machine.
//!
//! ```text
//! Uninitialized --activate--> CheckingStorage --stored--> Bound
//!                                     |
//!                                     +--empty--> Listing --fetched--> Selecting --select--> Bound
//!                                                    ^                                        |
//!                                                    +----------------remove------------------+
//! ```
//!
//! Every step updates in-memory state first and reports failures afterwards
//! as a [`WorkflowError`]; nothing is rolled back or retried.

use super::directory::DirectoryService;
use super::error::{DirectoryError, WorkflowError};
use super::model::RegionDescriptor;
use super::store::{self, KeyValueStore};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    CheckingStorage,
    /// Waiting on the directory. Also where a failed fetch leaves us.
    Listing,
    Selecting,
    Bound,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Uninitialized => "starting",
            Phase::CheckingStorage => "checking storage",
            Phase::Listing => "loading",
            Phase::Selecting => "select a region",
            Phase::Bound => "bound",
        }
    }
}

pub struct RegionWorkflow {
    store: Arc<dyn KeyValueStore>,
    directory: Arc<dyn DirectoryService>,
    phase: Phase,
    server_url: Option<String>,
    /// `None` until a fetch succeeds.
    regions: Option<Vec<RegionDescriptor>>,
    selected: Option<RegionDescriptor>,
}

impl RegionWorkflow {
    pub fn new(store: Arc<dyn KeyValueStore>, directory: Arc<dyn DirectoryService>) -> Self {
        Self {
            store,
            directory,
            phase: Phase::Uninitialized,
            server_url: None,
            regions: None,
            selected: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }

    pub fn regions(&self) -> Option<&[RegionDescriptor]> {
        self.regions.as_deref()
    }

    pub fn selected(&self) -> Option<&RegionDescriptor> {
        self.selected.as_ref()
    }

    /// Handle for fetching off the event loop; feed the result back through
    /// [`RegionWorkflow::apply_listing`].
    pub fn directory(&self) -> Arc<dyn DirectoryService> {
        Arc::clone(&self.directory)
    }

    /// Whether the caller should dispatch a directory fetch now.
    pub fn needs_listing(&self) -> bool {
        self.phase == Phase::Listing && self.regions.is_none()
    }

    /// Restore any persisted selection. Ends in `Bound` when one exists,
    /// otherwise in `Listing`. A storage failure counts as "nothing stored".
    pub async fn activate(&mut self) -> Result<(), WorkflowError> {
        self.phase = Phase::CheckingStorage;

        let loaded = match store::load_selection(self.store.as_ref()).await {
            Ok(loaded) => loaded,
            Err(e) => {
                self.phase = Phase::Listing;
                return Err(e.into());
            }
        };

        match loaded.selection {
            Some(selection) => {
                tracing::info!(server_url = %selection.server_url, "restored persisted region");
                self.server_url = Some(selection.server_url);
                self.selected = selection.region;
                self.phase = Phase::Bound;
            }
            None => {
                self.phase = Phase::Listing;
            }
        }

        match loaded.parse_error {
            Some(e) => Err(WorkflowError::Parse(format!("stored selectedRegion: {}", e))),
            None => Ok(()),
        }
    }

    /// Apply a directory result. Results that arrive after the workflow has
    /// left `Listing` are dropped.
    pub fn apply_listing(
        &mut self,
        result: Result<Vec<RegionDescriptor>, DirectoryError>,
    ) -> Result<(), WorkflowError> {
        if self.phase != Phase::Listing {
            tracing::debug!(phase = ?self.phase, "discarding stale directory result");
            return Ok(());
        }
        let regions = result?;
        self.regions = Some(regions);
        self.phase = Phase::Selecting;
        Ok(())
    }

    /// Bind to `region` and persist it. The in-memory binding sticks even if
    /// the write fails.
    pub async fn select(&mut self, region: RegionDescriptor) -> Result<(), WorkflowError> {
        tracing::info!(server_url = %region.server_url, "region selected");
        self.server_url = Some(region.server_url.clone());
        self.phase = Phase::Bound;
        let selected = self.selected.insert(region);

        store::save_selection(self.store.as_ref(), selected).await?;
        Ok(())
    }

    /// Forget the binding, both in storage and in memory. Ends in `Listing`
    /// with no regions so the caller re-fetches.
    pub async fn remove(&mut self) -> Result<(), WorkflowError> {
        tracing::info!(server_url = ?self.server_url, "removing persisted region");
        self.server_url = None;
        self.selected = None;
        self.regions = None;
        self.phase = Phase::Listing;

        store::clear_selection(self.store.as_ref()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::model::{SELECTED_REGION_KEY, SERVER_URL_KEY};
    use crate::region::store::{FileStore, MemoryStore};
    use crate::region::testing::{armenia, georgia, BrokenStore, Reply, StubDirectory};

    fn workflow(
        store: Arc<dyn KeyValueStore>,
        directory: Arc<StubDirectory>,
    ) -> RegionWorkflow {
        RegionWorkflow::new(store, directory)
    }

    /// Fetch inline and apply, as the event loop does across a task hop.
    async fn list(wf: &mut RegionWorkflow) -> Result<(), WorkflowError> {
        let result = wf.directory().fetch_regions().await;
        wf.apply_listing(result)
    }

    #[tokio::test]
    async fn test_empty_storage_lists_regions() {
        let store = Arc::new(MemoryStore::new());
        let dir = StubDirectory::new(Reply::Regions(vec![armenia()]));
        let mut wf = workflow(store, dir.clone());

        assert_eq!(wf.phase(), Phase::Uninitialized);
        wf.activate().await.unwrap();
        assert_eq!(wf.phase(), Phase::Listing);
        assert!(wf.needs_listing());

        list(&mut wf).await.unwrap();
        assert_eq!(wf.phase(), Phase::Selecting);
        let regions = wf.regions().unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].display_name("am"), "Armenia");
        assert_eq!(dir.calls(), 1);
    }

    #[tokio::test]
    async fn test_select_persists_both_keys() {
        let store = Arc::new(MemoryStore::new());
        let dir = StubDirectory::new(Reply::Regions(vec![armenia(), georgia()]));
        let mut wf = workflow(store.clone(), dir);
        wf.activate().await.unwrap();
        list(&mut wf).await.unwrap();

        for region in [armenia(), georgia()] {
            wf.select(region.clone()).await.unwrap();
            assert_eq!(wf.phase(), Phase::Bound);
            assert_eq!(wf.server_url(), Some(region.server_url.as_str()));
            assert_eq!(wf.selected(), Some(&region));

            assert_eq!(
                store.get(SERVER_URL_KEY).await.unwrap(),
                Some(region.server_url.clone())
            );
            assert_eq!(
                store.get(SELECTED_REGION_KEY).await.unwrap(),
                Some(serde_json::to_string(&region).unwrap())
            );
        }
        assert_eq!(wf.selected().unwrap().display_name("ru"), "Грузия");
    }

    #[tokio::test]
    async fn test_stored_selection_skips_fetch() {
        let store = Arc::new(MemoryStore::new());
        store.set(SERVER_URL_KEY, "a").await.unwrap();
        store
            .set(SELECTED_REGION_KEY, &serde_json::to_string(&armenia()).unwrap())
            .await
            .unwrap();
        let dir = StubDirectory::new(Reply::Regions(vec![georgia()]));
        let mut wf = workflow(store, dir.clone());

        wf.activate().await.unwrap();
        assert_eq!(wf.phase(), Phase::Bound);
        assert!(!wf.needs_listing());
        assert_eq!(wf.server_url(), Some("a"));
        assert_eq!(wf.selected(), Some(&armenia()));
        assert!(wf.regions().is_none());
        assert_eq!(dir.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_found_keeps_listing() {
        let store = Arc::new(MemoryStore::new());
        let mut wf = workflow(store, StubDirectory::new(Reply::NotFound));
        wf.activate().await.unwrap();

        let err = list(&mut wf).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound));
        assert!(err.is_user_facing());
        assert_eq!(wf.phase(), Phase::Listing);
        assert!(wf.regions().is_none());
    }

    #[tokio::test]
    async fn test_other_failures_are_tagged_and_stall() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let mut wf = workflow(store.clone(), StubDirectory::new(Reply::Status(502)));
        wf.activate().await.unwrap();
        let err = list(&mut wf).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Network(_)));
        assert!(!err.is_user_facing());
        assert_eq!(wf.phase(), Phase::Listing);

        let mut wf = workflow(store, StubDirectory::new(Reply::Malformed));
        wf.activate().await.unwrap();
        let err = list(&mut wf).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Parse(_)));
        assert!(wf.regions().is_none());
    }

    #[tokio::test]
    async fn test_remove_clears_and_relists() {
        let store = Arc::new(MemoryStore::new());
        let dir = StubDirectory::new(Reply::Regions(vec![armenia()]));
        let mut wf = workflow(store.clone(), dir.clone());
        wf.activate().await.unwrap();
        list(&mut wf).await.unwrap();
        wf.select(armenia()).await.unwrap();

        wf.remove().await.unwrap();
        assert_eq!(wf.phase(), Phase::Listing);
        assert!(wf.needs_listing());
        assert_eq!(wf.server_url(), None);
        assert_eq!(wf.selected(), None);
        assert_eq!(store.get(SERVER_URL_KEY).await.unwrap(), None);
        assert_eq!(store.get(SELECTED_REGION_KEY).await.unwrap(), None);

        list(&mut wf).await.unwrap();
        assert_eq!(wf.phase(), Phase::Selecting);
        assert_eq!(dir.calls(), 2);
    }

    #[tokio::test]
    async fn test_remove_without_selection() {
        let store = Arc::new(MemoryStore::new());
        let mut wf = workflow(store.clone(), StubDirectory::new(Reply::NotFound));
        wf.remove().await.unwrap();
        wf.remove().await.unwrap();
        assert_eq!(store.get(SERVER_URL_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_roll_back() {
        let dir = StubDirectory::new(Reply::Regions(vec![armenia()]));
        let mut wf = workflow(Arc::new(BrokenStore), dir);

        // Unreadable storage behaves like empty storage
        let err = wf.activate().await.unwrap_err();
        assert!(matches!(err, WorkflowError::Storage(_)));
        assert_eq!(wf.phase(), Phase::Listing);

        list(&mut wf).await.unwrap();
        let err = wf.select(armenia()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Storage(_)));
        assert_eq!(wf.phase(), Phase::Bound);
        assert_eq!(wf.server_url(), Some("a"));

        let err = wf.remove().await.unwrap_err();
        assert!(matches!(err, WorkflowError::Storage(_)));
        assert_eq!(wf.phase(), Phase::Listing);
        assert_eq!(wf.selected(), None);
    }

    #[tokio::test]
    async fn test_garbled_stored_region_falls_back_to_listing() {
        let store = Arc::new(MemoryStore::new());
        store.set(SELECTED_REGION_KEY, "{oops").await.unwrap();
        let mut wf = workflow(store, StubDirectory::new(Reply::Regions(vec![])));

        let err = wf.activate().await.unwrap_err();
        assert!(matches!(err, WorkflowError::Parse(_)));
        assert_eq!(wf.phase(), Phase::Listing);
    }

    #[tokio::test]
    async fn test_stale_listing_is_discarded() {
        let store = Arc::new(MemoryStore::new());
        let mut wf = workflow(store, StubDirectory::new(Reply::Regions(vec![])));
        wf.activate().await.unwrap();
        wf.select(armenia()).await.unwrap();

        wf.apply_listing(Ok(vec![georgia()])).unwrap();
        assert_eq!(wf.phase(), Phase::Bound);
        assert!(wf.regions().is_none());
    }

    #[tokio::test]
    async fn test_pick_survives_restart_after_corrupt_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("storage.json");
        std::fs::write(&path, "{truncated").unwrap();
        let dir = StubDirectory::new(Reply::Regions(vec![armenia()]));

        let mut wf = workflow(Arc::new(FileStore::new(&path)), dir.clone());
        assert!(matches!(wf.activate().await, Err(WorkflowError::Storage(_))));
        assert_eq!(wf.phase(), Phase::Listing);
        list(&mut wf).await.unwrap();
        wf.select(armenia()).await.unwrap();

        let mut restarted = workflow(Arc::new(FileStore::new(&path)), dir);
        restarted.activate().await.unwrap();
        assert_eq!(restarted.phase(), Phase::Bound);
        assert_eq!(restarted.server_url(), Some("a"));
    }
}

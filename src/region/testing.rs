//! Fixtures shared by unit tests across the crate.

use super::directory::DirectoryService;
use super::error::{DirectoryError, StoreError};
use super::model::RegionDescriptor;
use super::store::KeyValueStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub enum Reply {
    Regions(Vec<RegionDescriptor>),
    NotFound,
    Status(u16),
    Malformed,
}

/// Directory that answers every fetch with a canned reply and counts calls.
pub struct StubDirectory {
    reply: Reply,
    calls: AtomicUsize,
}

impl StubDirectory {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryService for StubDirectory {
    async fn fetch_regions(&self) -> Result<Vec<RegionDescriptor>, DirectoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Regions(regions) => Ok(regions.clone()),
            Reply::NotFound => Err(DirectoryError::NotFound),
            Reply::Status(status) => Err(DirectoryError::Status {
                status: *status,
                reason: "Bad Gateway".into(),
            }),
            Reply::Malformed => Err(DirectoryError::Parse(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            )),
        }
    }
}

/// Every operation fails as if the disk were gone.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(std::io::Error::other("disk gone").into())
    }
    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(std::io::Error::other("disk gone").into())
    }
    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(std::io::Error::other("disk gone").into())
    }
}

pub fn region(url: &str, am: &str, ru: &str, icon: &str) -> RegionDescriptor {
    RegionDescriptor {
        server_url: url.into(),
        country_name: BTreeMap::from([
            ("am".to_string(), am.to_string()),
            ("ru".to_string(), ru.to_string()),
        ]),
        icon_url: icon.into(),
    }
}

pub fn armenia() -> RegionDescriptor {
    region("a", "Armenia", "Армения", "u1")
}

pub fn georgia() -> RegionDescriptor {
    region("g", "Georgia", "Грузия", "u2")
}

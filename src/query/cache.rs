// Lazily-loaded cache of the presence icon payloads.
//
// One slot per resource key, allocated up front so the map itself never
// mutates and the cache can be shared by reference across request
// contexts. The OnceCell per slot gives the first-load guarantee: however
// many requests race on a cold key, the loader runs once and everyone
// sees the same immutable bytes. A failed load is memoized as absent and
// the renderers degrade to an empty body.

use anyhow::{Context, Result};
use log::{debug, error};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{AvailabilityState, ResourceKey};

/// Fetches raw bytes for a logical resource path. Failure stays inside the
/// cache; callers of the cache never see it.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<Vec<u8>>;
}

/// Reads resources from a directory on disk.
pub struct FileResourceLoader {
    base: PathBuf,
}

impl FileResourceLoader {
    pub fn new(base: &Path) -> Self {
        FileResourceLoader {
            base: base.to_path_buf(),
        }
    }
}

impl ResourceLoader for FileResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.base.join(path);
        fs::read(&full).with_context(|| format!("Failed to read resource {}", full.display()))
    }
}

/// Logical icon file for each cache key. Available and chat share the
/// green icon; away and extended-away share the yellow one.
fn icon_path(key: ResourceKey) -> &'static str {
    match key {
        ResourceKey::State(AvailabilityState::Available) | ResourceKey::Chat => {
            "user-green-16x16.gif"
        }
        ResourceKey::State(AvailabilityState::Away)
        | ResourceKey::State(AvailabilityState::ExtendedAway) => "user-yellow-16x16.gif",
        ResourceKey::State(AvailabilityState::DoNotDisturb) => "user-red-16x16.gif",
        ResourceKey::State(AvailabilityState::Unavailable) => "user-clear-16x16.gif",
    }
}

pub struct ResourceCache<L> {
    loader: L,
    slots: HashMap<ResourceKey, OnceCell<Option<Vec<u8>>>>,
}

impl<L: ResourceLoader> ResourceCache<L> {
    pub fn new(loader: L) -> Self {
        let slots = ResourceKey::ALL
            .iter()
            .map(|key| (*key, OnceCell::new()))
            .collect();
        ResourceCache { loader, slots }
    }

    /// Bytes for a key, loading them on first access. `None` means the
    /// underlying resource could not be read; that outcome is cached too,
    /// so a missing file is reported once rather than re-probed per
    /// request.
    pub fn get(&self, key: ResourceKey) -> Option<&[u8]> {
        // Slots are preallocated for every key in ResourceKey::ALL.
        let slot = self.slots.get(&key)?;
        slot.get_or_init(|| {
            let path = icon_path(key);
            match self.loader.load(path) {
                Ok(bytes) => {
                    debug!("Loaded resource {} ({} bytes)", path, bytes.len());
                    Some(bytes)
                }
                Err(e) => {
                    error!("Error loading resource {}: {:#}", path, e);
                    None
                }
            }
        })
        .as_deref()
    }
}

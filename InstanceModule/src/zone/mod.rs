//! # Zone Registry
//!
//! Per-instance zone handling. The store owns the mapping, geometry decides
//! what may enter it, and sync mirrors every change to the game process.
//!
//! Edits arriving from the game process are fire-and-forget: an invalid add
//! or an edit naming an unknown zone is logged and dropped, never reported
//! back to the requester. Sync commands are queued, so no edit waits on the
//! game process.

use std::sync::Arc;

use log::{debug, info};
use trains_shared::ipc::{ZoneAddIpc, ZoneIpcEvent};
use trains_shared::zone::{Zone, ZoneConfig, ZoneTarget};

pub mod geometry;
pub mod store;
pub mod sync;

pub use geometry::{overlaps, validate_new_zone, ZoneRejection};
pub use store::ZoneStore;
pub use sync::{RconChannel, ZoneSync};

/// Zone store paired with the sync channel of its instance
pub struct ZoneRegistry {
    store: ZoneStore,
    sync: ZoneSync,
}

impl ZoneRegistry {
    pub fn new(zones: ZoneConfig, sync: ZoneSync) -> Self {
        Self {
            store: ZoneStore::new(zones),
            sync,
        }
    }

    pub fn store(&self) -> &ZoneStore {
        &self.store
    }

    pub fn snapshot(&self) -> Arc<ZoneConfig> {
        self.store.snapshot()
    }

    pub fn sync(&self) -> &ZoneSync {
        &self.sync
    }

    /// Apply one decoded edit from the game process
    pub fn apply(&mut self, event: ZoneIpcEvent) {
        match event {
            ZoneIpcEvent::Add(add) => self.add_zone(add),
            ZoneIpcEvent::Delete(delete) => self.delete_zone(&delete.name),
            ZoneIpcEvent::Status(status) => self.set_status(&status.name, status.enabled),
            ZoneIpcEvent::Link(link) => {
                let target = ZoneTarget {
                    instance: link.instance,
                    name: link.target_name,
                };
                self.set_link(&link.name, target)
            }
        }
    }

    pub fn add_zone(&mut self, event: ZoneAddIpc) {
        info!("Received zone add {} on {}", event.name, event.surface);
        let candidate =
            Zone::new(event.name, event.surface, event.x1, event.y1, event.x2, event.y2);
        let name = candidate.name.clone();

        if let Err(reason) = self.store.add_zone(candidate) {
            debug!("Ignoring zone add {}: {}", name, reason);
            return;
        }

        info!("Created zone {}", name);
        self.sync_zone(&name);
        info!("Finished creating zone {}", name);
    }

    pub fn delete_zone(&mut self, name: &str) {
        if self.store.delete_zone(name) {
            info!("Deleting zone {}", name);
            self.sync_zone(name);
        }
    }

    pub fn set_status(&mut self, name: &str, enabled: bool) {
        if self.store.set_status(name, enabled) {
            self.sync_zone(name);
        }
    }

    pub fn set_link(&mut self, name: &str, target: ZoneTarget) {
        if self.store.set_link(name, target) {
            self.sync_zone(name);
        }
    }

    /// Mirror the current state of one zone to the game process
    pub fn sync_zone(&self, name: &str) {
        let zones = self.store.snapshot();
        self.sync.sync_zone(&zones, name);
    }

    /// Bulk upload of the whole mapping, used when the instance starts
    pub fn upload(&self) -> trains_shared::TrainsResult<()> {
        let zones = self.store.snapshot();
        self.sync.upload_zones(&zones)
    }
}

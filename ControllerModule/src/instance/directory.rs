//! # Instance Directory
//!
//! The controller's record of every known instance. Patches for an instance
//! that is not in the directory are an integrity error: the directory and
//! the fleet have diverged.

use std::collections::BTreeMap;

use log::{debug, error};
use trains_shared::error::{TrainsError, TrainsResult};
use trains_shared::lifecycle::InstanceInfo;
use trains_shared::messages::{InstanceDetails, InstanceDetailsPatch};
use trains_shared::types::InstanceId;

#[derive(Debug, Clone, Default)]
pub struct InstanceDirectory {
    instances: BTreeMap<InstanceId, InstanceDetails>,
}

impl InstanceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// One entry per known instance, with an empty zone list
    pub fn from_instances<'a>(instances: impl IntoIterator<Item = &'a InstanceInfo>) -> Self {
        let instances = instances
            .into_iter()
            .map(|info| {
                let details =
                    InstanceDetails::new(info.id, info.name.clone(), info.status.reduced());
                (info.id, details)
            })
            .collect();
        Self { instances }
    }

    pub fn get(&self, id: InstanceId) -> Option<&InstanceDetails> {
        self.instances.get(&id)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Merge a patch into its instance's entry
    pub fn apply(&mut self, patch: &InstanceDetailsPatch) -> TrainsResult<()> {
        match self.instances.get_mut(&patch.id) {
            Some(details) => {
                details.patch(patch);
                debug!("Patched instance {}", patch.id);
                Ok(())
            }
            None => {
                error!("Unknown instance with id: {}", patch.id);
                Err(TrainsError::UnknownInstance(patch.id))
            }
        }
    }

    /// Every entry; order carries no meaning
    pub fn list(&self) -> Vec<InstanceDetails> {
        self.instances.values().cloned().collect()
    }
}

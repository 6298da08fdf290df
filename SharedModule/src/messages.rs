//! # Cluster Messages
//!
//! Requests and events exchanged between instances and the controller.

use serde::{Serialize, Deserialize};

use crate::lifecycle::SimpleInstanceStatus;
use crate::types::{GlobalTrainId, InstanceId, LocalTrainId};
use crate::zone::ZoneSummary;

/// Instance asks the controller for a cluster-wide id for one of its trains
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainIdRequest {
    pub instance: InstanceId,
    pub train_id: Option<LocalTrainId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainIdResponse {
    /// Newly allocated global id
    pub id: GlobalTrainId,

    /// Local id echoed back from the request
    pub train_id: Option<LocalTrainId>,
}

/// Move a registered train to another instance.
///
/// `payload` is opaque to the controller and delivered verbatim to the
/// destination's game process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainTeleportRequest {
    pub train_id: GlobalTrainId,
    pub instance: InstanceId,
    pub payload: serde_json::Value,
}

/// Destination instance's answer to a teleport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainTeleportResponse {
    pub instance: InstanceId,
    pub output: String,
}

/// Controller's view of one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDetails {
    pub id: InstanceId,
    pub name: String,
    pub status: SimpleInstanceStatus,
    /// Not populated yet; reserved for a persisted view of each instance's zones
    pub zones: Vec<ZoneSummary>,
}

impl InstanceDetails {
    pub fn new(id: InstanceId, name: impl Into<String>, status: SimpleInstanceStatus) -> Self {
        Self {
            id,
            name: name.into(),
            status,
            zones: Vec::new(),
        }
    }

    /// Merge the fields present in a patch
    pub fn patch(&mut self, patch: &InstanceDetailsPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Partial update of an instance's details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDetailsPatch {
    pub id: InstanceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SimpleInstanceStatus>,
}

impl InstanceDetailsPatch {
    pub fn name(id: InstanceId, name: impl Into<String>) -> Self {
        Self { id, name: Some(name.into()), status: None }
    }

    pub fn status(id: InstanceId, status: SimpleInstanceStatus) -> Self {
        Self { id, name: None, status: Some(status) }
    }
}

/// Broadcast carrying a patch to every instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDetailsPatchEvent {
    pub patch: InstanceDetailsPatch,
}

/// Request for the controller's full instance directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceDetailsListRequest;

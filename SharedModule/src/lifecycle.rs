//! # Lifecycle Types
//!
//! Instance lifecycle states, their coarse projection, and the lifecycle
//! participant interface that the host's event dispatcher drives.

use async_trait::async_trait;
use serde::{Serialize, Deserialize};

use crate::error::TrainsResult;
use crate::types::InstanceId;

/// Detailed lifecycle status of an instance as reported by the cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceStatus {
    Unknown,
    Unassigned,
    Stopped,
    Starting,
    Running,
    Stopping,
    CreatingSave,
    ExportingData,
    Deleted,
}

/// Coarse status published to instances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimpleInstanceStatus {
    Starting,
    Available,
    Unavailable,
}

impl InstanceStatus {
    /// Project a detailed status onto the coarse three-value status
    pub fn reduced(self) -> SimpleInstanceStatus {
        match self {
            InstanceStatus::Starting => SimpleInstanceStatus::Starting,
            InstanceStatus::Running => SimpleInstanceStatus::Available,
            InstanceStatus::CreatingSave
            | InstanceStatus::ExportingData
            | InstanceStatus::Unknown
            | InstanceStatus::Unassigned
            | InstanceStatus::Deleted
            | InstanceStatus::Stopped
            | InstanceStatus::Stopping => SimpleInstanceStatus::Unavailable,
        }
    }
}

/// What the host knows about one instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub id: InstanceId,
    pub name: String,
    pub status: InstanceStatus,
}

/// Player activity forwarded by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PlayerEvent {
    Join { name: String },
    Leave { name: String, reason: String },
    Import { name: String },
}

/// Hooks invoked by the host around a plugin's lifetime.
///
/// The host owns the dispatcher and calls these in order: `on_init` once,
/// then `on_start`/`on_stop` per run, with config and player events in
/// between. Every hook defaults to doing nothing.
#[async_trait]
pub trait LifecycleParticipant: Send {
    async fn on_init(&mut self) -> TrainsResult<()> {
        Ok(())
    }

    async fn on_start(&mut self) -> TrainsResult<()> {
        Ok(())
    }

    async fn on_stop(&mut self) -> TrainsResult<()> {
        Ok(())
    }

    async fn on_config_field_changed(
        &mut self,
        _field: &str,
        _curr: &serde_json::Value,
        _prev: &serde_json::Value,
    ) -> TrainsResult<()> {
        Ok(())
    }

    async fn on_player_event(&mut self, _event: &PlayerEvent) -> TrainsResult<()> {
        Ok(())
    }

    async fn on_save_data(&mut self) -> TrainsResult<()> {
        Ok(())
    }

    async fn on_shutdown(&mut self) -> TrainsResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_status_projection() {
        assert_eq!(InstanceStatus::Starting.reduced(), SimpleInstanceStatus::Starting);
        assert_eq!(InstanceStatus::Running.reduced(), SimpleInstanceStatus::Available);

        for status in [
            InstanceStatus::CreatingSave,
            InstanceStatus::ExportingData,
            InstanceStatus::Unknown,
            InstanceStatus::Unassigned,
            InstanceStatus::Deleted,
            InstanceStatus::Stopped,
            InstanceStatus::Stopping,
        ] {
            assert_eq!(status.reduced(), SimpleInstanceStatus::Unavailable, "{:?}", status);
        }
    }

    #[test]
    fn statuses_serialize_snake_case() {
        let creating = serde_json::to_string(&InstanceStatus::CreatingSave).unwrap();
        assert_eq!(creating, "\"creating_save\"");
        let available = serde_json::to_string(&SimpleInstanceStatus::Available).unwrap();
        assert_eq!(available, "\"available\"");
    }
}

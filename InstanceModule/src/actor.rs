//! # Instance Actor
//!
//! Runs an [`InstancePlugin`] on its own task. Commands are processed one at
//! a time in arrival order, so the zone mapping has a single writer. Zone
//! sync is queued rather than awaited; only a teleport reception waits on the
//! game process.

use std::sync::Arc;

use log::{debug, info};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use trains_shared::error::{TrainsError, TrainsResult};
use trains_shared::lifecycle::LifecycleParticipant;
use trains_shared::messages::{
    InstanceDetailsPatchEvent, TrainTeleportRequest, TrainTeleportResponse,
};
use trains_shared::zone::ZoneConfig;

use crate::plugin::InstancePlugin;

/// Mailbox depth for each instance actor
pub const MAILBOX_CAPACITY: usize = 64;

type Reply<T> = oneshot::Sender<TrainsResult<T>>;

pub enum InstanceCommand {
    Start(Reply<()>),
    Stop(Reply<()>),
    Ipc {
        channel: String,
        payload: serde_json::Value,
        reply: Reply<()>,
    },
    Teleport {
        request: TrainTeleportRequest,
        reply: Reply<TrainTeleportResponse>,
    },
    DetailsPatch(InstanceDetailsPatchEvent),
    Zones(oneshot::Sender<Arc<ZoneConfig>>),
}

/// Cloneable sender side of an instance actor
#[derive(Clone)]
pub struct InstanceHandle {
    tx: mpsc::Sender<InstanceCommand>,
}

impl InstanceHandle {
    pub async fn start(&self) -> TrainsResult<()> {
        self.call(InstanceCommand::Start).await
    }

    pub async fn stop(&self) -> TrainsResult<()> {
        self.call(InstanceCommand::Stop).await
    }

    pub async fn ipc(
        &self,
        channel: impl Into<String>,
        payload: serde_json::Value,
    ) -> TrainsResult<()> {
        let channel = channel.into();
        self.call(|reply| InstanceCommand::Ipc { channel, payload, reply }).await
    }

    pub async fn teleport(
        &self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        self.call(|reply| InstanceCommand::Teleport { request, reply }).await
    }

    /// Queue a directory patch; no reply is awaited
    pub async fn details_patch(&self, event: InstanceDetailsPatchEvent) -> TrainsResult<()> {
        self.tx
            .send(InstanceCommand::DetailsPatch(event))
            .await
            .map_err(|_| TrainsError::InstanceGone)
    }

    pub async fn zones(&self) -> TrainsResult<Arc<ZoneConfig>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(InstanceCommand::Zones(reply))
            .await
            .map_err(|_| TrainsError::InstanceGone)?;
        rx.await.map_err(|_| TrainsError::InstanceGone)
    }

    async fn call<T>(&self, command: impl FnOnce(Reply<T>) -> InstanceCommand) -> TrainsResult<T> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(command(reply)).await.map_err(|_| TrainsError::InstanceGone)?;
        rx.await.map_err(|_| TrainsError::InstanceGone)?
    }
}

/// Spawn the actor. The join handle yields the plugin back once every
/// handle has been dropped and queued zone sync has drained.
pub fn spawn(plugin: InstancePlugin) -> (InstanceHandle, JoinHandle<InstancePlugin>) {
    let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
    let task = tokio::spawn(run(plugin, rx));
    (InstanceHandle { tx }, task)
}

async fn run(
    mut plugin: InstancePlugin,
    mut rx: mpsc::Receiver<InstanceCommand>,
) -> InstancePlugin {
    info!("Instance {} actor started", plugin.instance_id());

    while let Some(command) = rx.recv().await {
        match command {
            InstanceCommand::Start(reply) => {
                let _ = reply.send(plugin.on_start().await);
            }
            InstanceCommand::Stop(reply) => {
                let _ = reply.send(plugin.on_stop().await);
            }
            InstanceCommand::Ipc { channel, payload, reply } => {
                let _ = reply.send(plugin.handle_ipc(&channel, payload));
            }
            InstanceCommand::Teleport { request, reply } => {
                let _ = reply.send(plugin.handle_teleport_request(request).await);
            }
            InstanceCommand::DetailsPatch(event) => plugin.handle_details_patch(&event),
            InstanceCommand::Zones(reply) => {
                let _ = reply.send(plugin.zones());
            }
        }
    }

    plugin.registry().sync().flush().await;
    debug!("Instance {} actor stopped", plugin.instance_id());
    plugin
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeController, RecordingRcon};
    use serde_json::json;
    use std::time::Duration;
    use trains_shared::config::PluginConfig;
    use trains_shared::constants::ipc;

    fn plugin(rcon: Arc<RecordingRcon>) -> InstancePlugin {
        let controller = Arc::new(FakeController::default());
        InstancePlugin::new(1, PluginConfig::default(), rcon, controller)
    }

    fn zone_add(name: &str, x: f64) -> serde_json::Value {
        json!({"name": name, "surface": "nauvis", "x1": x, "y1": 0, "x2": x + 5.0, "y2": 5})
    }

    #[tokio::test]
    async fn handle_serializes_edits() {
        let rcon = RecordingRcon::new();
        let (handle, task) = spawn(plugin(rcon.clone()));

        handle.start().await.unwrap();
        for i in 0..5 {
            let x = f64::from(i) * 10.0;
            handle.ipc(ipc::ZONE_ADD, zone_add(&format!("z{}", i), x)).await.unwrap();
        }
        handle.ipc(ipc::ZONE_DELETE, json!({"name": "z0"})).await.unwrap();

        let zones = handle.zones().await.unwrap();
        assert_eq!(zones.len(), 4);
        assert!(!zones.contains_key("z0"));

        drop(handle);
        let plugin = task.await.unwrap();
        assert_eq!(plugin.zones().len(), 4);
        // bulk upload, five upserts, one removal
        assert_eq!(rcon.commands().len(), 7);
    }

    #[tokio::test]
    async fn decode_errors_reach_the_caller() {
        let (handle, _task) = spawn(plugin(RecordingRcon::new()));

        let err = handle.ipc(ipc::ZONE_STATUS, json!({"enabled": true})).await.unwrap_err();
        assert!(matches!(err, TrainsError::Payload { .. }));
    }

    #[tokio::test]
    async fn silent_game_process_does_not_stall_zone_edits() {
        let rcon = RecordingRcon::silent();
        let (handle, _task) = spawn(plugin(rcon.clone()));
        let within = Duration::from_millis(500);

        tokio::time::timeout(within, handle.start()).await.unwrap().unwrap();
        tokio::time::timeout(within, handle.ipc(ipc::ZONE_ADD, zone_add("a", 0.0)))
            .await
            .unwrap()
            .unwrap();
        let zones = tokio::time::timeout(within, handle.zones()).await.unwrap().unwrap();

        assert!(zones.contains_key("a"));
        assert!(!rcon.commands().iter().any(|command| command.contains("sync_zone(\"a\"")));
    }
}

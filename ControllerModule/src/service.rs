//! # Controller Service
//!
//! Runs the [`ControllerPlugin`] on a single task fed by a mailbox. Requests
//! from every instance are applied one at a time in arrival order, which is
//! the only thing keeping train id allocation collision-free.
//!
//! Teleports are split: the registry update happens in order on the service
//! task, the forwarded request is awaited on its own task so a hung
//! destination stalls only its caller.

use log::{error, info, warn};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use trains_shared::error::{TrainsError, TrainsResult};
use trains_shared::lifecycle::{InstanceInfo, InstanceStatus, LifecycleParticipant, PlayerEvent};
use trains_shared::messages::{
    InstanceDetails, InstanceDetailsPatchEvent, TrainIdRequest, TrainIdResponse,
    TrainTeleportRequest, TrainTeleportResponse,
};
use trains_shared::types::GlobalTrainId;

use crate::plugin::{ControllerPlugin, InstanceObserver};
use crate::train::TrainRegistration;

/// Mailbox depth of the controller service
pub const MAILBOX_CAPACITY: usize = 256;

type Reply<T> = oneshot::Sender<TrainsResult<T>>;

pub enum ControllerCommand {
    TrainId {
        request: TrainIdRequest,
        reply: Reply<TrainIdResponse>,
    },
    Teleport {
        request: TrainTeleportRequest,
        reply: Reply<TrainTeleportResponse>,
    },
    PatchEvent {
        event: InstanceDetailsPatchEvent,
        reply: Reply<()>,
    },
    ListInstances(Reply<Vec<InstanceDetails>>),
    Train {
        id: GlobalTrainId,
        reply: Reply<Option<TrainRegistration>>,
    },
    StatusChanged {
        instance: InstanceInfo,
        prev: Option<InstanceStatus>,
        reply: Reply<()>,
    },
    ConfigFieldChanged {
        instance: InstanceInfo,
        field: String,
        reply: Reply<()>,
    },
    PlayerEvent(PlayerEvent),
    SaveData(Reply<()>),
}

/// Cloneable sender side of the controller service
#[derive(Clone)]
pub struct ControllerHandle {
    tx: mpsc::Sender<ControllerCommand>,
}

impl ControllerHandle {
    pub async fn train_id(&self, request: TrainIdRequest) -> TrainsResult<TrainIdResponse> {
        self.call(|reply| ControllerCommand::TrainId { request, reply }).await
    }

    pub async fn teleport(
        &self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        self.call(|reply| ControllerCommand::Teleport { request, reply }).await
    }

    pub async fn patch_event(&self, event: InstanceDetailsPatchEvent) -> TrainsResult<()> {
        self.call(|reply| ControllerCommand::PatchEvent { event, reply }).await
    }

    pub async fn list_instances(&self) -> TrainsResult<Vec<InstanceDetails>> {
        self.call(ControllerCommand::ListInstances).await
    }

    pub async fn train(&self, id: GlobalTrainId) -> TrainsResult<Option<TrainRegistration>> {
        self.call(|reply| ControllerCommand::Train { id, reply }).await
    }

    pub async fn instance_status_changed(
        &self,
        instance: InstanceInfo,
        prev: Option<InstanceStatus>,
    ) -> TrainsResult<()> {
        self.call(|reply| ControllerCommand::StatusChanged { instance, prev, reply }).await
    }

    pub async fn instance_config_field_changed(
        &self,
        instance: InstanceInfo,
        field: impl Into<String>,
    ) -> TrainsResult<()> {
        let field = field.into();
        self.call(|reply| ControllerCommand::ConfigFieldChanged { instance, field, reply }).await
    }

    pub async fn player_event(&self, event: PlayerEvent) -> TrainsResult<()> {
        self.tx
            .send(ControllerCommand::PlayerEvent(event))
            .await
            .map_err(|_| TrainsError::ControllerGone)
    }

    pub async fn save_data(&self) -> TrainsResult<()> {
        self.call(ControllerCommand::SaveData).await
    }

    async fn call<T>(
        &self,
        command: impl FnOnce(Reply<T>) -> ControllerCommand,
    ) -> TrainsResult<T> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(command(reply)).await.map_err(|_| TrainsError::ControllerGone)?;
        rx.await.map_err(|_| TrainsError::ControllerGone)?
    }
}

/// Initialise the plugin and start serving. The join handle yields the
/// plugin back after every handle has been dropped and shutdown has run.
pub async fn start(
    mut plugin: ControllerPlugin,
) -> TrainsResult<(ControllerHandle, JoinHandle<ControllerPlugin>)> {
    plugin.on_init().await?;
    let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
    let task = tokio::spawn(run(plugin, rx));
    Ok((ControllerHandle { tx }, task))
}

async fn run(
    mut plugin: ControllerPlugin,
    mut rx: mpsc::Receiver<ControllerCommand>,
) -> ControllerPlugin {
    info!("Controller service started");

    while let Some(command) = rx.recv().await {
        match command {
            ControllerCommand::TrainId { request, reply } => {
                let _ = reply.send(Ok(plugin.handle_train_id_request(request)));
            }
            ControllerCommand::Teleport { request, reply } => {
                plugin.record_teleport(&request);
                let teleports = plugin.teleports().clone();
                tokio::spawn(async move {
                    let _ = reply.send(teleports.forward(request).await);
                });
            }
            ControllerCommand::PatchEvent { event, reply } => {
                let _ = reply.send(plugin.handle_instance_patch_event(event));
            }
            ControllerCommand::ListInstances(reply) => {
                let _ = reply.send(Ok(plugin.handle_instance_details_list_request()));
            }
            ControllerCommand::Train { id, reply } => {
                let _ = reply.send(Ok(plugin.trains().get(id).cloned()));
            }
            ControllerCommand::StatusChanged { instance, prev, reply } => {
                let _ = reply.send(plugin.on_instance_status_changed(&instance, prev).await);
            }
            ControllerCommand::ConfigFieldChanged { instance, field, reply } => {
                let result = plugin.on_instance_config_field_changed(&instance, &field).await;
                let _ = reply.send(result);
            }
            ControllerCommand::PlayerEvent(event) => {
                if let Err(err) = plugin.on_player_event(&event).await {
                    warn!("Player event handling failed: {}", err);
                }
            }
            ControllerCommand::SaveData(reply) => {
                let _ = reply.send(plugin.on_save_data().await);
            }
        }
    }

    if let Err(err) = plugin.on_shutdown().await {
        error!("Controller shutdown failed: {}", err);
    }
    plugin
}

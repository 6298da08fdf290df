//! # Instance Plugin
//!
//! Per-instance participant: owns the zone registry, answers IPC from the
//! game process, and keeps a read-only view of the controller's instance
//! directory for display.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use trains_shared::config::PluginConfig;
use trains_shared::error::TrainsResult;
use trains_shared::ipc::ZoneIpcEvent;
use trains_shared::lifecycle::{LifecycleParticipant, PlayerEvent};
use trains_shared::messages::{
    InstanceDetails, InstanceDetailsPatchEvent, TrainIdResponse, TrainTeleportRequest,
    TrainTeleportResponse,
};
use trains_shared::types::{InstanceId, LocalTrainId};
use trains_shared::zone::ZoneConfig;

use crate::link::ControllerLink;
use crate::trains;
use crate::zone::{RconChannel, ZoneRegistry, ZoneSync};

pub struct InstancePlugin {
    instance_id: InstanceId,
    zones: ZoneRegistry,
    controller: Arc<dyn ControllerLink>,
    peers: BTreeMap<InstanceId, InstanceDetails>,
}

impl InstancePlugin {
    pub fn new(
        instance_id: InstanceId,
        config: PluginConfig,
        rcon: Arc<dyn RconChannel>,
        controller: Arc<dyn ControllerLink>,
    ) -> Self {
        Self {
            instance_id,
            zones: ZoneRegistry::new(config.zones, ZoneSync::new(rcon)),
            controller,
            peers: BTreeMap::new(),
        }
    }

    pub fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn zones(&self) -> Arc<ZoneConfig> {
        self.zones.snapshot()
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.zones
    }

    /// Instances as last reported by the controller
    pub fn peers(&self) -> &BTreeMap<InstanceId, InstanceDetails> {
        &self.peers
    }

    /// Decode and apply one IPC event raised by the game process.
    ///
    /// Only decoding can fail; a valid event that the zone store refuses is
    /// still `Ok`.
    pub fn handle_ipc(&mut self, channel: &str, payload: serde_json::Value) -> TrainsResult<()> {
        let event = ZoneIpcEvent::decode(channel, payload)?;
        debug!("IPC {} for zone {}", channel, event.zone_name());
        self.zones.apply(event);
        Ok(())
    }

    pub async fn request_train_id(
        &self,
        local_train_id: Option<LocalTrainId>,
    ) -> TrainsResult<TrainIdResponse> {
        trains::request_train_id(self.controller.as_ref(), self.instance_id, local_train_id).await
    }

    /// Teleport forwarded by the controller to this instance
    pub async fn handle_teleport_request(
        &self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        trains::receive_train(self.zones.sync().channel(), self.instance_id, &request).await
    }

    /// Merge a directory patch broadcast by the controller
    pub fn handle_details_patch(&mut self, event: &InstanceDetailsPatchEvent) {
        match self.peers.get_mut(&event.patch.id) {
            Some(details) => details.patch(&event.patch),
            None => debug!("Patch for instance {} not in local view", event.patch.id),
        }
    }

    async fn refresh_peers(&mut self) -> TrainsResult<()> {
        let instances = self.controller.list_instances().await?;
        self.peers = instances.into_iter().map(|details| (details.id, details)).collect();
        Ok(())
    }
}

#[async_trait]
impl LifecycleParticipant for InstancePlugin {
    async fn on_start(&mut self) -> TrainsResult<()> {
        self.zones.upload()?;
        if let Err(err) = self.refresh_peers().await {
            warn!("Failed to fetch instance list: {}", err);
        }
        Ok(())
    }

    async fn on_stop(&mut self) -> TrainsResult<()> {
        info!("instance::onStop");
        Ok(())
    }

    async fn on_config_field_changed(
        &mut self,
        field: &str,
        _curr: &serde_json::Value,
        _prev: &serde_json::Value,
    ) -> TrainsResult<()> {
        info!("instance::onInstanceConfigFieldChanged {}", field);
        Ok(())
    }

    async fn on_player_event(&mut self, event: &PlayerEvent) -> TrainsResult<()> {
        info!("instance::onPlayerEvent {:?}", event);
        Ok(())
    }
}

//! # Controller Plugin
//!
//! The cluster-wide authority. Owns the train registry and the instance
//! directory; every mutation of either goes through this type, which is
//! constructed once and then driven by the host or by [`crate::service`].

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use trains_shared::constants::config::INSTANCE_NAME_FIELD;
use trains_shared::error::TrainsResult;
use trains_shared::lifecycle::{InstanceInfo, InstanceStatus, LifecycleParticipant, PlayerEvent};
use trains_shared::messages::{
    InstanceDetails, InstanceDetailsPatch, InstanceDetailsPatchEvent, TrainIdRequest,
    TrainIdResponse, TrainTeleportRequest, TrainTeleportResponse,
};

use crate::instance::{name_patch, status_patch, InstanceDirectory};
use crate::link::InstanceLink;
use crate::train::{TeleportCoordinator, TrainRegistry};

/// Hooks the host calls when something about one instance changes
#[async_trait]
pub trait InstanceObserver: Send {
    async fn on_instance_status_changed(
        &mut self,
        instance: &InstanceInfo,
        prev: Option<InstanceStatus>,
    ) -> TrainsResult<()>;

    async fn on_instance_config_field_changed(
        &mut self,
        instance: &InstanceInfo,
        field: &str,
    ) -> TrainsResult<()>;
}

pub struct ControllerPlugin {
    known_instances: Vec<InstanceInfo>,
    directory: InstanceDirectory,
    trains: TrainRegistry,
    teleports: TeleportCoordinator,
    link: Arc<dyn InstanceLink>,
}

impl ControllerPlugin {
    /// `known_instances` seeds the directory when the plugin is initialised
    pub fn new(known_instances: Vec<InstanceInfo>, link: Arc<dyn InstanceLink>) -> Self {
        Self {
            known_instances,
            directory: InstanceDirectory::new(),
            trains: TrainRegistry::new(),
            teleports: TeleportCoordinator::new(Arc::clone(&link)),
            link,
        }
    }

    pub fn directory(&self) -> &InstanceDirectory {
        &self.directory
    }

    pub fn trains(&self) -> &TrainRegistry {
        &self.trains
    }

    pub fn teleports(&self) -> &TeleportCoordinator {
        &self.teleports
    }

    /// Merge a patch and broadcast it to every instance.
    ///
    /// An unknown instance id is an error and nothing is broadcast.
    pub fn handle_instance_patch(&mut self, patch: InstanceDetailsPatch) -> TrainsResult<()> {
        self.directory.apply(&patch)?;
        self.link.broadcast_patch(InstanceDetailsPatchEvent { patch });
        Ok(())
    }

    /// Patch event raised by an instance
    pub fn handle_instance_patch_event(
        &mut self,
        event: InstanceDetailsPatchEvent,
    ) -> TrainsResult<()> {
        self.handle_instance_patch(event.patch)
    }

    pub fn handle_instance_details_list_request(&self) -> Vec<InstanceDetails> {
        self.directory.list()
    }

    pub fn handle_train_id_request(&mut self, request: TrainIdRequest) -> TrainIdResponse {
        let id = self.trains.allocate_id(request.instance, request.train_id);
        TrainIdResponse { id, train_id: request.train_id }
    }

    /// Registry half of a teleport, for callers that forward separately
    pub fn record_teleport(&mut self, request: &TrainTeleportRequest) -> bool {
        self.teleports.record(&mut self.trains, request)
    }

    /// Record the move, then await the destination's response.
    ///
    /// Holds `&mut self` for the whole round trip; the service splits the two
    /// halves so a slow destination does not block other requests.
    pub async fn handle_teleport_request(
        &mut self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        self.teleports.handle(&mut self.trains, request).await
    }
}

#[async_trait]
impl LifecycleParticipant for ControllerPlugin {
    async fn on_init(&mut self) -> TrainsResult<()> {
        self.directory = InstanceDirectory::from_instances(&self.known_instances);
        info!("controller::init with {} instances", self.directory.len());
        Ok(())
    }

    async fn on_config_field_changed(
        &mut self,
        field: &str,
        _curr: &serde_json::Value,
        _prev: &serde_json::Value,
    ) -> TrainsResult<()> {
        debug!("controller::onControllerConfigFieldChanged {}", field);
        Ok(())
    }

    async fn on_player_event(&mut self, event: &PlayerEvent) -> TrainsResult<()> {
        info!("controller::onPlayerEvent {:?}", event);
        Ok(())
    }

    async fn on_save_data(&mut self) -> TrainsResult<()> {
        info!("controller::onSaveData");
        Ok(())
    }

    async fn on_shutdown(&mut self) -> TrainsResult<()> {
        info!("controller::onShutdown");
        Ok(())
    }
}

#[async_trait]
impl InstanceObserver for ControllerPlugin {
    async fn on_instance_status_changed(
        &mut self,
        instance: &InstanceInfo,
        prev: Option<InstanceStatus>,
    ) -> TrainsResult<()> {
        match status_patch(instance.id, prev, instance.status) {
            Some(patch) => self.handle_instance_patch(patch),
            None => Ok(()),
        }
    }

    async fn on_instance_config_field_changed(
        &mut self,
        instance: &InstanceInfo,
        field: &str,
    ) -> TrainsResult<()> {
        info!("controller::onInstanceConfigFieldChanged {} {}", instance.id, field);
        if field == INSTANCE_NAME_FIELD {
            self.handle_instance_patch(name_patch(instance.id, instance.name.clone()))?;
        }
        Ok(())
    }
}

//! # Teleport Coordinator
//!
//! Moves a train's registration to its destination and forwards the request
//! to that instance. A train that never obtained a global id is forwarded
//! anyway; it is not registered on the fly.

use std::sync::Arc;

use log::info;
use trains_shared::error::TrainsResult;
use trains_shared::messages::{TrainTeleportRequest, TrainTeleportResponse};

use super::registry::TrainRegistry;
use crate::link::InstanceLink;

#[derive(Clone)]
pub struct TeleportCoordinator {
    link: Arc<dyn InstanceLink>,
}

impl TeleportCoordinator {
    pub fn new(link: Arc<dyn InstanceLink>) -> Self {
        Self { link }
    }

    /// Registry half of a teleport. Returns whether the train was known.
    pub fn record(&self, registry: &mut TrainRegistry, request: &TrainTeleportRequest) -> bool {
        info!("Teleporting train {} to instance {}", request.train_id, request.instance);
        registry.reassign_instance(request.train_id, request.instance)
    }

    /// Transport half of a teleport; does not touch the registry
    pub async fn forward(
        &self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        self.link.forward_teleport(request).await
    }

    /// Record, forward, and return the destination's response
    pub async fn handle(
        &self,
        registry: &mut TrainRegistry,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        self.record(registry, &request);
        self.forward(request).await
    }
}

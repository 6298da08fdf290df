//! # Instance Link
//!
//! The controller's side of the cluster transport. Retries and timeouts, if
//! any, belong to the implementation of this trait.

use async_trait::async_trait;
use trains_shared::error::TrainsResult;
use trains_shared::messages::{
    InstanceDetailsPatchEvent, TrainTeleportRequest, TrainTeleportResponse,
};

#[async_trait]
pub trait InstanceLink: Send + Sync {
    /// Send a teleport to the instance named in the request and await its answer
    async fn forward_teleport(
        &self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse>;

    /// Fire-and-forget delivery of a patch to every instance
    fn broadcast_patch(&self, event: InstanceDetailsPatchEvent);
}

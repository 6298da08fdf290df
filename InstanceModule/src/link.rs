//! # Controller Link
//!
//! The instance's side of the cluster transport: requests it sends to the
//! controller and awaits a single response for.

use async_trait::async_trait;
use trains_shared::error::TrainsResult;
use trains_shared::messages::{InstanceDetails, TrainIdRequest, TrainIdResponse};

#[async_trait]
pub trait ControllerLink: Send + Sync {
    async fn request_train_id(&self, request: TrainIdRequest) -> TrainsResult<TrainIdResponse>;

    async fn list_instances(&self) -> TrainsResult<Vec<InstanceDetails>>;
}

//! # Instance Trains
//!
//! Train handling on the instance side: obtaining a global id for a local
//! train, and handing a teleported train to the game process.

use std::sync::Arc;

use log::{debug, info};
use trains_shared::error::TrainsResult;
use trains_shared::messages::{
    TrainIdRequest, TrainIdResponse, TrainTeleportRequest, TrainTeleportResponse,
};
use trains_shared::rcon;
use trains_shared::types::{InstanceId, LocalTrainId};

use crate::link::ControllerLink;
use crate::zone::RconChannel;

/// Ask the controller for a global id for one of this instance's trains
pub async fn request_train_id(
    controller: &dyn ControllerLink,
    instance: InstanceId,
    local_train_id: Option<LocalTrainId>,
) -> TrainsResult<TrainIdResponse> {
    let response = controller
        .request_train_id(TrainIdRequest { instance, train_id: local_train_id })
        .await?;
    info!("Local train {:?} registered as global train {}", local_train_id, response.id);
    Ok(response)
}

/// Deliver a teleported train's payload to the local game process
pub async fn receive_train(
    rcon: &Arc<dyn RconChannel>,
    instance: InstanceId,
    request: &TrainTeleportRequest,
) -> TrainsResult<TrainTeleportResponse> {
    debug!("Receiving train {} on instance {}", request.train_id, instance);
    let command = rcon::receive_train_command(&request.payload)?;
    let output = rcon.send_rcon(command).await?;
    Ok(TrainTeleportResponse { instance, output })
}

//! Recording transport fake shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;
use trains_shared::error::{TrainsError, TrainsResult};
use trains_shared::messages::{
    InstanceDetailsPatchEvent, TrainTeleportRequest, TrainTeleportResponse,
};

use crate::link::InstanceLink;

#[derive(Default)]
pub struct RecordingLink {
    forwarded: Mutex<Vec<TrainTeleportRequest>>,
    broadcasts: Mutex<Vec<InstanceDetailsPatchEvent>>,
    fail: bool,
    gate: Option<Arc<Notify>>,
}

impl RecordingLink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    /// Forwarded teleports wait until `gate` is notified
    pub fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self { gate: Some(gate), ..Self::default() })
    }

    pub fn forwarded(&self) -> Vec<TrainTeleportRequest> {
        self.forwarded.lock().unwrap().clone()
    }

    pub fn broadcasts(&self) -> Vec<InstanceDetailsPatchEvent> {
        self.broadcasts.lock().unwrap().clone()
    }
}

#[async_trait]
impl InstanceLink for RecordingLink {
    async fn forward_teleport(
        &self,
        request: TrainTeleportRequest,
    ) -> TrainsResult<TrainTeleportResponse> {
        self.forwarded.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.fail {
            return Err(TrainsError::Transport("destination unreachable".to_string()));
        }
        Ok(TrainTeleportResponse {
            instance: request.instance,
            output: String::new(),
        })
    }

    fn broadcast_patch(&self, event: InstanceDetailsPatchEvent) {
        self.broadcasts.lock().unwrap().push(event);
    }
}

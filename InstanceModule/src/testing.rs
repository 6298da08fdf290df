//! Recording fakes shared by the unit tests of this crate.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use trains_shared::error::{TrainsError, TrainsResult};
use trains_shared::messages::{InstanceDetails, TrainIdRequest, TrainIdResponse};

use crate::link::ControllerLink;
use crate::zone::RconChannel;

#[derive(Default)]
pub struct RecordingRcon {
    commands: Mutex<Vec<String>>,
    fail: bool,
    silent: bool,
    output: String,
}

impl RecordingRcon {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { fail: true, ..Self::default() })
    }

    /// Records commands but never replies, like a hung game process
    pub fn silent() -> Arc<Self> {
        Arc::new(Self { silent: true, ..Self::default() })
    }

    pub fn answering(output: &str) -> Arc<Self> {
        Arc::new(Self { output: output.to_string(), ..Self::default() })
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    /// Split an upsert command back into its name and unescaped JSON
    pub fn decode_upsert(command: &str) -> (String, String) {
        let args = command
            .strip_prefix("/c clusterio_trains.sync_zone(\"")
            .and_then(|rest| rest.strip_suffix("\")"))
            .expect("not an upsert command");
        let (name, data) = args.split_once("\", \"").expect("upsert without data");
        (unescape(name), unescape(data))
    }
}

fn unescape(input: &str) -> String {
    let mut out = String::new();
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[async_trait]
impl RconChannel for RecordingRcon {
    async fn send_rcon(&self, command: String) -> TrainsResult<String> {
        self.commands.lock().unwrap().push(command);
        if self.silent {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(TrainsError::Rcon("connection refused".to_string()));
        }
        Ok(self.output.clone())
    }
}

#[derive(Default)]
pub struct FakeController {
    pub requests: Mutex<Vec<TrainIdRequest>>,
    pub instances: Vec<InstanceDetails>,
}

#[async_trait]
impl ControllerLink for FakeController {
    async fn request_train_id(&self, request: TrainIdRequest) -> TrainsResult<TrainIdResponse> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        Ok(TrainIdResponse { id: requests.len() as u64, train_id: request.train_id })
    }

    async fn list_instances(&self) -> TrainsResult<Vec<InstanceDetails>> {
        Ok(self.instances.clone())
    }
}

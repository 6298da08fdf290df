//! # Zone Sync
//!
//! Pushes zone state to the local game process as remote commands. One entry
//! point covers both upserts and removals: whatever the store holds for a
//! name at sync time is what the game process receives.
//!
//! Commands go through an ordered outbox drained by a task of their own, so
//! callers never wait on the game process' reply.

use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use tokio::sync::{mpsc, oneshot};
use trains_shared::error::TrainsResult;
use trains_shared::rcon;
use trains_shared::zone::ZoneConfig;

/// Channel executing console commands on the local game process
#[async_trait]
pub trait RconChannel: Send + Sync {
    /// Run one command and return its console output
    async fn send_rcon(&self, command: String) -> TrainsResult<String>;
}

enum Outbound {
    Command { subject: String, command: String },
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct ZoneSync {
    rcon: Arc<dyn RconChannel>,
    outbox: mpsc::UnboundedSender<Outbound>,
}

impl ZoneSync {
    /// Spawns the outbox task, so this must run inside a Tokio runtime.
    pub fn new(rcon: Arc<dyn RconChannel>) -> Self {
        let (outbox, rx) = mpsc::unbounded_channel();
        tokio::spawn(drain(rcon.clone(), rx));
        Self { rcon, outbox }
    }

    pub fn channel(&self) -> &Arc<dyn RconChannel> {
        &self.rcon
    }

    /// Queue an upsert if `zones` still has the zone, otherwise a removal.
    /// Failures are logged by the outbox and not retried.
    pub fn sync_zone(&self, zones: &ZoneConfig, name: &str) {
        info!("Sending data about zone {}", name);

        let command = match zones.get(name) {
            Some(zone) => match rcon::upsert_zone_command(zone) {
                Ok(command) => command,
                Err(err) => {
                    warn!("Failed to encode zone {}: {}", name, err);
                    return;
                }
            },
            None => rcon::remove_zone_command(name),
        };

        self.enqueue(format!("zone {}", name), command);
    }

    /// Queue a replacement of the game process' whole zone mapping.
    /// Only encoding can fail here.
    pub fn upload_zones(&self, zones: &ZoneConfig) -> TrainsResult<()> {
        let command = rcon::upload_zones_command(zones)?;
        info!("Uploading zone data for {} zones", zones.len());
        self.enqueue("zone upload".to_string(), command);
        Ok(())
    }

    /// Wait until every command queued so far has been answered or failed
    pub async fn flush(&self) {
        let (done, rx) = oneshot::channel();
        if self.outbox.send(Outbound::Flush(done)).is_ok() {
            let _ = rx.await;
        }
    }

    fn enqueue(&self, subject: String, command: String) {
        if self.outbox.send(Outbound::Command { subject, command }).is_err() {
            warn!("Zone sync outbox closed, dropping command");
        }
    }
}

async fn drain(rcon: Arc<dyn RconChannel>, mut rx: mpsc::UnboundedReceiver<Outbound>) {
    while let Some(item) = rx.recv().await {
        match item {
            Outbound::Command { subject, command } => {
                if let Err(err) = rcon.send_rcon(command).await {
                    warn!("Failed to sync {}: {}", subject, err);
                }
            }
            Outbound::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}

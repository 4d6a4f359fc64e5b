//! Relay hub: registry of connected websocket clients.
//!
//! DESIGN
//! ======
//! Each client registers an outbound `mpsc` sender under a fresh id. A frame
//! event received from one client is fanned out to every other registered
//! sender with `try_send`; a client whose queue is full misses that frame
//! instead of slowing the publisher down.
//!
//! The hub is created once at startup and owned by `AppState`. `close()`
//! drops every sender, which ends each connection's outbound loop, and
//! refuses further joins.

#[cfg(test)]
#[path = "relay_test.rs"]
mod relay_test;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use axum::extract::ws::Message;
use serde::Serialize;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::DEFAULT_CLIENT_QUEUE;

/// Counters exposed at `GET /api/relay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelayStats {
    pub clients: usize,
    pub frames_relayed: u64,
}

#[derive(Clone)]
pub struct RelayHub {
    inner: Arc<Inner>,
}

struct Inner {
    clients: RwLock<HashMap<Uuid, mpsc::Sender<Message>>>,
    queue_capacity: usize,
    frames_relayed: AtomicU64,
    closed: AtomicBool,
}

impl RelayHub {
    /// Create a hub whose clients each get an outbound queue of `queue_capacity`.
    #[must_use]
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            inner: Arc::new(Inner {
                clients: RwLock::new(HashMap::new()),
                queue_capacity: queue_capacity.max(1),
                frames_relayed: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Register a client and return the receiving end of its outbound queue.
    ///
    /// Returns `None` once the hub has been closed.
    pub async fn join(&self, client_id: Uuid) -> Option<mpsc::Receiver<Message>> {
        let mut clients = self.inner.clients.write().await;
        if self.is_closed() {
            return None;
        }
        let (tx, rx) = mpsc::channel(self.inner.queue_capacity);
        clients.insert(client_id, tx);
        info!(%client_id, clients = clients.len(), "relay: client joined");
        Some(rx)
    }

    /// Remove a client. Unknown ids are ignored.
    pub async fn part(&self, client_id: Uuid) {
        let mut clients = self.inner.clients.write().await;
        if clients.remove(&client_id).is_some() {
            info!(%client_id, clients = clients.len(), "relay: client left");
        }
    }

    /// Queue `message` for every client except `from`.
    ///
    /// Returns the number of peers the message was queued for. Peers with a
    /// full or closed queue are skipped.
    pub async fn broadcast(&self, from: Uuid, message: Message) -> usize {
        let clients = self.inner.clients.read().await;
        let mut delivered = 0;
        for (client_id, tx) in clients.iter() {
            if *client_id == from {
                continue;
            }
            match tx.try_send(message.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => debug!(%client_id, error = %e, "relay: peer skipped"),
            }
        }
        self.inner.frames_relayed.fetch_add(1, Ordering::Relaxed);
        delivered
    }

    /// Drop every client queue and refuse new joins.
    pub async fn close(&self) {
        let mut clients = self.inner.clients.write().await;
        self.inner.closed.store(true, Ordering::Release);
        let dropped = clients.len();
        clients.clear();
        info!(dropped, "relay: closed");
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }

    pub async fn stats(&self) -> RelayStats {
        RelayStats {
            clients: self.inner.clients.read().await.len(),
            frames_relayed: self.inner.frames_relayed.load(Ordering::Relaxed),
        }
    }
}

impl Default for RelayHub {
    fn default() -> Self {
        Self::new(DEFAULT_CLIENT_QUEUE)
    }
}

//! Room change notifications.
//!
//! After any call that changes a room, the serving layer publishes a
//! [`RoomEvent`] scoped to that room. Every viewer of the room, including
//! the one that caused the change, re-renders from a fresh snapshot when it
//! receives one. The engine itself never publishes.
//!
//! ## Example
//!
//! ```
//! use tictoc::events::{EventBus, LocalBus, RoomEvent, RoomEventKind};
//! use tictoc::rooms::RoomId;
//!
//! let bus = LocalBus::new();
//! let lobby = RoomId::from("lobby");
//! let rx = bus.subscribe(&lobby);
//!
//! bus.publish(RoomEvent::new(lobby.clone(), RoomEventKind::Reset));
//! bus.publish(RoomEvent::new(RoomId::from("elsewhere"), RoomEventKind::Reset));
//!
//! assert_eq!(rx.try_iter().count(), 1);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;
use tracing::trace;

use crate::core::Role;
use crate::engine::MoveRecord;
use crate::rooms::RoomId;

/// What changed in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomEventKind {
    /// A move was accepted.
    Moved(MoveRecord),
    /// The game was reset.
    Reset,
    /// A session took a free player seat.
    Seated(Role),
}

/// "State changed" notice for one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEvent {
    pub room: RoomId,
    pub kind: RoomEventKind,
}

impl RoomEvent {
    pub fn new(room: RoomId, kind: RoomEventKind) -> Self {
        Self { room, kind }
    }
}

/// Broadcast capability handed to the serving layer.
pub trait EventBus: Send + Sync {
    /// Deliver `event` to every current viewer of `event.room`.
    fn publish(&self, event: RoomEvent);
}

/// In-process bus: one channel per subscribed viewer.
///
/// Subscribers whose receiver has been dropped are pruned on publish.
#[derive(Debug, Default)]
pub struct LocalBus {
    subscribers: Mutex<FxHashMap<RoomId, Vec<Sender<RoomEvent>>>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving events for `room`.
    pub fn subscribe(&self, room: &RoomId) -> Receiver<RoomEvent> {
        let (tx, rx) = channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(room.clone())
            .or_default()
            .push(tx);
        rx
    }

    /// Live subscribers for `room` as of the last publish.
    pub fn subscriber_count(&self, room: &RoomId) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(room)
            .map_or(0, Vec::len)
    }
}

impl EventBus for LocalBus {
    fn publish(&self, event: RoomEvent) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(senders) = subscribers.get_mut(&event.room) else {
            return;
        };
        senders.retain(|tx| tx.send(event.clone()).is_ok());
        trace!(room = %event.room, receivers = senders.len(), "Published room event");
    }
}

impl<B: EventBus + ?Sized> EventBus for std::sync::Arc<B> {
    fn publish(&self, event: RoomEvent) {
        (**self).publish(event);
    }
}

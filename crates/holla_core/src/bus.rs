//! Cross-component event bus.
//!
//! # Responsibility
//! - Broadcast best-effort change signals between UI subtrees that share
//!   no parent state.
//!
//! # Invariants
//! - At most one delivery per publish per currently-registered subscriber.
//! - No queueing: a publish with no subscribers is lost, which is
//!   acceptable because listeners re-derive from storage on their own load
//!   path regardless.
//! - Events carry no payload; subscribers must re-read authoritative state
//!   from the store.

use log::debug;

/// The bus topic set. Typed, so a renamed topic is a compile error rather
/// than a silently dead string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    /// A memory was added and today's ledger key was cleared.
    HabitsReset,
}

/// Handle returned by `subscribe`, used to end delivery explicitly.
pub type SubscriptionId = u64;

/// Single-threaded fire-and-forget broadcast channel.
#[derive(Default)]
pub struct EventBus {
    next_id: SubscriptionId,
    subscribers: Vec<Subscriber>,
}

struct Subscriber {
    id: SubscriptionId,
    topic: Topic,
    handler: Box<dyn FnMut()>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for one topic and returns its subscription id.
    pub fn subscribe(&mut self, topic: Topic, handler: Box<dyn FnMut()>) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber { id, topic, handler });
        id
    }

    /// Removes a subscription. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }

    /// Invokes every handler currently registered for `topic`.
    ///
    /// Returns the number of handlers delivered to; zero means the signal
    /// was lost.
    pub fn publish(&mut self, topic: Topic) -> usize {
        let mut delivered = 0;
        for subscriber in &mut self.subscribers {
            if subscriber.topic == topic {
                (subscriber.handler)();
                delivered += 1;
            }
        }
        debug!("event=bus_publish module=bus topic={topic:?} delivered={delivered}");
        delivered
    }
}

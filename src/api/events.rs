use serde::{Deserialize, Serialize};

use crate::core::{EntityCode, SectionId};

/// Kinds of page events, used to filter subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageEventKind {
    ScopeChanged,
    SectionVisible,
}

/// Typed notifications published by the page controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageEvent {
    /// The active scope changed; `entities` is its resolved entity set.
    ScopeChanged {
        scope: String,
        entities: Vec<EntityCode>,
    },
    /// A section crossed its threshold for the first time.
    SectionVisible { section: SectionId },
}

impl PageEvent {
    #[must_use]
    pub fn kind(&self) -> PageEventKind {
        match self {
            Self::ScopeChanged { .. } => PageEventKind::ScopeChanged,
            Self::SectionVisible { .. } => PageEventKind::SectionVisible,
        }
    }
}

/// Receives page events together with mutable access to page state `C`.
///
/// Listeners typically re-filter their series and re-render through the
/// registry's replace path.
pub trait PageListener<C> {
    fn on_event(&mut self, event: &PageEvent, context: &mut C);
}

impl<C, F> PageListener<C> for F
where
    F: FnMut(&PageEvent, &mut C),
{
    fn on_event(&mut self, event: &PageEvent, context: &mut C) {
        self(event, context);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(u64);

struct Subscription<C> {
    id: ListenerId,
    kind: Option<PageEventKind>,
    listener: Box<dyn PageListener<C>>,
}

/// Publish/subscribe hub with a fixed set of event kinds.
///
/// Delivery is synchronous and in subscription order.
pub struct EventBus<C> {
    subscriptions: Vec<Subscription<C>>,
    next_id: u64,
}

impl<C> EventBus<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscriptions: Vec::new(),
            next_id: 0,
        }
    }

    /// Subscribes to every event kind.
    pub fn subscribe(&mut self, listener: Box<dyn PageListener<C>>) -> ListenerId {
        self.push(None, listener)
    }

    /// Subscribes to one event kind.
    pub fn subscribe_to(
        &mut self,
        kind: PageEventKind,
        listener: Box<dyn PageListener<C>>,
    ) -> ListenerId {
        self.push(Some(kind), listener)
    }

    fn push(
        &mut self,
        kind: Option<PageEventKind>,
        listener: Box<dyn PageListener<C>>,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, listener });
        id
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Delivers `event` and returns how many listeners received it.
    pub fn publish(&mut self, event: &PageEvent, context: &mut C) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for subscription in &mut self.subscriptions {
            if subscription.kind.is_some_and(|wanted| wanted != kind) {
                continue;
            }
            subscription.listener.on_event(event, context);
            delivered += 1;
        }
        delivered
    }
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

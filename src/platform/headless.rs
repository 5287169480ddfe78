use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::core::{ElementRect, NodeId, TriggerStart};

use super::{Document, TriggerEvent, TriggerHandle, TriggerHost};

#[derive(Debug, Default)]
struct DocumentState {
    nodes: IndexMap<String, Vec<NodeId>>,
    next_node: u64,
}

/// In-memory document keyed by selector.
///
/// Clones share state, so a test can add mount points after handing the
/// document to a controller.
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    state: Rc<RefCell<DocumentState>>,
}

impl HeadlessDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_nodes<'a>(selectors: impl IntoIterator<Item = &'a str>) -> Self {
        let document = Self::new();
        for selector in selectors {
            document.insert(selector);
        }
        document
    }

    /// Adds a node matching `selector` and returns its id.
    pub fn insert(&self, selector: &str) -> NodeId {
        let mut state = self.state.borrow_mut();
        let node = NodeId(state.next_node);
        state.next_node += 1;
        state
            .nodes
            .entry(selector.to_owned())
            .or_default()
            .push(node);
        node
    }

    /// Removes every node matching `selector`.
    pub fn remove(&self, selector: &str) {
        self.state.borrow_mut().nodes.shift_remove(selector);
    }
}

impl Document for HeadlessDocument {
    fn query_one(&self, selector: &str) -> Option<NodeId> {
        self.state
            .borrow()
            .nodes
            .get(selector)
            .and_then(|nodes| nodes.first().copied())
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.state
            .borrow()
            .nodes
            .get(selector)
            .cloned()
            .unwrap_or_default()
    }
}

#[derive(Debug)]
struct WatchedTrigger {
    node: NodeId,
    start: TriggerStart,
    reached: bool,
}

#[derive(Debug)]
struct TriggerState {
    triggers: IndexMap<TriggerHandle, WatchedTrigger>,
    layout: HashMap<NodeId, ElementRect>,
    viewport_height: f64,
    scroll_y: f64,
    next_handle: u64,
    registered_total: usize,
}

/// Scroll simulator implementing [`TriggerHost`].
///
/// Triggers report a crossing every time their threshold becomes reached,
/// like a repeating scroll trigger would; nothing here enforces "once".
#[derive(Debug, Clone)]
pub struct HeadlessTriggerHost {
    state: Rc<RefCell<TriggerState>>,
}

impl HeadlessTriggerHost {
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(TriggerState {
                triggers: IndexMap::new(),
                layout: HashMap::new(),
                viewport_height,
                scroll_y: 0.0,
                next_handle: 0,
                registered_total: 0,
            })),
        }
    }

    /// Places a node on the page.
    pub fn set_layout(&self, node: NodeId, rect: ElementRect) {
        self.state.borrow_mut().layout.insert(node, rect);
    }

    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    /// Number of triggers currently watched.
    #[must_use]
    pub fn active_triggers(&self) -> usize {
        self.state.borrow().triggers.len()
    }

    #[must_use]
    pub fn registered_total(&self) -> usize {
        self.state.borrow().registered_total
    }

    #[must_use]
    pub fn handle_for(&self, node: NodeId) -> Option<TriggerHandle> {
        self.state
            .borrow()
            .triggers
            .iter()
            .find(|(_, trigger)| trigger.node == node)
            .map(|(handle, _)| *handle)
    }

    /// Moves the viewport and returns the crossings it produced, in
    /// registration order.
    pub fn scroll_to(&self, scroll_y: f64) -> Vec<TriggerEvent> {
        let mut state = self.state.borrow_mut();
        let moving_down = scroll_y >= state.scroll_y;
        state.scroll_y = scroll_y;
        let viewport_height = state.viewport_height;

        let TriggerState {
            triggers, layout, ..
        } = &mut *state;

        let mut events = Vec::new();
        for (handle, trigger) in triggers.iter_mut() {
            let Some(rect) = layout.get(&trigger.node) else {
                continue;
            };
            let reached = trigger.start.is_reached(*rect, scroll_y, viewport_height);
            if reached && !trigger.reached {
                events.push(if moving_down {
                    TriggerEvent::enter(*handle)
                } else {
                    TriggerEvent::enter_back(*handle)
                });
            }
            trigger.reached = reached;
        }
        events
    }

    /// Re-evaluates every trigger at the current scroll position.
    pub fn refresh(&self) -> Vec<TriggerEvent> {
        let scroll_y = self.scroll_y();
        self.scroll_to(scroll_y)
    }
}

impl TriggerHost for HeadlessTriggerHost {
    fn register_trigger(&mut self, node: NodeId, start: TriggerStart) -> TriggerHandle {
        let mut state = self.state.borrow_mut();
        let handle = TriggerHandle(state.next_handle);
        state.next_handle += 1;
        state.registered_total += 1;
        state.triggers.insert(
            handle,
            WatchedTrigger {
                node,
                start,
                reached: false,
            },
        );
        debug!(handle = handle.0, node = node.0, start = %start, "trigger registered");
        handle
    }

    fn release_trigger(&mut self, handle: TriggerHandle) {
        self.state.borrow_mut().triggers.shift_remove(&handle);
    }
}

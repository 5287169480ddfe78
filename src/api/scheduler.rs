use std::collections::HashMap;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{SectionId, TargetId, TriggerStart};
use crate::platform::{Document, TriggerEvent, TriggerHandle, TriggerHost};

/// What makes a section fire.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionTrigger {
    /// Fires when `target` crosses `start` while scrolling, in either direction.
    Scroll { target: TargetId, start: TriggerStart },
    /// Fires only through [`LazyTriggerScheduler::trigger_section`].
    Manual,
}

/// Registration data for one lazily initialized section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: SectionId,
    pub trigger: SectionTrigger,
    pub settle_delay: Duration,
}

impl SectionSpec {
    #[must_use]
    pub fn scroll(
        id: impl Into<SectionId>,
        target: impl Into<TargetId>,
        start: TriggerStart,
    ) -> Self {
        Self {
            id: id.into(),
            trigger: SectionTrigger::Scroll {
                target: target.into(),
                start,
            },
            settle_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn manual(id: impl Into<SectionId>) -> Self {
        Self {
            id: id.into(),
            trigger: SectionTrigger::Manual,
            settle_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }
}

/// Lifecycle of a registered section. `Fired` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionState {
    Armed,
    Fired,
}

/// Result of [`LazyTriggerScheduler::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegisterOutcome {
    Armed,
    /// The section's trigger node is absent; the section is never armed.
    Skipped,
    /// A section with the same id is already registered; the new one is dropped.
    Duplicate,
}

/// One-shot section initializer, run against the page state `C`.
pub type SectionInit<C> = Box<dyn FnOnce(&mut C)>;

struct SectionSlot<C> {
    state: SectionState,
    handle: Option<TriggerHandle>,
    settle_delay: Duration,
    init: Option<SectionInit<C>>,
}

#[derive(Debug, Clone)]
struct PendingInit {
    section: SectionId,
    due: Duration,
    seq: u64,
}

/// An initializer whose settle delay has elapsed.
pub struct ReadyInit<C> {
    pub section: SectionId,
    init: SectionInit<C>,
}

impl<C> ReadyInit<C> {
    /// Runs the initializer to completion.
    pub fn run(self, context: &mut C) {
        debug!(section = %self.section, "running section initializer");
        (self.init)(context);
    }
}

/// Arms one trigger per section and fires each section at most once.
///
/// The `Armed -> Fired` transition happens on the first reported crossing;
/// the initializer runs once the section's settle delay has passed. Later
/// reports for the same section, including several queued by one fast
/// scroll, are ignored. Time is the host's page clock.
pub struct LazyTriggerScheduler<C> {
    sections: IndexMap<SectionId, SectionSlot<C>>,
    handles: HashMap<TriggerHandle, SectionId>,
    pending: Vec<PendingInit>,
    next_seq: u64,
}

impl<C> LazyTriggerScheduler<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: IndexMap::new(),
            handles: HashMap::new(),
            pending: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn register(
        &mut self,
        spec: SectionSpec,
        init: SectionInit<C>,
        document: &dyn Document,
        host: &mut dyn TriggerHost,
    ) -> RegisterOutcome {
        if self.sections.contains_key(&spec.id) {
            warn!(section = %spec.id, "section registered twice; keeping the first registration");
            return RegisterOutcome::Duplicate;
        }

        let handle = match &spec.trigger {
            SectionTrigger::Scroll { target, start } => {
                let Some(node) = document.query_one(target.as_str()) else {
                    debug!(section = %spec.id, %target, "section trigger node absent; not armed");
                    return RegisterOutcome::Skipped;
                };
                let handle = host.register_trigger(node, *start);
                self.handles.insert(handle, spec.id.clone());
                Some(handle)
            }
            SectionTrigger::Manual => None,
        };

        debug!(section = %spec.id, manual = handle.is_none(), "section armed");
        self.sections.insert(
            spec.id,
            SectionSlot {
                state: SectionState::Armed,
                handle,
                settle_delay: spec.settle_delay,
                init: Some(init),
            },
        );
        RegisterOutcome::Armed
    }

    /// Handles a crossing reported by the host. Returns the section that
    /// fired, or `None` when the report was stale or unknown.
    pub fn on_trigger(
        &mut self,
        event: TriggerEvent,
        now: Duration,
        host: &mut dyn TriggerHost,
    ) -> Option<SectionId> {
        let Some(section) = self.handles.get(&event.handle).cloned() else {
            debug!(handle = event.handle.0, "crossing for unknown trigger ignored");
            return None;
        };
        self.fire(&section, now, host).then_some(section)
    }

    /// Fires a section directly, whatever its trigger kind. Returns `false`
    /// when the section is unknown or already fired.
    pub fn trigger_section(
        &mut self,
        section: &SectionId,
        now: Duration,
        host: &mut dyn TriggerHost,
    ) -> bool {
        self.fire(section, now, host)
    }

    fn fire(&mut self, section: &SectionId, now: Duration, host: &mut dyn TriggerHost) -> bool {
        let Some(slot) = self.sections.get_mut(section) else {
            debug!(%section, "fire requested for unknown section");
            return false;
        };
        if slot.state == SectionState::Fired {
            debug!(%section, "section already fired; crossing ignored");
            return false;
        }

        slot.state = SectionState::Fired;
        if let Some(handle) = slot.handle.take() {
            self.handles.remove(&handle);
            host.release_trigger(handle);
        }

        let due = now + slot.settle_delay;
        self.pending.push(PendingInit {
            section: section.clone(),
            due,
            seq: self.next_seq,
        });
        self.next_seq += 1;
        info!(%section, due_ms = due.as_millis() as u64, "section fired");
        true
    }

    /// Removes and returns initializers due at `now`, earliest first.
    pub fn take_due(&mut self, now: Duration) -> Vec<ReadyInit<C>> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|pending| pending.due <= now);
        self.pending = waiting;
        due.sort_by_key(|pending| (pending.due, pending.seq));

        due.into_iter()
            .filter_map(|pending| {
                let init = self.sections.get_mut(&pending.section)?.init.take()?;
                Some(ReadyInit {
                    section: pending.section,
                    init,
                })
            })
            .collect()
    }

    /// Runs every initializer due at `now`, each to completion before the
    /// next. Returns how many ran.
    pub fn run_due(&mut self, now: Duration, context: &mut C) -> usize {
        let ready = self.take_due(now);
        let count = ready.len();
        for init in ready {
            init.run(context);
        }
        count
    }

    #[must_use]
    pub fn state(&self, section: &SectionId) -> Option<SectionState> {
        self.sections.get(section).map(|slot| slot.state)
    }

    /// Fired but its initializer has not run yet.
    #[must_use]
    pub fn is_pending(&self, section: &SectionId) -> bool {
        self.pending
            .iter()
            .any(|pending| &pending.section == section)
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest instant at which [`run_due`](Self::run_due) has work.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|pending| pending.due).min()
    }

    pub fn sections(&self) -> impl Iterator<Item = (&SectionId, SectionState)> {
        self.sections.iter().map(|(id, slot)| (id, slot.state))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<C> Default for LazyTriggerScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

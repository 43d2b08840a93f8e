/*!
 * Timeline Events
 * Ordered dispatch log for visualization
 */

use crate::core::types::{Pid, Tick};
use serde::{Deserialize, Serialize};

/// What happened to a process at a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Process executes its first tick after a dispatch
    Start,
    /// Process was sent back to the ready set with work left
    Preempt,
    /// Process finished its last tick of work
    Complete,
}

impl EventKind {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Preempt => "PREEMPT",
            Self::Complete => "COMPLETE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub tick: Tick,
    pub pid: Pid,
    pub kind: EventKind,
}

/// Contiguous stretch of CPU ownership, `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub pid: Pid,
    pub start: Tick,
    pub end: Tick,
}

/// Append-only event log of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, tick: Tick, pid: Pid, kind: EventKind) {
        self.events.push(TimelineEvent { tick, pid, kind });
    }

    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    /// Events of one kind, in order
    pub fn of_kind(&self, kind: EventKind) -> impl Iterator<Item = &TimelineEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    /// Pids in the order they were dispatched, repeats included
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.of_kind(EventKind::Start).map(|e| e.pid).collect()
    }

    /// Pids in the order they completed
    pub fn completion_order(&self) -> Vec<Pid> {
        self.of_kind(EventKind::Complete).map(|e| e.pid).collect()
    }

    /// Pair each start with the next preempt/complete of the same pid
    ///
    /// Only one process holds the CPU at a time, so the closing event of an
    /// open segment is always the next non-start event in the log.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut open: Option<(Pid, Tick)> = None;

        for event in &self.events {
            match event.kind {
                EventKind::Start => open = Some((event.pid, event.tick)),
                EventKind::Preempt | EventKind::Complete => {
                    if let Some((pid, start)) = open.take() {
                        if pid == event.pid && event.tick > start {
                            segments.push(Segment {
                                pid,
                                start,
                                end: event.tick,
                            });
                        }
                    }
                }
            }
        }

        segments
    }
}

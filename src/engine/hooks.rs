use std::collections::{BTreeMap, HashMap};

use log::trace;

use crate::engine::combo::ComboName;

/// Every event the dispatcher can fire. A closed set: listeners bind to
/// variants, not strings, so a typo is a compile error instead of a silent
/// no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    /// Per-frame simulation pass.
    Tick,
    /// Post-tick bookkeeping (camera, cleanup).
    Update,
    /// Draw-order pass.
    Render,
    /// A combo gesture completed.
    ComboTrigger,
    /// A solid was added to the room.
    TileAdded,
    /// The player dropped below the room floor.
    PlayerFell,
    /// The player reached the exit door.
    DoorReached,
    /// The player touched a hazard.
    PlayerHit,
}

/// Payload threaded through a firing's callbacks. Each callback sees the
/// value left by the one before it, so listeners can accumulate or veto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventData {
    None,
    Combo(ComboName),
    Tile(hecs::Entity),
    Value(f64),
}

/// Plain function pointer so callback lists stay `Copy` and the dispatcher
/// can snapshot them before firing. `C` is the context handed to every
/// listener.
pub type Callback<C> = fn(&mut C, &mut EventData);

struct Entry<C> {
    id: &'static str,
    callback: Callback<C>,
}

// Manual impls: fn pointers are Copy no matter what `C` is, and a derive
// would demand `C: Copy`.
impl<C> Clone for Entry<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Entry<C> {}

/// How long a suspended listener stays out of the queue.
#[derive(Debug, Clone, Copy)]
pub enum SuspendFor {
    Ms(f64),
    Frames(u32),
}

enum Revive {
    At(f64),
    After(u32),
}

struct Suspended<C> {
    event: Event,
    priority: i32,
    entry: Entry<C>,
    revive: Revive,
}

/// Priority-bucketed event dispatcher.
///
/// Callbacks are registered under an event at an integer priority; firing
/// runs priorities in ascending order and, inside a bucket, registration
/// order. Registration is idempotent per `(event, priority, id)`.
///
/// Listeners can be suspended for a span of time or a number of frames
/// instead of being torn down; [`tick`](Hooks::tick) revives them when due.
pub struct Hooks<C> {
    queued: HashMap<Event, BTreeMap<i32, Vec<Entry<C>>>>,
    suspended: Vec<Suspended<C>>,
    current: Option<Event>,
    done: Vec<Event>,
}

impl<C> Default for Hooks<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Hooks<C> {
    const DONE_LIMIT: usize = 1000;

    pub fn new() -> Self {
        Self {
            queued: HashMap::new(),
            suspended: Vec::new(),
            current: None,
            done: Vec::new(),
        }
    }

    /// Register `callback` under `event` at `priority`. A duplicate
    /// `(event, priority, id)` registration is ignored.
    pub fn add(&mut self, event: Event, id: &'static str, callback: Callback<C>, priority: i32) {
        let bucket = self
            .queued
            .entry(event)
            .or_default()
            .entry(priority)
            .or_default();
        if bucket.iter().any(|e| e.id == id) {
            return;
        }
        bucket.push(Entry { id, callback });
    }

    /// Remove a listener. True if something was removed.
    pub fn remove(&mut self, event: Event, id: &'static str, priority: i32) -> bool {
        let Some(bucket) = self
            .queued
            .get_mut(&event)
            .and_then(|p| p.get_mut(&priority))
        else {
            return false;
        };
        let before = bucket.len();
        bucket.retain(|e| e.id != id);
        before != bucket.len()
    }

    /// Is this listener currently queued?
    pub fn exists(&self, event: Event, id: &'static str, priority: i32) -> bool {
        self.queued
            .get(&event)
            .and_then(|p| p.get(&priority))
            .is_some_and(|bucket| bucket.iter().any(|e| e.id == id))
    }

    /// Fire every callback queued under `event`, threading `data` through
    /// them in priority then registration order. Returns the final payload.
    ///
    /// The callback list is snapshotted first, so listeners may add or
    /// remove hooks mid-firing; changes apply from the next firing on.
    pub fn fire(&mut self, ctx: &mut C, event: Event, mut data: EventData) -> EventData {
        let snapshot: Vec<Callback<C>> = self
            .queued
            .get(&event)
            .map(|priorities| {
                priorities
                    .values()
                    .flat_map(|bucket| bucket.iter().map(|e| e.callback))
                    .collect()
            })
            .unwrap_or_default();

        trace!("fire {:?} ({} listeners)", event, snapshot.len());
        self.current = Some(event);
        for callback in snapshot {
            callback(ctx, &mut data);
        }
        self.current = None;

        self.done.push(event);
        if self.done.len() > Self::DONE_LIMIT {
            self.done.remove(0);
        }
        data
    }

    /// Is `event` being fired right now?
    pub fn doing(&self, event: Event) -> bool {
        self.current == Some(event)
    }

    /// How many times `event` has fired, within the bounded done log.
    pub fn did(&self, event: Event) -> usize {
        self.done.iter().filter(|&&e| e == event).count()
    }

    /// Pull a listener out of the queue until the span elapses. No-op when
    /// the listener is not queued.
    pub fn suspend(
        &mut self,
        event: Event,
        id: &'static str,
        priority: i32,
        span: SuspendFor,
        now: f64,
    ) {
        let Some(bucket) = self
            .queued
            .get_mut(&event)
            .and_then(|p| p.get_mut(&priority))
        else {
            return;
        };
        let Some(pos) = bucket.iter().position(|e| e.id == id) else {
            return;
        };
        let entry = bucket.remove(pos);
        let revive = match span {
            SuspendFor::Ms(ms) => Revive::At(now + ms),
            SuspendFor::Frames(n) => Revive::After(n),
        };
        self.suspended.push(Suspended {
            event,
            priority,
            entry,
            revive,
        });
    }

    /// Re-queue a suspended listener immediately.
    pub fn resume(&mut self, event: Event, id: &'static str) {
        let mut revived = Vec::new();
        self.suspended.retain_mut(|s| {
            if s.event == event && s.entry.id == id {
                revived.push((s.event, s.priority, s.entry));
                false
            } else {
                true
            }
        });
        for (event, priority, entry) in revived {
            self.requeue(event, priority, entry);
        }
    }

    /// Once-per-frame upkeep: count down frame suspensions and revive
    /// anything whose span has elapsed.
    pub fn tick(&mut self, now: f64) {
        let mut revived = Vec::new();
        self.suspended.retain_mut(|s| {
            let due = match &mut s.revive {
                Revive::At(at) => now >= *at,
                Revive::After(frames) => {
                    *frames = frames.saturating_sub(1);
                    *frames == 0
                }
            };
            if due {
                revived.push((s.event, s.priority, s.entry));
            }
            !due
        });
        for (event, priority, entry) in revived {
            self.requeue(event, priority, entry);
        }
    }

    fn requeue(&mut self, event: Event, priority: i32, entry: Entry<C>) {
        let bucket = self
            .queued
            .entry(event)
            .or_default()
            .entry(priority)
            .or_default();
        if !bucket.iter().any(|e| e.id == entry.id) {
            bucket.push(entry);
        }
    }
}

use std::collections::HashMap;

use super::MechanicId;

/// Capability-suspension registry.
///
/// A mechanic that needs exclusive control of the body (dash, wall jump)
/// records "suspended until" timestamps here; every mechanic checks
/// [`allows`](Suspensions::allows) at the top of its own `listen` instead of
/// peers reaching into each other's state. Entries expire by comparison, so
/// restoration needs no bookkeeping pass.
#[derive(Debug, Default)]
pub struct Suspensions {
    until: HashMap<MechanicId, f64>,
}

impl Suspensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block `id` until the given timestamp. A later deadline wins over an
    /// earlier one already recorded.
    pub fn suspend(&mut self, id: MechanicId, until: f64) {
        let entry = self.until.entry(id).or_insert(f64::NEG_INFINITY);
        if until > *entry {
            *entry = until;
        }
    }

    /// Block a whole group at once.
    pub fn suspend_all(&mut self, ids: &[MechanicId], until: f64) {
        for &id in ids {
            self.suspend(id, until);
        }
    }

    /// May `id` run at time `now`?
    pub fn allows(&self, id: MechanicId, now: f64) -> bool {
        self.until.get(&id).map_or(true, |&until| now >= until)
    }

    /// Remove a suspension early.
    pub fn lift(&mut self, id: MechanicId) {
        self.until.remove(&id);
    }

    pub fn clear(&mut self) {
        self.until.clear();
    }
}

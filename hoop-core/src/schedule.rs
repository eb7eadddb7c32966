//! Deferred, one-shot effects keyed to the shot generation.
//!
//! Every accepted shot and every manual reset bumps the session's shot
//! generation. Effects remember the generation they were scheduled under;
//! when they come due under a different generation they are dropped. A miss
//! check or delayed reset from an earlier shot therefore can never act on a
//! newer one.

use tracing::trace;

use crate::events::ResetReason;

/// Work the session performs later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredEffect {
    /// Report a miss if the ball is still low and in flight
    MissCheck,
    /// Return the ball to center court
    ResetBall(ResetReason),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due: f64,
    generation: u64,
    sequence: u64,
    effect: DeferredEffect,
}

/// Time-ordered queue of deferred effects against the session clock.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Vec<Pending>,
    next_sequence: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `effect` to run `delay` seconds after `now`.
    pub fn schedule(&mut self, now: f64, delay: f64, generation: u64, effect: DeferredEffect) {
        self.pending.push(Pending {
            due: now + delay.max(0.0),
            generation,
            sequence: self.next_sequence,
            effect,
        });
        self.next_sequence += 1;
    }

    /// Remove every effect due at `now`, returning the ones still current
    /// for `generation` in due order (ties in scheduling order).
    pub fn take_due(&mut self, now: f64, generation: u64) -> Vec<DeferredEffect> {
        let (mut due, waiting): (Vec<Pending>, Vec<Pending>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.sequence.cmp(&b.sequence)));
        due.into_iter()
            .filter_map(|p| {
                if p.generation == generation {
                    Some(p.effect)
                } else {
                    trace!(
                        effect = ?p.effect,
                        scheduled = p.generation,
                        current = generation,
                        "dropping stale deferred effect"
                    );
                    None
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

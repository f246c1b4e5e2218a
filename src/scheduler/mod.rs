// Event scheduler - Distributes randomly-typed events across time slots
// Decides how many events of which type land in which window; everything
// downstream is renderer invocation

pub mod catalog;
pub mod sampler;
pub mod slots;

// Re-export main types
pub use catalog::{CatalogEntry, CatalogError, EventCatalog};
pub use sampler::{RngSampler, Sampler};
pub use slots::{partition, TimeWindow};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("clip duration must be a positive finite number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("slot count must be at least 1")]
    NoSlots,
}

/// An event-type label with its drawn onset and the slot window it was
/// assigned to
///
/// The renderer treats the window as the onset specification and may draw
/// the final onset uniformly within it; `onset_s` is the driver's own
/// in-window draw, usable directly by engines that do not re-draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub label: String,
    pub onset_s: f64,
    pub window: TimeWindow,
}

/// Ordered per-clip schedule
///
/// Built fresh for each output clip, consumed once by the renderer, never
/// mutated after construction. Order is slot order, then within-slot draw
/// order; events are not sorted by onset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub events: Vec<ScheduledEvent>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledEvent> {
        self.events.iter()
    }
}

/// Distribute `n_events` weighted-random events across `n_slots` equal
/// windows of `duration_s`
///
/// Each slot contributes at most `floor(n_events / n_slots) + 1` events.
/// The cap over-allocates so the requested total is always reached, at the
/// cost of later slots being starved once the running total is met; when
/// `n_events` does not divide evenly this skews events toward earlier
/// slots. The skew is intentional and downstream datasets depend on it.
///
/// Pure function of its inputs and the sampler; the output length equals
/// `n_events` for every `n_events >= 0` and `n_slots >= 1`.
pub fn build_schedule(
    duration_s: f64,
    n_events: usize,
    n_slots: usize,
    catalog: &EventCatalog,
    sampler: &mut impl Sampler,
) -> Result<Schedule, ScheduleError> {
    if !duration_s.is_finite() || duration_s <= 0.0 {
        return Err(ScheduleError::InvalidDuration(duration_s));
    }
    if n_slots == 0 {
        return Err(ScheduleError::NoSlots);
    }

    let windows = slots::partition(duration_s, n_slots);
    let per_slot_cap = n_events / n_slots + 1;

    let mut events = Vec::with_capacity(n_events);
    for window in windows {
        // Loop invariant: stop as soon as the running total reaches n_events
        if events.len() == n_events {
            break;
        }

        let remaining = n_events - events.len();
        for _ in 0..per_slot_cap.min(remaining) {
            let label = sampler.pick_label(catalog).to_string();
            let onset_s = sampler.uniform(window.start_s, window.end_s);
            events.push(ScheduledEvent {
                label,
                onset_s,
                window,
            });
        }
    }

    Ok(Schedule { events })
}

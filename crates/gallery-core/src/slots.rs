//! Placeholder/loaded slot sequence for the gallery grid.
//!
//! The sequence is an immutable value: every transition returns a new
//! sequence and leaves its input untouched. By construction the slots form a
//! prefix of `Loaded` entries followed by a run of `Placeholder` entries.

use crate::error::{GalleryError, Result};
use std::sync::Arc;

/// One position in the gallery grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Loaded(T),
    Placeholder,
}

impl<T> Slot<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::Placeholder)
    }

    pub fn item(&self) -> Option<&T> {
        match self {
            Slot::Loaded(item) => Some(item),
            Slot::Placeholder => None,
        }
    }
}

/// Coarse lifecycle of the sequence across one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencePhase {
    /// Every slot is loaded.
    Stable,
    /// Placeholders are waiting for a fetch to resolve.
    GrowingWithPlaceholders,
    /// A reconcile finished but left placeholders nothing will resolve.
    PartiallyResolved,
}

#[derive(Debug)]
pub struct SlotSequence<T> {
    slots: Arc<[Slot<T>]>,
}

impl<T> Clone for SlotSequence<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

impl<T: PartialEq> PartialEq for SlotSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl<T> Default for SlotSequence<T> {
    fn default() -> Self {
        Self {
            slots: Arc::from(Vec::new()),
        }
    }
}

impl<T> From<Vec<Slot<T>>> for SlotSequence<T> {
    fn from(slots: Vec<Slot<T>>) -> Self {
        Self {
            slots: Arc::from(slots),
        }
    }
}

/// Result of a reconcile, with counters for logging.
#[derive(Debug, Clone)]
pub struct ReconcileOutcome<T> {
    pub sequence: SlotSequence<T>,
    /// Placeholders converted to loaded slots.
    pub filled: usize,
    /// Items appended past the end because no placeholder was left for them.
    pub surplus: usize,
    /// Placeholders still unresolved after the reconcile.
    pub orphaned: usize,
}

impl<T> ReconcileOutcome<T> {
    pub fn phase(&self) -> SequencePhase {
        if self.orphaned == 0 {
            SequencePhase::Stable
        } else {
            SequencePhase::PartiallyResolved
        }
    }
}

fn placeholder_count(count: i64) -> Result<usize> {
    usize::try_from(count).map_err(|_| {
        GalleryError::InvalidArgument(format!(
            "placeholder count must be non-negative, got {count}"
        ))
    })
}

impl<T> SlotSequence<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence made only of `count` placeholders, as created at mount time.
    pub fn with_placeholders(count: i64) -> Result<Self> {
        let count = placeholder_count(count)?;
        let slots: Vec<Slot<T>> = (0..count).map(|_| Slot::Placeholder).collect();
        Ok(Self::from(slots))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn loaded_len(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_placeholder()).count()
    }

    pub fn placeholder_len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_placeholder()).count()
    }

    pub fn get(&self, index: usize) -> Option<&Slot<T>> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot<T>> {
        self.slots.iter()
    }

    pub fn as_slice(&self) -> &[Slot<T>] {
        &self.slots
    }

    pub fn phase(&self) -> SequencePhase {
        if self.slots.iter().any(Slot::is_placeholder) {
            SequencePhase::GrowingWithPlaceholders
        } else {
            SequencePhase::Stable
        }
    }
}

impl<T: Clone> SlotSequence<T> {
    /// Returns this sequence with `count` placeholders added at the tail.
    pub fn append_placeholders(&self, count: i64) -> Result<Self> {
        let count = placeholder_count(count)?;
        if count == 0 {
            return Ok(self.clone());
        }
        let mut slots = Vec::with_capacity(self.slots.len() + count);
        slots.extend(self.slots.iter().cloned());
        slots.extend((0..count).map(|_| Slot::Placeholder));
        Ok(Self::from(slots))
    }

    /// Converts placeholders to loaded slots in arrival order.
    ///
    /// Placeholders are filled from the start of the placeholder run. Any
    /// placeholders left over stay in place; items beyond the available
    /// placeholders are appended as loaded slots.
    pub fn reconcile(&self, arrived: Vec<T>) -> Self {
        self.reconcile_with_report(arrived).sequence
    }

    pub fn reconcile_with_report(&self, arrived: Vec<T>) -> ReconcileOutcome<T> {
        let mut arrived = arrived.into_iter();
        let mut filled = 0usize;
        let mut orphaned = 0usize;

        let mut slots: Vec<Slot<T>> = Vec::with_capacity(self.slots.len());
        for slot in self.slots.iter() {
            match slot {
                Slot::Loaded(item) => slots.push(Slot::Loaded(item.clone())),
                Slot::Placeholder => match arrived.next() {
                    Some(item) => {
                        filled += 1;
                        slots.push(Slot::Loaded(item));
                    }
                    None => {
                        orphaned += 1;
                        slots.push(Slot::Placeholder);
                    }
                },
            }
        }

        let before_surplus = slots.len();
        slots.extend(arrived.map(Slot::Loaded));
        let surplus = slots.len() - before_surplus;

        ReconcileOutcome {
            sequence: Self::from(slots),
            filled,
            surplus,
            orphaned,
        }
    }
}

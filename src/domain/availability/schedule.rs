//! A tutor's collection of availability slots.

use serde::{Deserialize, Serialize};

use super::{AvailabilitySlot, DayWindow, TimeOfDay};
use crate::domain::foundation::ValidationError;

/// Ordered, duplicate-free list of one tutor's slots.
///
/// Slots are kept sorted by date then start time, and no two slots share a
/// (date, startTime) pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilitySchedule {
    slots: Vec<AvailabilitySlot>,
}

impl AvailabilitySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a schedule from a full list, rejecting duplicates.
    pub fn from_slots(slots: Vec<AvailabilitySlot>) -> Result<Self, ValidationError> {
        let mut schedule = Self::new();
        for slot in slots {
            schedule.add(slot)?;
        }
        Ok(schedule)
    }

    /// Builds a schedule from stored rows without re-validating uniqueness.
    pub fn from_stored(mut slots: Vec<AvailabilitySlot>) -> Self {
        slots.sort_by_key(|s| (s.date, s.start_time));
        Self { slots }
    }

    pub fn slots(&self) -> &[AvailabilitySlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Inserts a slot in order, failing if its (date, startTime) is taken.
    pub fn add(&mut self, slot: AvailabilitySlot) -> Result<(), ValidationError> {
        if self.slots.iter().any(|s| s.same_opening(&slot)) {
            return Err(ValidationError::duplicate(
                "availability",
                format!("{} {}", slot.date, slot.start_time),
            ));
        }
        let at = self
            .slots
            .partition_point(|s| (s.date, s.start_time) < (slot.date, slot.start_time));
        self.slots.insert(at, slot);
        Ok(())
    }

    /// Finds the slot a booking in `window` at `start_time` would consume.
    pub fn find(&self, window: &DayWindow, start_time: &TimeOfDay) -> Option<&AvailabilitySlot> {
        self.slots.iter().find(|s| s.matches(window, start_time))
    }

    /// Removes at most one matching slot; returns whether anything was removed.
    pub fn remove(&mut self, window: &DayWindow, start_time: &TimeOfDay) -> bool {
        match self.slots.iter().position(|s| s.matches(window, start_time)) {
            Some(index) => {
                self.slots.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn into_slots(self) -> Vec<AvailabilitySlot> {
        self.slots
    }
}

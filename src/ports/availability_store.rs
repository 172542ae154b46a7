//! Availability store port.
//!
//! Per-tutor list of bookable slots. Tutor edits use `add_slot` and
//! `replace_all_slots`; booking fulfillment only ever uses the targeted
//! `remove_slot` so it cannot clobber a concurrent edit.

use async_trait::async_trait;

use crate::domain::availability::{AvailabilitySchedule, AvailabilitySlot, DayWindow, TimeOfDay};
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// Slots ordered by date then start time. Empty if the tutor has no profile.
    async fn list_slots(&self, tutor: &UserId) -> Result<Vec<AvailabilitySlot>, DomainError>;

    /// Appends one slot.
    ///
    /// Fails with a validation error if the (date, startTime) pair is taken,
    /// and with `ProfileNotFound` if the tutor has no profile.
    async fn add_slot(&self, tutor: &UserId, slot: AvailabilitySlot) -> Result<(), DomainError>;

    /// Overwrites the tutor's whole list.
    async fn replace_all_slots(&self, tutor: &UserId, slots: &AvailabilitySchedule) -> Result<(), DomainError>;

    /// Removes at most one slot on the window's day starting at `start_time`.
    ///
    /// Returns whether a slot was actually removed.
    async fn remove_slot(&self, tutor: &UserId, window: &DayWindow, start_time: &TimeOfDay) -> Result<bool, DomainError>;
}

//! Weekly plan editing.
//!
//! Updates merge into a slot field by field. A new primary field always
//! clears the dependent fields unless the same update supplies them.

use crate::error::Rejection;
use crate::state::{DayPlan, WEEK_LEN};

/// Partial update for one slot.
///
/// Outer `None` leaves the field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotUpdate {
    pub field1: Option<Option<String>>,
    pub field2: Option<Option<String>>,
    pub field3: Option<Option<String>>,
}

impl SlotUpdate {
    /// Update that sets all three fields at once.
    pub fn full(field1: &str, field2: &str, field3: &str) -> Self {
        Self {
            field1: Some(Some(field1.to_string())),
            field2: Some(Some(field2.to_string())),
            field3: Some(Some(field3.to_string())),
        }
    }

    /// Update that clears the whole slot.
    pub fn clear() -> Self {
        Self {
            field1: Some(None),
            field2: Some(None),
            field3: Some(None),
        }
    }
}

/// Apply `update` to slot `index` of the plan and return the merged slot.
///
/// # Errors
/// Rejects indices outside `0..7`; the plan is left unchanged.
pub fn set_slot(
    plan: &mut [DayPlan; WEEK_LEN],
    index: usize,
    update: SlotUpdate,
) -> Result<&DayPlan, Rejection> {
    let slot = plan
        .get_mut(index)
        .ok_or(Rejection::SlotOutOfRange(index))?;

    let SlotUpdate {
        field1,
        field2,
        field3,
    } = update;

    let cascade = field1.is_some();
    if let Some(value) = field1 {
        slot.field1 = value;
    }
    match field2 {
        Some(value) => slot.field2 = value,
        None if cascade => slot.field2 = None,
        None => {}
    }
    match field3 {
        Some(value) => slot.field3 = value,
        None if cascade => slot.field3 = None,
        None => {}
    }
    Ok(slot)
}

/// Status line shown under the day editor.
pub fn slot_status(plan: &DayPlan) -> &'static str {
    if plan.is_valid() {
        "Selections saved."
    } else {
        "Select all three fields."
    }
}

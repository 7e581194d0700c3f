//! Applying a backend-confirmed action to the local list without re-fetching.

use chrono::{DateTime, Utc};

use crate::domain::{ReservationAction, ReservationId, ReservationRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Cancel removed one record.
    Removed,
    /// Pickup or Return stamped this many records.
    Stamped(usize),
    /// The action code is not one we know; this many matching records were left alone.
    Unrecognized(usize),
    /// No record carries the id.
    NoMatch,
}

/// Updates `records` after the backend accepted `action` for reservation `id`.
///
/// Cancel removes the first record with the id. Pickup and Return stamp `now`
/// into every record with the id and leave the other date fields alone.
pub fn apply_action(
    records: &mut Vec<ReservationRecord>,
    action: ReservationAction,
    id: ReservationId,
    now: DateTime<Utc>,
) -> Reconciliation {
    match action {
        ReservationAction::Cancel => match records.iter().position(|record| record.id == id) {
            Some(index) => {
                records.remove(index);
                Reconciliation::Removed
            }
            None => Reconciliation::NoMatch,
        },
        ReservationAction::Pickup => stamp(records, id, |record| record.picked_up_date = Some(now)),
        ReservationAction::Return => stamp(records, id, |record| record.return_date = Some(now)),
        ReservationAction::Unknown(_) => {
            match records.iter().filter(|record| record.id == id).count() {
                0 => Reconciliation::NoMatch,
                matched => Reconciliation::Unrecognized(matched),
            }
        }
    }
}

fn stamp(
    records: &mut [ReservationRecord],
    id: ReservationId,
    mut apply: impl FnMut(&mut ReservationRecord),
) -> Reconciliation {
    let mut stamped = 0;
    for record in records.iter_mut().filter(|record| record.id == id) {
        apply(record);
        stamped += 1;
    }
    if stamped == 0 {
        Reconciliation::NoMatch
    } else {
        Reconciliation::Stamped(stamped)
    }
}

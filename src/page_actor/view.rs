use serde::Serialize;

use crate::domain::ReservationRecord;

/// Snapshot of everything the page renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub reservations: Vec<ReservationRecord>,
    /// Set while the reservation list itself is loading.
    pub is_loading_page: bool,
    /// Set while any action request is in flight; disables the action buttons.
    pub is_loading: bool,
    /// Backend calls started by the page that have not reported back yet.
    pub pending_requests: usize,
}

impl PageView {
    pub fn is_settled(&self) -> bool {
        self.pending_requests == 0
    }
}

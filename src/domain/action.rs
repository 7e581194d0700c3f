use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::reservation::ReservationId;

/// Actions a user can trigger on a reservation.
///
/// The backend identifies actions by numeric code. Codes outside the known set
/// are carried as `Unknown` so they can still be sent and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ReservationAction {
    /// Code 0: drop the reservation.
    Cancel,
    /// Code 1: the item left the desk.
    Pickup,
    /// Code 2: the item came back.
    Return,
    Unknown(i32),
}

impl From<i32> for ReservationAction {
    fn from(code: i32) -> Self {
        match code {
            0 => ReservationAction::Cancel,
            1 => ReservationAction::Pickup,
            2 => ReservationAction::Return,
            other => ReservationAction::Unknown(other),
        }
    }
}

impl From<ReservationAction> for i32 {
    fn from(action: ReservationAction) -> Self {
        match action {
            ReservationAction::Cancel => 0,
            ReservationAction::Pickup => 1,
            ReservationAction::Return => 2,
            ReservationAction::Unknown(code) => code,
        }
    }
}

impl FromStr for ReservationAction {
    type Err = String;

    /// Accepts the action name (any case) or its numeric code.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cancel" => Ok(ReservationAction::Cancel),
            "pickup" | "pick-up" => Ok(ReservationAction::Pickup),
            "return" => Ok(ReservationAction::Return),
            other => other
                .parse::<i32>()
                .map(ReservationAction::from)
                .map_err(|_| format!("unknown reservation action: {raw}")),
        }
    }
}

impl std::fmt::Display for ReservationAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReservationAction::Cancel => write!(f, "cancel"),
            ReservationAction::Pickup => write!(f, "pickup"),
            ReservationAction::Return => write!(f, "return"),
            ReservationAction::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// Body of the action endpoint. Built per call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub reservation_id: ReservationId,
    pub action: ReservationAction,
}

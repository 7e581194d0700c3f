use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates;
use super::product::{ProductFlat, ProductId};

pub type ReservationId = i64;

/// Page-local identity of a record.
///
/// Keys are handed out once per record and never reused within a page, so a
/// late product response can only ever land on the record it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey(u64);

impl RecordKey {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record_{}", self.0)
    }
}

/// A reservation as delivered by the "similar reservations" endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarReservation {
    pub id: ReservationId,
    #[serde(with = "dates::required")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "dates::required")]
    pub end_date: DateTime<Utc>,
    #[serde(default, with = "dates::optional")]
    pub return_date: Option<DateTime<Utc>>,
    #[serde(default, with = "dates::optional")]
    pub picked_up_date: Option<DateTime<Utc>>,
    pub product_id: ProductId,
}

/// A reservation held by the page, optionally enriched with its product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(skip)]
    pub key: RecordKey,
    pub id: ReservationId,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub picked_up_date: Option<DateTime<Utc>>,
    pub product_id: ProductId,
    pub product: Option<ProductFlat>,
}

impl ReservationRecord {
    /// Copies the reservation field by field; the product starts out absent.
    pub fn from_similar(key: RecordKey, reservation: SimilarReservation) -> Self {
        Self {
            key,
            id: reservation.id,
            start_date: reservation.start_date,
            end_date: reservation.end_date,
            return_date: reservation.return_date,
            picked_up_date: reservation.picked_up_date,
            product_id: reservation.product_id,
            product: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn decodes_backend_payload() {
        let raw = r#"[
            {"id":1,"startDate":"2024-03-01T08:00:00Z","endDate":"2024-03-03T08:00:00Z","returnDate":null,"productId":10},
            {"id":2,"startDate":"2024-03-04T08:00:00","endDate":"2024-03-05T08:00:00","pickedUpDate":"2024-03-04T09:15:00","productId":11}
        ]"#;
        let reservations: Vec<SimilarReservation> = serde_json::from_str(raw).unwrap();

        assert_eq!(reservations.len(), 2);
        assert_eq!(reservations[0].return_date, None);
        assert_eq!(reservations[0].picked_up_date, None);
        assert_eq!(
            reservations[1].picked_up_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 4, 9, 15, 0).unwrap())
        );
        assert_eq!(reservations[1].product_id, 11);
    }

    #[test]
    fn record_starts_without_product() {
        let reservation = SimilarReservation {
            id: 7,
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
            return_date: None,
            picked_up_date: Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()),
            product_id: 42,
        };
        let record = ReservationRecord::from_similar(RecordKey::new(3), reservation.clone());

        assert_eq!(record.key, RecordKey::new(3));
        assert_eq!(record.id, reservation.id);
        assert_eq!(record.picked_up_date, reservation.picked_up_date);
        assert_eq!(record.product_id, 42);
        assert!(record.product.is_none());
    }
}

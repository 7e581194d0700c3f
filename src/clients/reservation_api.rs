use async_trait::async_trait;

use crate::clients::ApiError;
use crate::domain::{ActionRequest, ProductFlat, ProductId, ReservationId, SimilarReservation};

/// Backend operations the reservation page depends on.
///
/// `Ok(None)` is the "null body" answer: the call succeeded but the backend had
/// nothing to return.
#[async_trait]
pub trait ReservationApi: Send + Sync + 'static {
    async fn get_reservations_similar(
        &self,
        id: ReservationId,
    ) -> Result<Option<Vec<SimilarReservation>>, ApiError>;

    async fn get_product_flat_by_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<ProductFlat>, ApiError>;

    /// Executes an action. Errors carry a message fit for display.
    async fn reservation_action(&self, request: ActionRequest) -> Result<(), ApiError>;
}

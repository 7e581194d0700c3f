use tokio::sync::oneshot;

use crate::clients::ApiError;
use crate::domain::{
    ProductFlat, ProductId, RecordKey, ReservationAction, ReservationId, SimilarReservation,
};
use crate::page_actor::{PageError, PageView};

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests a page client sends to the page actor. Each variant carries its
/// parameters and a oneshot channel for the answer.
#[derive(Debug)]
pub enum PageRequest {
    /// Page entry with the raw `id` route parameter. Answers whether a load started.
    Enter {
        id_param: Option<String>,
        respond_to: ServiceResponse<bool, PageError>,
    },
    LoadReservations {
        id: ReservationId,
        respond_to: ServiceResponse<(), PageError>,
    },
    /// Answered once the action is sent (or rejected), not when the backend replies.
    ReservationAction {
        action: ReservationAction,
        id: ReservationId,
        respond_to: ServiceResponse<(), PageError>,
    },
    GetView {
        respond_to: ServiceResponse<PageView, PageError>,
    },
    Shutdown,
}

/// Outcomes of backend calls, posted back to the page actor by the task that
/// made the call.
#[derive(Debug)]
pub enum Completion {
    ReservationsLoaded {
        generation: u64,
        result: Result<Option<Vec<SimilarReservation>>, ApiError>,
    },
    ProductLoaded {
        key: RecordKey,
        product_id: ProductId,
        result: Result<Option<ProductFlat>, ApiError>,
    },
    ActionCompleted {
        action: ReservationAction,
        id: ReservationId,
        result: Result<(), ApiError>,
    },
}

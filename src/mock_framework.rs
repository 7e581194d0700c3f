//! # Mock Framework
//!
//! A scripted backend for testing the reservation page.
//!
//! [`create_mock_api`] returns a `ReservationApi` plus a receiver. Every call
//! made through the api shows up on the receiver as an [`ApiCall`] carrying a
//! oneshot responder, so a test decides what each call returns and in which
//! order the calls complete. Helpers like [`expect_similar`] or
//! [`expect_action`] pull the next call and assert its kind.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::app_system::PageSystem;
use crate::clients::{ApiError, PageClient, ReservationApi};
use crate::domain::{ActionRequest, ProductFlat, ProductId, ReservationId, SimilarReservation};
use crate::notifications::{ChannelNotifier, Notification, NotificationCenter, TranslationCatalog};

const EXPECT_TIMEOUT: Duration = Duration::from_secs(2);
const QUIET_PERIOD: Duration = Duration::from_millis(50);

pub type Responder<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ApiCall {
    Similar {
        id: ReservationId,
        respond_to: Responder<Option<Vec<SimilarReservation>>>,
    },
    Product {
        product_id: ProductId,
        respond_to: Responder<Option<ProductFlat>>,
    },
    Action {
        request: ActionRequest,
        respond_to: Responder<()>,
    },
}

pub struct MockReservationApi {
    sender: mpsc::UnboundedSender<ApiCall>,
}

pub fn create_mock_api() -> (Arc<MockReservationApi>, mpsc::UnboundedReceiver<ApiCall>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Arc::new(MockReservationApi { sender }), receiver)
}

impl MockReservationApi {
    async fn call<T>(&self, build: impl FnOnce(Responder<T>) -> ApiCall) -> Result<T, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .map_err(|_| ApiError::backend(503, "mock backend closed"))?;
        response
            .await
            .map_err(|_| ApiError::backend(503, "mock backend dropped the call"))?
    }
}

#[async_trait]
impl ReservationApi for MockReservationApi {
    async fn get_reservations_similar(
        &self,
        id: ReservationId,
    ) -> Result<Option<Vec<SimilarReservation>>, ApiError> {
        self.call(|respond_to| ApiCall::Similar { id, respond_to }).await
    }

    async fn get_product_flat_by_id(
        &self,
        product_id: ProductId,
    ) -> Result<Option<ProductFlat>, ApiError> {
        self.call(|respond_to| ApiCall::Product { product_id, respond_to }).await
    }

    async fn reservation_action(&self, request: ActionRequest) -> Result<(), ApiError> {
        self.call(|respond_to| ApiCall::Action { request, respond_to }).await
    }
}

/// Everything a page test needs: the page handle, the backend calls it makes
/// and the toasts it shows. Keys are not translated, so toasts carry the raw key.
pub struct PageHarness {
    pub system: PageSystem,
    pub page: PageClient,
    pub calls: mpsc::UnboundedReceiver<ApiCall>,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
}

pub fn start_page() -> PageHarness {
    let (api, calls) = create_mock_api();
    let (notifier, notifications) = ChannelNotifier::new();
    let center = NotificationCenter::new(Arc::new(notifier), Arc::new(TranslationCatalog::default()));
    let system = PageSystem::start(api, center, 16);
    let page = system.page_client.clone();
    PageHarness {
        system,
        page,
        calls,
        notifications,
    }
}

async fn next_call(receiver: &mut mpsc::UnboundedReceiver<ApiCall>) -> Option<ApiCall> {
    tokio::time::timeout(EXPECT_TIMEOUT, receiver.recv()).await.ok().flatten()
}

/// Helper to verify that the next call is a similar-reservations lookup
pub async fn expect_similar(
    receiver: &mut mpsc::UnboundedReceiver<ApiCall>,
) -> Option<(ReservationId, Responder<Option<Vec<SimilarReservation>>>)> {
    match next_call(receiver).await {
        Some(ApiCall::Similar { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is a product lookup
pub async fn expect_product(
    receiver: &mut mpsc::UnboundedReceiver<ApiCall>,
) -> Option<(ProductId, Responder<Option<ProductFlat>>)> {
    match next_call(receiver).await {
        Some(ApiCall::Product { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next call is an action
pub async fn expect_action(
    receiver: &mut mpsc::UnboundedReceiver<ApiCall>,
) -> Option<(ActionRequest, Responder<()>)> {
    match next_call(receiver).await {
        Some(ApiCall::Action { request, respond_to }) => Some((request, respond_to)),
        _ => None,
    }
}

/// Collects `count` product lookups. Lookups are issued concurrently, so they
/// are returned sorted by product id rather than in arrival order.
pub async fn expect_products(
    receiver: &mut mpsc::UnboundedReceiver<ApiCall>,
    count: usize,
) -> Vec<(ProductId, Responder<Option<ProductFlat>>)> {
    let mut lookups = Vec::with_capacity(count);
    for _ in 0..count {
        match expect_product(receiver).await {
            Some(lookup) => lookups.push(lookup),
            None => break,
        }
    }
    lookups.sort_by_key(|(product_id, _)| *product_id);
    lookups
}

/// Asserts that no backend call arrives within a short quiet period.
pub async fn expect_no_call(receiver: &mut mpsc::UnboundedReceiver<ApiCall>) {
    if let Ok(Some(call)) = tokio::time::timeout(QUIET_PERIOD, receiver.recv()).await {
        panic!("Unexpected backend call: {:?}", call);
    }
}

pub async fn expect_notification(
    receiver: &mut mpsc::UnboundedReceiver<Notification>,
) -> Option<Notification> {
    tokio::time::timeout(EXPECT_TIMEOUT, receiver.recv()).await.ok().flatten()
}

/// Asserts that no notification has been shown.
pub fn expect_no_notification(receiver: &mut mpsc::UnboundedReceiver<Notification>) {
    if let Ok(notification) = receiver.try_recv() {
        panic!("Unexpected notification: {:?}", notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api() {
        let (api, mut receiver) = create_mock_api();

        let call_task = tokio::spawn(async move { api.get_product_flat_by_id(10).await });

        let (product_id, responder) = expect_product(&mut receiver).await.expect("Expected Product lookup");
        assert_eq!(product_id, 10);
        responder.send(Ok(Some(ProductFlat::new(10, "Camera")))).unwrap();

        let result = call_task.await.unwrap().unwrap();
        assert_eq!(result, Some(ProductFlat::new(10, "Camera")));
    }

    #[tokio::test]
    async fn dropped_responder_surfaces_as_backend_error() {
        let (api, mut receiver) = create_mock_api();

        let call_task = tokio::spawn(async move { api.get_reservations_similar(1).await });
        let (_, responder) = expect_similar(&mut receiver).await.expect("Expected Similar lookup");
        drop(responder);

        let result = call_task.await.unwrap();
        assert!(matches!(result, Err(ApiError::Backend { status: 503, .. })));
    }
}

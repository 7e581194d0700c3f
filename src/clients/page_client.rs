use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{ReservationAction, ReservationId};
use crate::messages::PageRequest;
use crate::page_actor::{PageError, PageView};

/// Handle to a running reservation page.
#[derive(Clone)]
pub struct PageClient {
    sender: mpsc::Sender<PageRequest>,
    view: watch::Receiver<PageView>,
}

impl PageClient {
    pub fn new(sender: mpsc::Sender<PageRequest>, view: watch::Receiver<PageView>) -> Self {
        Self { sender, view }
    }

    /// Receiver that observes every state change of the page.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<PageView> {
        self.view.clone()
    }

    /// Waits until the page view satisfies `predicate` and returns that view.
    pub async fn wait_for(
        &self,
        mut predicate: impl FnMut(&PageView) -> bool,
    ) -> Result<PageView, PageError> {
        let mut view = self.view.clone();
        let current = view
            .wait_for(|current| predicate(current))
            .await
            .map_err(|_| PageError::ActorCommunicationError("Page dropped".to_string()))?;
        Ok((*current).clone())
    }

    /// Waits until no backend call started by the page is outstanding.
    pub async fn wait_until_settled(&self) -> Result<PageView, PageError> {
        self.wait_for(PageView::is_settled).await
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), PageError> {
        debug!("Sending request");
        self.sender
            .send(PageRequest::Shutdown)
            .await
            .map_err(|_| PageError::ActorCommunicationError("Page closed".to_string()))
    }
}

client_method!(PageClient => fn enter(id_param: Option<String>) -> bool as PageRequest::Enter);
client_method!(PageClient => fn load_reservations(id: ReservationId) -> () as PageRequest::LoadReservations);
client_method!(PageClient => fn dispatch_action(action: ReservationAction, id: ReservationId) -> () as PageRequest::ReservationAction);
client_method!(PageClient => fn get_view() -> PageView as PageRequest::GetView);

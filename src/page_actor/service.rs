use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn, Instrument};

use crate::clients::{ApiError, PageClient, ReservationApi};
use crate::domain::{
    ActionRequest, ProductFlat, ProductId, RecordKey, ReservationAction, ReservationId,
    ReservationRecord, SimilarReservation,
};
use crate::messages::{Completion, PageRequest};
use crate::navigation::parse_reservation_id;
use crate::notifications::{keys, NotificationCenter};

use super::reconcile::{apply_action, Reconciliation};
use super::PageView;

/// Owner of the reservation page state.
///
/// Backend calls run in spawned tasks and report back through `completions`;
/// the list and the loading flags are only touched from `run`, one message at
/// a time.
pub struct PageService {
    receiver: mpsc::Receiver<PageRequest>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_sender: mpsc::UnboundedSender<Completion>,
    api: Arc<dyn ReservationApi>,
    notifications: NotificationCenter,
    view: watch::Sender<PageView>,
    reservations: Vec<ReservationRecord>,
    is_loading_page: bool,
    actions_in_flight: usize,
    pending_requests: usize,
    generation: u64,
    next_key: u64,
}

impl PageService {
    pub fn new(
        buffer_size: usize,
        api: Arc<dyn ReservationApi>,
        notifications: NotificationCenter,
    ) -> (Self, PageClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (completion_sender, completions) = mpsc::unbounded_channel();
        let (view, view_receiver) = watch::channel(PageView::default());
        let service = Self {
            receiver,
            completions,
            completion_sender,
            api,
            notifications,
            view,
            reservations: Vec::new(),
            is_loading_page: false,
            actions_in_flight: 0,
            pending_requests: 0,
            generation: 0,
            next_key: 1,
        };
        let client = PageClient::new(sender, view_receiver);
        (service, client)
    }

    /// Main loop. Ends on `Shutdown` or once every client is gone; completions
    /// still in flight at that point are abandoned.
    #[instrument(name = "page_service", skip(self))]
    pub async fn run(mut self) {
        info!("PageService starting");

        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(PageRequest::Shutdown) | None => {
                        info!("PageService shutting down");
                        break;
                    }
                    Some(request) => self.handle_request(request),
                },
                Some(completion) = self.completions.recv() => {
                    self.handle_completion(completion);
                    self.publish_view();
                }
            }
        }

        info!(abandoned = self.pending_requests, "PageService stopped");
    }

    // The view is published before answering so a caller that waits on the
    // view right after its request sees the state the request produced.
    fn handle_request(&mut self, request: PageRequest) {
        match request {
            PageRequest::Enter { id_param, respond_to } => {
                let started = self.handle_enter(id_param.as_deref());
                self.publish_view();
                let _ = respond_to.send(Ok(started));
            }
            PageRequest::LoadReservations { id, respond_to } => {
                self.load_reservations(id);
                self.publish_view();
                let _ = respond_to.send(Ok(()));
            }
            PageRequest::ReservationAction { action, id, respond_to } => {
                self.handle_reservation_action(action, id);
                self.publish_view();
                let _ = respond_to.send(Ok(()));
            }
            PageRequest::GetView { respond_to } => {
                let _ = respond_to.send(Ok(self.snapshot()));
            }
            PageRequest::Shutdown => {}
        }
    }

    fn handle_completion(&mut self, completion: Completion) {
        self.pending_requests = self.pending_requests.saturating_sub(1);
        match completion {
            Completion::ReservationsLoaded { generation, result } => {
                self.on_reservations_loaded(generation, result);
            }
            Completion::ProductLoaded { key, product_id, result } => {
                self.on_product_loaded(key, product_id, result);
            }
            Completion::ActionCompleted { action, id, result } => {
                self.on_action_completed(action, id, result);
            }
        }
    }

    #[instrument(skip(self))]
    fn handle_enter(&mut self, id_param: Option<&str>) -> bool {
        match parse_reservation_id(id_param) {
            Some(id) => {
                self.load_reservations(id);
                true
            }
            None => {
                debug!("No usable reservation id, nothing to load");
                false
            }
        }
    }

    /// Asks the backend for the reservations similar to `id`.
    #[instrument(fields(reservation_id = id), skip(self, id))]
    fn load_reservations(&mut self, id: ReservationId) {
        debug!("Processing load_reservations request");
        self.is_loading_page = true;
        self.generation += 1;
        let generation = self.generation;

        let api = Arc::clone(&self.api);
        self.spawn_call(async move {
            let result = api.get_reservations_similar(id).await;
            Completion::ReservationsLoaded { generation, result }
        });
    }

    #[instrument(skip(self, result))]
    fn on_reservations_loaded(
        &mut self,
        generation: u64,
        result: Result<Option<Vec<SimilarReservation>>, ApiError>,
    ) {
        if generation != self.generation {
            warn!(current = self.generation, "Dropping reservations from a superseded load");
            return;
        }

        match result {
            Ok(body) => {
                self.reservations = Vec::new();
                match body {
                    Some(similar) => {
                        let mut records = Vec::with_capacity(similar.len());
                        for reservation in similar {
                            records.push(ReservationRecord::from_similar(self.issue_key(), reservation));
                        }
                        self.reservations = records;
                        info!(count = self.reservations.len(), "Reservations loaded");
                        self.load_product_data();
                    }
                    None => debug!("Backend returned no reservations"),
                }
            }
            Err(e) => {
                error!(error = %e, "Loading reservations failed");
                self.notifications.show_error(keys::NO_RESPONSE_DATA);
            }
        }
        self.is_loading_page = false;
    }

    /// Starts one product lookup per record currently on the page.
    fn load_product_data(&mut self) {
        let lookups: Vec<(RecordKey, ProductId)> = self
            .reservations
            .iter()
            .map(|record| (record.key, record.product_id))
            .collect();

        for (key, product_id) in lookups {
            let api = Arc::clone(&self.api);
            self.spawn_call(async move {
                let result = api.get_product_flat_by_id(product_id).await;
                Completion::ProductLoaded { key, product_id, result }
            });
        }
    }

    #[instrument(fields(record = %key), skip(self, key, result))]
    fn on_product_loaded(
        &mut self,
        key: RecordKey,
        product_id: ProductId,
        result: Result<Option<ProductFlat>, ApiError>,
    ) {
        let Some(record) = self.reservations.iter_mut().find(|record| record.key == key) else {
            debug!("Record left the page, dropping lookup result");
            return;
        };
        match result {
            Ok(Some(product)) => {
                debug!(product_name = %product.name, "Product attached");
                record.product = Some(product);
            }
            Ok(None) => debug!("Backend returned no product"),
            Err(e) => {
                warn!(error = %e, "Loading product failed");
                self.notifications.show_error(keys::NO_PRODUCT_DATA);
            }
        }
    }

    #[instrument(fields(action = %action, reservation_id = id), skip(self, action, id))]
    fn handle_reservation_action(&mut self, action: ReservationAction, id: ReservationId) {
        if id <= -1 {
            warn!("Rejecting action for invalid reservation id");
            self.notifications.show_error(keys::ACTION_UNSUCCESSFUL);
            return;
        }

        debug!("Processing reservation_action request");
        self.actions_in_flight += 1;
        let request = ActionRequest { reservation_id: id, action };
        let api = Arc::clone(&self.api);
        self.spawn_call(async move {
            let result = api.reservation_action(request).await;
            Completion::ActionCompleted { action, id, result }
        });
    }

    #[instrument(fields(action = %action, reservation_id = id), skip(self, action, id, result))]
    fn on_action_completed(&mut self, action: ReservationAction, id: ReservationId, result: Result<(), ApiError>) {
        self.actions_in_flight = self.actions_in_flight.saturating_sub(1);
        match result {
            Ok(()) => {
                info!("Action accepted by backend");
                self.notifications.show_success(keys::ACTION_SUCCESS);
                self.update_reservation(action, id);
            }
            Err(e) => {
                error!(error = %e, "Action failed");
                self.notifications.show_error_text(&e.display_message());
            }
        }
    }

    fn update_reservation(&mut self, action: ReservationAction, id: ReservationId) {
        match apply_action(&mut self.reservations, action, id, Utc::now()) {
            Reconciliation::Removed => debug!("Reservation removed from page"),
            Reconciliation::Stamped(count) => debug!(count, "Reservation dates stamped"),
            Reconciliation::NoMatch => debug!("Reservation not on page, nothing to update"),
            Reconciliation::Unrecognized(count) => {
                // The backend already applied it; the page stays stale until reloaded.
                error!(count, "Unknown action, page no longer matches backend");
                for _ in 0..count {
                    self.notifications.show_error(keys::ACTION_ERROR);
                }
            }
        }
    }

    fn spawn_call<F>(&mut self, call: F)
    where
        F: std::future::Future<Output = Completion> + Send + 'static,
    {
        self.pending_requests += 1;
        let completions = self.completion_sender.clone();
        tokio::spawn(
            async move {
                // A closed mailbox means the page is gone; the answer has nowhere to go.
                let _ = completions.send(call.await);
            }
            .in_current_span(),
        );
    }

    fn issue_key(&mut self) -> RecordKey {
        let key = RecordKey::new(self.next_key);
        self.next_key += 1;
        key
    }

    fn snapshot(&self) -> PageView {
        PageView {
            reservations: self.reservations.clone(),
            is_loading_page: self.is_loading_page,
            is_loading: self.actions_in_flight > 0,
            pending_requests: self.pending_requests,
        }
    }

    fn publish_view(&self) {
        self.view.send_replace(self.snapshot());
    }
}

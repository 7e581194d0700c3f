#[macro_use]
mod macros;

pub mod error;
pub mod http_api;
pub mod page_client;
pub mod reservation_api;

pub use error::*;
pub use http_api::HttpReservationApi;
pub use page_client::PageClient;
pub use reservation_api::ReservationApi;

pub mod action;
pub mod dates;
pub mod product;
pub mod reservation;

pub use action::*;
pub use product::*;
pub use reservation::*;

pub mod model;
pub mod repository;

pub use model::{ItemEvent, ItemEventType, ItemState, Reservation, ReservationItem};
pub use repository::{NewReservation, NewReservationItem, ReservationRepository};

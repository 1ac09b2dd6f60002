pub mod dto;
pub mod facade;
pub mod service;

pub use dto::{
    BoardGameDto, BoardGameView, CategoryDto, ItemEventDto, ManagerBoardGameDto,
    ManagerReservationDto, ReservationDto, ReservationItemDto, ReservationView,
};
pub use facade::BoardGamesFacade;
pub use service::{BoardGamesService, GameWithAvailability};

pub mod model;
pub mod repository;

pub use model::{
    ClubEvent, NewClubEvent, NewPlannedState, NewRepeatingState, PlannedState, RepeatingState,
    StateKind,
};
pub use repository::{ClubEventRepository, PlannedStateRepository, RepeatingStateRepository};

pub mod dto;
pub mod facade;
pub mod service;
pub mod transitions;

pub use dto::{
    ClubEventDto, CurrentStateDto, PlannedStateDto, RepeatingStateCreatedDto, RepeatingStateDto,
};
pub use facade::ClubStateFacade;
pub use service::{ClubStateService, PlannedStateChanges};
pub use transitions::{
    start_state_transition_task, LoggingTransitionHandler, StateTransitionHandler,
};

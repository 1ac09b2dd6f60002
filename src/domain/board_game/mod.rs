pub mod model;
pub mod repository;

pub use model::{BoardGame, Category, NewBoardGame};
pub use repository::{BoardGameFilter, BoardGameRepository, CategoryRepository};

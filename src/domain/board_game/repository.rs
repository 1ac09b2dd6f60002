//! Category and board game repository interfaces

use async_trait::async_trait;

use super::model::{BoardGame, Category, NewBoardGame};
use crate::domain::DomainResult;

/// Filter for board game listings
#[derive(Debug, Clone, Default)]
pub struct BoardGameFilter {
    /// When set, only games with a matching `visible` flag are returned
    pub visible: Option<bool>,
    pub category_id: Option<i32>,
    /// Only games playable by this many players
    pub players: Option<i32>,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_all(&self) -> DomainResult<Vec<Category>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Category>>;

    async fn create(&self, name: &str, colour_hex: &str) -> DomainResult<Category>;

    async fn update(&self, category: Category) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Number of board games referencing a category
    async fn count_board_games(&self, id: i32) -> DomainResult<u64>;
}

#[async_trait]
pub trait BoardGameRepository: Send + Sync {
    async fn find(&self, filter: BoardGameFilter) -> DomainResult<Vec<BoardGame>>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BoardGame>>;

    async fn create(&self, game: NewBoardGame) -> DomainResult<BoardGame>;

    async fn update(&self, game: BoardGame) -> DomainResult<()>;

    /// Copies of each listed game currently held by running reservation
    /// items (states that still occupy a physical copy). Games without
    /// running items may be omitted from the result.
    async fn held_counts(&self, game_ids: &[i32]) -> DomainResult<Vec<(i32, i64)>>;
}

//! SeaORM implementations of CategoryRepository and BoardGameRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::debug;

use crate::domain::board_game::{BoardGameFilter, BoardGameRepository, CategoryRepository};
use crate::domain::{BoardGame, Category, DomainError, DomainResult, ItemState, NewBoardGame};
use crate::infrastructure::database::entities::{board_game, board_game_category, reservation_item};

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {e}"))
}

// ── Categories ──────────────────────────────────────────────────

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn category_to_domain(m: board_game_category::Model) -> Category {
    Category {
        id: m.id,
        name: m.name,
        colour_hex: m.colour_hex,
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let models = board_game_category::Entity::find()
            .order_by_asc(board_game_category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(category_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Category>> {
        let model = board_game_category::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(category_to_domain))
    }

    async fn create(&self, name: &str, colour_hex: &str) -> DomainResult<Category> {
        let model = board_game_category::ActiveModel {
            name: Set(name.to_string()),
            colour_hex: Set(colour_hex.to_string()),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(category_to_domain(inserted))
    }

    async fn update(&self, category: Category) -> DomainResult<()> {
        let model = board_game_category::ActiveModel {
            id: Set(category.id),
            name: Set(category.name),
            colour_hex: Set(category.colour_hex),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        board_game_category::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn count_board_games(&self, id: i32) -> DomainResult<u64> {
        board_game::Entity::find()
            .filter(board_game::Column::CategoryId.eq(id))
            .count(&self.db)
            .await
            .map_err(db_err)
    }
}

// ── Board games ─────────────────────────────────────────────────

pub struct SeaOrmBoardGameRepository {
    db: DatabaseConnection,
}

impl SeaOrmBoardGameRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn game_to_domain(m: board_game::Model) -> BoardGame {
    BoardGame {
        id: m.id,
        name: m.name,
        description: m.description,
        image_url: m.image_url,
        category_id: m.category_id,
        players_min: m.players_min,
        players_max: m.players_max,
        note_internal: m.note_internal,
        owner_id: m.owner_id,
        in_stock: m.in_stock,
        unavailable: m.unavailable,
        visible: m.visible,
        default_reservation_days: m.default_reservation_days,
    }
}

#[async_trait]
impl BoardGameRepository for SeaOrmBoardGameRepository {
    async fn find(&self, filter: BoardGameFilter) -> DomainResult<Vec<BoardGame>> {
        let mut query = board_game::Entity::find().order_by_asc(board_game::Column::Name);

        if let Some(visible) = filter.visible {
            query = query.filter(board_game::Column::Visible.eq(visible));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(board_game::Column::CategoryId.eq(category_id));
        }
        if let Some(players) = filter.players {
            query = query
                .filter(
                    Condition::any()
                        .add(board_game::Column::PlayersMin.is_null())
                        .add(board_game::Column::PlayersMin.lte(players)),
                )
                .filter(
                    Condition::any()
                        .add(board_game::Column::PlayersMax.is_null())
                        .add(board_game::Column::PlayersMax.gte(players)),
                );
        }

        let models = query.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(game_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BoardGame>> {
        let model = board_game::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(game_to_domain))
    }

    async fn create(&self, game: NewBoardGame) -> DomainResult<BoardGame> {
        debug!(name = %game.name, "Creating board game");
        let model = board_game::ActiveModel {
            name: Set(game.name),
            description: Set(game.description),
            image_url: Set(game.image_url),
            category_id: Set(game.category_id),
            players_min: Set(game.players_min),
            players_max: Set(game.players_max),
            note_internal: Set(game.note_internal),
            owner_id: Set(game.owner_id),
            in_stock: Set(game.in_stock),
            unavailable: Set(game.unavailable),
            visible: Set(game.visible),
            default_reservation_days: Set(game.default_reservation_days),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(game_to_domain(inserted))
    }

    async fn update(&self, game: BoardGame) -> DomainResult<()> {
        let model = board_game::ActiveModel {
            id: Set(game.id),
            name: Set(game.name),
            description: Set(game.description),
            image_url: Set(game.image_url),
            category_id: Set(game.category_id),
            players_min: Set(game.players_min),
            players_max: Set(game.players_max),
            note_internal: Set(game.note_internal),
            owner_id: Set(game.owner_id),
            in_stock: Set(game.in_stock),
            unavailable: Set(game.unavailable),
            visible: Set(game.visible),
            default_reservation_days: Set(game.default_reservation_days),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn held_counts(&self, game_ids: &[i32]) -> DomainResult<Vec<(i32, i64)>> {
        if game_ids.is_empty() {
            return Ok(Vec::new());
        }
        // Items in a terminal state have released their copy.
        let terminal = [
            ItemState::Returned.as_str(),
            ItemState::Cancelled.as_str(),
        ];
        let counts: Vec<(i32, i64)> = reservation_item::Entity::find()
            .select_only()
            .column(reservation_item::Column::BoardGameId)
            .column_as(reservation_item::Column::Id.count(), "held")
            .filter(reservation_item::Column::BoardGameId.is_in(game_ids.to_vec()))
            .filter(reservation_item::Column::State.is_not_in(terminal))
            .group_by(reservation_item::Column::BoardGameId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(counts)
    }
}

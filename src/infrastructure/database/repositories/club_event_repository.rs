//! SeaORM implementation of ClubEventRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set,
};

use crate::domain::club_state::ClubEventRepository;
use crate::domain::{ClubEvent, DomainError, DomainResult, NewClubEvent};
use crate::infrastructure::database::entities::club_event;

pub struct SeaOrmClubEventRepository {
    db: DatabaseConnection,
}

impl SeaOrmClubEventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn event_to_domain(m: club_event::Model) -> ClubEvent {
    ClubEvent {
        id: m.id,
        name: m.name,
        place: m.place,
        from: m.from,
        to: m.to,
        made_by_id: m.made_by_id,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {e}"))
}

#[async_trait]
impl ClubEventRepository for SeaOrmClubEventRepository {
    async fn find_all(&self) -> DomainResult<Vec<ClubEvent>> {
        let models = club_event::Entity::find()
            .order_by_asc(club_event::Column::From)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(event_to_domain).collect())
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ClubEvent>> {
        let model = club_event::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(event_to_domain))
    }

    async fn create(&self, event: NewClubEvent) -> DomainResult<ClubEvent> {
        let model = club_event::ActiveModel {
            name: Set(event.name),
            place: Set(event.place),
            from: Set(event.from),
            to: Set(event.to),
            made_by_id: Set(event.made_by_id),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(event_to_domain(inserted))
    }

    async fn update(&self, event: ClubEvent) -> DomainResult<()> {
        let model = club_event::ActiveModel {
            id: Set(event.id),
            name: Set(event.name),
            place: Set(event.place),
            from: Set(event.from),
            to: Set(event.to),
            made_by_id: Set(event.made_by_id),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        club_event::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

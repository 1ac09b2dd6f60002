//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::domain::user::{UserFilter, UserRepository};
use crate::domain::{DomainError, DomainResult, NewUser, Role, RoleAssignment, User, UserWithRoles};
use crate::infrastructure::database::entities::{role, user, user_role};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn role_id_by_name(&self, name: &str) -> DomainResult<Option<i32>> {
        let found = role::Entity::find()
            .filter(role::Column::Name.eq(name))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(found.map(|r| r.id))
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        username: m.username,
        email: m.email,
        password_hash: m.password_hash,
        nickname: m.nickname,
        is_active: m.is_active,
        created_at: m.created_at,
        last_login_at: m.last_login_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {e}"))
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_with_roles(&self, id: i32) -> DomainResult<Option<UserWithRoles>> {
        let Some(model) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let assignments = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(id))
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let roles = assignments
            .into_iter()
            .filter_map(|(link, role)| {
                let role = Role::from_str(&role?.name)?;
                Some(RoleAssignment {
                    role,
                    assigned_by_id: link.assigned_by_id,
                    assigned_at: link.assigned_at,
                })
            })
            .collect();

        Ok(Some(UserWithRoles {
            user: model_to_domain(model),
            roles,
        }))
    }

    async fn roles_of(&self, user_id: i32) -> DomainResult<Vec<Role>> {
        let assignments = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(assignments
            .into_iter()
            .filter_map(|(_, role)| Role::from_str(&role?.name))
            .collect())
    }

    async fn list(&self, filter: UserFilter) -> DomainResult<(Vec<User>, u64)> {
        let mut query = user::Entity::find().order_by_desc(user::Column::CreatedAt);

        if let Some(fragment) = &filter.name_fragment {
            query = query.filter(
                Condition::any()
                    .add(user::Column::Username.contains(fragment))
                    .add(user::Column::Nickname.contains(fragment)),
            );
        }

        let page_size = filter.page_size.max(1);
        let page = filter.page.max(1);
        let paginator = query.paginate(&self.db, u64::from(page_size));
        let total = paginator.num_items().await.map_err(db_err)?;
        let models = paginator
            .fetch_page(u64::from(page - 1))
            .await
            .map_err(db_err)?;
        Ok((models.into_iter().map(model_to_domain).collect(), total))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn create(&self, new: NewUser) -> DomainResult<User> {
        debug!(username = %new.username, "Creating user");
        let model = user::ActiveModel {
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            nickname: Set(new.nickname),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            last_login_at: Set(None),
            ..Default::default()
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(inserted))
    }

    async fn update(&self, u: User) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(u.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("User", u.id));
        }

        let model = user::ActiveModel {
            id: Set(u.id),
            username: Set(u.username),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            nickname: Set(u.nickname),
            is_active: Set(u.is_active),
            created_at: Set(u.created_at),
            last_login_at: Set(u.last_login_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn assign_role(
        &self,
        user_id: i32,
        role: Role,
        assigned_by_id: Option<i32>,
    ) -> DomainResult<()> {
        let Some(role_id) = self.role_id_by_name(role.as_str()).await? else {
            return Err(DomainError::Storage(format!(
                "Role '{role}' missing from the roles table"
            )));
        };

        let existing = user_role::Entity::find_by_id((user_id, role_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_some() {
            return Ok(());
        }

        let model = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_id),
            assigned_by_id: Set(assigned_by_id),
            assigned_at: Set(Utc::now()),
        };
        model.insert(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn revoke_role(&self, user_id: i32, role: Role) -> DomainResult<()> {
        let Some(role_id) = self.role_id_by_name(role.as_str()).await? else {
            return Ok(());
        };
        user_role::Entity::delete_by_id((user_id, role_id))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn touch_last_login(&self, user_id: i32) -> DomainResult<()> {
        user::Entity::update_many()
            .filter(user::Column::Id.eq(user_id))
            .col_expr(user::Column::LastLoginAt, Expr::value(Utc::now()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}

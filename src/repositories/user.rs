use async_trait::async_trait;
use sea_orm::{
    ActiveValue::{Set, Unchanged},
    ColumnTrait, DatabaseConnection,
};
use uuid::Uuid;

use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::{Include, Includes, ModelOf, QuerySpec, Record, Repository};

/// Users carry no loadable relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserInclude {}

impl Include for UserInclude {
    const ALL: &'static [Self] = &[];

    fn name(self) -> &'static str {
        match self {}
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            phone_number: model.phone_number,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl Record for User {
    type Entity = user::Entity;
    type ActiveModel = user::ActiveModel;
    type Key = Uuid;
    type Include = UserInclude;

    const NAME: &'static str = "User";

    fn key(&self) -> Uuid {
        self.id
    }

    fn to_insert(&self) -> user::ActiveModel {
        user::ActiveModel {
            id: Set(self.id),
            email: Set(self.email.clone()),
            password_hash: Set(self.password_hash.clone()),
            first_name: Set(self.first_name.clone()),
            last_name: Set(self.last_name.clone()),
            phone_number: Set(self.phone_number.clone()),
            role: Set(self.role),
            created_at: Set(self.created_at),
        }
    }

    fn to_update(&self) -> user::ActiveModel {
        user::ActiveModel {
            id: Unchanged(self.id),
            created_at: Unchanged(self.created_at),
            ..self.to_insert()
        }
    }

    fn validate(&self) -> AppResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation("A valid email address is required"));
        }

        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err(AppError::validation("First and last name are required"));
        }

        Ok(())
    }

    async fn load(
        _db: &DatabaseConnection,
        models: Vec<ModelOf<Self>>,
        _includes: &Includes<UserInclude>,
    ) -> AppResult<Vec<Self>> {
        Ok(models.into_iter().map(User::from).collect())
    }
}

impl Repository<User> {
    /// Account registered under `email`, if any
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.get(QuerySpec::new().filter(user::Column::Email.eq(email)))
            .await
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        let count = self
            .count(&QuerySpec::new().filter(user::Column::Email.eq(email)))
            .await?;
        Ok(count > 0)
    }
}

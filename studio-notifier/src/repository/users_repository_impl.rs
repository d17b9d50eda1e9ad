use super::{entity::UserFindEntity, Error, UsersRepository};
use axum::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::Database;
use uuid::Uuid;

const USERS: &str = "users";
const ROLE_ADMIN: &str = "admin";

pub struct UsersRepositoryImpl {
    database: Database,
}

impl UsersRepositoryImpl {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl UsersRepository for UsersRepositoryImpl {
    async fn find_admin_ids(&self) -> Result<Vec<Uuid>, Error> {
        let admin_ids = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find(doc! { "role": ROLE_ADMIN })
            .projection(doc! { "_id": 1 })
            .sort(doc! { "_id": 1 })
            .await?
            .map_ok(|user| Uuid::from(user._id))
            .try_collect()
            .await?;

        Ok(admin_ids)
    }

    async fn find_first_admin_id(&self) -> Result<Option<Uuid>, Error> {
        let admin = self
            .database
            .collection::<UserFindEntity>(USERS)
            .find_one(doc! { "role": ROLE_ADMIN })
            .projection(doc! { "_id": 1 })
            .sort(doc! { "_id": 1 })
            .await?;

        Ok(admin.map(|user| Uuid::from(user._id)))
    }
}

use bson::Uuid;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct UserFindEntity {
    pub _id: Uuid,
}

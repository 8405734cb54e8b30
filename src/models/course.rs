use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::Course;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_name = "course_id")]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Course {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            url: m.url,
            text: m.text,
        }
    }
}

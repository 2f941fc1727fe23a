use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "top_anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub top_anime_id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub top_anime_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

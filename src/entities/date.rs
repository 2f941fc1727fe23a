use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Premiere/start/end dates. Not linked to `anime` by any foreign key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "date")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub date_id: i32,
    pub date_premiere: Option<chrono::NaiveDate>,
    pub date_start: Option<chrono::NaiveDate>,
    pub date_end: Option<chrono::NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub tag_id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(50))")]
    pub tag_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_tags::Entity")]
    AnimeTags,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_tags::Relation::Anime.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_tags::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

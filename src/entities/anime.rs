use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub anime_id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(100))")]
    pub anime_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub anime_description: Option<String>,
    pub anime_image: Option<String>,
    pub anime_studio: Option<String>,
    pub number_of_episodes: Option<i32>,
    pub anime_type: Option<String>,
    pub anime_status: Option<String>,
    pub anime_rating: Option<f64>,
    pub anime_score: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::character::Entity")]
    Character,
    #[sea_orm(has_many = "super::anime_genres::Entity")]
    AnimeGenres,
    #[sea_orm(has_many = "super::anime_tags::Entity")]
    AnimeTags,
}

impl Related<super::character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Character.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_genres::Relation::Genre.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_genres::Relation::Anime.def().rev())
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_tags::Relation::Tag.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_tags::Relation::Anime.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

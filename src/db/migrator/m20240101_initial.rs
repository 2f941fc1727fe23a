use crate::entities::prelude::{
    Anime, AnimeGenres, AnimeTags, Character, Dates, Genre, Tag, TopAnime,
};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

impl Migration {
    async fn create_from_entity<E>(
        manager: &SchemaManager<'_>,
        schema: &Schema,
        entity: E,
    ) -> Result<(), DbErr>
    where
        E: EntityTrait + Copy,
    {
        manager
            .create_table(
                schema
                    .create_table_from_entity(entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        for mut index in schema.create_index_from_entity(entity) {
            manager.create_index(index.if_not_exists().to_owned()).await?;
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before the tables holding foreign keys to them.
        Self::create_from_entity(manager, &schema, Anime).await?;
        Self::create_from_entity(manager, &schema, Genre).await?;
        Self::create_from_entity(manager, &schema, Tag).await?;
        Self::create_from_entity(manager, &schema, Character).await?;
        Self::create_from_entity(manager, &schema, AnimeGenres).await?;
        Self::create_from_entity(manager, &schema, AnimeTags).await?;
        Self::create_from_entity(manager, &schema, Dates).await?;
        Self::create_from_entity(manager, &schema, TopAnime).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TopAnime).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Dates).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeTags).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeGenres).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Character).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tag).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genre).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Anime).to_owned())
            .await?;

        Ok(())
    }
}

pub use super::anime::Entity as Anime;
pub use super::anime_genres::Entity as AnimeGenres;
pub use super::anime_tags::Entity as AnimeTags;
pub use super::character::Entity as Character;
pub use super::date::Entity as Dates;
pub use super::genre::Entity as Genre;
pub use super::tag::Entity as Tag;
pub use super::top_anime::Entity as TopAnime;

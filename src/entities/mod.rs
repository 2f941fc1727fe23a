pub mod prelude;

pub mod anime;
pub mod anime_genres;
pub mod anime_tags;
pub mod character;
pub mod date;
pub mod genre;
pub mod tag;
pub mod top_anime;

pub mod anime;
pub mod character;
pub mod date;
pub mod taxonomy;
pub mod top_anime;

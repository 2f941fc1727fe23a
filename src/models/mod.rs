pub mod catalog;
pub mod media;

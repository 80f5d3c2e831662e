pub mod articles;
pub mod crawls;
pub mod sources;
pub mod views;

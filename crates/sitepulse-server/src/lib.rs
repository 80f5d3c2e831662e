pub mod app;
pub mod auth;
pub mod crawler;
pub mod error;
pub mod routes;
pub mod state;

pub mod analytics;
pub mod config;
pub mod crawler;
pub mod engine;
pub mod event;
pub mod referrer;
pub mod visitor;

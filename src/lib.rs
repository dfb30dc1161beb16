pub mod app;
pub mod config;
pub mod format;
pub mod images;
pub mod intent;
pub mod models;
pub mod render;
pub mod session;
pub mod theme;
pub mod tmdb;
pub mod views;

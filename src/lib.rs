pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;

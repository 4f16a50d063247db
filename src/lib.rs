// src/lib.rs

pub mod app;
pub mod config;
pub mod constants;
pub mod db;
pub mod errors;
pub mod fetcher;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod reconciler;
pub mod server;
pub mod theme;
pub mod ui;
pub mod utils;

pub mod catalog;
pub mod columns;
pub mod config;
pub mod database;
pub mod errors;
pub mod services;

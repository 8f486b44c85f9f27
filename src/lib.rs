pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod service;

pub mod app;
pub mod catalog;
pub mod client;
pub mod config;
pub mod energy;
pub mod errors;
pub mod food_log;
pub mod state;
pub mod storage;

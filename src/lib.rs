// src/lib.rs
pub mod types;
pub mod config;
pub mod rates;
pub mod providers;
pub mod store;
pub mod pipeline;

//! Alert relay: lists stored security alerts and relays alert conversations to a local
//! inference server - Library exports for testing
//!
//! (c) Softlandia 2025

pub mod api;
pub mod config;
pub mod core;
pub mod infrastructure;

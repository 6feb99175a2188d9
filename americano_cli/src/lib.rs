//! Terminal front-end for the americano engine.

pub mod commands;
pub mod config;
pub mod render;

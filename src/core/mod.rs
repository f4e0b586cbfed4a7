//! Core configuration and data model shared across handlers.

pub mod config;
pub mod models;

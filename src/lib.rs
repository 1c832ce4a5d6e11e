//! Multi-user item API: password registration and login exchanged for bearer
//! tokens, and owner-scoped CRUD over items.

pub mod app;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod items;
pub mod state;

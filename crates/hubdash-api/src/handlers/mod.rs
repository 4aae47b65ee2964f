//! HTTP handlers

pub mod auth;
pub mod client_error;
pub mod documentation;
pub mod health;
pub mod menu;

//! HTTP handlers for the Syndik edge service

pub mod health;
pub mod page;

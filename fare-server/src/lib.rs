//! Fare lookup server.
//!
//! Answers: "what does this journey cost with this ticket?" A journey is
//! mapped to a fare zone through origin/destination tables, then the zone
//! is priced for the chosen payment means, ticket type, period pass or
//! passenger category.

pub mod config;
pub mod domain;
pub mod fares;
pub mod resolver;
pub mod stations;
pub mod tables;
pub mod web;
pub mod zones;

//! Smart News - A Top-Headlines Aggregator
//!
//! This crate relays NewsAPI top-headline requests, ranks the returned
//! articles with a simple heuristic and renders them into an htmx page
//! with a hero story, article cards and a few random picks.

pub mod article;
pub mod clock;
pub mod config;
pub mod query;
pub mod relay;
pub mod render;
pub mod routes;
pub mod weather;

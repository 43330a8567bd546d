//! Job search proxy
//!
//! Accepts a job title and location, delegates the LinkedIn search to a
//! browser-automation service over its SSE run endpoint, and answers with
//! the extracted listings as a single JSON response.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;

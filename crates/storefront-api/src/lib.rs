//! Storefront backend — HTTP API server library.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

//! Hybrid recommendation service: collaborative, content-based and serendipity
//! scoring over a read-only interaction store, exposed through an axum API.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

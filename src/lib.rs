//! # faceit-kd
//!
//! A small HTTP service that looks up a FACEIT player by nickname and
//! answers with an aggregate kill/death summary over their recent CS2
//! matches.
//!
//! ## Architecture
//!
//! - **models**: Boundary types (player summary, elo value)
//! - **faceit**: FACEIT Data API v4 client
//! - **cache**: Short-TTL in-memory response cache with single-flight
//! - **calculate**: K/D accumulation and formatting
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod cache;
pub mod calculate;
pub mod config;
pub mod faceit;
pub mod models;

pub use models::*;

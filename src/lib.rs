//! AgriNews backend.
//!
//! HTTP API for the AgriNews platform: aggregated agriculture news, a
//! research article catalog with premium gating, a community blog with
//! moderation, and newsletter signup.

pub mod access;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod filter;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;

//! Application services.

pub mod news;

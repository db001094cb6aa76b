// src/lib.rs

//! alphacrawl: per-letter entry counts for alphabetical category listings.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

// src/lib.rs

//! Radio station curator library.
//!
//! Harvests station records from Radio Browser mirrors, merges and cleans
//! them, and publishes a curated list plus per-region subsets as JSON.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

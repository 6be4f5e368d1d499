// src/services/mod.rs

pub mod sessions;
pub mod stats;

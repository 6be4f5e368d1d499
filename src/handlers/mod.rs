// src/handlers/mod.rs

pub mod category;
pub mod session;
pub mod stats;

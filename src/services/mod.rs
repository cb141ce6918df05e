// src/services/mod.rs
pub mod clipboard;
pub mod config;
pub mod conversion;
pub mod session;

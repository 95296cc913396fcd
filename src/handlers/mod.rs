// src/handlers/mod.rs

pub mod admin;
pub mod event;
pub mod quiz;

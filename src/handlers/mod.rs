// src/handlers/mod.rs

pub mod admin;
pub mod submit;
pub mod verify;

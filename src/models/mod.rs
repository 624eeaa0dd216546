// src/models/mod.rs

pub mod activation_code;
pub mod quiz;

// src/utils/mod.rs

pub mod codegen;
pub mod token;

// src/handlers/mod.rs

pub mod exams;
pub mod questions;
pub mod results;
pub mod session;

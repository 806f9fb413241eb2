// src/models/mod.rs

pub mod account;
pub mod exam;
pub mod question;
pub mod result;

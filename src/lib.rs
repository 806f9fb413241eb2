// src/lib.rs

pub mod assembly;
pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod permissions;
pub mod review;
pub mod routes;
pub mod state;
pub mod upstream;
pub mod utils;

// Re-export specific items for convenience if needed
pub use routes::create_router;

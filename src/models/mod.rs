//! Data Models

pub mod history;
pub mod settings;

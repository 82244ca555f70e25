//! Business Logic Services

pub mod context;
pub mod history;
pub mod runner;
pub mod settings;

pub mod binder;
pub mod config;
pub mod error;

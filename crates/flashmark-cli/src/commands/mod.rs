pub mod config;
pub mod convert;

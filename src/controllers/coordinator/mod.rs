pub mod config;
pub mod coordinator;
pub mod errors;
pub mod layout;
pub mod timings;

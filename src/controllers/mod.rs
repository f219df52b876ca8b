pub mod cli;
pub mod coordinator;
pub mod ports;

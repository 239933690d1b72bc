pub mod config;
pub mod input;
pub mod output;
pub mod report;

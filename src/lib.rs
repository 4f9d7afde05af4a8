pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod retake;
pub mod scan;
pub mod scanner;
pub mod vision;

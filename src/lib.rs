pub mod cli;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod exec;
pub mod manifest;
pub mod planner;
pub mod preflight;
pub mod resolver;
pub mod runner;
pub mod ui;

pub use error::{ReleaseError, Result};

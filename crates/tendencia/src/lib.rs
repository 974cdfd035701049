#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod questions;
pub mod render;
pub mod report;
pub mod table;
pub mod utils;
pub mod warehouse;

pub use cli::app::{Cli, Command};

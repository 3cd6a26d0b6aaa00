#![forbid(unsafe_code)]

pub mod build;
pub mod check;
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod formats;
pub mod logging;
pub mod mount;
pub mod page;
pub mod render;
pub mod sort;
pub mod validate;
pub mod view;

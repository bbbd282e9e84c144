//! Finds discussions about a URL on Reddit, Hacker News and Slashdot and
//! merges them into one ranked report.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod sources;
pub mod storage;

//! tmsearch - trademark registry search scraper.
//!
//! Core library exposing the search pipeline, record model and storage
//! sinks to the binary and to integration tests.

pub mod cli;
pub mod config;
pub mod models;
pub mod scrapers;
pub mod storage;

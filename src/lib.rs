//! deckup - Anki deck uploader
//!
//! This crate provides the core functionality for the `deckup` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Store endpoint and credential resolution
//! - [`import`] - Export parsing, normalization, batching and the import flow
//! - [`model`] - Data types (Deck, Card)
//! - [`store`] - Store trait and PostgREST client
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod import;
pub mod model;
pub mod store;

pub use error::{Error, Result};

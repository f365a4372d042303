//! Crew Lounge Core - Shared types library.
//!
//! This crate provides the types used across all Crew Lounge components:
//! - `client` - HTTP client, domain services and the session core
//! - `cli` - Command-line front end for the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure rules - no I/O, no HTTP
//! clients, no credential storage. Authorization decisions that depend only
//! on a [`User`] (approval, listing rights) live here so every consumer
//! derives them the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, emails, tokens, statuses and resource models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

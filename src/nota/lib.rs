//! # Nota Architecture
//!
//! Nota is a **UI-agnostic client library** for a block-based page API.
//! This is not a CLI application that happens to have some library
//! code—it's a library that happens to have a CLI client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, prints output, owns exit codes         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, returns structured results    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands + Renderer (commands/, render/)                   │
//! │  - Pure logic over the data model, no I/O assumptions       │
//! │  - render/ is the core: the recursive block-tree serializer │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend Layer (client/)                                    │
//! │  - Abstract NotionBackend trait                             │
//! │  - HttpBackend (production), InMemoryBackend (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key principle: no I/O in the core
//!
//! From `api.rs` inward, code takes plain arguments, returns plain
//! `Result` values, and never touches stdout or the process exit code.
//! The renderer produces strings into caller buffers, so partial output
//! can be flushed by the CLI even when a render fails halfway.
//!
//! ## Module overview
//!
//! - [`api`]: the facade—entry point for all operations
//! - [`render`]: block-tree renderer and rich-text decoration
//! - [`commands`]: page and stack command logic
//! - [`client`]: backend trait, HTTP and in-memory implementations
//! - [`model`]: blocks, rich text, pages (serde data model)
//! - [`config`]: local configuration/secret store
//! - [`error`]: error types

pub mod api;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod render;

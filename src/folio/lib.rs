//! # Folio Architecture
//!
//! Folio is the back office for the notes section of a static portfolio
//! site. The site ships a bundled `notes.json`; folio lets its owner edit that
//! dataset locally, preview the result, prerender link-preview pages and
//! publish the merged dataset back to the site's repository.
//!
//! Like any UI-agnostic library, the CLI is just one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves configured paths against the site root          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user operation, returns CmdResult         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Notes (notes.rs, overlay.rs, dataset.rs)                   │
//! │  - Merges the static dataset with the user's overlay        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - OverlayStore trait                                       │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Side collaborators hang off the command layer: [`content`] fetches note
//! bodies, [`prerender`] writes per-note HTML and [`sync`] commits to GitHub.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`notes`]: The merge engine ([`notes::NoteService`])
//! - [`overlay`]: Per-id edit/deletion state
//! - [`dataset`]: The bundled static dataset
//! - [`store`]: Overlay persistence
//! - [`model`]: `RawNote`, `Note`, `NoteContent`, `Lang`
//! - [`slug`]: Slug derivation
//! - [`content`]: Content sources (HTTP, directory)
//! - [`prerender`]: Link-preview HTML
//! - [`sync`]: GitHub Git data API client
//! - [`config`]: Configuration
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod dataset;
pub mod error;
pub mod model;
pub mod notes;
pub mod overlay;
pub mod prerender;
pub mod slug;
pub mod store;
pub mod sync;

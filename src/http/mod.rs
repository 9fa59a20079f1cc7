//! HTTP server module.
//!
//! This module exposes the attendance core as a REST API via axum. It
//! reuses the service layer and the repository port; handlers parse
//! requests, extract the caller identity, and translate service error
//! kinds to status codes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Request parsing and validation                         │
//! │  - Caller identity extraction (x-uid header)              │
//! │  - JSON serialization, CORS, error mapping                │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services/)                                │
//! │  - Punch lifecycle, metrics, summaries, reports           │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                   │
//! │  - Data persistence behind the port traits                │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod auth;

pub mod dto;

pub mod error;

pub mod handlers;

pub mod router;

pub mod state;

pub use router::create_router;

pub use state::AppState;

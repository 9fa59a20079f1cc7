//! # HCM Rust Backend
//!
//! Attendance and time-tracking engine for a single organization.
//!
//! Employees punch in and out; the system records each punch pair, computes
//! per-pair labor metrics (regular hours, overtime, night differential,
//! tardiness, undertime) in a fixed-offset local zone, and aggregates them
//! into per-day and per-week summaries consumed as payroll-grade reports.
//! The backend exposes a REST API via Axum.
//!
//! ## Features
//!
//! - **Punch lifecycle**: open, close, and void attendance records with a
//!   single-open-punch invariant per user
//! - **Metrics engine**: pure interval partitioning of a punch pair against
//!   the user's schedule window, with day capping at local midnight
//! - **Daily rollups**: incremental upserts on close, authoritative
//!   rebuilds after admin mutations
//! - **Reporting**: per-user weekly summaries and all-employee daily and
//!   weekly reports
//! - **HTTP API**: RESTful endpoints behind an upstream auth gateway
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`models`]: Domain types and local-zone time arithmetic
//! - [`db`]: Persistence port, repository pattern, and in-memory backend
//! - [`services`]: Business logic: metrics, punches, summaries, reports
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`config`]: Server configuration loading

pub mod config;

pub mod db;
pub mod models;

pub mod services;

pub mod http;

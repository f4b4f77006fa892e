//! # Vitrine Architecture
//!
//! Vitrine is a **UI-agnostic storefront library** for a jewelry shop. The part that
//! matters most is the catalog filter/sort engine: given an immutable product
//! collection and a set of user-selected constraints, produce the ordered view a
//! listing page renders. Everything else (cart totals, login flow, pagination,
//! search) is the thin state a host page layers around that engine.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host (the `vitrine` CLI, a web page, a test)               │
//! │  - Owns a FilterView or calls the API facade                │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - browse / search / options / quote                        │
//! │  - Degrades failed catalog loads to an empty listing        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (filters/, pipeline.rs)                             │
//! │  - Pure predicate + ordering over borrowed products         │
//! │  - Never fails, never blocks                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Catalog Layer (catalog/)                                   │
//! │  - Abstract CatalogStore trait                              │
//! │  - FileCatalog (production), InMemoryCatalog (testing)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`model`]: The read-only [`model::Product`] record and its lenient loader
//! - [`filters`]: Filter state, options, predicate, sort keys, active-filter summary
//! - [`pipeline`]: [`pipeline::run`] and the memoized [`pipeline::FilterView`]
//! - [`catalog`]: Loading products into an immutable [`catalog::Catalog`]
//! - [`paging`]: Splitting an ordered listing into pages
//! - [`cart`]: Cart lines and totals
//! - [`auth`]: OTP login state machine
//! - [`commands`], [`api`]: The command layer and its facade
//! - [`config`], [`init`]: Configuration and context wiring

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod init;
pub mod model;
pub mod paging;
pub mod pipeline;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

//! # drivebox Architecture
//!
//! drivebox is a **UI-agnostic file/folder organizer core**. It owns a flat
//! collection of items, interprets parent links as a tree, and guards every
//! structural mutation so the tree stays well formed. Everything a user sees
//! (dialogs, icons, toasts, drag styling) lives in a presentation layer that
//! calls into this crate and renders its query results.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (not in this crate)                           │
//! │  - Dialogs, sidebars, pickers, notifications                │
//! │  - Calls DriveApi, re-derives views after each mutation     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Facade (api.rs)                                        │
//! │  - Thin dispatch over ops and query                         │
//! │  - The single handle a presentation layer needs             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Operations (ops/*.rs)                                      │
//! │  - Multi-item flows: bulk move/copy/delete, sharing,        │
//! │    file-batch and folder-structure ingestion                │
//! │  - Pre-validates a whole batch before applying anything     │
//! └─────────────────────────────────────────────────────────────┘
//!                │                              │
//!                ▼                              ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Item Store (store/)         │  │  Tree Queries (query/)   │
//! │  - The only mutation surface │  │  - Pure functions over   │
//! │  - Referential integrity,    │  │    store snapshots       │
//! │    cycle prevention, cascade │  │  - Trees, breadcrumbs,   │
//! │    delete, deep copy         │  │    listings, sorting     │
//! └──────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! The dependency rule: the store never calls the query layer, and the query
//! layer never mutates. Queries consume a [`store::Snapshot`] that borrows the
//! store, so results cannot outlive the state they were derived from.
//!
//! ## Concurrency Model
//!
//! Single-threaded and caller-driven. Every operation runs to completion
//! before the next one starts; the caller serializes mutations. There is no
//! locking because there is exactly one logical mutator.
//!
//! ## Module Overview
//!
//! - [`api`]: The `DriveApi` facade, entry point for presentation layers
//! - [`ops`]: Multi-item operations composed from store primitives
//! - [`store`]: The item store and its injectable id/clock seams
//! - [`query`]: Snapshot-based tree, listing, and breadcrumb derivation
//! - [`model`]: Core data types (`Item`, `ItemKind`, `NewItem`, ...)
//! - [`error`]: Error types

pub mod api;
pub mod error;
pub mod model;
pub mod ops;
pub mod query;
pub mod store;

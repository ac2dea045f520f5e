//! # Spatial Navigation Core
//!
//! Directional focus navigation for a page this crate does not own.
//! It knows nothing about any specific host or UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • geometry (filter)    │
//!                    │  • registry (live set)  │
//!                    │  • selector (direction) │
//!                    │  • focus (state)        │
//!                    │  • input (key map)      │
//!                    └───────────┬─────────────┘
//!                                │ Host trait
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │  In-memory │      │  Browser   │      │   Tests    │
//!     │   Page     │      │  binding   │      │  TestHost  │
//!     │  (page/)   │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`geometry`]: `Rect`, `NavigableElement` and the eligibility filter
//! - [`registry`]: decoration, overlay provisioning, snapshots
//! - [`selector`]: `Direction` and the directional pick
//! - [`focus`]: `FocusState` and its transitions
//! - [`input`]: raw key → `Command`
//! - [`engine`]: ties the above to one host
//! - [`bootstrap`]: readiness polling and first focus
//! - [`config`]: layered settings

pub mod bootstrap;
pub mod config;
pub mod engine;
pub mod focus;
pub mod geometry;
pub mod host;
pub mod input;
pub mod registry;
pub mod selector;

pub use engine::{Engine, EngineOptions};
pub use focus::{FocusState, MoveOutcome};
pub use geometry::{NavigableElement, Rect};
pub use host::Host;
pub use input::{Command, KeyEvent, KeyMap, KeyOutcome};
pub use selector::Direction;

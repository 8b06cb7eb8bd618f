//! Subtile (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so binaries, integration
//! tests and benches can use `subtile::{core, engine, term, adapter, types}`.
//! The implementation lives in dedicated crates under `crates/`.

pub use subtile_adapter as adapter;
pub use subtile_core as core;
pub use subtile_engine as engine;
pub use subtile_term as term;
pub use subtile_types as types;

pub mod logging;
pub mod scene;

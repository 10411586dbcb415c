//! Explicit configuration for vault scanning and rename propagation.
//!
//! Nothing in the core reads ambient process state: the loader produces a
//! [`types::ResolvedConfig`] and callers pass it (or pieces of it) into the
//! scanner and orchestrator.

pub mod loader;
pub mod types;

//! ovbind runtime: an in-process native layer for the bindings.
//!
//! Wires the config loader, the handle registry, and the counters into
//! [`engine::SimEngine`], which implements `ovbind_core::NativeApi`. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod config;
pub mod engine;
pub mod obs;
pub mod registry;

pub use engine::SimEngine;

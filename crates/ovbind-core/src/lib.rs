//! ovbind core: typed native handles, the native seam, and the owning wrappers.
//!
//! Every wrapper here is a handle plus delegation. The real work happens behind
//! [`native::NativeApi`], which speaks only in address-sized integers. This
//! crate adds the type information those integers lack and ties each handle's
//! release to the lifetime of exactly one owner.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths surface as `OvError`/`Result`; nothing is retried or
//! rewritten on the way back from the native layer.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod handle;
pub mod ie_core;
pub mod native;
pub mod network;
pub mod object;
pub mod parameter;
pub mod request;

/// Shared result type.
pub use error::{OvError, Result, StatusCode};
pub use handle::{Handle, NativeAddr, ObjectKind};
pub use ie_core::Core;
pub use native::NativeApi;
pub use network::ExecutableNetwork;
pub use object::{NativeObject, NativeWrapper};
pub use parameter::{ParamValue, Parameter};
pub use request::InferRequest;

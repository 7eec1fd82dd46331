//! Top-level facade crate for ovbind.
//!
//! Re-exports the binding types and the in-process runtime so users can depend on a single crate.

pub mod core {
    pub use ovbind_core::*;
}

pub mod runtime {
    pub use ovbind_runtime::*;
}

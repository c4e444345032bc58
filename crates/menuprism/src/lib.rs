//! Top-level facade crate for menuPrism.
//!
//! Re-exports the record model and the session engine so hosts can depend on a single crate.

pub mod core {
    pub use menuprism_core::*;
}

pub mod engine {
    pub use menuprism_engine::*;
}

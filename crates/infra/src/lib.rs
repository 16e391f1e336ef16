//! Infrastructure layer: store implementations and startup data.
//!
//! Real persistence is out of scope; the in-memory stores back both the dev
//! server and the test suites through the same trait seams.

pub mod memory;
pub mod seed;

pub use memory::{InMemoryBookStore, InMemoryPrincipalStore};
pub use seed::seed_demo_data;

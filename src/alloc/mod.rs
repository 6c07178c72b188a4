//! Allocation for pointer graphs.
//!
//! Graph nodes reference each other with plain `&'arena` references, so they
//! need storage whose elements never move and live exactly as long as the
//! storage itself.

pub mod node_arena;

pub use node_arena::NodeArena;

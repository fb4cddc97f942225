//! Record storage behind an explicit repository interface.
//!
//! The storage backend is injected at construction; nothing in the
//! pipeline reaches for ambient global state. The metrics layer stays
//! decoupled from this interface entirely — it consumes plain slices,
//! whatever their origin.

pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::Repository;

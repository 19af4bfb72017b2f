//! `medstock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod medicine;

pub use error::DomainError;
pub use medicine::{Medicine, MedicineId};

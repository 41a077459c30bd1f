pub mod aethelgard;

pub use aethelgard::{AethelgardContext, AethelgardProvider};

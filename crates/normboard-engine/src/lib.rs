//! # normboard-engine
//!
//! The synchronization core of the normative board.
//!
//! - [`store`]: the ground fact base
//! - [`registry`]: dynamic fact providers, consulted first-relevant-wins
//! - [`providers`]: built-in provider implementations
//! - [`interpreter`]: drives verification passes over the loaded program

pub mod interpreter;
pub mod providers;
pub mod registry;
pub mod store;

pub use interpreter::NormInterpreter;
pub use providers::StaticFactProvider;
pub use registry::ProviderRegistry;
pub use store::FactStore;

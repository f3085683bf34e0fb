//! Signal storage - the validated entity universe.
//!
//! Built once from a [`Dataset`](crate::config::Dataset); read-only afterwards.

mod signal_store;

pub use signal_store::SignalStore;

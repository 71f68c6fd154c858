mod ensemble;
mod sinks;
mod sources;

pub use ensemble::*;
pub use sinks::*;
pub use sources::*;

#[cfg(test)]
mod ensemble_tests;

pub mod constants;
pub mod errors;
pub mod math_helpers;

pub use constants::*;
pub use errors::SimulationError;
pub use math_helpers::*;

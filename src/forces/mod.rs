mod force;
mod radiation_pressure;

pub use force::*;
pub use radiation_pressure::*;

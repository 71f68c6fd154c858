mod coulomb_force;

pub use coulomb_force::*;

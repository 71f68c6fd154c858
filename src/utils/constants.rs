//! Physical constants in SI units (2018 CODATA).

/// Coulomb constant, N m^2 / C^2.
pub const COULOMB_CONSTANT: f64 = 8.987_551_792_3e9;

/// Elementary charge, C.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Atomic mass unit, kg.
pub const ATOMIC_MASS_UNIT: f64 = 1.660_539_066_60e-27;

/// Reduced Planck constant, J s.
pub const HBAR: f64 = 1.054_571_817e-34;

/// Boltzmann constant, J / K.
pub const BOLTZMANN_CONSTANT: f64 = 1.380_649e-23;

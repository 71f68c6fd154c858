use crate::coulomb::{coulomb_force, coulomb_force_per_particle_charges};
use crate::ensemble::Ensemble;
use crate::utils::{SimulationError, COULOMB_CONSTANT};

/// A force acting on an ensemble of particles.
///
/// Implementations add the force integrated over `dt` (an impulse) into `f`,
/// which has the same interleaved three-components-per-particle layout as
/// the ensemble buffers. The integrator zeroes `f` once per step and then
/// lets every force accumulate into it.
pub trait Force {
    /// Adds this force's contribution over the interval `dt` into `f`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ensemble lacks a property the force needs or
    /// if `f` does not match the ensemble size.
    fn force(&mut self, dt: f64, ensemble: &Ensemble, f: &mut [f64]) -> Result<(), SimulationError>;
}

/// The mutual electrostatic interaction of all charged particles in an
/// ensemble.
///
/// The charge is taken from the ensemble: an ensemble-wide `"charge"`
/// property selects the cache-blocked uniform-charge kernel, a per-particle
/// `"charge"` property the direct per-pair kernel.
///
/// # Examples
///
/// ```
/// use rs_coulomb::ensemble::Ensemble;
/// use rs_coulomb::forces::{CoulombForce, Force};
///
/// let mut ensemble = Ensemble::new(2);
/// ensemble.positions[3] = 1.0e-6;
/// ensemble.set_ensemble_property("charge", 1.602e-19);
///
/// let mut coulomb = CoulombForce::new(1e-20);
/// let mut f = vec![0.0; 6];
/// coulomb.force(1e-9, &ensemble, &mut f).unwrap();
/// assert!(f[0] < 0.0 && f[3] > 0.0, "Like charges repel");
/// ```
pub struct CoulombForce {
    /// Coulomb constant in the unit system of the ensemble.
    pub k: f64,
    /// Softening term added to squared distances; must be positive so that
    /// self-interaction terms stay finite.
    pub delta: f64,
}

impl CoulombForce {
    /// A Coulomb force in SI units with softening `delta`.
    pub fn new(delta: f64) -> Self {
        CoulombForce {
            k: COULOMB_CONSTANT,
            delta,
        }
    }

    /// A Coulomb force with an explicit force constant, for scaled or
    /// dimensionless unit systems.
    pub fn with_constant(k: f64, delta: f64) -> Self {
        CoulombForce { k, delta }
    }
}

impl Force for CoulombForce {
    fn force(&mut self, dt: f64, ensemble: &Ensemble, f: &mut [f64]) -> Result<(), SimulationError> {
        if f.len() != ensemble.positions.len() {
            return Err(SimulationError::PropertySizeMismatch {
                expected: ensemble.positions.len(),
                actual: f.len(),
            });
        }

        if let Some(charge) = ensemble.ensemble_property("charge") {
            coulomb_force(&ensemble.positions, charge, dt, self.delta, self.k, f);
        } else if let Some(charges) = ensemble.particle_property("charge") {
            coulomb_force_per_particle_charges(&ensemble.positions, charges, dt, self.delta, self.k, f);
        } else {
            return Err(SimulationError::MissingProperty("charge"));
        }
        Ok(())
    }
}

use std::f64::consts::PI;

use rand_distr::{Distribution, Normal};

use crate::ensemble::Ensemble;
use crate::forces::Force;
use crate::utils::{dot_product, vector_magnitude, SimulationError};

/// The intensity of a laser field, in units of the saturation intensity, as
/// a function of particle position.
pub trait Intensity {
    /// Writes the intensity at each particle position into `out`.
    fn intensities(&self, positions: &[f64], out: &mut [f64]);
}

/// A spatially uniform intensity.
pub struct UniformIntensity(pub f64);

impl Intensity for UniformIntensity {
    fn intensities(&self, _positions: &[f64], out: &mut [f64]) {
        out.fill(self.0);
    }
}

/// The detuning of the atomic transition from the laser, as a function of
/// particle position and velocity. Red detuning is negative, blue positive.
pub trait Detuning {
    /// Writes the detuning seen by each particle into `out`.
    fn detunings(&self, positions: &[f64], velocities: &[f64], out: &mut [f64]);
}

/// A constant laser detuning Doppler-shifted by the particle velocity,
/// `delta - k . v`.
pub struct DopplerDetuning {
    /// Bare detuning of the laser from the atomic transition.
    pub detuning: f64,
    /// Wavevector of the laser field.
    pub wavevector: [f64; 3],
}

impl Detuning for DopplerDetuning {
    fn detunings(&self, _positions: &[f64], velocities: &[f64], out: &mut [f64]) {
        for (i, d) in out.iter_mut().enumerate() {
            let v = [velocities[3 * i], velocities[3 * i + 1], velocities[3 * i + 2]];
            *d = self.detuning - dot_product(&self.wavevector, &v);
        }
    }
}

/// The force experienced by two-level atoms undergoing resonance
/// fluorescence in a monochromatic laser field.
///
/// Both the deterministic scattering force and the fluctuating photon-recoil
/// component are applied. Spatial variation of the laser intensity and of
/// the detuning (e.g. Zeeman shifts or Doppler shifts) are delegated to the
/// [`Intensity`] and [`Detuning`] implementations; the wavevector itself is
/// taken as constant, so optically thick samples are out of reach. The main
/// application is Doppler cooling with pairs of counter-propagating
/// red-detuned beams.
pub struct RadiationPressure<I, D> {
    /// Atomic decay rate (2 pi / excited state lifetime).
    pub gamma: f64,
    /// Single photon recoil momentum.
    pub hbar_k: [f64; 3],
    /// Laser intensity in saturation units.
    pub intensity: I,
    /// Detuning of the transition from the laser.
    pub detuning: D,
}

impl<I: Intensity, D: Detuning> Force for RadiationPressure<I, D> {
    fn force(&mut self, dt: f64, ensemble: &Ensemble, f: &mut [f64]) -> Result<(), SimulationError> {
        if f.len() != ensemble.positions.len() {
            return Err(SimulationError::PropertySizeMismatch {
                expected: ensemble.positions.len(),
                actual: f.len(),
            });
        }

        let num_ptcls = ensemble.num_ptcls();
        let mut s_of_r = vec![0.0; num_ptcls];
        let mut deltas = vec![0.0; num_ptcls];
        self.intensity.intensities(&ensemble.positions, &mut s_of_r);
        self.detuning.detunings(&ensemble.positions, &ensemble.velocities, &mut deltas);

        let half_gamma = self.gamma / 2.0;
        let recoil_momentum = vector_magnitude(&self.hbar_k);
        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| SimulationError::CalculationError(e.to_string()))?;
        let mut rng = rand::rng();

        for i in 0..num_ptcls {
            // Expected number of scattered photons over dt.
            let s = s_of_r[i];
            let nbar = dt * s * (self.gamma / (2.0 * PI)) * half_gamma * half_gamma
                / (half_gamma * half_gamma * (1.0 + 2.0 * s) + deltas[i] * deltas[i]);

            // Recoil modelled as a random walk in 3D momentum space with
            // nbar steps of length hbar k.
            let sigma = (nbar / 3.0).sqrt() * recoil_momentum;
            for m in 0..3 {
                f[3 * i + m] += nbar * self.hbar_k[m] + sigma * normal.sample(&mut rng);
            }
        }
        Ok(())
    }
}

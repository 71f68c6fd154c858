use std::collections::HashMap;

use log::debug;

use crate::utils::SimulationError;

/// An ensemble of particles.
///
/// All ensembles have particle positions and velocities, stored as
/// structure-of-arrays buffers with three interleaved components per
/// particle, the layout the Coulomb kernel consumes directly. In addition,
/// an ensemble may define ensemble-wide properties (one scalar shared by all
/// particles, e.g. a common `"charge"` or `"mass"`) and per-particle
/// properties (one scalar per particle).
#[derive(Debug, Clone, Default)]
pub struct Ensemble {
    /// Particle positions, `3 * num_ptcls` values.
    pub positions: Vec<f64>,
    /// Particle velocities, `3 * num_ptcls` values.
    pub velocities: Vec<f64>,
    ensemble_properties: HashMap<String, f64>,
    particle_properties: HashMap<String, Vec<f64>>,
}

impl Ensemble {
    /// Creates an ensemble of `num_ptcls` particles at rest at the origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_coulomb::ensemble::Ensemble;
    ///
    /// let ensemble = Ensemble::new(100);
    /// assert_eq!(ensemble.num_ptcls(), 100);
    /// assert_eq!(ensemble.positions.len(), 300);
    /// ```
    pub fn new(num_ptcls: usize) -> Self {
        Ensemble {
            positions: vec![0.0; 3 * num_ptcls],
            velocities: vec![0.0; 3 * num_ptcls],
            ensemble_properties: HashMap::new(),
            particle_properties: HashMap::new(),
        }
    }

    /// The number of particles in the ensemble.
    pub fn num_ptcls(&self) -> usize {
        self.positions.len() / 3
    }

    /// Sets a property shared by every particle in the ensemble.
    pub fn set_ensemble_property(&mut self, key: &str, value: f64) {
        self.ensemble_properties.insert(key.to_string(), value);
    }

    /// An ensemble-wide property, if defined.
    pub fn ensemble_property(&self, key: &str) -> Option<f64> {
        self.ensemble_properties.get(key).copied()
    }

    /// Sets a per-particle property. We store a copy of `values`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::PropertySizeMismatch`] if the length of
    /// `values` does not match the current number of particles.
    pub fn set_particle_property(&mut self, key: &str, values: &[f64]) -> Result<(), SimulationError> {
        if values.len() != self.num_ptcls() {
            return Err(SimulationError::PropertySizeMismatch {
                expected: self.num_ptcls(),
                actual: values.len(),
            });
        }
        self.particle_properties.insert(key.to_string(), values.to_vec());
        Ok(())
    }

    /// A per-particle property, if defined.
    pub fn particle_property(&self, key: &str) -> Option<&[f64]> {
        self.particle_properties.get(key).map(|v| v.as_slice())
    }

    /// Grows or shrinks the ensemble to `new_size` particles.
    ///
    /// New particles start at rest at the origin with zero-valued particle
    /// properties; ensemble-wide properties are unaffected.
    pub fn resize(&mut self, new_size: usize) {
        self.positions.resize(3 * new_size, 0.0);
        self.velocities.resize(3 * new_size, 0.0);
        for values in self.particle_properties.values_mut() {
            values.resize(new_size, 0.0);
        }
    }

    /// Deletes a subset of particles in place.
    ///
    /// `indices` may be unsorted and contain duplicates; out-of-range
    /// entries are ignored.
    pub fn delete(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let num_ptcls = self.num_ptcls();
        let mut remove = vec![false; num_ptcls];
        for &i in indices {
            if i < num_ptcls {
                remove[i] = true;
            }
        }

        let mut kept = 0;
        for i in 0..num_ptcls {
            if remove[i] {
                continue;
            }
            if kept != i {
                for m in 0..3 {
                    self.positions[3 * kept + m] = self.positions[3 * i + m];
                    self.velocities[3 * kept + m] = self.velocities[3 * i + m];
                }
                for values in self.particle_properties.values_mut() {
                    values[kept] = values[i];
                }
            }
            kept += 1;
        }

        debug!("deleting {} of {} particles", num_ptcls - kept, num_ptcls);
        self.resize(kept);
    }
}

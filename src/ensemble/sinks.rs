use log::debug;

use crate::ensemble::Ensemble;
use crate::utils::dot_product;

/// A particle sink.
///
/// Conceptually, sinks are surfaces that remove particles from an ensemble
/// when their straight-line trajectory hits the surface during a time step.
pub trait Sink {
    /// Writes into `taus` the time at which each particle, starting at its
    /// current position and moving with its current velocity, reaches the
    /// sink surface. Particles that do not reach the sink within `dt` must
    /// be given an absorption time greater than `dt`.
    fn find_absorption_time(&self, positions: &[f64], velocities: &[f64], dt: f64, taus: &mut [f64]);

    /// Called with the particles about to be absorbed, before they are
    /// removed from the ensemble.
    fn record_absorption(
        &mut self,
        _ensemble: &Ensemble,
        _dt: f64,
        _absorption_times: &[f64],
        _absorption_indices: &[usize],
    ) {
    }
}

/// A sink that absorbs particles crossing a plane.
pub struct SinkPlane {
    /// A point in the plane.
    pub point: [f64; 3],
    /// A normal to the plane.
    pub normal: [f64; 3],
}

impl Sink for SinkPlane {
    fn find_absorption_time(&self, positions: &[f64], velocities: &[f64], dt: f64, taus: &mut [f64]) {
        for (i, tau) in taus.iter_mut().enumerate() {
            let x = [positions[3 * i], positions[3 * i + 1], positions[3 * i + 2]];
            let v = [velocities[3 * i], velocities[3 * i + 1], velocities[3 * i + 2]];
            let normal_velocity = dot_product(&self.normal, &v);
            if normal_velocity == 0.0 {
                *tau = 2.0 * dt;
            } else {
                let to_plane = [
                    self.point[0] - x[0],
                    self.point[1] - x[1],
                    self.point[2] - x[2],
                ];
                *tau = dot_product(&self.normal, &to_plane) / normal_velocity;
            }
        }
    }
}

/// Removes from `ensemble` every particle a sink absorbs within `dt`.
pub fn process_sink(dt: f64, ensemble: &mut Ensemble, sink: &mut dyn Sink) {
    let mut taus = vec![0.0; ensemble.num_ptcls()];
    sink.find_absorption_time(&ensemble.positions, &ensemble.velocities, dt, &mut taus);

    let absorbed: Vec<usize> = taus
        .iter()
        .enumerate()
        .filter(|(_, &tau)| (tau - 0.5 * dt).abs() <= 0.5 * dt)
        .map(|(i, _)| i)
        .collect();
    if absorbed.is_empty() {
        return;
    }

    debug!("sink absorbs {} particles", absorbed.len());
    sink.record_absorption(ensemble, dt, &taus, &absorbed);
    ensemble.delete(&absorbed);
}

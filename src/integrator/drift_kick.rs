use rayon::prelude::*;

use crate::ensemble::{process_sink, Ensemble, Sink};
use crate::forces::Force;
use crate::utils::SimulationError;

/// Drift-Kick-Drift push of an ensemble over one time step.
///
/// The particles drift for half a step, receive the impulse accumulated from
/// all `forces` (each force adds its contribution integrated over the full
/// `dt`), and drift for the second half step. With no forces the push
/// reduces to a single full drift. A sink, when given, absorbs particles
/// over the half intervals so that trajectories cannot tunnel through it.
///
/// To convert impulses into velocity changes the ensemble must define a
/// `"mass"` property, either ensemble-wide or per particle.
///
/// # Examples
///
/// ```
/// use rs_coulomb::ensemble::Ensemble;
/// use rs_coulomb::integrator::drift_kick;
///
/// let mut ensemble = Ensemble::new(1);
/// ensemble.velocities[0] = 2.0;
/// drift_kick(0.5, &mut ensemble, &mut [], None).unwrap();
/// assert!((ensemble.positions[0] - 1.0).abs() < 1e-12);
/// ```
pub fn drift_kick(
    dt: f64,
    ensemble: &mut Ensemble,
    forces: &mut [&mut dyn Force],
    mut sink: Option<&mut dyn Sink>,
) -> Result<(), SimulationError> {
    if forces.is_empty() {
        if let Some(sink) = sink.as_deref_mut() {
            process_sink(dt, ensemble, sink);
        }
        drift(ensemble, dt);
        return Ok(());
    }

    if let Some(sink) = sink.as_deref_mut() {
        process_sink(0.5 * dt, ensemble, sink);
    }
    drift(ensemble, 0.5 * dt);

    let mut f = vec![0.0; ensemble.velocities.len()];
    for force in forces.iter_mut() {
        force.force(dt, ensemble, &mut f)?;
    }
    kick(ensemble, &f)?;

    if let Some(sink) = sink.as_deref_mut() {
        process_sink(0.5 * dt, ensemble, sink);
    }
    drift(ensemble, 0.5 * dt);
    Ok(())
}

/// Advances positions by `dt` times the velocities.
fn drift(ensemble: &mut Ensemble, dt: f64) {
    ensemble
        .positions
        .par_iter_mut()
        .zip(ensemble.velocities.par_iter())
        .for_each(|(x, v)| *x += dt * v);
}

/// Applies the accumulated impulses, `v += f / m`.
fn kick(ensemble: &mut Ensemble, f: &[f64]) -> Result<(), SimulationError> {
    if let Some(mass) = ensemble.ensemble_property("mass") {
        ensemble
            .velocities
            .par_iter_mut()
            .zip(f.par_iter())
            .for_each(|(v, fi)| *v += fi / mass);
        return Ok(());
    }

    if let Some(masses) = ensemble.particle_property("mass") {
        let masses = masses.to_vec();
        ensemble
            .velocities
            .par_chunks_mut(3)
            .zip(masses.par_iter())
            .zip(f.par_chunks(3))
            .for_each(|((v, &mass), fi)| {
                for m in 0..3 {
                    v[m] += fi[m] / mass;
                }
            });
        return Ok(());
    }

    Err(SimulationError::MissingMass)
}

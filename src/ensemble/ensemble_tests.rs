// src/ensemble/ensemble_tests.rs

use crate::assert_float_eq;
use crate::ensemble::{process_sink, produce_ptcls, Ensemble, Sink, SinkPlane, Source};
use crate::utils::SimulationError;

#[test]
fn test_new_ensemble_is_at_rest() {
    let ensemble = Ensemble::new(5);
    assert_eq!(ensemble.num_ptcls(), 5);
    assert_eq!(ensemble.positions.len(), 15);
    assert_eq!(ensemble.velocities.len(), 15);
    assert!(ensemble.positions.iter().all(|&x| x == 0.0));
    assert!(ensemble.velocities.iter().all(|&v| v == 0.0));
}

#[test]
fn test_ensemble_properties() {
    let mut ensemble = Ensemble::new(3);
    assert_eq!(ensemble.ensemble_property("charge"), None);

    ensemble.set_ensemble_property("charge", 1.5);
    ensemble.set_ensemble_property("mass", 2.0);
    assert_eq!(ensemble.ensemble_property("charge"), Some(1.5));
    assert_eq!(ensemble.ensemble_property("mass"), Some(2.0));
}

#[test]
fn test_particle_property_size_validation() {
    let mut ensemble = Ensemble::new(3);
    match ensemble.set_particle_property("charge", &[1.0, 2.0]) {
        Err(SimulationError::PropertySizeMismatch { expected, actual }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("Expected PropertySizeMismatch, got {:?}", other),
    }

    ensemble.set_particle_property("charge", &[1.0, 2.0, 3.0]).unwrap();
    assert_eq!(ensemble.particle_property("charge"), Some([1.0, 2.0, 3.0].as_slice()));
}

#[test]
fn test_resize_preserves_and_zero_fills() {
    let mut ensemble = Ensemble::new(2);
    ensemble.positions[0] = 1.0;
    ensemble.set_particle_property("charge", &[0.5, -0.5]).unwrap();

    ensemble.resize(4);
    assert_eq!(ensemble.num_ptcls(), 4);
    assert_float_eq(ensemble.positions[0], 1.0, 1e-15, None);
    assert_eq!(ensemble.particle_property("charge"), Some([0.5, -0.5, 0.0, 0.0].as_slice()));

    ensemble.resize(1);
    assert_eq!(ensemble.num_ptcls(), 1);
    assert_eq!(ensemble.particle_property("charge"), Some([0.5].as_slice()));
}

#[test]
fn test_delete_compacts_all_buffers() {
    let mut ensemble = Ensemble::new(4);
    for i in 0..4 {
        ensemble.positions[3 * i] = i as f64;
        ensemble.velocities[3 * i + 1] = 10.0 * i as f64;
    }
    ensemble.set_particle_property("charge", &[0.0, 1.0, 2.0, 3.0]).unwrap();

    // Unsorted, with a duplicate and an out-of-range index.
    ensemble.delete(&[2, 0, 2, 9]);

    assert_eq!(ensemble.num_ptcls(), 2);
    assert_float_eq(ensemble.positions[0], 1.0, 1e-15, Some("Particle 1 kept"));
    assert_float_eq(ensemble.positions[3], 3.0, 1e-15, Some("Particle 3 kept"));
    assert_float_eq(ensemble.velocities[1], 10.0, 1e-15, None);
    assert_float_eq(ensemble.velocities[4], 30.0, 1e-15, None);
    assert_eq!(ensemble.particle_property("charge"), Some([1.0, 3.0].as_slice()));
}

#[test]
fn test_delete_nothing() {
    let mut ensemble = Ensemble::new(3);
    ensemble.delete(&[]);
    assert_eq!(ensemble.num_ptcls(), 3);
}

#[test]
fn test_sink_plane_absorption_times() {
    let sink = SinkPlane {
        point: [0.0, 0.0, 1.0],
        normal: [0.0, 0.0, 1.0],
    };

    // One particle moving towards the plane, one moving away, one parallel.
    let positions = vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let velocities = vec![0.0, 0.0, 2.0, 0.0, 0.0, -1.0, 1.0, 0.0, 0.0];
    let mut taus = vec![0.0; 3];
    sink.find_absorption_time(&positions, &velocities, 1.0, &mut taus);

    assert_float_eq(taus[0], 0.5, 1e-12, Some("Hits the plane after half the step"));
    assert_float_eq(taus[1], -1.0, 1e-12, Some("Moving away, crossing lies in the past"));
    assert_float_eq(taus[2], 2.0, 1e-12, Some("Parallel motion never crosses"));
}

#[test]
fn test_process_sink_removes_absorbed_particles() {
    let mut ensemble = Ensemble::new(2);
    // Particle 0 crosses z = 1 within dt, particle 1 does not.
    ensemble.velocities[2] = 2.0;
    ensemble.velocities[5] = 0.1;

    let mut sink = SinkPlane {
        point: [0.0, 0.0, 1.0],
        normal: [0.0, 0.0, 1.0],
    };
    process_sink(1.0, &mut ensemble, &mut sink);

    assert_eq!(ensemble.num_ptcls(), 1);
    assert_float_eq(ensemble.velocities[2], 0.1, 1e-15, Some("Slow particle survives"));
}

struct BeamSource {
    count: usize,
    velocity: [f64; 3],
}

impl Source for BeamSource {
    fn num_ptcls_produced(&mut self, _dt: f64) -> usize {
        self.count
    }

    fn produce_ptcls(&mut self, _dt: f64, start: usize, end: usize, ensemble: &mut Ensemble) {
        for i in start..end {
            for m in 0..3 {
                ensemble.velocities[3 * i + m] = self.velocity[m];
            }
        }
    }
}

#[test]
fn test_produce_ptcls_appends_from_all_sources() {
    let mut ensemble = Ensemble::new(1);
    let mut fast = BeamSource { count: 2, velocity: [1.0, 0.0, 0.0] };
    let mut slow = BeamSource { count: 1, velocity: [0.0, 0.5, 0.0] };

    produce_ptcls(0.1, &mut ensemble, &mut [&mut fast, &mut slow]);

    assert_eq!(ensemble.num_ptcls(), 4);
    assert_float_eq(ensemble.velocities[3], 1.0, 1e-15, Some("First source fills slot 1"));
    assert_float_eq(ensemble.velocities[6], 1.0, 1e-15, Some("First source fills slot 2"));
    assert_float_eq(ensemble.velocities[10], 0.5, 1e-15, Some("Second source fills slot 3"));
}

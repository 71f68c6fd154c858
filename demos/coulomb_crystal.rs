// demos/coulomb_crystal.rs
//
// A handful of singly charged calcium ions released from a compressed line
// repel each other apart. Run with `RUST_LOG=debug` to see sink activity.

use rs_coulomb::ensemble::Ensemble;
use rs_coulomb::forces::CoulombForce;
use rs_coulomb::integrator::drift_kick;
use rs_coulomb::utils::{ATOMIC_MASS_UNIT, BOLTZMANN_CONSTANT, ELEMENTARY_CHARGE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let num_ions = 5;
    let spacing = 5e-6;

    let mut ensemble = Ensemble::new(num_ions);
    for i in 0..num_ions {
        ensemble.positions[3 * i] = i as f64 * spacing;
    }
    ensemble.set_ensemble_property("charge", ELEMENTARY_CHARGE);
    let mass = 40.0 * ATOMIC_MASS_UNIT;
    ensemble.set_ensemble_property("mass", mass);

    let mut coulomb = CoulombForce::new(1e-18);

    let dt = 1e-9;
    let steps = 1000;
    for _ in 0..steps {
        drift_kick(dt, &mut ensemble, &mut [&mut coulomb], None)?;
    }

    println!("Ion positions after {} ns:", steps);
    for i in 0..ensemble.num_ptcls() {
        println!(
            "  ion {}: ({:+.3e}, {:+.3e}, {:+.3e}) m",
            i,
            ensemble.positions[3 * i],
            ensemble.positions[3 * i + 1],
            ensemble.positions[3 * i + 2],
        );
    }

    let speed_squared: f64 = ensemble.velocities.iter().map(|v| v * v).sum();
    let temperature = mass * speed_squared / (3.0 * BOLTZMANN_CONSTANT * ensemble.num_ptcls() as f64);
    println!("Kinetic temperature: {:.3e} K", temperature);

    Ok(())
}

use std::error::Error;
use std::fmt;

/// Represents errors that can occur while assembling or advancing an
/// ensemble of particles.
#[derive(Debug, Clone)]
pub enum SimulationError {
    /// A per-particle array does not match the number of particles.
    PropertySizeMismatch { expected: usize, actual: usize },
    /// A force or integrator needs a property the ensemble does not define.
    MissingProperty(&'static str),
    /// Particles cannot be accelerated without a mass property.
    MissingMass,
    /// A general error for calculations that produce invalid results.
    CalculationError(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::PropertySizeMismatch { expected, actual } => write!(
                f,
                "Size of property array ({}) does not match number of particles ({})",
                actual, expected
            ),
            SimulationError::MissingProperty(key) => {
                write!(f, "Ensemble does not define a {:?} property", key)
            }
            SimulationError::MissingMass => {
                write!(f, "To accelerate particles we need a mass ensemble or particle property")
            }
            SimulationError::CalculationError(msg) => write!(f, "Calculation error: {}", msg),
        }
    }
}

impl Error for SimulationError {}

mod drift_kick;

pub use drift_kick::*;

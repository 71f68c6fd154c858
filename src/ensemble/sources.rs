use crate::ensemble::Ensemble;

/// A particle source.
pub trait Source {
    /// The number of particles the next call to [`Source::produce_ptcls`]
    /// will generate for a time interval of length `dt`. Stochastic sources
    /// may return a different number on every call.
    fn num_ptcls_produced(&mut self, dt: f64) -> usize;

    /// Fills in the particles with indices `start..end` of `ensemble`.
    ///
    /// `end - start` equals the value returned by the preceding call to
    /// [`Source::num_ptcls_produced`] with the same `dt`.
    fn produce_ptcls(&mut self, dt: f64, start: usize, end: usize, ensemble: &mut Ensemble);
}

/// Inserts the particles produced by `sources` into `ensemble`.
///
/// The ensemble is resized once to make room for all sources, then each
/// source fills its contiguous range of fresh particles.
pub fn produce_ptcls(dt: f64, ensemble: &mut Ensemble, sources: &mut [&mut dyn Source]) {
    let counts: Vec<usize> = sources.iter_mut().map(|s| s.num_ptcls_produced(dt)).collect();
    let total: usize = counts.iter().sum();

    let mut start = ensemble.num_ptcls();
    ensemble.resize(start + total);
    for (source, count) in sources.iter_mut().zip(counts) {
        source.produce_ptcls(dt, start, start + count, ensemble);
        start += count;
    }
}

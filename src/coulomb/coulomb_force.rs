//! Direct-summation Coulomb forces with softening.
//!
//! The uniform-charge entry point processes particles in fixed-size blocks.
//! Each block is transposed into a component-major layout (all x coordinates
//! contiguous, then y, then z) so that the inner accumulation runs as
//! uniform-stride arithmetic over [`CHUNK_SIZE`] particles at a time.
//! Particles beyond the last complete block are handled by an unblocked
//! per-pair fallback. The per-particle-charge entry point always uses the
//! plain nested loop.
//!
//! Both entry points only ever add into the force buffer. Callers zero it
//! before the first force of a time step.

/// Number of particles per working block in the blocked driver.
pub const CHUNK_SIZE: usize = 32;

const NUM_COMPONENTS: usize = 3;
const BLOCK_LEN: usize = NUM_COMPONENTS * CHUNK_SIZE;

/// Softened Euclidean norm: `sqrt(r·r + delta)`.
///
/// Strictly positive for `delta > 0`, even for a zero displacement, which is
/// what keeps self-interaction terms finite in the force loops below.
#[inline]
pub(crate) fn softened_distance(r: &[f64; 3], delta: f64) -> f64 {
    let mut dist = 0.0;
    for m in 0..NUM_COMPONENTS {
        dist += r[m] * r[m];
    }
    (dist + delta).sqrt()
}

/// Reinterprets `src` as `rows` x `cols` in row-major order and writes the
/// transposed (column-major) elements into `dst`.
///
/// `src` and `dst` must have length `rows * cols`. The two slices cannot
/// alias; the borrow checker enforces that for us.
pub(crate) fn transpose<T: Copy>(src: &[T], rows: usize, cols: usize, dst: &mut [T]) {
    debug_assert_eq!(src.len(), rows * cols);
    debug_assert_eq!(dst.len(), rows * cols);
    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
}

/// Batched softened distances for one block of displacement vectors.
///
/// `r` holds a component-major 3 x CHUNK_SIZE displacement matrix. All
/// CHUNK_SIZE accumulations proceed with the same stride, so the compiler is
/// free to vectorize each of the three loops.
fn chunked_distance(r: &[f64; BLOCK_LEN], delta: f64, dist: &mut [f64; CHUNK_SIZE]) {
    for d in dist.iter_mut() {
        *d = delta;
    }
    for m in 0..NUM_COMPONENTS {
        for i in 0..CHUNK_SIZE {
            dist[i] += r[m * CHUNK_SIZE + i] * r[m * CHUNK_SIZE + i];
        }
    }
    for d in dist.iter_mut() {
        *d = d.sqrt();
    }
}

/// Adds the force on each particle of block `x0` due to every particle of
/// block `x1` into the component-major accumulator `f`.
///
/// `k` is the fully pre-scaled coefficient (Coulomb constant, time step and
/// charge product already folded in by the caller).
fn accumulate_force(x0: &[f64; BLOCK_LEN], x1: &[f64; BLOCK_LEN], f: &mut [f64; BLOCK_LEN], k: f64, delta: f64) {
    for i in 0..CHUNK_SIZE {
        let mut r = [0.0; BLOCK_LEN];
        for m in 0..NUM_COMPONENTS {
            for j in 0..CHUNK_SIZE {
                r[m * CHUNK_SIZE + j] = x0[m * CHUNK_SIZE + i] - x1[m * CHUNK_SIZE + j];
            }
        }

        let mut dist = [0.0; CHUNK_SIZE];
        chunked_distance(&r, delta, &mut dist);
        for d in dist.iter_mut() {
            *d = *d * *d * *d;
        }

        for m in 0..NUM_COMPONENTS {
            for j in 0..CHUNK_SIZE {
                f[m * CHUNK_SIZE + i] += k * r[m * CHUNK_SIZE + j] / dist[j];
            }
        }
    }
}

/// Blocked all-pairs driver over the first `floor(N / CHUNK_SIZE)` blocks.
///
/// Every ordered block pair, including a block with itself, is visited
/// exactly once. The reverse pair is computed in its own iteration rather
/// than reflected with Newton's third law; the uniform block shape this buys
/// is what makes the inner loops vectorizable, and changing it would change
/// the accumulation order and therefore the bit-exact results.
fn coulomb_force_blocked(positions: &[f64], charge: f64, dt: f64, delta: f64, k: f64, forces: &mut [f64]) {
    let num_ptcls = positions.len() / NUM_COMPONENTS;
    let num_chunks = num_ptcls / CHUNK_SIZE;
    let k = k * dt * charge * charge;

    let mut x0 = [0.0; BLOCK_LEN];
    let mut x1 = [0.0; BLOCK_LEN];
    let mut row_forces = [0.0; BLOCK_LEN];
    for i in 0..num_chunks {
        transpose(&positions[i * BLOCK_LEN..(i + 1) * BLOCK_LEN], CHUNK_SIZE, NUM_COMPONENTS, &mut x0);
        let mut f = [0.0; BLOCK_LEN];
        for j in 0..num_chunks {
            transpose(&positions[j * BLOCK_LEN..(j + 1) * BLOCK_LEN], CHUNK_SIZE, NUM_COMPONENTS, &mut x1);
            accumulate_force(&x0, &x1, &mut f, k, delta);
        }
        transpose(&f, NUM_COMPONENTS, CHUNK_SIZE, &mut row_forces);
        for (out, df) in forces[i * BLOCK_LEN..(i + 1) * BLOCK_LEN].iter_mut().zip(row_forces.iter()) {
            *out += df;
        }
    }
}

/// Adds `k * r / |r|_delta^3` for the ordered particle pair `(i, j)`.
#[inline]
fn add_pair_force(positions: &[f64], i: usize, j: usize, k: f64, delta: f64, forces: &mut [f64]) {
    let mut r = [0.0; NUM_COMPONENTS];
    for m in 0..NUM_COMPONENTS {
        r[m] = positions[NUM_COMPONENTS * i + m] - positions[NUM_COMPONENTS * j + m];
    }
    let dist = softened_distance(&r, delta);
    let dist_cubed = dist * dist * dist;
    for m in 0..NUM_COMPONENTS {
        forces[NUM_COMPONENTS * i + m] += k * r[m] / dist_cubed;
    }
}

/// Completes the pairs the blocked driver never sees.
///
/// With `n0 = floor(N / CHUNK_SIZE) * CHUNK_SIZE`, the blocked driver covers
/// the ordered pairs `[0, n0) x [0, n0)`. The two passes below cover
/// `[0, n0) x [n0, N)` and `[n0, N) x [0, N)`; together the three regions
/// tile `[0, N) x [0, N)` with every ordered pair appearing exactly once.
fn coulomb_force_leftovers(positions: &[f64], charge: f64, dt: f64, delta: f64, k: f64, forces: &mut [f64]) {
    let num_ptcls = positions.len() / NUM_COMPONENTS;
    let n0 = (num_ptcls / CHUNK_SIZE) * CHUNK_SIZE;
    let k = k * dt * charge * charge;

    // Right leftovers: blocked rows against the tail columns.
    for i in 0..n0 {
        for j in n0..num_ptcls {
            add_pair_force(positions, i, j, k, delta, forces);
        }
    }

    // Bottom leftovers: tail rows against every column.
    for i in n0..num_ptcls {
        for j in 0..num_ptcls {
            add_pair_force(positions, i, j, k, delta, forces);
        }
    }
}

/// Accumulates softened Coulomb forces among particles sharing one charge.
///
/// `positions` holds three interleaved components per particle; `forces` has
/// the same layout and receives `dt * k * charge^2 * r / (|r|^2 + delta)^(3/2)`
/// summed over every ordered pair, added on top of whatever it already
/// contains. `delta` must be non-negative; the sum includes each particle's
/// zero-displacement self term, so `delta == 0` produces non-finite results
/// and callers wanting the unsoftened law should pass a negligible positive
/// value instead.
///
/// # Arguments
/// * `positions` - Particle positions, `3 * N` values, read only.
/// * `charge` - The charge shared by all particles.
/// * `dt` - Time step the force is integrated over.
/// * `delta` - Softening term added to the squared distance.
/// * `k` - Coulomb constant.
/// * `forces` - Force accumulator, `3 * N` values, added to in place.
///
/// # Example
/// ```
/// let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
/// let mut forces = vec![0.0; 6];
/// // A non-zero delta keeps the self-interaction terms finite.
/// rs_coulomb::coulomb::coulomb_force(&positions, 1.0, 1.0, 1e-30, 1.0, &mut forces);
/// // Two unit charges one meter apart repel with unit force along x.
/// assert!((forces[0] + 1.0).abs() < 1e-12);
/// assert!((forces[3] - 1.0).abs() < 1e-12);
/// ```
pub fn coulomb_force(positions: &[f64], charge: f64, dt: f64, delta: f64, k: f64, forces: &mut [f64]) {
    debug_assert_eq!(positions.len() % NUM_COMPONENTS, 0);
    debug_assert_eq!(positions.len(), forces.len());
    debug_assert!(delta >= 0.0);

    coulomb_force_blocked(positions, charge, dt, delta, k, forces);
    coulomb_force_leftovers(positions, charge, dt, delta, k, forces);
}

/// Accumulates softened Coulomb forces with an individual charge per particle.
///
/// Same force law and buffer conventions as [`coulomb_force`], but the pair
/// coefficient is `dt * k * charges[i] * charges[j]` and the computation runs
/// as a plain nested loop without blocking. This is also the reference
/// semantics the blocked path reproduces when all charges are equal.
///
/// # Arguments
/// * `positions` - Particle positions, `3 * N` values, read only.
/// * `charges` - One charge per particle, `N` values.
/// * `dt` - Time step the force is integrated over.
/// * `delta` - Softening term added to the squared distance.
/// * `k` - Coulomb constant.
/// * `forces` - Force accumulator, `3 * N` values, added to in place.
///
/// # Example
/// ```
/// let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
/// let charges = vec![1.0, -1.0];
/// let mut forces = vec![0.0; 6];
/// rs_coulomb::coulomb::coulomb_force_per_particle_charges(
///     &positions, &charges, 1.0, 1e-30, 1.0, &mut forces);
/// // Opposite charges attract.
/// assert!((forces[0] - 1.0).abs() < 1e-12);
/// assert!((forces[3] + 1.0).abs() < 1e-12);
/// ```
pub fn coulomb_force_per_particle_charges(
    positions: &[f64],
    charges: &[f64],
    dt: f64,
    delta: f64,
    k: f64,
    forces: &mut [f64],
) {
    debug_assert_eq!(positions.len() % NUM_COMPONENTS, 0);
    debug_assert_eq!(positions.len(), forces.len());
    debug_assert_eq!(charges.len() * NUM_COMPONENTS, positions.len());
    debug_assert!(delta >= 0.0);

    let num_ptcls = charges.len();
    for i in 0..num_ptcls {
        for j in 0..num_ptcls {
            let kp = dt * k * charges[i] * charges[j];
            add_pair_force(positions, i, j, kp, delta, forces);
        }
    }
}

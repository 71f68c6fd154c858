/// Vector utility: dot product
#[inline]
pub fn dot_product(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Vector utility: magnitude calculation
#[inline]
pub fn vector_magnitude(v: &[f64; 3]) -> f64 {
    dot_product(v, v).sqrt()
}

/// In-place L2 normalization over the stored (non-zero) values of a row.
pub(crate) fn l2_normalize_in_place(v: &mut [f64]) {
    let norm_sq: f64 = v.iter().map(|x| x * x).sum();
    if norm_sq > 0.0 {
        let inv_norm = norm_sq.sqrt().recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

/// In-place L1 normalization: values are divided by the sum of their magnitudes.
pub(crate) fn l1_normalize_in_place(v: &mut [f64]) {
    let norm: f64 = v.iter().map(|x| x.abs()).sum();
    if norm > 0.0 {
        let inv_norm = norm.recip();
        for x in v.iter_mut() {
            *x *= inv_norm;
        }
    }
}

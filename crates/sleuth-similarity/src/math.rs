//! Vector helpers.

/// L2 norm.
pub fn norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Normalize in place to unit length. Zero vectors are left untouched.
pub fn normalize(v: &mut [f32]) {
    let n = norm(v);
    if n > f32::EPSILON {
        for x in v.iter_mut() {
            *x /= n;
        }
    }
}

/// Unit-length copy of `v`, or `None` for a zero vector.
pub fn normalized(v: &[f32]) -> Option<Vec<f32>> {
    let n = norm(v);
    if n <= f32::EPSILON {
        return None;
    }
    Some(v.iter().map(|x| x / n).collect())
}

/// True when every component is neither NaN nor infinite.
pub fn is_finite(v: &[f32]) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Inner product of two equal-length slices.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine similarity of arbitrary (non-normalized) vectors. Zero if either is zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let denom = norm(a) * norm(b);
    if denom <= f32::EPSILON {
        return 0.0;
    }
    (dot(a, b) / denom).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = vec![3.0, 4.0];
        normalize(&mut v);
        assert!((norm(&v) - 1.0).abs() < 1e-6);
        assert!((v[0] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn zero_vector_stays_zero() {
        let mut v = vec![0.0, 0.0];
        normalize(&mut v);
        assert_eq!(v, vec![0.0, 0.0]);
        assert!(normalized(&v).is_none());
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let sim = cosine_similarity(&[1.0, 2.0], &[2.0, 4.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_opposite_vectors_is_minus_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-3.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        assert!(cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).abs() < 1e-6);
    }

    #[test]
    fn finiteness_check_catches_nan_and_infinity() {
        assert!(is_finite(&[0.0, -3.5, 1e30]));
        assert!(!is_finite(&[f32::NAN, 1.0]));
        assert!(!is_finite(&[1.0, f32::NEG_INFINITY]));
    }
}

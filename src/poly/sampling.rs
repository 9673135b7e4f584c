/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Drawing random coordinates from the measure a basis was trained on.
//!
//! Only meaningful for measures with uniform weights (e.g. anything built by
//! [`discretize`](crate::discretize)), where picking a sample point uniformly
//! is the same as sampling the measure.

use crate::{Real, Basis, BasisError, Transform, TransformedBasis};
use rand::Rng;

/// A random sample point of the measure, in the transformed coordinate.
pub fn rand_transformed<T: Real, R: Rng>(basis: &Basis<T>, rng: &mut R) -> Result<T, BasisError> {
    let ww = basis.sample_weights();
    if ww.is_empty() {
        return Err(BasisError::EmptyMeasure);
    }
    if !is_uniform(ww) {
        return Err(BasisError::NonUniformWeights);
    }
    Ok(basis.sample_points()[rng.gen_range(0, ww.len())])
}

/// A random sample point of the measure, mapped back to the physical coordinate.
pub fn rand_physical<T: Real, Tr: Transform<T>, R: Rng>(
    basis: &TransformedBasis<T, Tr>,
    rng: &mut R,
) -> Result<T, BasisError> {
    let t = rand_transformed(basis.basis(), rng)?;
    Ok(basis.transform().inverse(t))
}

fn is_uniform<T: Real>(ww: &[T]) -> bool {
    let w0 = ww[0];
    let tol = T::lit(4.0) * T::epsilon() * w0.abs();
    ww.iter().all(|&w| (w - w0).abs() <= tol)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::{build, discretize, IdentityTransform, MorseTransform};

    #[test]
    fn draws_from_support() {
        let basis = discretize(3, 2, 1.0, 0, -1.0, 50, &IdentityTransform).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let t = rand_transformed(&basis, &mut rng).unwrap();
            assert!(basis.sample_points().contains(&t));
        }
    }

    #[test]
    fn physical_draws_invert_transform() {
        let trans = MorseTransform { lambda: 2.0f64, r0: 1.0 };
        let basis = TransformedBasis::discretize(3, trans, 3.0, 0.5, 2, 0, 50).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let r = rand_physical(&basis, &mut rng).unwrap();
            assert!(0.5 <= r && r <= 3.0, "{}", r);
            let t = trans.transform(r);
            assert!(basis.basis().sample_points().iter().any(|&s| (s - t).abs() < 1e-12));
        }
    }

    #[test]
    fn rejects_non_uniform() {
        let basis = build(2, 0, 1.0, 0, 0.0, vec![0.25, 0.5, 0.75], vec![1.0, 2.0, 1.0]).unwrap();
        assert_eq!(
            rand_transformed(&basis, &mut rand::thread_rng()),
            Err(BasisError::NonUniformWeights),
        );
    }
}

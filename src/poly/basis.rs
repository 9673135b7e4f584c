/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use crate::{Real, BasisError, Envelope};

/// A family of `N` polynomials orthonormal with respect to a discretized measure.
///
/// Member `n` (1-based) is
///
/// ```text
/// P_1(t) = A_1 env(t)
/// P_2(t) = (A_2 t + B_2) P_1(t)
/// P_n(t) = (A_n t + B_n) P_{n-1}(t) + C_n P_{n-2}(t)
/// ```
///
/// where `env` is the [`Envelope`].  Coefficient vectors are stored 0-based,
/// so `A[0]` is `A_1`.
///
/// The sample points and weights used for construction are kept for
/// diagnostics and sampling, but do not take part in equality.
#[derive(Debug, Clone)]
pub struct Basis<T = f64> {
    pub(crate) envelope: Envelope<T>,
    pub(crate) A: Vec<T>,
    pub(crate) B: Vec<T>,
    pub(crate) C: Vec<T>,
    pub(crate) tdf: Vec<T>,
    pub(crate) ww: Vec<T>,
}

impl<T: Real> PartialEq for Basis<T> {
    fn eq(&self, other: &Self) -> bool {
        self.envelope == other.envelope
            && self.A == other.A
            && self.B == other.B
            && self.C == other.C
    }
}

impl<T: Real> Basis<T> {
    /// Assemble a basis from already-computed recurrence data.
    ///
    /// Checks the structural invariants but does not re-verify orthonormality.
    pub(crate) fn from_parts(
        envelope: Envelope<T>,
        A: Vec<T>,
        B: Vec<T>,
        C: Vec<T>,
        tdf: Vec<T>,
        ww: Vec<T>,
    ) -> Result<Self, BasisError> {
        check_powers(envelope.pl, envelope.pr)?;
        if !(envelope.tl <= envelope.tr) {
            return Err(BasisError::InvertedDomain {
                tl: envelope.tl.to_f64().unwrap_or(std::f64::NAN),
                tr: envelope.tr.to_f64().unwrap_or(std::f64::NAN),
            });
        }
        if A.is_empty() {
            return Err(BasisError::ZeroDegree);
        }
        if A.len() != B.len() || A.len() != C.len() {
            return Err(BasisError::BadRecord(format!(
                "coefficient lengths differ (A: {}, B: {}, C: {})", A.len(), B.len(), C.len(),
            )));
        }
        if tdf.len() != ww.len() {
            return Err(BasisError::MismatchedMeasure { points: tdf.len(), weights: ww.len() });
        }
        if let Some(i) = A.iter().position(|&a| a == T::zero() || !a.is_finite()) {
            return Err(BasisError::SingularRecurrence { n: i + 1 });
        }
        Ok(Basis { envelope, A, B, C, tdf, ww })
    }

    /// Number of basis functions, `N`.
    pub fn len(&self) -> usize { self.A.len() }

    /// Always false; a basis has at least one member.
    pub fn is_empty(&self) -> bool { self.A.is_empty() }

    pub fn envelope(&self) -> &Envelope<T> { &self.envelope }

    /// Domain `(tl, tr)` in the transformed coordinate.
    pub fn domain(&self) -> (T, T) { (self.envelope.tl, self.envelope.tr) }

    /// Envelope powers `(pl, pr)`.
    pub fn powers(&self) -> (i32, i32) { (self.envelope.pl, self.envelope.pr) }

    pub fn coeffs_a(&self) -> &[T] { &self.A }
    pub fn coeffs_b(&self) -> &[T] { &self.B }
    pub fn coeffs_c(&self) -> &[T] { &self.C }

    /// Sample points of the measure the basis was built from.
    pub fn sample_points(&self) -> &[T] { &self.tdf }

    /// Normalized weights of the measure the basis was built from.
    pub fn sample_weights(&self) -> &[T] { &self.ww }

    /// Gram matrix `G[n][m] = Σ_i ww_i P_n(t_i) P_m(t_i)` over the stored measure.
    ///
    /// For a well-conditioned basis this is the identity up to rounding.
    pub fn gramian(&self) -> Vec<Vec<T>> {
        let n = self.len();
        let mut gram = vec![vec![T::zero(); n]; n];
        let mut values = vec![T::zero(); n];
        for (&t, &w) in self.tdf.iter().zip(&self.ww) {
            self.recur_e(t, &mut values);
            for (row, &p_n) in gram.iter_mut().zip(&values) {
                for (g, &p_m) in row.iter_mut().zip(&values) {
                    *g = *g + w * p_n * p_m;
                }
            }
        }
        gram
    }

    /// Resolve an optional prefix length against the basis size.
    pub(crate) fn check_prefix(&self, maxn: Option<usize>) -> Result<usize, BasisError> {
        match maxn {
            None => Ok(self.len()),
            Some(requested) if requested > self.len() => {
                Err(BasisError::PrefixTooLong { requested, available: self.len() })
            },
            Some(requested) => Ok(requested),
        }
    }
}

pub(crate) fn check_powers(pl: i32, pr: i32) -> Result<(), BasisError> {
    use crate::Side;

    if pl < 0 {
        return Err(BasisError::NegativePower { side: Side::Left, power: pl });
    }
    if pr < 0 {
        return Err(BasisError::NegativePower { side: Side::Right, power: pr });
    }
    Ok(())
}

pub(crate) fn check_buffer(needed: usize, len: usize) -> Result<(), BasisError> {
    match len < needed {
        true => Err(BasisError::BufferTooShort { needed, len }),
        false => Ok(()),
    }
}

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Chain-rule helpers for composing the basis with an outer coordinate map.
//!
//! With `t = trans(r)`, `dt = trans'(r)` and `ddt = trans''(r)`:
//!
//! * `forward_rule(t, dt)` gives `(P(t), P'(t) dt)`, the tangent of `P(trans(r))`.
//! * `reverse_rule_1(t, w)` gives `Σ_n w_n P_n'(t)`.
//! * `reverse_rule_2(t, w, dt, ddt)` gives `d²/dr² Σ_n w_n P_n(trans(r))`,
//!   i.e. `Σ_n w_n (P_n''(t) dt² + P_n'(t) ddt)`.
//!
//! The reverse rules run a single sweep of the recurrence and never store
//! the derivative vectors.

#![allow(non_snake_case)]

use crate::{Real, Basis, BasisError};
use crate::basis::check_buffer;

impl<T: Real> Basis<T> {
    /// Values and directional derivatives along the input tangent `dt`.
    pub fn forward_rule(&self, t: T, dt: T) -> (Vec<T>, Vec<T>) {
        let (P, mut dP) = self.evaluate_ed(t);
        for x in &mut dP {
            *x = *x * dt;
        }
        (P, dP)
    }

    /// `forward_rule` for a prefix, writing into caller-provided buffers.
    pub fn forward_rule_into(
        &self,
        t: T,
        dt: T,
        maxn: Option<usize>,
        out: &mut [T],
        out_d: &mut [T],
    ) -> Result<(), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        check_buffer(maxn, out.len())?;
        check_buffer(maxn, out_d.len())?;
        self.recur_ed(t, &mut out[..maxn], &mut out_d[..maxn]);
        for x in &mut out_d[..maxn] {
            *x = *x * dt;
        }
        Ok(())
    }

    /// Contract the first derivatives with a cotangent: `Σ_n w_n P_n'(t)`.
    ///
    /// `cotangent` may be shorter than the basis, in which case only that
    /// prefix contributes.
    pub fn reverse_rule_1(&self, t: T, cotangent: &[T]) -> Result<T, BasisError> {
        self.check_cotangent(cotangent)?;
        let w = cotangent;
        if w.is_empty() {
            return Ok(T::zero());
        }

        let (env, env_d) = self.envelope.value_ed(t);
        let (mut P1, mut dP1) = (self.A[0] * env, self.A[0] * env_d);
        let (mut P2, mut dP2) = (T::zero(), T::zero());
        let mut acc = w[0] * dP1;
        for n in 1..w.len() {
            let a = self.A[n] * t + self.B[n];
            let P = a * P1 + self.C[n] * P2;
            let dP = a * dP1 + self.C[n] * dP2 + self.A[n] * P1;
            acc = acc + w[n] * dP;

            P2 = P1;
            dP2 = dP1;
            P1 = P;
            dP1 = dP;
        }
        Ok(acc)
    }

    /// Second-order reverse rule: `Σ_n w_n (P_n''(t) dt² + P_n'(t) ddt)`.
    ///
    /// This is the second derivative of `Σ_n w_n P_n(trans(r))` with respect
    /// to `r`, given the first and second derivatives of `trans` at `r`.
    pub fn reverse_rule_2(&self, t: T, cotangent: &[T], dt: T, ddt: T) -> Result<T, BasisError> {
        self.check_cotangent(cotangent)?;
        let w = cotangent;
        if w.is_empty() {
            return Ok(T::zero());
        }

        let two = T::one() + T::one();
        let dt2 = dt * dt;
        let (env, env_d, env_dd) = self.envelope.value_ed2(t);
        let (mut P1, mut dP1, mut ddP1) = (self.A[0] * env, self.A[0] * env_d, self.A[0] * env_dd);
        let (mut P2, mut dP2, mut ddP2) = (T::zero(), T::zero(), T::zero());
        let mut acc = w[0] * (ddP1 * dt2 + dP1 * ddt);
        for n in 1..w.len() {
            let a = self.A[n] * t + self.B[n];
            let P = a * P1 + self.C[n] * P2;
            let dP = a * dP1 + self.C[n] * dP2 + self.A[n] * P1;
            let ddP = a * ddP1 + self.C[n] * ddP2 + two * self.A[n] * dP1;
            acc = acc + w[n] * (ddP * dt2 + dP * ddt);

            P2 = P1;
            dP2 = dP1;
            ddP2 = ddP1;
            P1 = P;
            dP1 = dP;
            ddP1 = ddP;
        }
        Ok(acc)
    }

    fn check_cotangent(&self, cotangent: &[T]) -> Result<(), BasisError> {
        match cotangent.len() > self.len() {
            true => Err(BasisError::CotangentTooLong { len: cotangent.len(), size: self.len() }),
            false => Ok(()),
        }
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::{discretize, IdentityTransform};
    use crate::numerical;
    use crate::util::{uniform, dot, random_vec};

    fn basis() -> Basis {
        discretize(8, 2, 1.0, 1, -1.0, 800, &IdentityTransform).unwrap()
    }

    #[test]
    fn forward_rule_scales_derivative() {
        let basis = basis();
        for _ in 0..10 {
            let t = uniform(-0.9, 0.9);
            let dt = uniform(-3.0, 3.0);
            let (P, dP) = basis.forward_rule(t, dt);
            let (P_expected, dP_unit) = basis.evaluate_ed(t);
            assert_eq!(P, P_expected);
            let dP_expected: Vec<_> = dP_unit.iter().map(|&x| x * dt).collect();
            assert_eq!(dP, dP_expected);

            let mut out = vec![0.0; 5];
            let mut out_d = vec![0.0; 5];
            basis.forward_rule_into(t, dt, Some(5), &mut out, &mut out_d).unwrap();
            assert_eq!(&out[..], &P[..5]);
            assert_eq!(&out_d[..], &dP[..5]);
        }
    }

    #[test]
    fn reverse_rule_1_matches_contraction() {
        let basis = basis();
        for _ in 0..20 {
            let t = uniform(-1.0, 1.0);
            let w = random_vec(basis.len());
            let expected = dot(&w, &basis.evaluate_d(t));
            let actual = basis.reverse_rule_1(t, &w).unwrap();
            assert_close!(rel=1e-12, abs=1e-12, actual, expected);
        }
    }

    #[test]
    fn reverse_rule_prefix() {
        let basis = basis();
        let t = 0.1;
        let w = random_vec(3);
        let dP = basis.evaluate_d(t);
        assert_close!(rel=1e-12, abs=1e-12, basis.reverse_rule_1(t, &w).unwrap(), dot(&w, &dP[..3]));
        assert_eq!(basis.reverse_rule_1(t, &[]).unwrap(), 0.0);
        assert_eq!(basis.reverse_rule_2(t, &[], 1.0, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn reverse_rule_2_matches_direct() {
        let basis = basis();
        for _ in 0..20 {
            let t = uniform(-1.0, 1.0);
            let dt = uniform(-2.0, 2.0);
            let ddt = uniform(-2.0, 2.0);
            let w = random_vec(basis.len());

            let (_, dP, ddP) = basis.evaluate_ed2(t);
            let expected = dot(&w, &ddP) * dt * dt + dot(&w, &dP) * ddt;
            let actual = basis.reverse_rule_2(t, &w, dt, ddt).unwrap();
            assert_close!(rel=1e-11, abs=1e-11, actual, expected);
        }
    }

    #[test]
    fn reverse_rule_2_num_deriv_through_transform() {
        // g(r) = Σ w_n P_n(trans(r)) with trans(r) = sin(r)
        let basis = basis();
        for _ in 0..10 {
            let r = uniform(-1.0, 1.0);
            let w = random_vec(basis.len());
            let g = |r: f64| dot(&w, &basis.evaluate(r.sin()));
            let actual = basis.reverse_rule_2(r.sin(), &w, r.cos(), -r.sin()).unwrap();
            assert_close!(
                rel=1e-5, abs=1e-5, actual,
                numerical::diff_2(1e-3, None, r, g),
            );
        }
    }

    #[test]
    fn cotangent_too_long() {
        let basis = basis();
        let w = vec![1.0; 9];
        assert_eq!(
            basis.reverse_rule_1(0.0, &w),
            Err(BasisError::CotangentTooLong { len: 9, size: 8 }),
        );
        assert_eq!(
            basis.reverse_rule_2(0.0, &w, 1.0, 0.0),
            Err(BasisError::CotangentTooLong { len: 9, size: 8 }),
        );
    }
}

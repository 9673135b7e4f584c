/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Three-term recurrence evaluation of values and derivatives.
//!
//! Every path evaluates the undifferentiated recurrence with the same
//! expressions in the same order, so the values produced alongside
//! derivatives are bitwise identical to those of `evaluate`.

use crate::{Real, Basis, BasisError};
use crate::basis::check_buffer;

impl<T: Real> Basis<T> {
    /// Values of all `N` basis functions at `t`.
    pub fn evaluate(&self, t: T) -> Vec<T> {
        let mut out = vec![T::zero(); self.len()];
        self.recur_e(t, &mut out);
        out
    }

    /// First derivatives of all `N` basis functions at `t`.
    pub fn evaluate_d(&self, t: T) -> Vec<T> {
        let mut out_d = vec![T::zero(); self.len()];
        self.recur_d(t, &mut out_d);
        out_d
    }

    /// Values and first derivatives in a single pass.
    pub fn evaluate_ed(&self, t: T) -> (Vec<T>, Vec<T>) {
        let mut out = vec![T::zero(); self.len()];
        let mut out_d = vec![T::zero(); self.len()];
        self.recur_ed(t, &mut out, &mut out_d);
        (out, out_d)
    }

    /// Second derivatives of all `N` basis functions at `t`.
    pub fn evaluate_dd(&self, t: T) -> Vec<T> { self.evaluate_ed2(t).2 }

    /// Values, first and second derivatives in a single pass.
    pub fn evaluate_ed2(&self, t: T) -> (Vec<T>, Vec<T>, Vec<T>) {
        let mut out = vec![T::zero(); self.len()];
        let mut out_d = vec![T::zero(); self.len()];
        let mut out_dd = vec![T::zero(); self.len()];
        self.recur_ed2(t, &mut out, &mut out_d, &mut out_dd);
        (out, out_d, out_dd)
    }
}

/// Non-allocating entry points.
///
/// `maxn` selects a prefix `P_1..P_maxn` (default: all `N`).  Only the first
/// `maxn` entries of each buffer are written; nothing is written on error.
impl<T: Real> Basis<T> {
    pub fn evaluate_into(&self, t: T, maxn: Option<usize>, out: &mut [T]) -> Result<(), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        check_buffer(maxn, out.len())?;
        self.recur_e(t, &mut out[..maxn]);
        Ok(())
    }

    pub fn evaluate_d_into(&self, t: T, maxn: Option<usize>, out_d: &mut [T]) -> Result<(), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        check_buffer(maxn, out_d.len())?;
        self.recur_d(t, &mut out_d[..maxn]);
        Ok(())
    }

    pub fn evaluate_ed_into(
        &self,
        t: T,
        maxn: Option<usize>,
        out: &mut [T],
        out_d: &mut [T],
    ) -> Result<(), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        check_buffer(maxn, out.len())?;
        check_buffer(maxn, out_d.len())?;
        self.recur_ed(t, &mut out[..maxn], &mut out_d[..maxn]);
        Ok(())
    }

    pub fn evaluate_ed2_into(
        &self,
        t: T,
        maxn: Option<usize>,
        out: &mut [T],
        out_d: &mut [T],
        out_dd: &mut [T],
    ) -> Result<(), BasisError> {
        let maxn = self.check_prefix(maxn)?;
        check_buffer(maxn, out.len())?;
        check_buffer(maxn, out_d.len())?;
        check_buffer(maxn, out_dd.len())?;
        self.recur_ed2(t, &mut out[..maxn], &mut out_d[..maxn], &mut out_dd[..maxn]);
        Ok(())
    }
}

// Kernels.  The prefix length is the output length, which callers have
// already checked against `self.len()`.
#[allow(non_snake_case)]
impl<T: Real> Basis<T> {
    pub(crate) fn recur_e(&self, t: T, P: &mut [T]) {
        if P.is_empty() {
            return;
        }
        P[0] = self.A[0] * self.envelope.value(t);
        if P.len() > 1 {
            P[1] = (self.A[1] * t + self.B[1]) * P[0];
        }
        for n in 2..P.len() {
            P[n] = (self.A[n] * t + self.B[n]) * P[n - 1] + self.C[n] * P[n - 2];
        }
    }

    pub(crate) fn recur_d(&self, t: T, dP: &mut [T]) {
        if dP.is_empty() {
            return;
        }
        let (env, env_d) = self.envelope.value_ed(t);
        let mut P1 = self.A[0] * env;
        let mut P2 = T::zero();
        dP[0] = self.A[0] * env_d;
        if dP.len() > 1 {
            let P = (self.A[1] * t + self.B[1]) * P1;
            dP[1] = (self.A[1] * t + self.B[1]) * dP[0] + self.A[1] * P1;
            P2 = P1;
            P1 = P;
        }
        for n in 2..dP.len() {
            let a = self.A[n] * t + self.B[n];
            let P = a * P1 + self.C[n] * P2;
            dP[n] = a * dP[n - 1] + self.C[n] * dP[n - 2] + self.A[n] * P1;
            P2 = P1;
            P1 = P;
        }
    }

    pub(crate) fn recur_ed(&self, t: T, P: &mut [T], dP: &mut [T]) {
        debug_assert_eq!(P.len(), dP.len());
        if P.is_empty() {
            return;
        }
        let (env, env_d) = self.envelope.value_ed(t);
        P[0] = self.A[0] * env;
        dP[0] = self.A[0] * env_d;
        if P.len() > 1 {
            let a = self.A[1] * t + self.B[1];
            P[1] = a * P[0];
            dP[1] = a * dP[0] + self.A[1] * P[0];
        }
        for n in 2..P.len() {
            let a = self.A[n] * t + self.B[n];
            P[n] = a * P[n - 1] + self.C[n] * P[n - 2];
            dP[n] = a * dP[n - 1] + self.C[n] * dP[n - 2] + self.A[n] * P[n - 1];
        }
    }

    // Differentiating the recurrence twice gives
    //   ddP_n = (A_n t + B_n) ddP_{n-1} + C_n ddP_{n-2} + 2 A_n dP_{n-1}
    pub(crate) fn recur_ed2(&self, t: T, P: &mut [T], dP: &mut [T], ddP: &mut [T]) {
        debug_assert_eq!(P.len(), dP.len());
        debug_assert_eq!(P.len(), ddP.len());
        if P.is_empty() {
            return;
        }
        let two = T::one() + T::one();
        let (env, env_d, env_dd) = self.envelope.value_ed2(t);
        P[0] = self.A[0] * env;
        dP[0] = self.A[0] * env_d;
        ddP[0] = self.A[0] * env_dd;
        if P.len() > 1 {
            let a = self.A[1] * t + self.B[1];
            P[1] = a * P[0];
            dP[1] = a * dP[0] + self.A[1] * P[0];
            ddP[1] = a * ddP[0] + two * self.A[1] * dP[0];
        }
        for n in 2..P.len() {
            let a = self.A[n] * t + self.B[n];
            P[n] = a * P[n - 1] + self.C[n] * P[n - 2];
            dP[n] = a * dP[n - 1] + self.C[n] * dP[n - 2] + self.A[n] * P[n - 1];
            ddP[n] = a * ddP[n - 1] + self.C[n] * ddP[n - 2] + two * self.A[n] * dP[n - 1];
        }
    }
}

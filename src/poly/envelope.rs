/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::Real;

/// Power-law cutoff factor `(t - tl)^pl * (t - tr)^pr`.
///
/// A side with a positive power is enforced: past that boundary the envelope
/// and all of its derivatives are exactly zero.  A side with power zero places
/// no constraint on `t`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Envelope<T> {
    pub pl: i32,
    pub tl: T,
    pub pr: i32,
    pub tr: T,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum DomainSide { Left, Inside, Right }

impl<T: Real> Envelope<T> {
    pub(crate) fn classify(&self, t: T) -> DomainSide {
        if self.pl > 0 && t < self.tl {
            DomainSide::Left
        } else if self.pr > 0 && t > self.tr {
            DomainSide::Right
        } else {
            DomainSide::Inside
        }
    }

    pub fn value(&self, t: T) -> T {
        match self.classify(t) {
            DomainSide::Inside => {
                let (a, _, _) = monomial(t - self.tl, self.pl);
                let (b, _, _) = monomial(t - self.tr, self.pr);
                a * b
            },
            _ => T::zero(),
        }
    }

    pub fn value_d(&self, t: T) -> T { self.value_ed(t).1 }

    pub fn value_dd(&self, t: T) -> T { self.value_ed2(t).2 }

    /// Value and first derivative.
    pub fn value_ed(&self, t: T) -> (T, T) {
        let (value, d_t, _) = self.value_ed2(t);
        (value, d_t)
    }

    /// Value, first and second derivative.
    pub fn value_ed2(&self, t: T) -> (T, T, T) {
        match self.classify(t) {
            DomainSide::Inside => {
                let (a, a_d, a_dd) = monomial(t - self.tl, self.pl);
                let (b, b_d, b_dd) = monomial(t - self.tr, self.pr);
                let two = T::one() + T::one();
                (
                    a * b,
                    a_d * b + a * b_d,
                    a_dd * b + two * a_d * b_d + a * b_dd,
                )
            },
            _ => (T::zero(), T::zero(), T::zero()),
        }
    }
}

// x^p and its first two derivatives, without ever raising x to a negative
// power (which would turn x = 0 into 0 * inf).
#[inline(always)]
fn monomial<T: Real>(x: T, p: i32) -> (T, T, T) {
    match p {
        0 => (T::one(), T::zero(), T::zero()),
        1 => (x, T::one(), T::zero()),
        _ => {
            let x_pm2 = x.powi(p - 2);
            let x_pm1 = x_pm2 * x;
            let p_t = T::lit(f64::from(p));
            (x_pm1 * x, p_t * x_pm1, p_t * (p_t - T::one()) * x_pm2)
        },
    }
}

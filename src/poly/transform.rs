/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Outer coordinate maps `r -> t` and the composite basis in `r`.

#![allow(non_snake_case)]

use crate::{Real, Basis, BasisError, discretize};
use serde::{Serialize, Deserialize};

/// A smooth, monotonic scalar map from physical distance `r` to the
/// coordinate `t` the polynomials live in.
pub trait Transform<T: Real> {
    fn transform(&self, r: T) -> T;
    fn transform_d(&self, r: T) -> T;
    fn transform_dd(&self, r: T) -> T;

    /// Maps `t` back to `r`.
    fn inverse(&self, t: T) -> T;

    /// `(t, dt/dr, d²t/dr²)` at `r`.
    fn transform_ed2(&self, r: T) -> (T, T, T) {
        (self.transform(r), self.transform_d(r), self.transform_dd(r))
    }
}

impl<'a, T: Real, Tr: Transform<T> + ?Sized> Transform<T> for &'a Tr {
    fn transform(&self, r: T) -> T { (**self).transform(r) }
    fn transform_d(&self, r: T) -> T { (**self).transform_d(r) }
    fn transform_dd(&self, r: T) -> T { (**self).transform_dd(r) }
    fn inverse(&self, t: T) -> T { (**self).inverse(t) }
    fn transform_ed2(&self, r: T) -> (T, T, T) { (**self).transform_ed2(r) }
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[derive(Serialize, Deserialize)]
pub struct IdentityTransform;

impl<T: Real> Transform<T> for IdentityTransform {
    fn transform(&self, r: T) -> T { r }
    fn transform_d(&self, _: T) -> T { T::one() }
    fn transform_dd(&self, _: T) -> T { T::zero() }
    fn inverse(&self, t: T) -> T { t }
}

/// `t(r) = ((1 + r0) / (1 + r))^p`
///
/// Decreasing in `r`, so the outer cutoff lands on the left of the domain.
#[derive(Debug, Copy, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct PolyTransform<T = f64> {
    pub p: T,
    pub r0: T,
}

impl<T: Real> Transform<T> for PolyTransform<T> {
    fn transform(&self, r: T) -> T {
        ((T::one() + self.r0) / (T::one() + r)).powf(self.p)
    }

    fn transform_d(&self, r: T) -> T {
        -self.p * self.transform(r) / (T::one() + r)
    }

    fn transform_dd(&self, r: T) -> T {
        let x = T::one() + r;
        self.p * (self.p + T::one()) * self.transform(r) / (x * x)
    }

    fn inverse(&self, t: T) -> T {
        (T::one() + self.r0) / t.powf(self.p.recip()) - T::one()
    }
}

/// `t(r) = exp(-lambda (r / r0 - 1))`
#[derive(Debug, Copy, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct MorseTransform<T = f64> {
    pub lambda: T,
    pub r0: T,
}

impl<T: Real> Transform<T> for MorseTransform<T> {
    fn transform(&self, r: T) -> T {
        (-self.lambda * (r / self.r0 - T::one())).exp()
    }

    fn transform_d(&self, r: T) -> T {
        -self.lambda / self.r0 * self.transform(r)
    }

    fn transform_dd(&self, r: T) -> T {
        let k = self.lambda / self.r0;
        k * k * self.transform(r)
    }

    fn inverse(&self, t: T) -> T {
        self.r0 * (T::one() - t.ln() / self.lambda)
    }
}

/// The transforms that can be named in settings files.
#[derive(Debug, Copy, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind<T = f64> {
    Identity,
    Poly(PolyTransform<T>),
    Morse(MorseTransform<T>),
}

impl<T> Default for TransformKind<T> {
    fn default() -> Self { TransformKind::Identity }
}

impl<T: Real> Transform<T> for TransformKind<T> {
    fn transform(&self, r: T) -> T {
        match self {
            TransformKind::Identity => IdentityTransform.transform(r),
            TransformKind::Poly(x) => x.transform(r),
            TransformKind::Morse(x) => x.transform(r),
        }
    }

    fn transform_d(&self, r: T) -> T {
        match self {
            TransformKind::Identity => Transform::<T>::transform_d(&IdentityTransform, r),
            TransformKind::Poly(x) => x.transform_d(r),
            TransformKind::Morse(x) => x.transform_d(r),
        }
    }

    fn transform_dd(&self, r: T) -> T {
        match self {
            TransformKind::Identity => Transform::<T>::transform_dd(&IdentityTransform, r),
            TransformKind::Poly(x) => x.transform_dd(r),
            TransformKind::Morse(x) => x.transform_dd(r),
        }
    }

    fn inverse(&self, t: T) -> T {
        match self {
            TransformKind::Identity => IdentityTransform.inverse(t),
            TransformKind::Poly(x) => x.inverse(t),
            TransformKind::Morse(x) => x.inverse(t),
        }
    }
}

//------------------------------------------------------------------

/// A [`Basis`] composed with a coordinate transform, evaluated in `r`.
///
/// `evaluate(r) = basis.evaluate(trans(r))`, and derivatives follow from the
/// chain rule.  Second derivatives go through the basis' second-order rules
/// with `dt = trans'(r)` and `ddt = trans''(r)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedBasis<T: Real, Tr> {
    basis: Basis<T>,
    trans: Tr,
}

impl<T: Real, Tr: Transform<T>> TransformedBasis<T, Tr> {
    pub fn new(basis: Basis<T>, trans: Tr) -> Self {
        TransformedBasis { basis, trans }
    }

    /// Build a basis on a uniform grid in the transformed coordinate between
    /// `trans(rin)` and `trans(rcut)`, with envelope powers `pcut` at the outer
    /// cutoff and `pin` at the inner one.
    pub fn discretize(
        degree: usize,
        trans: Tr,
        rcut: T,
        rin: T,
        pcut: i32,
        pin: i32,
        num_quadrature: usize,
    ) -> Result<Self, BasisError> {
        let basis = discretize(degree, pcut, rcut, pin, rin, num_quadrature, &trans)?;
        Ok(TransformedBasis { basis, trans })
    }

    pub fn basis(&self) -> &Basis<T> { &self.basis }
    pub fn transform(&self) -> &Tr { &self.trans }
    pub fn len(&self) -> usize { self.basis.len() }
    pub fn is_empty(&self) -> bool { self.basis.is_empty() }

    pub fn evaluate(&self, r: T) -> Vec<T> {
        self.basis.evaluate(self.trans.transform(r))
    }

    pub fn evaluate_d(&self, r: T) -> Vec<T> { self.evaluate_ed(r).1 }

    pub fn evaluate_ed(&self, r: T) -> (Vec<T>, Vec<T>) {
        let t = self.trans.transform(r);
        self.basis.forward_rule(t, self.trans.transform_d(r))
    }

    pub fn evaluate_dd(&self, r: T) -> Vec<T> { self.evaluate_ed2(r).2 }

    pub fn evaluate_ed2(&self, r: T) -> (Vec<T>, Vec<T>, Vec<T>) {
        let (t, dt, ddt) = self.trans.transform_ed2(r);
        let (P, mut dP, mut ddP) = self.basis.evaluate_ed2(t);
        for (d, dd) in dP.iter_mut().zip(&mut ddP) {
            *dd = *dd * dt * dt + *d * ddt;
            *d = *d * dt;
        }
        (P, dP, ddP)
    }

    pub fn evaluate_into(&self, r: T, maxn: Option<usize>, out: &mut [T]) -> Result<(), BasisError> {
        self.basis.evaluate_into(self.trans.transform(r), maxn, out)
    }

    pub fn evaluate_ed_into(
        &self,
        r: T,
        maxn: Option<usize>,
        out: &mut [T],
        out_d: &mut [T],
    ) -> Result<(), BasisError> {
        let t = self.trans.transform(r);
        self.basis.forward_rule_into(t, self.trans.transform_d(r), maxn, out, out_d)
    }

    /// Values and derivatives along a tangent `dr` of the physical coordinate.
    pub fn forward_rule(&self, r: T, dr: T) -> (Vec<T>, Vec<T>) {
        let t = self.trans.transform(r);
        self.basis.forward_rule(t, self.trans.transform_d(r) * dr)
    }

    /// `Σ_n w_n dP_n/dr`.
    pub fn reverse_rule_1(&self, r: T, cotangent: &[T]) -> Result<T, BasisError> {
        let t = self.trans.transform(r);
        Ok(self.basis.reverse_rule_1(t, cotangent)? * self.trans.transform_d(r))
    }

    /// `Σ_n w_n d²P_n/dr²`.
    pub fn reverse_rule_2(&self, r: T, cotangent: &[T]) -> Result<T, BasisError> {
        let (t, dt, ddt) = self.trans.transform_ed2(r);
        self.basis.reverse_rule_2(t, cotangent, dt, ddt)
    }
}

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Construction of the recurrence by discretized Stieltjes orthogonalization.

#![allow(non_snake_case)]

use crate::{Real, Basis, BasisError, Envelope, Transform};
use crate::basis::check_powers;
use itertools::zip_eq;

/// Build an orthonormal basis of `degree` members from an explicit measure.
///
/// `pcut`/`tcut` and `pin`/`tin` are the envelope powers at the outer and inner
/// cutoffs in the transformed coordinate.  Either may be the larger coordinate;
/// the powers follow their boundaries when the domain is put in order.
///
/// `weights` need not be normalized.  Samples outside the domain are allowed
/// but produce a warning, since the envelope then clips part of the measure.
pub fn build<T: Real>(
    degree: usize,
    pcut: i32,
    tcut: T,
    pin: i32,
    tin: T,
    samples: Vec<T>,
    weights: Vec<T>,
) -> Result<Basis<T>, BasisError> {
    if degree == 0 {
        return Err(BasisError::ZeroDegree);
    }
    check_powers(pin, pcut)?;
    let envelope = match tin <= tcut {
        true => Envelope { pl: pin, tl: tin, pr: pcut, tr: tcut },
        false => Envelope { pl: pcut, tl: tcut, pr: pin, tr: tin },
    };
    let tdf = samples;
    let ww = normalize_weights(&tdf, weights)?;

    check_support(&envelope, &tdf);
    debug!(
        "orthogonalizing {} polynomials on [{:?}, {:?}] with {} samples (powers: {}, {})",
        degree, envelope.tl, envelope.tr, tdf.len(), envelope.pl, envelope.pr,
    );

    let mut A = Vec::with_capacity(degree);
    let mut B = Vec::with_capacity(degree);
    let mut C = Vec::with_capacity(degree);

    // Values of the two most recent members on the sample points.
    let mut J_prev: Vec<T> = tdf.iter().map(|&t| envelope.value(t)).collect();
    let a = norm(&ww, &J_prev);
    check_norm(a, 1)?;
    scale(&mut J_prev, a.recip());
    A.push(a.recip());
    B.push(T::zero());
    C.push(T::zero());

    let mut J_prev2 = vec![T::zero(); tdf.len()];
    for n in 2..=degree {
        // tJ = t * J_{n-1}; remove its components along J_{n-1} and J_{n-2}
        let tJ: Vec<T> = zip_eq(&tdf, &J_prev).map(|(&t, &j)| t * j).collect();
        let b = inner(&ww, &tJ, &J_prev);
        let c = match n {
            2 => T::zero(),
            _ => inner(&ww, &tJ, &J_prev2),
        };

        let mut J_next: Vec<T> = {
            zip_eq(zip_eq(&tJ, &J_prev), &J_prev2)
                .map(|((&tj, &j1), &j2)| tj - b * j1 - c * j2)
                .collect()
        };
        let a = norm(&ww, &J_next);
        check_norm(a, n)?;
        scale(&mut J_next, a.recip());

        A.push(a.recip());
        B.push(-b / a);
        C.push(-c / a);
        trace!("recurrence member {}: a = {:?}, b = {:?}, c = {:?}", n, a, b, c);

        J_prev2 = std::mem::replace(&mut J_prev, J_next);
    }

    Basis::from_parts(envelope, A, B, C, tdf, ww)
}

/// Build a basis from a uniform grid in the transformed coordinate.
///
/// The cutoffs `rcut` and `rin` are physical coordinates; they are mapped
/// through `trans` and the interval between them is discretized with the
/// midpoint rule on `num_quadrature` points of equal weight.
pub fn discretize<T: Real>(
    degree: usize,
    pcut: i32,
    rcut: T,
    pin: i32,
    rin: T,
    num_quadrature: usize,
    trans: &impl Transform<T>,
) -> Result<Basis<T>, BasisError> {
    if num_quadrature == 0 {
        return Err(BasisError::EmptyMeasure);
    }
    let tcut = trans.transform(rcut);
    let tin = trans.transform(rin);
    let (tl, tr) = match tin <= tcut {
        true => (tin, tcut),
        false => (tcut, tin),
    };

    let count = T::from_count(num_quadrature)?;
    let step = (tr - tl) / count;
    let half = T::lit(0.5);
    let samples = {
        (0..num_quadrature)
            .map(|i| T::from_count(i).map(|i| tl + (i + half) * step))
            .collect::<Result<Vec<_>, _>>()?
    };
    let weights = vec![count.recip(); num_quadrature];

    build(degree, pcut, tcut, pin, tin, samples, weights)
}

fn normalize_weights<T: Real>(tdf: &[T], mut ww: Vec<T>) -> Result<Vec<T>, BasisError> {
    if tdf.len() != ww.len() {
        return Err(BasisError::MismatchedMeasure { points: tdf.len(), weights: ww.len() });
    }
    if ww.is_empty() {
        return Err(BasisError::EmptyMeasure);
    }
    if let Some(index) = ww.iter().position(|&w| !(w >= T::zero()) || !w.is_finite()) {
        return Err(BasisError::NegativeWeight { index });
    }

    let total = ww.iter().fold(T::zero(), |acc, &w| acc + w);
    if !(total > T::zero()) || !total.is_finite() {
        return Err(BasisError::DegenerateMeasure {
            weight_sum: total.to_f64().unwrap_or(std::f64::NAN),
        });
    }
    for w in &mut ww {
        *w = *w / total;
    }
    Ok(ww)
}

fn check_support<T: Real>(envelope: &Envelope<T>, tdf: &[T]) {
    let lo = tdf.iter().cloned().fold(T::infinity(), T::min);
    let hi = tdf.iter().cloned().fold(T::neg_infinity(), T::max);
    if lo < envelope.tl || hi > envelope.tr {
        warn!(
            "sample points span [{:?}, {:?}], which leaves the basis domain [{:?}, {:?}]; \
             the basis will extrapolate outside its training support",
            lo, hi, envelope.tl, envelope.tr,
        );
    }
}

fn check_norm<T: Real>(a: T, n: usize) -> Result<(), BasisError> {
    match a > T::zero() && a.is_finite() {
        true => Ok(()),
        false => Err(BasisError::SingularRecurrence { n }),
    }
}

fn inner<T: Real>(ww: &[T], f: &[T], g: &[T]) -> T {
    zip_eq(zip_eq(ww, f), g).fold(T::zero(), |acc, ((&w, &f), &g)| acc + w * f * g)
}

fn norm<T: Real>(ww: &[T], f: &[T]) -> T { inner(ww, f, f).sqrt() }

fn scale<T: Real>(f: &mut [T], factor: T) {
    for x in f {
        *x = *x * factor;
    }
}

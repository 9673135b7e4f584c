/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Finite-difference derivatives.
//!
//! Exported so that users of a basis can check the analytic derivatives of
//! whatever they build on top of it.

use crate::Real;

/// Approximation method for a numerical 1D derivative.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerivativeKind {
    /// n-point central stencil. `n` must be odd. Only implemented for `n = 3, 5, 7`.
    Stencil(u32),
}

impl DerivativeKind {
    /// Alias for `DerivativeKind::Stencil(3)`.
    #[allow(bad_style)]
    pub const CentralDifference: Self = DerivativeKind::Stencil(3);
}

impl Default for DerivativeKind {
    fn default() -> DerivativeKind { DerivativeKind::Stencil(5) }
}

enum Never {}

/// Numerical first derivative of `value_fn` at `point`.
pub fn slope<T: Real>(
    step: T,
    kind: Option<DerivativeKind>,
    point: T,
    mut value_fn: impl FnMut(T) -> T,
) -> T {
    try_slope::<T, Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

/// Numerical second derivative of `value_fn` at `point`.
pub fn diff_2<T: Real>(
    step: T,
    kind: Option<DerivativeKind>,
    point: T,
    mut value_fn: impl FnMut(T) -> T,
) -> T {
    try_diff_2::<T, Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

// (offset, coefficient) pairs, followed by the denominator in units of step^k.
type Stencil = (&'static [(f64, f64)], f64);

fn slope_stencil(n: u32) -> Stencil {
    match n {
        3 => (&[(-1.0, -1.0), (1.0, 1.0)], 2.0),
        5 => (&[(-2.0, 1.0), (-1.0, -8.0), (1.0, 8.0), (2.0, -1.0)], 12.0),
        7 => (&[
            (-3.0, -1.0), (-2.0, 9.0), (-1.0, -45.0),
            (1.0, 45.0), (2.0, -9.0), (3.0, 1.0),
        ], 60.0),
        n => bad_stencil(n),
    }
}

fn diff_2_stencil(n: u32) -> Stencil {
    match n {
        3 => (&[(-1.0, 1.0), (0.0, -2.0), (1.0, 1.0)], 1.0),
        5 => (&[(-2.0, -1.0), (-1.0, 16.0), (0.0, -30.0), (1.0, 16.0), (2.0, -1.0)], 12.0),
        7 => (&[
            (-3.0, 2.0), (-2.0, -27.0), (-1.0, 270.0), (0.0, -490.0),
            (1.0, 270.0), (2.0, -27.0), (3.0, 2.0),
        ], 180.0),
        n => bad_stencil(n),
    }
}

fn bad_stencil(n: u32) -> ! {
    if n < 3 || n % 2 == 0 {
        panic!("{}-point stencil does not exist", n);
    }
    panic!("{}-point stencil is not implemented", n);
}

fn stencil_sum<T: Real, E>(
    (terms, _): Stencil,
    point: T,
    step: T,
    mut value_fn: impl FnMut(T) -> Result<T, E>,
) -> Result<T, E> {
    let mut acc = T::zero();
    for &(offset, coeff) in terms {
        acc = acc + T::lit(coeff) * value_fn(point + T::lit(offset) * step)?;
    }
    Ok(acc)
}

/// `slope` for functions that can fail.
pub fn try_slope<T: Real, E, F>(
    step: T,
    kind: Option<DerivativeKind>,
    point: T,
    value_fn: F,
) -> Result<T, E>
where
    F: FnMut(T) -> Result<T, E>,
{
    // http://www.holoborodko.com/pavel/numerical-methods/numerical-derivative/central-differences/
    let DerivativeKind::Stencil(n) = kind.unwrap_or_default();
    let stencil = slope_stencil(n);
    let numer = stencil_sum(stencil, point, step, value_fn)?;
    Ok(numer / (T::lit(stencil.1) * step))
}

/// `diff_2` for functions that can fail.
pub fn try_diff_2<T: Real, E, F>(
    step: T,
    kind: Option<DerivativeKind>,
    point: T,
    value_fn: F,
) -> Result<T, E>
where
    F: FnMut(T) -> Result<T, E>,
{
    let DerivativeKind::Stencil(n) = kind.unwrap_or_default();
    let stencil = diff_2_stencil(n);
    let numer = stencil_sum(stencil, point, step, value_fn)?;
    Ok(numer / (T::lit(stencil.1) * step * step))
}

//---------------------------------------------------------

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::util::uniform;

    // coefficients in increasing order of power
    struct Polynomial(Vec<f64>);

    impl Polynomial {
        fn random(degree: u32, max_coeff: f64) -> Self {
            Polynomial((0..=degree).map(|_| uniform(-max_coeff, max_coeff)).collect())
        }

        fn evaluate(&self, x: f64) -> f64 {
            self.0.iter().rev().fold(0.0, |acc, &c| acc * x + c)
        }

        fn derivative(&self) -> Self {
            Polynomial(self.0.iter().enumerate().skip(1).map(|(k, &c)| k as f64 * c).collect())
        }
    }

    #[test]
    fn num_diff() {
        for n in vec![3, 5, 7] {
            for _ in 0..10 {
                // n-point stencil is exact for polynomials up to order n-1
                let poly = Polynomial::random(n - 1, 2.0);
                let x = uniform(-10.0, 10.0);

                let expected = poly.derivative().evaluate(x);
                let actual = slope(1e-1, Some(DerivativeKind::Stencil(n)), x, |x| poly.evaluate(x));
                assert_close!(abs=1e-8, rel=1e-8, expected, actual, "{}-point", n);
            }
        }
    }

    #[test]
    fn num_diff_2() {
        for n in vec![3, 5, 7] {
            for _ in 0..10 {
                let poly = Polynomial::random(n - 1, 2.0);
                let x = uniform(-10.0, 10.0);

                let expected = poly.derivative().derivative().evaluate(x);
                let actual = diff_2(1e-1, Some(DerivativeKind::Stencil(n)), x, |x| poly.evaluate(x));
                assert_close!(abs=1e-6, rel=1e-7, expected, actual, "{}-point", n);
            }
        }
    }

    #[test]
    fn failure_propagates() {
        let res = try_slope(1e-2, None, 0.0, |x: f64| if x > 0.015 { Err(x) } else { Ok(x) });
        assert_eq!(res, Err(0.02));
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn even_stencil() {
        slope(1e-2, Some(DerivativeKind::Stencil(4)), 0.0, |x: f64| x);
    }
}

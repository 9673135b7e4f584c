/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#[macro_use] extern crate orthbasis_assert_close;

use orthbasis_poly::{discretize, IdentityTransform};

// With no envelope and a uniform measure on [-1, 1], the basis is the
// Legendre family normalized against dx/2, i.e. sqrt(2n + 1) P_n.
fn legendre_basis() -> orthbasis_poly::Basis {
    discretize(5, 0, 1.0, 0, -1.0, 1000, &IdentityTransform).unwrap()
}

#[test]
fn values_at_zero() {
    let basis = legendre_basis();
    let expected = [
        1.0,
        0.0,
        -0.5 * 5f64.sqrt(),
        0.0,
        0.375 * 3.0,
    ];
    assert_close!(abs=1e-4, basis.evaluate(0.0), expected.to_vec());
}

#[test]
fn slopes_at_zero() {
    let basis = legendre_basis();
    let expected = [
        0.0,
        3f64.sqrt(),
        0.0,
        -1.5 * 7f64.sqrt(),
        0.0,
    ];
    assert_close!(abs=1e-4, basis.evaluate_d(0.0), expected.to_vec());
}

#[test]
fn values_at_endpoint() {
    // P_n(1) = 1 for every n
    let basis = legendre_basis();
    let expected: Vec<f64> = (0..5).map(|n| (2.0 * n as f64 + 1.0).sqrt()).collect();
    assert_close!(rel=1e-4, abs=1e-4, basis.evaluate(1.0), expected);
}

#[test]
fn symmetric_measure_gives_parity() {
    let basis = legendre_basis();
    for &b in basis.coeffs_b() {
        assert_close!(abs=1e-12, b, 0.0);
    }
    let t = 0.37;
    let (plus, minus) = (basis.evaluate(t), basis.evaluate(-t));
    for n in 0..5 {
        let sign = if n % 2 == 0 { 1.0 } else { -1.0 };
        assert_close!(abs=1e-10, plus[n], sign * minus[n], "n = {}", n);
    }
}

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Checks that run after deserialization, and construction from checked settings.

use crate::settings::*;
use crate::FailResult;
use orthbasis_poly::{TransformKind, TransformedBasis};

impl BasisSettings {
    pub fn validate(self) -> FailResult<ValidatedBasisSettings> {
        ensure!(self.degree > 0, "basis degree must be at least 1");
        ensure!(
            self.num_quadrature >= 2,
            "num-quadrature must be at least 2 (got {})", self.num_quadrature,
        );
        ensure!(
            self.rin.is_finite() && self.rcut.is_finite(),
            "cutoffs must be finite (rin = {}, rcut = {})", self.rin, self.rcut,
        );
        ensure!(
            self.rin < self.rcut,
            "inner cutoff must be below the outer cutoff (rin = {}, rcut = {})", self.rin, self.rcut,
        );
        ensure!(self.pcut >= 0, "pcut must be non-negative (got {})", self.pcut);
        ensure!(self.pin >= 0, "pin must be non-negative (got {})", self.pin);
        check_transform(&self.transform, self.rin)?;

        if self.num_quadrature < 2 * self.degree {
            warn!(
                "only {} quadrature points for a basis of degree {}; expect poor orthogonality",
                self.num_quadrature, self.degree,
            );
        }
        Ok(ValidatedBasisSettings(self))
    }
}

impl TabulateSettings {
    pub fn validate(self) -> FailResult<ValidatedTabulateSettings> {
        let TabulateSettings { basis, table } = self;
        ensure!(table.points >= 2, "table needs at least 2 points (got {})", table.points);
        Ok(ValidatedTabulateSettings { basis: basis.validate()?, table })
    }
}

fn check_transform(trans: &TransformKind, rin: f64) -> FailResult<()> {
    match *trans {
        TransformKind::Identity => {},
        TransformKind::Poly(ref poly) => {
            ensure!(poly.p > 0.0, "poly transform needs p > 0 (got {})", poly.p);
            ensure!(poly.r0 > -1.0, "poly transform needs r0 > -1 (got {})", poly.r0);
            ensure!(rin > -1.0, "poly transform is singular at r = -1 (rin = {})", rin);
        },
        TransformKind::Morse(ref morse) => {
            ensure!(morse.lambda > 0.0, "morse transform needs lambda > 0 (got {})", morse.lambda);
            ensure!(morse.r0 > 0.0, "morse transform needs r0 > 0 (got {})", morse.r0);
        },
    }
    Ok(())
}

impl ValidatedBasisSettings {
    /// Build the basis these settings describe.
    pub fn build(&self) -> FailResult<TransformedBasis<f64, TransformKind>> {
        let s = &self.0;
        info!(
            "building basis: degree {}, r in [{}, {}], powers (pin {}, pcut {}), {} points, {:?}",
            s.degree, s.rin, s.rcut, s.pin, s.pcut, s.num_quadrature, s.transform,
        );
        let basis = TransformedBasis::discretize(
            s.degree, s.transform, s.rcut, s.rin, s.pcut, s.pin, s.num_quadrature,
        )?;
        Ok(basis)
    }
}

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

// NOTE: Deserialize these through YamlRead, never serde_yaml directly,
//       so that typos in settings files get reported.

use orthbasis_poly::TransformKind;

/// How to build a basis from a cutoff interval in the physical coordinate.
///
/// # Example:
///
/// ```yaml
/// degree: 8
/// rcut: 5.0
/// rin: 0.8
/// pcut: 2
/// transform:
///   morse: { lambda: 2.5, r0: 1.1 }
/// ```
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BasisSettings {
    /// Number of basis functions.
    pub degree: usize,

    /// Envelope power at the outer cutoff.
    #[serde(default = "_basis_settings__pcut")]
    pub pcut: i32,

    /// Envelope power at the inner cutoff.  0 leaves that side unconstrained.
    #[serde(default)]
    pub pin: i32,

    /// Outer cutoff, in the physical coordinate.
    pub rcut: f64,

    /// Inner cutoff, in the physical coordinate.
    #[serde(default)]
    pub rin: f64,

    /// Number of midpoint-rule points in the transformed coordinate.
    #[serde(default = "_basis_settings__num_quadrature")]
    pub num_quadrature: usize,

    /// Map from the physical to the transformed coordinate.
    #[serde(default)]
    pub transform: TransformKind,
}
derive_yaml_read!{BasisSettings}

fn _basis_settings__pcut() -> i32 { 2 }
fn _basis_settings__num_quadrature() -> usize { 1000 }

/// Output grid for `orthbasis-tabulate`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TableSettings {
    /// Number of equispaced rows over `[rin, rcut]`, endpoints included.
    #[serde(default = "_table_settings__points")]
    pub points: usize,
}
fn _table_settings__points() -> usize { 11 }

/// Root of the settings file read by `orthbasis-tabulate`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct TabulateSettings {
    pub basis: BasisSettings,

    #[serde(default)]
    pub table: TableSettings,
}
derive_yaml_read!{TabulateSettings}

/// `BasisSettings` that passed [`BasisSettings::validate`].
#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBasisSettings(pub(crate) BasisSettings);

impl ValidatedBasisSettings {
    pub fn get(&self) -> &BasisSettings { &self.0 }
}

#[derive(Serialize)]
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTabulateSettings {
    pub basis: ValidatedBasisSettings,
    pub table: TableSettings,
}

// --------------------------------------------------------

impl Default for TableSettings {
    fn default() -> Self { TableSettings { points: _table_settings__points() } }
}

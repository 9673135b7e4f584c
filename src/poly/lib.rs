/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Orthonormal polynomial bases for radial descriptors.
//!
//! A [`Basis`] is a family of polynomials `P_1, ..., P_N` in a transformed
//! coordinate `t`, orthonormal with respect to a discretized measure and
//! multiplied by a power-law envelope that vanishes at the cutoffs.
//! It is built once (see [`build`] and [`discretize`]) and then evaluated
//! through a three-term recurrence.
//!
//! Besides values and derivatives, the basis provides forward- and
//! reverse-mode rules so that it can sit underneath an outer coordinate
//! transform (see [`TransformedBasis`]) without ever forming a Jacobian.

#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate orthbasis_assert_close;

use std::fmt::Debug;
use num_traits::{Float, NumCast};

mod error;
mod envelope;
mod basis;
mod construct;
mod eval;
mod rules;
mod record;
pub mod scratch;
pub mod transform;
pub mod sampling;
pub mod numerical;
#[cfg(test)] pub(crate) mod util;

pub use crate::error::{BasisError, Side};
pub use crate::envelope::Envelope;
pub use crate::basis::Basis;
pub use crate::construct::{build, discretize};
pub use crate::record::{BasisRecord, RECORD_ID};
pub use crate::scratch::{ScratchPool, Scratch, with_local_pool};
pub use crate::transform::{
    Transform, TransformKind, TransformedBasis,
    IdentityTransform, PolyTransform, MorseTransform,
};

/// The scalar types a basis can be built over.
///
/// Everything the recurrence needs (arithmetic, comparison, `sqrt`, `powi`)
/// comes from `num_traits::Float`.
pub trait Real: Float + Debug + Send + Sync + 'static {
    /// Convert an `f64` constant. Types that cannot represent it get NaN,
    /// which then shows up in any output that depends on it.
    #[inline]
    fn lit(x: f64) -> Self {
        <Self as NumCast>::from(x).unwrap_or_else(Self::nan)
    }

    /// Convert a count (e.g. a number of samples).
    #[inline]
    fn from_count(n: usize) -> Result<Self, BasisError> {
        <Self as NumCast>::from(n).ok_or(BasisError::Conversion)
    }
}

impl<T: Float + Debug + Send + Sync + 'static> Real for T {}

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use std::fmt;

/// Which end of the domain an envelope power belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side { Left, Right }

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Violated preconditions of construction and evaluation.
///
/// Construction errors are fatal; no basis is produced.  Evaluation errors
/// are reported before any output buffer is written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BasisError {
    #[error("basis degree must be at least 1")]
    ZeroDegree,

    #[error("envelope power on the {side} boundary must be non-negative (got {power})")]
    NegativePower { side: Side, power: i32 },

    #[error("the discretized measure has no sample points")]
    EmptyMeasure,

    #[error("measure has {points} sample points but {weights} weights")]
    MismatchedMeasure { points: usize, weights: usize },

    #[error("weight {index} of the measure is negative or not finite")]
    NegativeWeight { index: usize },

    #[error("total weight of the measure must be positive (got {weight_sum:e})")]
    DegenerateMeasure { weight_sum: f64 },

    #[error("recurrence is singular at member {n}: the measure cannot support this many polynomials")]
    SingularRecurrence { n: usize },

    #[error("domain boundaries are out of order (tl = {tl}, tr = {tr})")]
    InvertedDomain { tl: f64, tr: f64 },

    #[error("requested {requested} basis functions but the basis only has {available}")]
    PrefixTooLong { requested: usize, available: usize },

    #[error("output buffer of length {len} cannot hold {needed} values")]
    BufferTooShort { needed: usize, len: usize },

    #[error("cotangent has {len} entries but the basis only has {size} members")]
    CotangentTooLong { len: usize, size: usize },

    #[error("sampling from the training measure requires uniform weights")]
    NonUniformWeights,

    #[error("malformed basis record: {0}")]
    BadRecord(String),

    #[error("numeric conversion into the scalar type failed")]
    Conversion,
}

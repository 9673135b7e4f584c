/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Settings files for basis construction.
//!
//! All YAML parsing happens in this crate, through [`YamlRead`].

#[macro_use] pub extern crate failure;
#[macro_use] extern crate serde_derive;
#[macro_use] pub extern crate log;
#[cfg(test)] #[macro_use] extern crate orthbasis_assert_close;

pub use self::monomorphize::YamlRead;
#[macro_use]
mod monomorphize;

mod settings;
mod validation;

pub use self::settings::{
    BasisSettings, TableSettings, TabulateSettings,
    ValidatedBasisSettings, ValidatedTabulateSettings,
};

#[doc(hidden)] // used by macro
pub mod reexports {
    pub use crate::failure;
    pub use crate::log;
    pub use serde_ignored;
    pub use serde_yaml;
}

pub type FailResult<T> = Result<T, failure::Error>;

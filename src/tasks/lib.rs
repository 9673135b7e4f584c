/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! High-level code behind the binaries.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;
#[cfg(test)] #[macro_use] extern crate orthbasis_assert_close;

mod logging;
mod cmd;
pub mod entry_points;

pub use crate::logging::{GlobalLogger, ColorizedLevel};
pub use crate::cmd::{
    ConfiguredBasis, TableRow,
    table_grid, tabulate, write_table, write_record, run_tabulate,
};

pub use orthbasis_config::FailResult;

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use failure::Error;

use std::io::Read;

/// Reads a settings type from YAML, warning about keys that nothing consumed.
///
/// Implement it with [`derive_yaml_read!`]; the serde_yaml codegen for each
/// type then lives in the crate that invokes the macro, not in every caller.
pub trait YamlRead: for <'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, Error> {
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        YamlRead::from_yaml_str(&s)
    }

    fn from_yaml_str(s: &str) -> Result<Self, Error> {
        let value = value_from_str(s)?;

        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            // Errors that pass through serde_yaml::Value lose their location,
            // so parse the text again to get a useful message.
            Err(value_err) => match Self::__serde_yaml__from_str(s) {
                Err(e) => Err(e),
                Ok(_) => Err(value_err),
            },
        }
    }

    // provided methods get monomorphized lazily in the caller, so the
    // deserialization itself must sit in the impls generated by the macro
    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<Self, Error>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> Result<Self, Error>;
}

#[macro_export]
macro_rules! derive_yaml_read {
    ($Type:ty) => {
        const _: () = {
            use std::result::Result;
            use std::convert::Into;
            use $crate::reexports::serde_yaml;
            use $crate::reexports::serde_ignored;
            use $crate::reexports::failure::Error;
            use $crate::reexports::log::warn;

            impl $crate::YamlRead for $Type {
                fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<$Type, Error> {
                    serde_ignored::deserialize(
                        value,
                        |path| warn!("Unused config item (possible typo?): {}", path),
                    ).map_err(Into::into)
                }

                fn __serde_yaml__from_str(s: &str) -> Result<$Type, Error> {
                    serde_yaml::from_str(s)
                        .map_err(Into::into)
                }
            }
        };
    };
}

derive_yaml_read!{serde_yaml::Value}

fn value_from_str(r: &str) -> Result<serde_yaml::Value, Error>
{ serde_yaml::from_str(r).map_err(Into::into) }

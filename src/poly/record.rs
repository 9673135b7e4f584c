/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Persisted form of a [`Basis`].

use crate::{Real, Basis, BasisError, Envelope};
use serde::{Serialize, Serializer, Deserialize, Deserializer};

/// Type tag stored under `__id__`.
pub const RECORD_ID: &str = "orthbasis_OrthPolyBasis";

/// Plain-data representation of a [`Basis`], as written to disk.
///
/// Reading a record back with [`Basis::from_record`] gives a basis equal to
/// the original.
#[derive(Debug, Clone, PartialEq)]
#[derive(Serialize, Deserialize)]
pub struct BasisRecord<T = f64> {
    #[serde(rename = "__id__")]
    pub id: String,
    pub pl: i32,
    pub tl: T,
    pub pr: i32,
    pub tr: T,
    #[serde(rename = "A")]
    pub a: Vec<T>,
    #[serde(rename = "B")]
    pub b: Vec<T>,
    #[serde(rename = "C")]
    pub c: Vec<T>,
    pub tdf: Vec<T>,
    pub ww: Vec<T>,
}

impl<T: Real> Basis<T> {
    pub fn to_record(&self) -> BasisRecord<T> {
        let Envelope { pl, tl, pr, tr } = self.envelope;
        BasisRecord {
            id: RECORD_ID.to_string(),
            pl, tl, pr, tr,
            a: self.A.clone(),
            b: self.B.clone(),
            c: self.C.clone(),
            tdf: self.tdf.clone(),
            ww: self.ww.clone(),
        }
    }

    pub fn from_record(record: BasisRecord<T>) -> Result<Self, BasisError> {
        let BasisRecord { id, pl, tl, pr, tr, a, b, c, tdf, ww } = record;
        if id != RECORD_ID {
            return Err(BasisError::BadRecord(format!("unexpected type tag {:?}", id)));
        }

        let total = ww.iter().fold(T::zero(), |acc, &w| acc + w);
        if !ww.is_empty() && (total - T::one()).abs() > T::lit(1e-8) {
            warn!("weights in basis record sum to {:?} rather than 1", total);
        }

        Basis::from_parts(Envelope { pl, tl, pr, tr }, a, b, c, tdf, ww)
    }
}

impl<T: Real + Serialize> Serialize for Basis<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de, T: Real + Deserialize<'de>> Deserialize<'de> for Basis<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = BasisRecord::deserialize(deserializer)?;
        Basis::from_record(record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use crate::{discretize, PolyTransform};

    fn basis() -> Basis {
        let trans = PolyTransform { p: 2.0, r0: 1.0 };
        discretize(6, 2, 5.0, 1, 0.5, 300, &trans).unwrap()
    }

    #[test]
    fn json_round_trip() {
        let basis = basis();
        let json = serde_json::to_string(&basis).unwrap();
        let back: Basis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, basis);
        assert_eq!(back.sample_points(), basis.sample_points());
        assert_eq!(back.sample_weights(), basis.sample_weights());
        assert_eq!(back.evaluate(0.7), basis.evaluate(0.7));
    }

    #[test]
    fn record_fields() {
        let basis = basis();
        let value = serde_json::to_value(&basis).unwrap();
        assert_eq!(value["__id__"], RECORD_ID);
        assert_eq!(value["pl"], 2);
        assert_eq!(value["pr"], 1);
        assert_eq!(value["A"].as_array().unwrap().len(), 6);
        assert_eq!(value["tdf"].as_array().unwrap().len(), 300);
    }

    #[test]
    fn rejects_malformed() {
        let good = basis().to_record();

        let mut bad = good.clone();
        bad.id = "something_else".to_string();
        match Basis::from_record(bad) {
            Err(BasisError::BadRecord(_)) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut bad = good.clone();
        bad.c.pop();
        match Basis::from_record(bad) {
            Err(BasisError::BadRecord(_)) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut bad = good.clone();
        bad.pl = -2;
        match Basis::from_record(bad) {
            Err(BasisError::NegativePower { power: -2, .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut bad = good.clone();
        bad.ww.pop();
        match Basis::from_record(bad) {
            Err(BasisError::MismatchedMeasure { .. }) => {},
            r => panic!("unexpected: {:?}", r),
        }

        let mut json = serde_json::to_value(&good).unwrap();
        json["tl"] = serde_json::json!(10.0);
        assert!(serde_json::from_value::<Basis>(json).is_err());
    }
}

/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;

use orthbasis_config::{TableSettings, ValidatedTabulateSettings};
use orthbasis_poly::{Transform, TransformKind, TransformedBasis, with_local_pool};

use failure::ResultExt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub type ConfiguredBasis = TransformedBasis<f64, TransformKind>;

/// One line of the table: a physical coordinate, its image under the
/// transform, and every basis function there.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub r: f64,
    pub t: f64,
    pub values: Vec<f64>,
}

/// Equispaced points over `[rin, rcut]`, both ends included.
pub fn table_grid(rin: f64, rcut: f64, table: &TableSettings) -> Vec<f64> {
    let n = table.points;
    match n {
        0 => vec![],
        1 => vec![rin],
        _ => {
            let h = (rcut - rin) / (n - 1) as f64;
            // last point pinned to rcut so the outer envelope zero is hit exactly
            (0..n).map(|i| if i + 1 == n { rcut } else { rin + i as f64 * h }).collect()
        },
    }
}

pub fn tabulate(basis: &ConfiguredBasis, grid: &[f64]) -> FailResult<Vec<TableRow>> {
    with_local_pool(|pool| {
        grid.iter().map(|&r| -> FailResult<TableRow> {
            let t = basis.transform().transform(r);
            let values = basis.basis().evaluate_pooled(pool, t, None)?;
            Ok(TableRow { r, t, values: values.to_vec() })
        }).collect()
    })
}

pub fn write_table(mut w: impl Write, rows: &[TableRow]) -> FailResult<()> {
    if let Some(first) = rows.first() {
        write!(w, "# r t")?;
        for n in 1..=first.values.len() {
            write!(w, " P{}", n)?;
        }
        writeln!(w)?;
    }
    for row in rows {
        write!(w, "{:e} {:e}", row.r, row.t)?;
        for x in &row.values {
            write!(w, " {:e}", x)?;
        }
        writeln!(w)?;
    }
    w.flush()?;
    Ok(())
}

/// Save the basis record as JSON.
pub fn write_record(path: &Path, basis: &ConfiguredBasis) -> FailResult<()> {
    let file = File::create(path)
        .with_context(|_| format!("could not create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, basis.basis())?;
    writeln!(w)?;
    w.flush()?;
    Ok(())
}

/// Build the configured basis, tabulate it to `out`, and optionally save it.
pub fn run_tabulate(
    settings: &ValidatedTabulateSettings,
    record_path: Option<&Path>,
    out: impl Write,
) -> FailResult<ConfiguredBasis> {
    let basis = settings.basis.build()?;
    let s = settings.basis.get();
    let (tl, tr) = basis.basis().domain();
    info!("basis has {} functions on t in [{}, {}]", basis.len(), tl, tr);

    let grid = table_grid(s.rin, s.rcut, &settings.table);
    let rows = tabulate(&basis, &grid)?;
    write_table(out, &rows)?;
    debug!("wrote {} rows", rows.len());

    if let Some(path) = record_path {
        write_record(path, &basis)?;
        info!("saved basis record to {}", path.display());
    }
    Ok(basis)
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use orthbasis_config::{TabulateSettings, YamlRead};
    use orthbasis_poly::Basis;

    fn settings(points: usize) -> ValidatedTabulateSettings {
        TabulateSettings::from_yaml_str(&format!("
basis:
  degree: 4
  rcut: 3.0
  rin: 1.0
  pin: 2
  num-quadrature: 200
  transform:
    poly: {{ p: 2.0, r0: 1.5 }}
table:
  points: {}
", points)).unwrap().validate().unwrap()
    }

    #[test]
    fn grid_endpoints() {
        let grid = table_grid(1.0, 3.0, &TableSettings { points: 5 });
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0], 1.0);
        assert_eq!(grid[4], 3.0);
        assert_close!(grid[2], 2.0);
        assert_eq!(table_grid(1.0, 3.0, &TableSettings { points: 1 }), vec![1.0]);
    }

    #[test]
    fn table_matches_direct_evaluation() {
        let mut out = vec![];
        let basis = run_tabulate(&settings(7), None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 7);
        assert_eq!(lines[0], "# r t P1 P2 P3 P4");

        for line in &lines[1..] {
            let fields: Vec<f64> = line.split_whitespace().map(|s| s.parse().unwrap()).collect();
            assert_eq!(fields.len(), 2 + 4);
            assert_eq!(&fields[2..], &basis.evaluate(fields[0])[..]);
        }

        // both cutoffs carry a positive power
        let first: Vec<f64> = lines[1].split_whitespace().map(|s| s.parse().unwrap()).collect();
        let last: Vec<f64> = lines[7].split_whitespace().map(|s| s.parse().unwrap()).collect();
        assert!(first[2..].iter().chain(&last[2..]).all(|&x| x == 0.0));
    }

    #[test]
    fn record_is_written() {
        let dir = tempdir::TempDir::new("orthbasis-tasks").unwrap();
        let path = dir.path().join("basis.json");

        let basis = run_tabulate(&settings(3), Some(&path), std::io::sink()).unwrap();
        let saved: Basis = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(&saved, basis.basis());
    }
}

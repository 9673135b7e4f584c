/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use failure::Error;
use orthbasis_config::{TabulateSettings, YamlRead};
use orthbasis_poly::{Basis, RECORD_ID};
use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Output};

const SETTINGS: &str = "\
basis:
  degree: 4
  rcut: 5.0
  rin: 1.0
  pin: 1
  num-quadrature: 400
  transform:
    morse: { lambda: 1.5, r0: 1.2 }
  unknown-key: 3
table:
  points: 7
";

fn run(dir: &Path, args: &[&str]) -> Result<Output, Error> {
    let settings = dir.join("settings.yaml");
    fs::write(&settings, SETTINGS)?;
    let output = {
        Command::new(env!("CARGO_BIN_EXE_orthbasis-tabulate"))
            .current_dir(dir)
            .arg("-c").arg(&settings)
            .args(args)
            .output()?
    };
    Ok(output)
}

#[test]
fn prints_table_and_saves_record() -> Result<(), Error> {
    let dir = tempdir::TempDir::new("orthbasis-cli")?;
    let output = run(dir.path(), &["-o", "basis.json", "--points", "5"])?;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout)?;
    let lines: Vec<_> = stdout.lines().collect();
    assert_eq!(lines.len(), 1 + 5);
    assert_eq!(lines[0], "# r t P1 P2 P3 P4");
    assert!(lines[1].starts_with("1e0 "), "{}", lines[1]);
    assert!(lines[5].starts_with("5e0 "), "{}", lines[5]);

    // the unknown key is reported but not fatal
    let stderr = String::from_utf8(output.stderr)?;
    assert!(stderr.contains("unknown-key"), "{}", stderr);

    let value: serde_json::Value = serde_json::from_reader(File::open(dir.path().join("basis.json"))?)?;
    assert_eq!(value["__id__"], RECORD_ID);
    let basis: Basis = serde_json::from_value(value)?;
    assert_eq!(basis.len(), 4);
    assert_eq!(basis.powers(), (2, 1));

    // same settings, built in-process
    let expected = TabulateSettings::from_yaml_str(SETTINGS)?.validate()?.basis.build()?;
    assert_eq!(&basis, expected.basis());
    Ok(())
}

#[test]
fn reports_invalid_settings() -> Result<(), Error> {
    let dir = tempdir::TempDir::new("orthbasis-cli")?;
    let output = run(dir.path(), &["--points", "1"])?;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let output = run(dir.path(), &["--points", "lots"])?;
    assert!(!output.status.success());
    Ok(())
}

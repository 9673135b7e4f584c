/* ************************************************************************ **
** This file is part of orthbasis, and is licensed under EITHER the MIT     **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::logging::GlobalLogger;
use crate::cmd::run_tabulate;

use orthbasis_config::{TabulateSettings, YamlRead};

use clap::{App, Arg, ArgMatches};
use failure::ResultExt;
use std::ffi::OsStr;
use std::fs::File;
use std::path::Path;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        for cause in e.iter_chain() {
            error!("{}", cause);
        }

        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        }
        std::process::exit(1);
    });
}

fn tabulate_app<'a, 'b>() -> App<'a, 'b> {
    App::new("orthbasis-tabulate")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build an orthonormal basis from a settings file and print it on a grid.")
        .args(&[
            Arg::with_name("config")
                .short("c").long("config").value_name("CONFIG")
                .takes_value(true).required(true)
                .help("settings yaml, with a 'basis' section and an optional 'table' section"),
            Arg::with_name("output")
                .short("o").long("output").value_name("OUTPUT")
                .takes_value(true)
                .help("also save the basis record to this JSON file"),
            Arg::with_name("points")
                .long("points").value_name("N")
                .takes_value(true)
                .help("number of table rows (overrides table.points)"),
            Arg::with_name("log")
                .long("log").value_name("LOGFILE")
                .takes_value(true)
                .help("append log output to this file"),
            Arg::with_name("verbose")
                .short("v").long("verbose")
                .multiple(true)
                .help("log more detail (repeatable)"),
        ])
}

/// Arguments of `orthbasis-tabulate`, after parsing.
#[derive(Debug, Clone, PartialEq)]
struct TabulateArgs<'a> {
    config: &'a Path,
    output: Option<&'a Path>,
    points: Option<usize>,
}

impl<'a> TabulateArgs<'a> {
    fn resolve(m: &'a ArgMatches<'_>) -> FailResult<Self> {
        let points = match m.value_of("points") {
            Some(s) => Some(s.parse::<usize>().with_context(|_| format!("invalid value for --points: {:?}", s))?),
            None => None,
        };
        Ok(TabulateArgs {
            config: m.value_of_os("config").map(Path::new)
                .ok_or_else(|| format_err!("missing --config"))?,
            output: m.value_of_os("output").map(Path::new),
            points,
        })
    }
}

fn read_tabulate_settings(args: &TabulateArgs<'_>) -> FailResult<TabulateSettings> {
    let file = File::open(args.config)
        .with_context(|_| format!("could not open {}", args.config.display()))?;
    let mut settings = TabulateSettings::from_reader(file)
        .with_context(|_| format!("while reading {}", args.config.display()))?;
    if let Some(points) = args.points {
        settings.table.points = points;
    }
    Ok(settings)
}

// %% CRATES: binary: orthbasis-tabulate %%
pub fn tabulate() {
    wrap_result_main(|| {
        let matches = tabulate_app().get_matches();

        let mut logger = GlobalLogger::default();
        logger.verbosity(matches.occurrences_of("verbose") as i32);
        if let Some(path) = matches.value_of_os("log") {
            logger.path(path);
        }
        logger.apply()?;

        let args = TabulateArgs::resolve(&matches)?;

        let settings = read_tabulate_settings(&args)?.validate()?;
        let stdout = std::io::stdout();
        run_tabulate(&settings, args.output, stdout.lock())?;
        Ok(())
    });
}

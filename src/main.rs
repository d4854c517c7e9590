// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

//! Compute Bayesian limits on the number of pulsars in the Galactic center
//! for a given survey and magnetar fraction(s).
//!
//! For every magnetar fraction, one line `f mean mode lower median upper`
//! (lognormal luminosity function) is printed to standard output, so that
//! runs can be appended into a table. A labeled report for both the
//! lognormal and power-law models goes to standard error.

#[macro_use] extern crate clap;
extern crate galcenbayes;
#[macro_use] extern crate slog;
extern crate slog_async;
extern crate slog_term;

use clap::{Arg, ArgAction, ArgMatches, Command};
use clap::error::ErrorKind;
use galcenbayes::{Error, Result, SurveyParameters, analyze, fraction_sweep, output};
use slog::{Drain, Level, Logger};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

/// The exit code of a failed detection-probability sanity check.
const SANITY_EXIT_CODE: i32 = 255;


fn make_app() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Compute the posterior on the number of Galactic center pulsars")
        .arg(Arg::new("SMIN")
             .help("The flux density limit of the survey, in mJy")
             .required(true)
             .allow_negative_numbers(true)
             .value_parser(value_parser!(f64))
             .index(1))
        .arg(Arg::new("NU")
             .help("The observing frequency, in GHz")
             .required(true)
             .allow_negative_numbers(true)
             .value_parser(value_parser!(f64))
             .index(2))
        .arg(Arg::new("BETA")
             .help("The exponent of the power-law luminosity function")
             .required(true)
             .allow_negative_numbers(true)
             .value_parser(value_parser!(f64))
             .index(3))
        .arg(Arg::new("N")
             .help("One more than the largest population size to consider")
             .required(true)
             .value_parser(value_parser!(usize))
             .index(4))
        .arg(Arg::new("F")
             .help("The magnetar fraction(s) to analyze")
             .required_unless_present("f_range")
             .allow_negative_numbers(true)
             .num_args(1..)
             .value_parser(value_parser!(f64))
             .index(5))
        .arg(Arg::new("f_range")
             .long("f-range")
             .help("Analyze the magnetar fractions START, START + STEP, ... up to STOP")
             .num_args(3)
             .value_names(["START", "STEP", "STOP"])
             .allow_negative_numbers(true)
             .value_parser(value_parser!(f64))
             .conflicts_with("F"))
        .arg(Arg::new("distribution")
             .long("distribution")
             .value_name("PATH")
             .help("Also write the full posterior distributions to this file")
             .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("verbose")
             .short('v')
             .long("verbose")
             .help("Log more details to standard error; may be repeated")
             .action(ArgAction::Count))
}


fn make_log(verbosity: u8) -> Logger {
    let level = match verbosity {
        0 => Level::Warning,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build().fuse();
    Logger::root(drain.filter_level(level).fuse(), o!())
}


fn get_f64(matches: &ArgMatches, name: &str) -> Result<f64> {
    matches.get_one::<f64>(name)
        .cloned()
        .ok_or_else(|| Error::Configuration(format!("missing argument {}", name)))
}


fn fractions(matches: &ArgMatches) -> Result<Vec<f64>> {
    if let Some(range) = matches.get_many::<f64>("f_range") {
        let r: Vec<f64> = range.cloned().collect();

        if r.len() == 3 {
            return fraction_sweep(r[0], r[1], r[2]);
        }
    }

    Ok(matches.get_many::<f64>("F")
       .map(|values| values.cloned().collect())
       .unwrap_or_else(Vec::new))
}


fn run(matches: &ArgMatches, log: &Logger) -> Result<()> {
    let smin = get_f64(matches, "SMIN")?;
    let nu = get_f64(matches, "NU")?;
    let beta = get_f64(matches, "BETA")?;
    let n_max = matches.get_one::<usize>("N")
        .cloned()
        .ok_or_else(|| Error::Configuration("missing argument N".to_owned()))?;

    let fractions = fractions(matches)?;

    if fractions.is_empty() {
        return Err(Error::Configuration("no magnetar fractions to analyze".to_owned()));
    }

    let mut table = match matches.get_one::<PathBuf>("distribution") {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let stdout = io::stdout();
    let stderr = io::stderr();

    for f in fractions {
        let params = SurveyParameters::new(smin, nu, beta, n_max, f);
        let analysis = analyze(&params, log)?;
        let summary = analysis.lognormal.summary();

        {
            let mut out = stdout.lock();
            writeln!(out, "{}", output::summary_line(f, &summary))?;
            out.flush()?;
        }

        output::write_report(&mut stderr.lock(), &analysis)?;

        if let Some(ref mut t) = table {
            output::write_distribution(t, &analysis)?;
        }

        info!(log, "finished magnetar fraction"; "f" => f, "mean" => summary.mean);
    }

    if let Some(mut t) = table {
        t.flush()?;
    }

    Ok(())
}


fn main_inner() -> i32 {
    let mut app = make_app();

    let matches = match app.try_get_matches_from_mut(std::env::args_os()) {
        Ok(m) => m,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                println!("{}", app.render_usage());
                return 0;
            }

            e.exit();
        },
    };

    let log = make_log(matches.get_count("verbose"));

    match run(&matches, &log) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("ERROR: {}", e);

            if e.is_sanity_violation() {
                SANITY_EXIT_CODE
            } else {
                1
            }
        },
    }
}


fn main() {
    // The logger must be dropped, flushing it, before we exit.
    let code = main_inner();
    process::exit(code);
}

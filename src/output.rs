// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Text renderings of analysis results.

The one-line summary is meant to be appended across many runs (one per
magnetar fraction) into a table that plotting scripts load with whitespace
splitting, so its format is fixed: `f mean mode lower median upper`, with `f`
to six decimals and the mean in the shortest-of-fixed-or-exponential style
of C's `%g`.

*/

use std::io::Write;

use errors::Result;
use summary::{Distribution, Summary};
use super::Analysis;


/// Format a number like C's `printf("%g")`: six significant digits, trailing
/// zeros removed, exponential notation only for very large or small values.
pub fn format_general(x: f64) -> String {
    const PRECISION: i32 = 6;

    if x.is_nan() {
        return "nan".to_owned();
    }

    if x.is_infinite() {
        return if x > 0. { "inf".to_owned() } else { "-inf".to_owned() };
    }

    if x == 0. {
        return "0".to_owned();
    }

    // Let the formatter do the rounding, then read off the decimal exponent
    // of the rounded value.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exponent) = match sci.find('e') {
        Some(i) => (&sci[..i], sci[i + 1..].parse::<i32>().unwrap_or(0)),
        None => (&sci[..], 0),
    };

    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, x)).to_owned()
    }
}


fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}


/// The one-line table row for a magnetar fraction and its lognormal-model
/// summary.
pub fn summary_line(fraction: f64, s: &Summary) -> String {
    format!("{:.6} {} {} {} {} {}",
            fraction, format_general(s.mean), s.mode, s.lower, s.median, s.upper)
}


/// Write the human-readable report on one model's summary.
pub fn write_model_report<W: Write>(dest: &mut W, title: &str, s: &Summary) -> Result<()> {
    writeln!(dest, "{}:", title)?;
    writeln!(dest, "Mean of N                    = {}", format_general(s.mean))?;
    writeln!(dest, "Mode of N                    = {}", s.mode)?;
    writeln!(dest, "99 percent lower bound for N = {}", s.lower)?;
    writeln!(dest, "Median for N                 = {}", s.median)?;
    writeln!(dest, "99 percent upper bound for N = {}", s.upper)?;
    Ok(())
}


/// Write the human-readable report on both models.
pub fn write_report<W: Write>(dest: &mut W, analysis: &Analysis) -> Result<()> {
    write_model_report(dest, "Lognormal", &analysis.lognormal.summary())?;
    write_model_report(dest, "Power law", &analysis.power_law.summary())?;
    Ok(())
}


/// Write the full normalized distributions of both models, one row per
/// population size: `N prob cdf prob_pl cdf_pl`. The block is introduced by
/// a comment line giving the magnetar fraction.
pub fn write_distribution<W: Write>(dest: &mut W, analysis: &Analysis) -> Result<()> {
    writeln!(dest, "# f = {:.6}", analysis.params.magnetar_fraction())?;
    writeln!(dest, "# N\tprob\tcdf\tprob_pl\tcdf_pl")?;

    let ln: &Distribution = &analysis.lognormal;
    let pl: &Distribution = &analysis.power_law;

    for n in 1..ln.n_max() {
        writeln!(dest, "{}\t{:.16e}\t{:.16e}\t{:.16e}\t{:.16e}",
                 n, ln.pmf()[n], ln.cdf()[n], pl.pmf()[n], pl.cdf()[n])?;
    }

    Ok(())
}

// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/// Run the command-line program and check what it prints.

extern crate regex;

use regex::Regex;
use std::process::{Command, Output};

const EXE: &'static str = env!("CARGO_BIN_EXE_galcenbayes");

fn run(args: &[&str]) -> Output {
    Command::new(EXE).args(args).output().unwrap()
}

fn summary_line_regex() -> Regex {
    Regex::new(r"^(\d+\.\d{6}) (\S+) (\d+) (\d+) (\d+) (\d+)$").unwrap()
}


#[test]
fn fiducial_summary_line() {
    let out = run(&["0.050", "4.85", "-0.8", "100000", "0.010"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("0.010000 "));

    let caps = summary_line_regex().captures(lines[0]).unwrap();
    let mean = caps[2].parse::<f64>().unwrap();
    let mode = caps[3].parse::<usize>().unwrap();
    let lower = caps[4].parse::<usize>().unwrap();
    let median = caps[5].parse::<usize>().unwrap();
    let upper = caps[6].parse::<usize>().unwrap();

    assert!(mean > 0.);
    assert!(mode > 0);
    assert!(lower > 0);
    assert!(lower <= median && median <= upper);
    assert!(upper < 100000);

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("Lognormal:\n"));
    assert!(stderr.contains("Power law:\n"));
    assert!(stderr.contains(&format!("99 percent upper bound for N = {}\n", upper)));
}


#[test]
fn missing_arguments_print_usage() {
    let out = run(&["0.050", "4.85"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Usage:"));
    assert!(!summary_line_regex().is_match(stdout.trim()));
}


#[test]
fn fraction_sweep_table() {
    let out = run(&["0.050", "4.85", "-0.8", "500", "--f-range", "0.1", "0.2", "0.9"]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    let re = summary_line_regex();
    let fractions: Vec<String> = stdout.lines()
        .map(|l| re.captures(l).unwrap()[1].to_owned())
        .collect();
    assert_eq!(fractions, vec!["0.100000", "0.300000", "0.500000", "0.700000", "0.900000"]);
}


#[test]
fn tiny_sweep_step_is_rejected() {
    let out = run(&["0.050", "4.85", "-0.8", "500", "--f-range", "0", "1e-300", "1"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("too many fractions"), "{}", stderr);
}


#[test]
fn several_fractions() {
    let out = run(&["0.050", "4.85", "-0.8", "500", "0.01", "0.5"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8(out.stdout).unwrap().lines().count(), 2);
}


#[test]
fn sanity_violation_exit_code() {
    let out = run(&["0.050", "4.85", "0.8", "1000", "0.01"]);
    assert_eq!(out.status.code(), Some(255));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("theta_pl"));
}


#[test]
fn configuration_error_exit_code() {
    let out = run(&["0.050", "4.85", "-0.8", "1", "0.01"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}


#[test]
fn distribution_table() {
    let mut path = std::env::temp_dir();
    path.push(format!("galcenbayes-cli-test-{}.df", std::process::id()));
    let path_str = path.to_str().unwrap().to_owned();

    let out = run(&["0.050", "4.85", "-0.8", "300", "0.05", "--distribution", &path_str]);
    assert!(out.status.success());

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let rows: Vec<Vec<f64>> = text.lines()
        .filter(|l| !l.starts_with('#'))
        .map(|l| l.split('\t').map(|x| x.parse::<f64>().unwrap()).collect())
        .collect();

    assert_eq!(rows.len(), 299);
    assert_eq!(rows[0][0], 1.);
    assert!((rows[298][2] - 1.).abs() < 1e-12);
    assert!((rows[298][4] - 1.).abs() < 1e-12);
}

// Copyright (c) 2018-2022 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See accompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;
use std::process::exit;

use planmodel::compliance::run_compliance_check;
use planmodel::{generate_plans, DesignBrief};

const APP_TITLE: &str = r#"Planner"#;
const APP_ABOUT: &str =
    r#"Planner - Residential floor plan generation and IRC compliance checking."#;

// Helpers -----------------------------------------------------------------------

fn readfile<P: AsRef<Path>>(path: P) -> String {
    let mut buffer = String::new();
    let mut file = File::open(&path)
        .map_err(|e| {
            eprintln!(
                "ERROR: could not open file \"{}\": {}",
                path.as_ref().display(),
                e
            );
            exit(exitcode::NOINPUT);
        })
        .unwrap();
    if let Err(e) = file.read_to_string(&mut buffer) {
        eprintln!(
            "ERROR: could not read file \"{}\": {}",
            path.as_ref().display(),
            e
        );
        exit(exitcode::IOERR);
    }
    buffer
}

fn writefile<P: AsRef<Path>>(path: P, content: &[u8]) {
    let mut file = File::create(&path)
        .map_err(|e| {
            eprintln!(
                "ERROR: could not create file \"{}\": {}",
                path.as_ref().display(),
                e
            );
            exit(exitcode::CANTCREAT);
        })
        .unwrap();
    if let Err(e) = file.write_all(content) {
        eprintln!(
            "ERROR: could not write file \"{}\": {}",
            path.as_ref().display(),
            e
        );
        exit(exitcode::IOERR);
    }
}

/// Build the CLI and collect the selected options
fn start_app_and_get_matches() -> clap::ArgMatches<'static> {
    use clap::Arg;
    clap::App::new(APP_TITLE)
        .bin_name("planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about(APP_ABOUT)
        .arg(
            Arg::with_name("BRIEF")
                .help("Design brief in JSON format")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("plans_output")
                .short("o")
                .long("output")
                .takes_value(true)
                .help("Output file for the ranked plans in JSON format"),
        )
        .arg(
            Arg::with_name("report_output")
                .short("r")
                .long("report")
                .takes_value(true)
                .help("Output file for the compliance report in JSON format"),
        )
        .arg(
            Arg::with_name("jurisdiction")
                .short("j")
                .long("jurisdiction")
                .takes_value(true)
                .default_value("irc-base")
                .help("Jurisdiction for the compliance run"),
        )
        .arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Sets the level of verbosity"),
        )
        .get_matches()
}

// Main --------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let matches = start_app_and_get_matches();

    let brief_path = matches.value_of("BRIEF").unwrap();
    let verbosity = matches.occurrences_of("v");

    let brief = DesignBrief::from_json(&readfile(brief_path)).unwrap_or_else(|e| {
        eprintln!("ERROR: invalid design brief: {}", e);
        exit(exitcode::DATAERR);
    });

    let result = generate_plans(&brief);

    for warning in result.brief.warnings.iter() {
        eprintln!("WARNING: {}", warning.msg);
    }

    println!(
        "Generated {} plans for a {:.0} ft² brief:",
        result.plans.len(),
        result.brief.target_sqft
    );
    for scored in result.plans.iter() {
        println!(
            "  {:24} overall {:6.2}  ({} rooms, {} unplaced)",
            scored.plan.meta.strategy,
            scored.score.overall,
            scored.plan.rooms.len(),
            scored.plan.unplaced_room_ids.len()
        );
        if verbosity > 0 {
            for warning in scored.plan.check() {
                println!("    {}: {}", warning.level, warning.msg);
            }
        }
    }

    if let Some(path) = matches.value_of("plans_output") {
        let json = serde_json::to_string_pretty(&result).unwrap_or_else(|e| {
            eprintln!("ERROR: could not serialize plans: {}", e);
            exit(exitcode::SOFTWARE);
        });
        writefile(path, json.as_bytes());
        println!("Plans written to: {}", path);
    }

    if let Some(best) = result.best() {
        let jurisdiction = matches.value_of("jurisdiction").unwrap();
        match run_compliance_check(&best.plan, jurisdiction, None) {
            Ok(report) => {
                println!(
                    "Compliance ({}): {}/{} rules passed ({:.1} %){}",
                    report.jurisdiction,
                    report.summary.passed,
                    report.summary.total,
                    report.summary.compliance_pct,
                    if report.overall_compliant {
                        ""
                    } else {
                        " [NON-COMPLIANT]"
                    }
                );
                if let Some(path) = matches.value_of("report_output") {
                    writefile(path, report.as_json().unwrap().as_bytes());
                    println!("Report written to: {}", path);
                }
            }
            Err(e) => {
                eprintln!("ERROR: compliance check failed: {}", e);
                exit(exitcode::DATAERR);
            }
        }
    }
}

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use cloudkit_catalog::TEMPLATES_COLLECTION;
use cloudkit_debug::{logging, run_filters, run_metadata, DebugOptions};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn cli() -> Command {
    Command::new("cloudkit-debug")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect cloudkit template roles and their metadata")
        .arg(
            Arg::new("collections-path")
                .long("collections-path")
                .global(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Directory searched for <namespace>/<collection> (overrides ANSIBLE_COLLECTIONS_PATH)"),
        )
        .arg(
            Arg::new("collection")
                .long("collection")
                .global(true)
                .default_value(TEMPLATES_COLLECTION)
                .help("Collection to inspect"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (logs go to stderr)"),
        )
        .subcommand(
            Command::new("filters")
                .about("Print all, cluster and VM template records")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("metadata")
                .about("Print metadata files, then per-role metadata read through the catalog")
                .arg(
                    Arg::new("file")
                        .long("file")
                        .action(ArgAction::Append)
                        .help("Metadata file to print (repeatable; defaults to the cloudkit templates)"),
                )
                .arg(
                    Arg::new("base-dir")
                        .long("base-dir")
                        .default_value(".")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory relative metadata paths are resolved against"),
                ),
        )
}

fn options_from(matches: &ArgMatches) -> DebugOptions {
    let mut options = DebugOptions::from_env();
    if let Some(paths) = matches.get_many::<PathBuf>("collections-path") {
        options.catalog = options
            .catalog
            .with_collections_paths(paths.cloned().collect());
    }
    if let Some(name) = matches.get_one::<String>("collection") {
        options = options.with_collection(name.clone());
    }

    match matches.subcommand() {
        Some(("filters", args)) => {
            options.json = args.get_flag("json");
        }
        Some(("metadata", args)) => {
            if let Some(files) = args.get_many::<String>("file") {
                options.metadata_files = files.cloned().collect();
            }
            if let Some(dir) = args.get_one::<PathBuf>("base-dir") {
                options = options.with_base_dir(dir.clone());
            }
        }
        _ => {}
    }
    options
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let options = options_from(matches);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand_name() {
        Some("filters") => {
            run_filters(&options, &mut out).context("filters report failed")?;
        }
        Some("metadata") => {
            run_metadata(&options, &mut out).context("metadata report failed")?;
        }
        _ => {
            // the metadata report still runs when the filters cannot
            let filters = run_filters(&options, &mut out).context("filters report failed");
            if let Err(err) = &filters {
                eprintln!("error: {err:#}");
            }
            writeln!(out)?;
            run_metadata(&options, &mut out).context("metadata report failed")?;
            filters?;
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    logging::init_tracing(matches.get_count("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

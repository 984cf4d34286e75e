//! Page Composer CLI
//!
//! Usage:
//!   page-composer [OPTIONS]
//!
//! With no options, reads `templates/home.template.html` and the partials in
//! `partials/home/` of the project the tool was built from and writes
//! `home.html` there, whatever the working directory.
//!
//! Options:
//!   -c, --config <FILE>  TOML file overriding paths and composition options
//!   --root <DIR>         Project root that relative paths resolve against
//!   --mode <MODE>        Substitute the first marker per partial, or all
//!   --check              Report unresolved markers and unused partials
//!   --stdout             Print the merged page instead of writing it
//!   -v, --verbose        Debug logging
//!   -h, --help           Print help

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use page_composer::{assemble, build, Assembly, BuildConfig, SubstitutionMode};

#[derive(Parser)]
#[command(name = "page-composer")]
#[command(about = "Assemble a page from a base template and partial fragments")]
struct Cli {
    /// TOML file overriding paths and composition options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root that relative paths resolve against (default: the tool's own project directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Substitute only the first marker per partial, or every marker
    #[arg(long, value_enum)]
    mode: Option<SubstitutionMode>,

    /// Report unresolved markers and unused partials on stderr
    #[arg(long)]
    check: bool,

    /// Print the merged page to stdout instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => match BuildConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => BuildConfig::default(),
    };
    if let Some(root) = cli.root {
        config = config.with_root(root);
    }
    if let Some(mode) = cli.mode {
        config = config.with_mode(mode);
    }

    if cli.stdout {
        match assemble(&config) {
            Ok(assembly) => {
                if cli.check {
                    print_warnings(&assembly);
                }
                print!("{}", assembly.composition.output);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    match build(&config) {
        Ok(report) => {
            if cli.check {
                print_warnings(&report.assembly);
            }
            println!("{}", report.summary());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_warnings(assembly: &Assembly) {
    let filename = assembly.template_path.display().to_string();
    let color = io::stderr().is_terminal();
    for warning in assembly.warnings() {
        eprint!("{}", warning.format(&assembly.template, &filename, color));
    }
}

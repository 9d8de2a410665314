//! CLI tool to validate, inspect, and format requirements.txt files.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use requirements_txt::Requirement;

/// Validate, inspect, and format pip requirements files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    debug: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that files parse.
    Validate {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the declared package names, one per line.
    Deps {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print files in canonical form.
    Fmt {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Check that files are already in canonical form.
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Print the parsed document as JSON.
    Dump {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

impl Command {
    fn files(&self) -> &[PathBuf] {
        match self {
            Self::Validate { files }
            | Self::Deps { files }
            | Self::Fmt { files }
            | Self::Check { files }
            | Self::Dump { files } => files,
        }
    }
}

fn initialize_logger(debug: bool) -> Result<(), log::SetLoggerError> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("requirements_txt")
        .add_filter_allow_str("reqtxt")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = initialize_logger(args.debug) {
        eprintln!("failed to initialize logger: {e}");
        return ExitCode::from(2);
    }

    let mut had_error = false;

    for path in args.command.files() {
        let display = path.display();
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("{display}: {e}");
                had_error = true;
                continue;
            }
        };

        let requirement = match requirements_txt::parse_str(&content) {
            Ok(r) => r,
            Err(e) => {
                log::error!("{display}: {e}");
                had_error = true;
                continue;
            }
        };

        if !run(&args.command, &display.to_string(), &content, requirement) {
            had_error = true;
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Run `command` against one parsed file. Returns `false` on failure.
fn run(command: &Command, path: &str, content: &str, requirement: Requirement) -> bool {
    match command {
        Command::Validate { .. } => {
            let packages = requirement.packages().count();
            let commands = requirement.commands().count();
            let downloads = requirement.bare_downloads().count();
            log::info!(
                "{path}: valid ({packages} package(s), \
                 {commands} option(s), \
                 {downloads} download(s))"
            );
        }
        Command::Deps { .. } => {
            for name in requirement.into_package_names() {
                println!("{name}");
            }
        }
        Command::Fmt { .. } => {
            print!("{}", requirements_txt::format(&requirement));
        }
        Command::Check { .. } => {
            if requirements_txt::format(&requirement) == content {
                log::info!("{path}: formatted");
            } else {
                log::warn!("{path}: not formatted");
                return false;
            }
        }
        Command::Dump { .. } => match serde_json::to_string_pretty(&requirement) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("{path}: {e}");
                return false;
            }
        },
    }
    true
}

//! termfolio CLI
//!
//! A cyberpunk portfolio for the terminal.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use termfolio::config::Config;
use termfolio::error::{Error, Result};
use termfolio::hero;
use termfolio::logging::{self, LogTarget};
use termfolio::profile;
use termfolio::report::format_report;
use termfolio::sequencer;
use termfolio::types::{OutputFormat, PortfolioData};

#[derive(Parser)]
#[command(name = "termfolio")]
#[command(about = "A cyberpunk portfolio for the terminal")]
#[command(version)]
struct Cli {
    /// Profile file (.json or .toml). Defaults to the config's profile, then the built-in sample
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Config file (default: <config dir>/termfolio/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the portfolio interactively (default)
    View,

    /// Play the typed terminal intro on stdout
    Hero {
        /// Print the finished intro without typing delays
        #[arg(long)]
        instant: bool,
    },

    /// Print the portfolio
    Report {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Validate the profile and list problems
    Check,

    /// Write the sample profile as JSON
    Init {
        /// Destination file (default: stdout)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::View);

    let target = match command {
        Commands::View => LogTarget::File(logging::default_log_path()),
        _ => LogTarget::Stderr,
    };
    if let Err(e) = logging::init(cli.verbose, target) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = run(command, cli.profile.as_deref(), cli.config.as_deref());

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, profile_path: Option<&Path>, config_path: Option<&Path>) -> Result<ExitCode> {
    let load = || -> Result<(Config, PortfolioData)> {
        let config = Config::load(config_path)?;
        let profile = resolve_profile(profile_path, &config)?;
        Ok((config, profile))
    };

    match command {
        Commands::Init { path, force } => cmd_init(path.as_deref(), force),
        Commands::View => {
            let (config, profile) = load()?;
            cmd_view(profile, &config)
        }
        Commands::Hero { instant } => {
            let (config, profile) = load()?;
            cmd_hero(&profile, &config, instant)
        }
        Commands::Report { format } => {
            let (_, profile) = load()?;
            cmd_report(&profile, format.into())
        }
        Commands::Check => {
            let (_, profile) = load()?;
            cmd_check(&profile)
        }
    }
}

// ============================================================================
// PROFILE RESOLUTION
// ============================================================================

/// `--profile`, then the config's `profile`, then the built-in sample.
fn resolve_profile(explicit: Option<&Path>, config: &Config) -> Result<PortfolioData> {
    match explicit.or(config.profile.as_deref()) {
        Some(path) => {
            info!(path = %path.display(), "loading profile");
            profile::load(path)
        }
        None => {
            debug!("no profile given, using sample");
            Ok(profile::sample())
        }
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

fn cmd_view(profile: PortfolioData, config: &Config) -> Result<ExitCode> {
    termfolio::tui::run::run(profile, config)?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_hero(profile: &PortfolioData, config: &Config, instant: bool) -> Result<ExitCode> {
    let entries = profile::hero_entries(profile, &config.hero);
    let mut out = io::stdout().lock();

    if instant {
        let (state, _) = sequencer::run_to_idle(&entries);
        out.write_all(hero::transcript(&state).as_bytes())?;
        return Ok(ExitCode::SUCCESS);
    }

    hero::stream(
        entries,
        config.hero.timing(),
        config.hero.cursor_blink(),
        thread::sleep,
        |text| {
            out.write_all(text.as_bytes())?;
            out.flush()
        },
    )?;
    Ok(ExitCode::SUCCESS)
}

fn cmd_report(profile: &PortfolioData, format: OutputFormat) -> Result<ExitCode> {
    print!("{}", format_report(profile, format));
    Ok(ExitCode::SUCCESS)
}

fn cmd_check(profile: &PortfolioData) -> Result<ExitCode> {
    let issues = profile::validate(profile);
    if issues.is_empty() {
        println!("Profile OK.");
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} issue{} found:", issues.len(), if issues.len() == 1 { "" } else { "s" });
    for issue in &issues {
        println!("  - {}", issue);
    }
    Ok(ExitCode::FAILURE)
}

fn cmd_init(path: Option<&Path>, force: bool) -> Result<ExitCode> {
    let json = format_report(&profile::sample(), OutputFormat::Json);

    let Some(path) = path else {
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    };

    if path.exists() && !force {
        return Err(Error::io(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "file exists (use --force to overwrite)"),
        ));
    }
    fs::write(path, format!("{}\n", json)).map_err(|e| Error::io(path, e))?;
    eprintln!("Wrote sample profile to {}", path.display());
    Ok(ExitCode::SUCCESS)
}

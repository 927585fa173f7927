use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use wordtrack::output::{ColorMode, Console, OutputMode};
use wordtrack::repository::{LoadOutcome, Repository};
use wordtrack::tracker::Tracker;
use wordtrack::utils::TrackerConfig;

#[derive(Parser)]
#[command(name = "wordtrack")]
#[command(about = "Index the words of a text file and report where each one occurs")]
#[command(override_usage = "wordtrack <INPUT> <-pf|-pl|-po> [-f<OUTPUT>] [OPTIONS]")]
#[command(after_help = "Examples:\n  wordtrack input.txt -pf\n  wordtrack input.txt -pl -fresults.txt")]
struct Cli {
    /// Text file to index
    input: Option<PathBuf>,

    /// Report layout: -pf files, -pl files and lines, -po files, lines and counts
    #[arg(short = 'p', value_enum, value_name = "MODE")]
    mode: Option<OutputMode>,

    /// Write the report to OUTPUT instead of the console (e.g. -fresults.txt)
    #[arg(short = 'f', value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Snapshot file to load and save (overrides the config file)
    #[arg(long, value_name = "PATH")]
    repository: Option<PathBuf>,

    /// Read configuration from this JSON file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Do not save the index at the end of the run
    #[arg(long)]
    no_save: bool,

    /// When to color status and warning lines
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    color: ColorMode,

    /// Only print warnings and the report
    #[arg(short, long)]
    quiet: bool,

    /// Anything after the mode that is not an option is ignored
    #[arg(trailing_var_arg = true, hide = true)]
    extra: Vec<OsString>,
}

fn main() -> Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();
    if args.len() < 3 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            // clap leaves the usage line off invalid-value errors
            if e.kind() == ErrorKind::InvalidValue {
                eprintln!("\n{}", Cli::command().render_usage());
            }
            std::process::exit(e.exit_code());
        }
        Err(e) => e.exit(),
    };

    let (Some(input), Some(mode)) = (cli.input.as_deref(), cli.mode) else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load_from(path)?,
        None => TrackerConfig::load()?,
    };
    if let Some(path) = &cli.repository {
        config.repository_path = path.clone();
    }
    if cli.no_save {
        config.save_repository = false;
    }

    let output = cli
        .output
        .map(|parsed| attached_output(&args).unwrap_or(parsed));

    let mut console = Console::new(cli.color, cli.quiet);
    run(&config, input, mode, output.as_deref(), &mut console)
}

/// The text glued to `-f`, verbatim.
///
/// clap drops a leading `=` from attached short values; `-f=out.txt` names
/// the file `=out.txt`.
fn attached_output(args: &[OsString]) -> Option<PathBuf> {
    args.iter().skip(1).find_map(|arg| {
        let name = arg.to_str()?.strip_prefix("-f")?;
        (!name.is_empty()).then(|| PathBuf::from(name))
    })
}

/// Load, ingest, save, report
fn run(
    config: &TrackerConfig,
    input: &Path,
    mode: OutputMode,
    output: Option<&Path>,
    console: &mut Console,
) -> Result<()> {
    let repository = Repository::new(&config.repository_path);
    let (mut tracker, outcome) = Tracker::open(repository);

    match outcome {
        LoadOutcome::Loaded { entries } => {
            console.status(format!("Loaded existing repository with {} words.", entries));
        }
        LoadOutcome::Missing => {
            console.status("No existing repository found. Creating new tree.");
        }
        LoadOutcome::Discarded(e) => {
            console.warn(format!(
                "Could not load repository {} ({}). Creating new tree.",
                tracker.repository().path().display(),
                e
            ));
        }
    }

    let stats = tracker.ingest_file(input)?;
    console.status(format!("Processed file: {}", input.display()));
    console.status(format!("Lines read: {}", stats.lines_read));
    console.status(format!("New unique words added: {}", stats.new_words));

    if config.save_repository {
        match tracker.save() {
            Ok(()) => console.status(format!(
                "Repository saved with {} words.",
                tracker.index().len()
            )),
            Err(e) => console.warn(format!(
                "Could not save repository {}: {}",
                tracker.repository().path().display(),
                e
            )),
        }
    }

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let lines = tracker.report(mode, &mut writer)?;
            console.status(format!("{} lines written to {}", lines, path.display()));
        }
        None => {
            console.status(format!("Displaying {} format:", mode.flag()));
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            tracker.report(mode, &mut writer)?;
        }
    }

    Ok(())
}

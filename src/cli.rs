//! Command-line interface for logicmap.

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

use crate::analysis::AnalysisContext;
use crate::config::{self, Config, DEFAULT_CONFIG_NAMES, DEFAULT_TEMPLATE};
use crate::parser::SourceLanguage;
use crate::protocol;
use crate::report::{self, Format};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Structural analyzer for JavaScript and TypeScript.
///
/// Logicmap extracts the functions in a source file together with their
/// variables, calls, condition counts and nested if/loop structure, plus a
/// call graph between them, for rendering as diagrams.
#[derive(Parser)]
#[command(name = "logicmap")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a file or directory
    Analyze(AnalyzeArgs),
    /// Answer analysis requests on stdin, one JSON object per line
    Serve(ServeArgs),
    /// Create a logicmap config file
    Init(InitArgs),
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Treat every file as this language instead of detecting by extension
    #[arg(short, long)]
    pub language: Option<SourceLanguage>,

    /// Print each function's logic tree (pretty format only)
    #[arg(long)]
    pub show_logic: bool,
}

/// Arguments for the serve command.
#[derive(Parser)]
pub struct ServeArgs {
    /// Language for requests that neither name one nor carry a file name
    #[arg(short, long, default_value = "javascript")]
    pub language: SourceLanguage,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "logicmap.yaml")]
    pub output: PathBuf,
}

/// Load the config named on the command line, or one found in the current
/// directory, or the defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => Config::discover(Path::new(".")),
    };
    let config = match &path {
        Some(p) => Config::parse_file(p)?,
        None => Config::default(),
    };
    Ok((config, path))
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    let (config, config_path) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error parsing config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }
    if let Some(path) = &config_path {
        tracing::debug!(config = %path.display(), "using config");
    }

    // Resolve path
    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    // Relative paths in output are taken from the directory being analyzed,
    // or from the file's own directory
    let base_dir = if abs_path.is_dir() {
        abs_path.clone()
    } else {
        abs_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| abs_path.clone())
    };

    let mut context = AnalysisContext::new(&base_dir, config)?;
    if let Some(language) = args.language {
        context = context.with_language(language);
    }

    let results = context.analyze_path_tree(&abs_path)?;
    if results.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let stdout = io::stdout();
    match args.format {
        Format::Json => report::write_json(stdout.lock(), &results)?,
        Format::Messages => report::write_messages(stdout.lock(), &results)?,
        Format::Pretty => {
            report::write_pretty(&args.path.to_string_lossy(), &results, args.show_logic)
        }
    }

    if results.iter().all(|r| r.is_success()) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the serve command until stdin closes.
pub fn run_serve(args: &ServeArgs) -> anyhow::Result<i32> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = protocol::serve(stdin.lock(), stdout.lock(), args.language)?;
    tracing::info!(handled, "input closed");
    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    // Check if output already exists
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    // Create output directory if needed
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize for your project", args.output.display());
    if DEFAULT_CONFIG_NAMES.iter().any(|n| args.output.ends_with(n)) {
        println!("  2. Run: logicmap analyze .");
    } else {
        println!("  2. Run: logicmap analyze . --config {}", args.output.display());
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses_analyze() {
        let cli = Cli::try_parse_from([
            "logicmap", "analyze", "src", "--format", "json", "--language", "tsx", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.path, PathBuf::from("src"));
                assert_eq!(args.format, Format::Json);
                assert_eq!(args.language, Some(SourceLanguage::Tsx));
                assert!(!args.show_logic);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["logicmap", "analyze", ".", "--format", "sarif"]).is_err());
    }

    #[test]
    fn test_serve_default_language() {
        let cli = Cli::try_parse_from(["logicmap", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.language, SourceLanguage::JavaScript),
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_init_writes_once() {
        let temp = TempDir::new().unwrap();
        let args = InitArgs {
            output: temp.path().join("conf/logicmap.yaml"),
        };
        assert_eq!(run_init(&args).unwrap(), EXIT_SUCCESS);
        let written = std::fs::read_to_string(&args.output).unwrap();
        assert_eq!(written, DEFAULT_TEMPLATE);

        assert_eq!(run_init(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_analyze_exit_codes() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("ok.js"), "function ok() {}").unwrap();
        let config = temp.path().join("logicmap.yaml");
        std::fs::write(&config, "max_file_bytes: 1000\n").unwrap();

        let mut args = AnalyzeArgs {
            path: temp.path().to_path_buf(),
            format: Format::Messages,
            config: Some(config.clone()),
            language: None,
            show_logic: false,
        };
        assert_eq!(run_analyze(&args).unwrap(), EXIT_SUCCESS);

        std::fs::write(temp.path().join("big.js"), "x".repeat(2000)).unwrap();
        assert_eq!(run_analyze(&args).unwrap(), EXIT_FAILED);

        args.path = temp.path().join("missing");
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);

        std::fs::write(&config, "extensions: []\n").unwrap();
        args.path = temp.path().to_path_buf();
        assert_eq!(run_analyze(&args).unwrap(), EXIT_ERROR);
    }
}

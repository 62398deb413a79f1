//! papermap - paper outline and section-graph CLI
//!
//! ```text
//! papermap parse paper.tex                 # JSON structure report
//! papermap parse paper.md -f outline       # numbered outline
//! papermap connections paper.html -f table # section graph
//! cat paper.tex | papermap parse - --from latex
//! ```

mod config;
mod render;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use colored::Colorize;
use config::{Config, CONFIG_FILE_NAME, DEFAULT_CONFIG_TEMPLATE};
use log::{debug, info};
use papermap_analysis::analyze_report;
use papermap_backend::{PaperSource, ParseOptions, StructureConverter};
use papermap_core::{DocumentStructure, JsonSerializer, PaperFormat, YamlSerializer};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Default log filter; `RUST_LOG` still wins.
    const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "debug",
        }
    }
}

/// Output format of `papermap parse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum StructureOutput {
    /// Structure report as JSON (default)
    Json,
    /// Structure report as YAML
    Yaml,
    /// Numbered, human-readable outline
    Outline,
}

impl StructureOutput {
    /// CLI value, then config value, then JSON.
    fn resolve(cli_value: Option<Self>, config_value: Option<&str>) -> Self {
        if let Some(format) = cli_value {
            return format;
        }
        match config_value.map(str::to_lowercase).as_deref() {
            Some("yaml") => Self::Yaml,
            Some("outline") => Self::Outline,
            _ => Self::Json,
        }
    }
}

/// Output format of `papermap connections`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
enum ConnectionsOutput {
    /// Connection report as JSON (default)
    Json,
    /// Connection report as YAML
    Yaml,
    /// Aligned table with a summary line
    Table,
}

impl ConnectionsOutput {
    fn resolve(cli_value: Option<Self>, config_value: Option<&str>) -> Self {
        if let Some(format) = cli_value {
            return format;
        }
        match config_value.map(str::to_lowercase).as_deref() {
            Some("yaml") => Self::Yaml,
            Some("table") => Self::Table,
            _ => Self::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "papermap",
    about = "Recover the outline of a research paper and map how its sections connect",
    long_about = "Recover the outline of a research paper and map how its sections connect.\n\
                  \n\
                  Reads LaTeX, HTML and Markdown sources. Output is JSON, YAML or a\n\
                  human-readable rendering.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where the paper text comes from
#[derive(clap::Args, Debug, Clone)]
struct InputArgs {
    /// Paper file, or '-' to read from stdin
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Literal paper text (takes precedence over INPUT's content)
    #[arg(long, value_name = "TEXT")]
    content: Option<String>,

    /// Source format (default: from the file extension, else latex)
    #[arg(long, value_name = "FORMAT", value_parser = parse_paper_format)]
    from: Option<PaperFormat>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a paper into its section hierarchy
    #[command(long_about = "Parse a paper into its section hierarchy.\n\
                      \n\
                      Each heading carries its level, cleaned text, a short text excerpt\n\
                      and its byte offset in the source.\n\
                      \n\
                      Defaults can be set via .papermap.toml configuration file.")]
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Output format (default: json, or from config)
        #[arg(short, long, value_enum)]
        format: Option<StructureOutput>,

        /// Characters kept per excerpt before "..."
        #[arg(long, value_name = "N")]
        excerpt_chars: Option<usize>,

        /// Raw characters scanned after a LaTeX heading
        #[arg(long, value_name = "N")]
        latex_window: Option<usize>,

        /// Raw characters scanned after an HTML heading
        #[arg(long, value_name = "N")]
        html_window: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Infer sequential, hierarchical and semantic links between sections
    #[command(alias = "graph")]
    Connections {
        #[command(flatten)]
        input: InputArgs,

        /// Output format (default: json, or from config)
        #[arg(short, long, value_enum)]
        format: Option<ConnectionsOutput>,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// List supported paper formats
    Formats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts.\n\
                      \n\
                      Examples:\n\
                        papermap completion bash > /usr/local/etc/bash_completion.d/papermap\n\
                        papermap completion zsh > ~/.zsh/completions/_papermap")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Create a configuration file with commented defaults
    Init {
        /// Create ~/.papermap.toml instead of ./.papermap.toml
        #[arg(long)]
        global: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Display the effective (merged) configuration
    Show {
        /// Output as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Print one configuration value, e.g. `parse.output`
    Get {
        key: String,
    },

    /// Print the configuration file path in effect
    Path {
        /// Show every candidate path with its status
        #[arg(long)]
        all: bool,
    },
}

fn parse_paper_format(value: &str) -> std::result::Result<PaperFormat, String> {
    value.parse().map_err(|e: papermap_core::PaperMapError| e.to_string())
}

fn main() {
    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.log_filter()),
    )
    .target(env_logger::Target::Stderr)
    .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = run(args.command, verbosity) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(command: Commands, verbosity: Verbosity) -> Result<()> {
    match command {
        Commands::Parse {
            input,
            format,
            excerpt_chars,
            latex_window,
            html_window,
            output,
            compact,
        } => {
            let config = Config::load();
            let options = config.parse_options(excerpt_chars, latex_window, html_window);
            let format = StructureOutput::resolve(format, config.parse_output());
            parse_command(&input, options, format, output.as_deref(), compact, verbosity)
        }
        Commands::Connections {
            input,
            format,
            output,
            compact,
        } => {
            let config = Config::load();
            let options = config.parse_options(None, None, None);
            let format = ConnectionsOutput::resolve(format, config.connections_output());
            connections_command(&input, options, format, output.as_deref(), compact, verbosity)
        }
        Commands::Formats { json } => formats_command(json),
        Commands::Config { action } => config_command(action, verbosity),
        Commands::Completion { shell } => {
            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Resolve INPUT / `--content` / stdin into a parsed structure.
fn load_structure(input: &InputArgs, options: ParseOptions) -> Result<DocumentStructure> {
    let path = input.input.as_deref().filter(|p| *p != "-");
    let mut source = path.map(PaperSource::from_path).unwrap_or_default();

    if let Some(content) = &input.content {
        source = source.with_content(content.as_str());
    } else if input.input.as_deref() == Some("-") {
        let mut buffer = Vec::new();
        io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read from stdin")?;
        source = source.with_content(String::from_utf8_lossy(&buffer));
    } else if path.is_none() {
        anyhow::bail!("No input given: pass a file path, '-' for stdin, or --content");
    }

    let converter = StructureConverter::with_options(options);
    let label = path.unwrap_or("<content>");
    converter
        .parse_source(&source, input.from)
        .with_context(|| format!("Failed to parse paper: {label}"))
}

fn parse_command(
    input: &InputArgs,
    options: ParseOptions,
    format: StructureOutput,
    output: Option<&Path>,
    compact: bool,
    verbosity: Verbosity,
) -> Result<()> {
    let doc = load_structure(input, options)?;
    if verbosity.is_verbose() {
        eprintln!(
            "{} {} ({}): {} sections, {} headings",
            "Parsed".green().bold(),
            doc.source,
            doc.format,
            doc.section_count(),
            doc.heading_count()
        );
    }

    let rendered = match format {
        StructureOutput::Json => json_serializer(compact).serialize(&doc.into_report())?,
        StructureOutput::Yaml => YamlSerializer::new().serialize(&doc.into_report())?,
        StructureOutput::Outline => {
            if output.is_some() {
                colored::control::set_override(false);
            }
            render::outline(&doc)
        }
    };
    emit(&rendered, output, verbosity)
}

fn connections_command(
    input: &InputArgs,
    options: ParseOptions,
    format: ConnectionsOutput,
    output: Option<&Path>,
    compact: bool,
    verbosity: Verbosity,
) -> Result<()> {
    let doc = load_structure(input, options)?;
    let report = analyze_report(&doc);
    info!(
        "{}: {} connections between {} headings",
        doc.source,
        report.connection_count,
        doc.heading_count()
    );

    let rendered = match format {
        ConnectionsOutput::Json => json_serializer(compact).serialize(&report)?,
        ConnectionsOutput::Yaml => YamlSerializer::new().serialize(&report)?,
        ConnectionsOutput::Table => {
            if output.is_some() {
                colored::control::set_override(false);
            }
            render::connection_table(&report.connections)
        }
    };
    emit(&rendered, output, verbosity)
}

fn json_serializer(compact: bool) -> JsonSerializer {
    if compact {
        JsonSerializer::compact()
    } else {
        JsonSerializer::new()
    }
}

/// Print to stdout or write to `output`, always newline-terminated.
fn emit(rendered: &str, output: Option<&Path>, verbosity: Verbosity) -> Result<()> {
    let mut text = rendered.to_string();
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            debug!("Wrote {} bytes to {}", text.len(), path.display());
            if verbosity.should_show_output() {
                eprintln!("{} Wrote {}", "Success:".green().bold(), path.display());
            }
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct FormatInfo {
    name: &'static str,
    extensions: &'static [&'static str],
    description: &'static str,
}

fn format_description(format: PaperFormat) -> &'static str {
    match format {
        PaperFormat::Latex => "LaTeX sources: \\section to \\paragraph, title, author, abstract",
        PaperFormat::Html => "HTML renderings: <h1>..<h6> headings, <title>",
        PaperFormat::Markdown => "Markdown: ATX headings # to ####, first # as title",
    }
}

fn formats_command(json_output: bool) -> Result<()> {
    let formats: Vec<FormatInfo> = PaperFormat::ALL
        .into_iter()
        .map(|format| FormatInfo {
            name: format.name(),
            extensions: format.extensions(),
            description: format_description(format),
        })
        .collect();

    if json_output {
        println!("{}", JsonSerializer::new().serialize(&formats)?);
        return Ok(());
    }

    println!("{}", "Supported paper formats:".bold());
    println!();
    for info in &formats {
        let extensions = info
            .extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ");
        let name = format!("{:<10}", info.name);
        println!("  {} {extensions:<18} {}", name.cyan(), info.description);
    }
    println!();
    println!(
        "{} Unknown extensions are parsed as {}; override with --from",
        "Note:".yellow().bold(),
        PaperFormat::default()
    );
    Ok(())
}

fn config_command(action: ConfigAction, verbosity: Verbosity) -> Result<()> {
    match action {
        ConfigAction::Init { global, force } => config_init(global, force, verbosity),
        ConfigAction::Show { json } => config_show(json),
        ConfigAction::Get { key } => config_get(&key),
        ConfigAction::Path { all } => {
            config_path(all);
            Ok(())
        }
    }
}

fn config_init(global: bool, force: bool, verbosity: Verbosity) -> Result<()> {
    let config_path = if global {
        Config::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
    } else {
        Config::project_config_path()
    };

    if config_path.exists() && !force {
        eprintln!(
            "{} Configuration file already exists: {}",
            "Error:".red().bold(),
            config_path.display()
        );
        eprintln!("{} Use --force to overwrite", "Hint:".cyan().bold());
        std::process::exit(1);
    }

    fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    if verbosity.should_show_output() {
        println!(
            "{} Created configuration file: {}",
            "Success:".green().bold(),
            config_path.display()
        );
    }
    Ok(())
}

fn config_show(json_output: bool) -> Result<()> {
    let merged = Config::load();
    if json_output {
        println!("{}", JsonSerializer::new().serialize(&merged)?);
    } else {
        println!("{}", toml::to_string_pretty(&merged)?);
    }
    Ok(())
}

fn config_get(key: &str) -> Result<()> {
    let Some(value) = Config::load().get(key)? else {
        eprintln!("{} Key '{key}' is not set", "Note:".yellow().bold());
        std::process::exit(1);
    };
    println!("{value}");
    Ok(())
}

fn config_path(all: bool) {
    let user_config = Config::user_config_path();
    let project_config = Config::project_config_path();

    if all {
        println!("{}", "Configuration file paths:".bold());
        println!();
        let status = |path: &Path| {
            if path.exists() {
                "exists".green()
            } else {
                "not found".yellow()
            }
        };
        if let Some(home) = &user_config {
            println!("  {} {} ({})", "User:".bright_black(), home.display(), status(home));
        }
        println!(
            "  {} {} ({})",
            "Project:".bright_black(),
            project_config.display(),
            status(&project_config)
        );
        return;
    }

    // Effective path: project if present, else user if present, else the
    // project path `config init` would create.
    let effective = if project_config.exists() {
        project_config
    } else {
        user_config
            .filter(|home| home.exists())
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    };
    println!("{}", effective.display());
}

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use resdoc_core::config::{self, CONFIG_FILE_NAME, InputFormat, OutputFormat, ResdocConfig};
use resdoc_core::design::Design;
use resdoc_core::parse;
use resdoc_core::transform::{self, TransformOptions};

#[derive(Parser)]
#[command(
    name = "resdoc",
    about = "Flatten OpenAPI 3.x documents into resource designs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the resource design of an OpenAPI document
    Transform {
        /// OpenAPI document, YAML or JSON [default: `input` from .resdoc.yaml]
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Destination file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Serialization of the design
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Fail on malformed schema nodes and custom HTTP methods
        #[arg(long)]
        strict: bool,
    },

    /// Check that a document parses and transforms, printing a summary
    Validate {
        /// OpenAPI document, YAML or JSON
        #[arg(short, long)]
        input: PathBuf,

        /// Fail on malformed schema nodes and custom HTTP methods
        #[arg(long)]
        strict: bool,
    },

    /// Write a starter .resdoc.yaml
    Init {
        /// Replace an existing .resdoc.yaml
        #[arg(long)]
        force: bool,
    },

    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Yaml,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Yaml => OutputFormat::Yaml,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Commands::Transform {
            input,
            output,
            format,
            strict,
        } => cmd_transform(input, output, format, strict),
        Commands::Validate { input, strict } => cmd_validate(&input, strict),
        Commands::Init { force } => cmd_init(force),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "resdoc", &mut io::stdout());
            Ok(())
        }
    }
}

/// Settings from `.resdoc.yaml` in the working directory, or the defaults.
fn project_config() -> Result<ResdocConfig> {
    let config = config::load_config(Path::new(CONFIG_FILE_NAME))?;
    Ok(config.unwrap_or_default())
}

fn read_design(path: &Path, options: &TransformOptions) -> Result<Design> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let design = resdoc_core::design_from_str(&content, InputFormat::from_path(path), options)
        .with_context(|| format!("failed to transform {}", path.display()))?;
    Ok(design)
}

fn render(design: &Design, format: OutputFormat, pretty: bool) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json if pretty => serde_json::to_string_pretty(design)?,
        OutputFormat::Json => serde_json::to_string(design)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(design)?,
    };
    Ok(rendered)
}

fn cmd_transform(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<FormatArg>,
    strict: bool,
) -> Result<()> {
    let cfg = project_config()?;
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.or_else(|| cfg.output.as_ref().map(PathBuf::from));
    let format = format.map_or(cfg.format, OutputFormat::from);
    let options = TransformOptions {
        strict: strict || cfg.strict,
    };

    log::debug!("transforming {} (strict: {})", input.display(), options.strict);
    let design = read_design(&input, &options)?;
    let rendered = render(&design, format, cfg.pretty)?;

    let Some(path) = output else {
        println!("{}", rendered.trim_end());
        return Ok(());
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    fs::write(&path, rendered).with_context(|| format!("failed to write {}", path.display()))?;
    eprintln!(
        "{} resources from {} written to {}",
        design.resources.len(),
        input.display(),
        path.display()
    );
    Ok(())
}

fn cmd_validate(input: &Path, strict: bool) -> Result<()> {
    let content = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let spec = match InputFormat::from_path(input) {
        InputFormat::Json => parse::from_json(&content)?,
        InputFormat::Yaml => parse::from_yaml(&content)?,
    };
    let design = transform::transform_with_options(&spec, &TransformOptions { strict })?;
    let records: usize = design
        .resources
        .iter()
        .map(|r| r.resource_content.record_count())
        .sum();

    eprintln!(
        "{} {} (OpenAPI {})",
        spec.info.title, spec.info.version, spec.openapi
    );
    eprintln!("  paths:     {}", spec.paths.len());
    eprintln!("  resources: {}", design.resources.len());
    eprintln!("  records:   {records}");
    eprintln!("{} is valid.", input.display());
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() && !force {
        anyhow::bail!("{CONFIG_FILE_NAME} already exists, pass --force to replace it");
    }
    fs::write(path, config::default_config_content())
        .with_context(|| format!("failed to write {CONFIG_FILE_NAME}"))?;
    eprintln!("Wrote {CONFIG_FILE_NAME}");
    Ok(())
}

//! The `exifscope analyze` command.

use clap::{Args, ValueEnum};
use exifscope_core::{output, AnalyzeOptions, Analyzer, Config, HashAlgorithm, MetadataRecord};
use std::path::{Path, PathBuf};

/// Arguments for the `analyze` command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image file to analyze
    #[arg(required = true)]
    pub input: PathBuf,

    /// Also export the JSON document to FILE (defaults to the configured export path)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<Option<PathBuf>>,

    /// What to print on stdout
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pub pretty: bool,

    /// Single-line JSON output
    #[arg(long)]
    pub compact: bool,

    /// Skip the reverse-geocoding request
    #[arg(long)]
    pub no_geocode: bool,

    /// Digest algorithm for the file hash
    #[arg(long, value_enum)]
    pub hash: Option<HashArg>,
}

/// Stdout formats.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// Aligned "Label: value" lines
    Text,
    /// The export document
    Json,
}

/// Hash algorithms selectable on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum HashArg {
    Sha256,
    Blake3,
}

impl From<HashArg> for HashAlgorithm {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sha256 => HashAlgorithm::Sha256,
            HashArg::Blake3 => HashAlgorithm::Blake3,
        }
    }
}

/// Execute the analyze command.
pub async fn execute(args: AnalyzeArgs, mut config: Config) -> anyhow::Result<()> {
    if let Some(hash) = args.hash {
        config.hash.algorithm = hash.into();
    }
    let pretty = pretty_json(&args, &config);

    let analyzer = Analyzer::new(&config);
    let options = AnalyzeOptions {
        skip_geocode: args.no_geocode,
    };
    let record = analyzer.analyze_path(&args.input, &options).await?;

    for note in &record.notes {
        tracing::info!("{}: {note}", record.file_name);
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&record)),
        OutputFormat::Json => println!("{}", output::to_json(&record, pretty)?),
    }

    if let Some(target) = args.output {
        let path = match target {
            Some(path) => expand(&path),
            None => config.export_path(),
        };
        output::export_to_file(&record, &path, pretty)?;
        tracing::info!("Metadata exported to {}", path.display());
    }

    Ok(())
}

/// `--pretty` / `--compact` override `[output] pretty`.
fn pretty_json(args: &AnalyzeArgs, config: &Config) -> bool {
    match (args.pretty, args.compact) {
        (true, _) => true,
        (_, true) => false,
        _ => config.output.pretty,
    }
}

/// Render the record as aligned key/value lines.
pub fn render_text(record: &MetadataRecord) -> String {
    let fields = record.fields();
    let width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, value) in fields {
        out.push_str(&format!("{:<width$}  {}\n", format!("{label}:"), value, width = width + 1));
    }
    out
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

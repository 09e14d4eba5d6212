//! Command-line argument parsing

use crate::models::config::{DocKind, OutputFormat, DEFAULT_CONTEXT_TOKENS};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// lazydocs - AI-generated READMEs, PR descriptions and changelogs
#[derive(Parser, Debug)]
#[command(name = "lazydocs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate project documentation from your code and git history")]
#[command(long_about = "lazydocs analyzes a source tree (JavaScript, TypeScript and Python), \
condenses it into a token-budgeted summary and asks a Groq-hosted model to write a README, \
a pull request description or a changelog.")]
#[command(after_help = "EXAMPLES:

    # Store your API key once
    lazydocs config set GROQ_API_KEY=gsk_...

    # Write README.md for the current directory
    lazydocs generate

    # Describe uncommitted changes
    lazydocs generate --type pr -o PR.md

    # Inspect what the model would see, without calling it
    lazydocs analyze -i ./src --format json
")]
pub struct Args {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a document with the model
    Generate(GenerateArgs),
    /// Analyze a directory and print the summary, no API key needed
    Analyze(AnalyzeArgs),
    /// Manage stored settings
    #[command(subcommand)]
    Config(ConfigCommand),
    /// List the models that can be used
    Models(ModelsArgs),
    /// Write a .lazydocs.json project file
    Init(InitArgs),
}

/// Document type options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DocType {
    Readme,
    Pr,
    Changelog,
}

impl From<DocType> for DocKind {
    fn from(doc_type: DocType) -> Self {
        match doc_type {
            DocType::Readme => DocKind::Readme,
            DocType::Pr => DocKind::Pr,
            DocType::Changelog => DocKind::Changelog,
        }
    }
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// Document to generate
    #[arg(short = 't', long = "type", value_enum, default_value_t = DocType::Readme)]
    pub doc_type: DocType,

    /// Project directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// Output file (README.md, PR_DESCRIPTION.md or CHANGELOG.md by default)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Model id, overrides DEFAULT_MODEL
    #[arg(short, long)]
    pub model: Option<String>,

    /// Sampling temperature (0 to 2)
    #[arg(long)]
    pub temperature: Option<String>,

    /// Maximum tokens in each completion
    #[arg(long)]
    pub max_tokens: Option<String>,

    /// Token budget for the code snippet sent to the model
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONTEXT_TOKENS)]
    pub context_tokens: usize,

    /// Commits included in a changelog
    #[arg(long, value_name = "N", default_value_t = crate::git::DEFAULT_COMMIT_LIMIT)]
    pub commits: usize,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ClapArgs, Debug)]
pub struct AnalyzeArgs {
    /// Directory to analyze
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Token budget for the combined snippet
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONTEXT_TOKENS)]
    pub context_tokens: usize,

    /// Include declaration names and snippet size
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Store one or more KEY=VALUE pairs
    Set {
        #[arg(value_name = "KEY=VALUE", required = true)]
        pairs: Vec<String>,
    },
    /// Print stored values
    Get {
        #[arg(value_name = "KEY", required = true)]
        keys: Vec<String>,
    },
    /// Print every stored value, secrets masked
    List,
    /// Remove a stored value
    Delete {
        #[arg(value_name = "KEY")]
        key: String,
    },
}

#[derive(ClapArgs, Debug)]
pub struct ModelsArgs {
    /// Ask the API for the current list
    #[arg(long)]
    pub refresh: bool,
}

#[derive(ClapArgs, Debug)]
pub struct InitArgs {
    /// Project directory
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub input: PathBuf,

    /// Project name
    #[arg(long)]
    pub name: Option<String>,

    /// One-line description
    #[arg(long)]
    pub description: Option<String>,

    /// Key feature, repeatable
    #[arg(long = "feature", value_name = "TEXT")]
    pub features: Vec<String>,

    /// Replace an existing project file
    #[arg(long)]
    pub force: bool,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}

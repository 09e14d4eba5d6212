//! Command implementations

use super::args::{
    AnalyzeArgs, Args, Commands, ConfigCommand, GenerateArgs, InitArgs, ModelsArgs,
};
use crate::config::{
    load_config, load_project_settings, package_name, parser::project_file_path,
    require_api_key, save_project_settings, ConfigStore, EnvConfig, DEFAULT_STORE_FILE,
};
use crate::core::Analyzer;
use crate::docgen::{
    available_models, generate_changelog, generate_pr_description, generate_readme,
    DocGenerator, GroqClient,
};
use crate::error::{ErrorSeverity, LazydocsError, Result};
use crate::models::config::{ConfigKey, DocKind, ProjectSettings, RawConfig};
use crate::output::document::DEFAULT_PROJECT_NAME;
use crate::output::{
    create_formatter, create_writer, FileWriter, OutputWriter, Reporter, Spinner,
};
use ansi_term::Colour::Green;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// A parsed invocation together with its global flags
#[derive(Debug)]
pub struct Command {
    command: Commands,
    use_colors: bool,
    quiet: bool,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            command: args.command,
            use_colors: !args.no_colors,
            quiet: args.quiet,
        }
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Whether debug logging was asked for
    pub fn verbose(&self) -> bool {
        match &self.command {
            Commands::Generate(args) => args.verbose,
            Commands::Analyze(args) => args.verbose,
            _ => false,
        }
    }

    /// Execute the command
    pub fn execute(&self, reporter: &dyn Reporter) -> Result<()> {
        match &self.command {
            Commands::Generate(args) => self.generate(args, reporter),
            Commands::Analyze(args) => self.analyze(args, reporter),
            Commands::Config(command) => self.config(command, reporter),
            Commands::Models(args) => self.models(args, reporter),
            Commands::Init(args) => self.init(args, reporter),
        }
    }

    /// Run the command and map failures to an exit code
    pub fn run(&self, reporter: &dyn Reporter) -> i32 {
        match self.execute(reporter) {
            Ok(()) => 0,
            Err(err) => {
                reporter.warn_err(&err);
                let code = exit_code(err.severity());
                tracing::debug!(code, severity = %err.severity(), "exiting after error");
                code
            }
        }
    }

    fn generate(&self, args: &GenerateArgs, reporter: &dyn Reporter) -> Result<()> {
        let store = open_store(reporter);
        let config = load_config(&store, &EnvConfig::default(), generate_overrides(args))?;
        let api_key = require_api_key(&config)?;
        let client = GroqClient::new(api_key, Duration::from_millis(config.timeout_ms));

        let kind = DocKind::from(args.doc_type);
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(kind.default_output()));

        let started = Instant::now();
        let spinner = Spinner::start(
            &format!("Generating {} with {}", kind, config.model),
            self.quiet,
            args.verbose,
        );
        let generator = DocGenerator::new(client, &config, reporter);

        let generated = match kind {
            DocKind::Readme => {
                generate_readme(&generator, &args.input, args.context_tokens, reporter)
                    .map(|outcome| outcome.markdown)
            }
            DocKind::Pr => generate_pr_description(&generator, &args.input, reporter),
            DocKind::Changelog => {
                generate_changelog(&generator, &args.input, args.commits, reporter)
            }
        };
        let markdown = match generated {
            Ok(markdown) => markdown,
            Err(err) => {
                spinner.abandon();
                return Err(err);
            }
        };

        let writer = FileWriter::new(&output);
        writer.write(&markdown)?;
        spinner.finish("Done");

        let line = format!(
            "Documentation written to {} ({:.1} KB) in {:.1}s",
            writer.path().display(),
            markdown.len() as f64 / 1024.0,
            started.elapsed().as_secs_f64()
        );
        self.success(&line);
        Ok(())
    }

    fn analyze(&self, args: &AnalyzeArgs, reporter: &dyn Reporter) -> Result<()> {
        let project = load_project_settings(&args.input, reporter);
        let results = Analyzer::new(reporter)
            .with_exclusions(project.exclusion_set())
            .with_token_budget(args.context_tokens)
            .analyze(&args.input);

        let formatter = create_formatter(
            args.format.into(),
            self.use_colors && args.output.is_none(),
            args.verbose,
            self.quiet,
        );
        let rendered = formatter.format(&results)?;
        create_writer(args.output.as_ref()).write(&rendered)?;

        if let Some(path) = &args.output {
            self.success(&format!("Analysis written to {}", path.display()));
        }
        Ok(())
    }

    fn config(&self, command: &ConfigCommand, reporter: &dyn Reporter) -> Result<()> {
        let mut store = open_store(reporter);

        match command {
            ConfigCommand::Set { pairs } => {
                for pair in pairs {
                    let (key, value) = split_pair(pair)?;
                    store.set(key, value)?;
                    self.success(&format!("Set {}", key));
                }
            }
            ConfigCommand::Get { keys } => {
                for key in keys {
                    match store.get(key) {
                        Some(value) => println!("{}={}", key, value),
                        None => println!("{} is not set", key),
                    }
                }
            }
            ConfigCommand::List => {
                if store.is_empty() {
                    println!("No configuration values set.");
                }
                for (key, value) in store.list() {
                    if key.contains("KEY") {
                        println!("{}={}", key, mask_secret(&value));
                    } else {
                        println!("{}={}", key, value);
                    }
                }
            }
            ConfigCommand::Delete { key } => {
                if store.delete(key)? {
                    self.success(&format!("Deleted {}", key));
                } else {
                    println!("{} was not set", key);
                }
            }
        }
        Ok(())
    }

    fn models(&self, args: &ModelsArgs, reporter: &dyn Reporter) -> Result<()> {
        let store = open_store(reporter);
        let config = load_config(&store, &EnvConfig::default(), RawConfig::default())?;

        let models = if args.refresh {
            let client = GroqClient::new(
                require_api_key(&config)?,
                Duration::from_millis(config.timeout_ms),
            );
            available_models(Some(&client), reporter)
        } else {
            available_models(None, reporter)
        };

        for model in models {
            let marker = if model == config.model { "*" } else { " " };
            println!("{} {}", marker, model);
        }
        Ok(())
    }

    fn init(&self, args: &InitArgs, reporter: &dyn Reporter) -> Result<()> {
        let path = project_file_path(&args.input);
        if path.exists() && !args.force {
            reporter.report(
                ErrorSeverity::Warning,
                &format!(
                    "{} already exists. Use --force to replace it.",
                    path.display()
                ),
            );
            return Ok(());
        }

        let settings = ProjectSettings {
            project_name: Some(
                args.name
                    .clone()
                    .or_else(|| package_name(&args.input))
                    .unwrap_or_else(|| directory_name(&args.input)),
            ),
            description: args.description.clone(),
            features: args.features.clone(),
            ..Default::default()
        };
        let written = save_project_settings(&args.input, &settings)?;
        self.success(&format!("Created {}", written.display()));
        Ok(())
    }

    fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_colors {
            eprintln!("{} {}", Green.bold().paint("✓"), message);
        } else {
            eprintln!("{}", message);
        }
    }
}

/// Exit status for an error of the given severity
pub fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => 0,
        ErrorSeverity::Error => 1,
        ErrorSeverity::Critical => 2,
    }
}

/// Split `KEY=VALUE`, trimming both halves
pub fn split_pair(pair: &str) -> Result<(&str, &str)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(LazydocsError::config_error(format!(
            "Invalid format: {}. Use KEY=VALUE",
            pair
        ))),
    }
}

/// Keep the first and last four characters of long secrets
pub fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

fn generate_overrides(args: &GenerateArgs) -> RawConfig {
    let mut raw = RawConfig::default();
    if let Some(model) = &args.model {
        raw.set(ConfigKey::DefaultModel, model.as_str());
    }
    if let Some(temperature) = &args.temperature {
        raw.set(ConfigKey::Temperature, temperature.as_str());
    }
    if let Some(max_tokens) = &args.max_tokens {
        raw.set(ConfigKey::MaxTokens, max_tokens.as_str());
    }
    raw
}

fn open_store(reporter: &dyn Reporter) -> ConfigStore {
    let path = ConfigStore::default_path().unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE));
    ConfigStore::load(path, reporter)
}

fn directory_name(dir: &Path) -> String {
    dir.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryReporter;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    fn command(argv: &[&str]) -> Command {
        Command::from_args(Args::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        assert_eq!(exit_code(ErrorSeverity::Warning), 0);
        assert_eq!(exit_code(ErrorSeverity::Error), 1);
        assert_eq!(exit_code(ErrorSeverity::Critical), 2);
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(split_pair("MAX_TOKENS=4096").unwrap(), ("MAX_TOKENS", "4096"));
        assert_eq!(split_pair(" TIMEOUT = 5000 ").unwrap(), ("TIMEOUT", "5000"));
        assert_eq!(split_pair("URL=a=b").unwrap(), ("URL", "a=b"));
        assert!(split_pair("MAX_TOKENS").is_err());
        assert!(split_pair("=4096").is_err());
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("gsk_abcdefghijklmnopqrstuvwxyz"), "gsk_...wxyz");
        assert_eq!(mask_secret("short"), "*****");
    }

    #[test]
    fn test_overrides_only_carry_given_flags() {
        let cmd = Args::try_parse_from(["lazydocs", "generate", "-m", "llama-3.1-8b-instant"])
            .unwrap();
        let Commands::Generate(args) = cmd.command else {
            panic!("expected generate");
        };
        let raw = generate_overrides(&args);
        assert_eq!(raw.get(ConfigKey::DefaultModel), Some("llama-3.1-8b-instant"));
        assert_eq!(raw.get(ConfigKey::Temperature), None);
    }

    #[test]
    fn test_analyze_writes_json_report() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("app.js"), "function main() {}\n").unwrap();
        let out = dir.path().join("report.json");

        let cmd = command(&[
            "lazydocs",
            "--quiet",
            "analyze",
            "-i",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
            "-o",
            out.to_str().unwrap(),
        ]);
        let reporter = MemoryReporter::new();
        assert_eq!(cmd.run(&reporter), 0);

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(report["fileCount"], 1);
    }

    #[test]
    fn test_init_writes_project_file_once() {
        let dir = tempdir().unwrap();
        let input = dir.path().to_str().unwrap();
        let reporter = MemoryReporter::new();

        let cmd = command(&[
            "lazydocs", "--quiet", "init", "-i", input, "--name", "demo", "--feature", "fast",
        ]);
        assert_eq!(cmd.run(&reporter), 0);

        let written = fs::read_to_string(dir.path().join(".lazydocs.json")).unwrap();
        assert!(written.contains("\"projectName\": \"demo\""));
        assert!(written.contains("\"fast\""));

        let again = command(&["lazydocs", "--quiet", "init", "-i", input, "--name", "other"]);
        assert_eq!(again.run(&reporter), 0);
        assert_eq!(reporter.warnings().len(), 1);
        let unchanged = fs::read_to_string(dir.path().join(".lazydocs.json")).unwrap();
        assert!(unchanged.contains("demo"));
    }
}

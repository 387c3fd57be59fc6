//! CLI Tooling
//!
//! Thin command-line glue over the annotation store: parses arguments,
//! validates targets, calls the store, and turns results into text.

use crate::config::{CommentsConfig, ConfigLoader};
use crate::error::{ApiError, StoreError};
use crate::listing::{Listing, ListingOptions};
use crate::logging::LoggingConfig;
use crate::normalize::{normalize_target, PathNormalizer, TrueCase, Verbatim};
use crate::render::{RenderOptions, Renderer};
use crate::store::{CommentStore, GcOptions};
use crate::types::{DeleteOutcome, Target};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// c - attach comments to files and directories
#[derive(Parser)]
#[command(name = "c")]
#[command(version)]
#[command(about = "Attach comments to files and directories without touching them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List every entry of a directory with its comment
    #[command(visible_alias = "l")]
    List {
        /// Directory to list
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// Only show entries that have a comment
        #[arg(short, long)]
        filtered: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Leave out the `.` and `..` rows
        #[arg(long)]
        no_dots: bool,
    },
    /// Set or overwrite the comment on a file or directory
    #[command(visible_alias = "s")]
    Set {
        /// File or directory to annotate
        path: PathBuf,
        /// Comment text; several words are joined with spaces
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        comment: Vec<String>,
    },
    /// Delete the comment on a file or directory
    #[command(visible_alias = "rm")]
    Remove {
        /// File or directory whose comment is removed
        path: PathBuf,
    },
    /// Remove comments whose file is gone, and empty comment stores
    Prune {
        /// Directory to clean
        #[arg(default_value = ".")]
        directory: PathBuf,
        /// Also clean every subdirectory
        #[arg(short, long)]
        recursive: bool,
        /// Report what would be removed without removing it
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the effective configuration
    Config,
}

/// CLI context: a store rooted at the working directory plus loaded configuration.
pub struct CliContext {
    store: CommentStore,
    config: CommentsConfig,
    normalizer: Box<dyn PathNormalizer>,
    color: bool,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from `config_path` or the default sources.
    pub fn new(working_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Self::with_config(working_dir, config)
    }

    /// Create a context from an already loaded configuration.
    pub fn with_config(working_dir: PathBuf, config: CommentsConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let store = CommentStore::open(&working_dir)?.with_write_mode(config.store.write_mode);
        let normalizer: Box<dyn PathNormalizer> = if config.store.match_case {
            Box::new(TrueCase)
        } else {
            Box::new(Verbatim)
        };
        let color = config.display.color;
        Ok(Self {
            store,
            config,
            normalizer,
            color,
        })
    }

    /// Force color on or off, e.g. when stdout is not a terminal.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &CommentsConfig {
        &self.config
    }

    pub fn store(&self) -> &CommentStore {
        &self.store
    }

    /// Execute a CLI command, returning the text to print.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::List {
                directory,
                filtered,
                format,
                no_dots,
            } => self.handle_list(directory, *filtered, format, !*no_dots),
            Commands::Set { path, comment } => self.handle_set(path, &comment.join(" ")),
            Commands::Remove { path } => self.handle_remove(path),
            Commands::Prune {
                directory,
                recursive,
                dry_run,
            } => self.handle_prune(directory, *recursive, *dry_run),
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                ApiError::ConfigError(format!("Failed to serialize config: {}", e))
            }),
        }
    }

    fn target(&self, raw: &Path) -> Target {
        normalize_target(self.normalizer.as_ref(), self.store.root(), raw)
    }

    fn node_exists(&self, target: &Target) -> bool {
        self.store.root().join(target.as_path()).exists()
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }

    fn handle_list(
        &self,
        directory: &Path,
        filtered: bool,
        format: &str,
        include_dot_entries: bool,
    ) -> Result<String, ApiError> {
        let directory = self.target(directory).as_path().to_path_buf();
        if !self.store.root().join(&directory).is_dir() {
            return Err(ApiError::InvalidPath(
                "Please specify a valid directory.".to_string(),
            ));
        }

        let options = ListingOptions {
            include_dot_entries,
            sort: self.config.display.sort,
        };
        let listing = Listing::load(&self.store, &directory, options)?;

        let renderer = Renderer::new(RenderOptions {
            spacing: self.config.display.spacing,
            color: self.color && format != "json",
            filter_uncommented: filtered,
        });

        match format {
            "json" => {
                let views = renderer.views(&listing.entries, &listing.comments, &listing.directory);
                let result = json!({
                    "directory": listing.directory.to_string_lossy(),
                    "entries": views,
                });
                serde_json::to_string_pretty(&result)
                    .map_err(|e| ApiError::ConfigError(format!("Failed to serialize JSON: {}", e)))
            }
            "text" => {
                let mut out = Vec::new();
                renderer
                    .render(&mut out, &listing.entries, &listing.comments, &listing.directory)
                    .map_err(|e| StoreError::Io {
                        path: listing.directory.clone(),
                        source: e,
                    })?;
                let text = String::from_utf8_lossy(&out).into_owned();
                Ok(text.strip_suffix('\n').unwrap_or(text.as_str()).to_string())
            }
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn handle_set(&self, path: &Path, comment: &str) -> Result<String, ApiError> {
        let target = self.target(path);
        if !self.node_exists(&target) {
            return Err(ApiError::InvalidPath(
                "Please specify a valid directory or file.".to_string(),
            ));
        }

        self.store.set_comment(&target, comment).map_err(invalid_path_message)?;
        info!(path = %path.display(), "Comment set");
        Ok(format!(
            "\"{}\" was applied to \"{}\" successfully.",
            self.highlight(comment),
            self.highlight(&path.display().to_string())
        ))
    }

    fn handle_remove(&self, path: &Path) -> Result<String, ApiError> {
        let target = self.target(path);
        if !self.node_exists(&target) {
            return Err(ApiError::InvalidPath(
                "Please specify a valid file or directory.".to_string(),
            ));
        }

        match self.store.delete_comment(&target).map_err(invalid_path_message)? {
            DeleteOutcome::Deleted => Ok(format!(
                "{} comment was deleted successfully.",
                path.display()
            )),
            DeleteOutcome::NotFound => {
                info!(path = %path.display(), "No comment to delete");
                Ok(format!("No comment to be deleted for \"{}\"", path.display()))
            }
        }
    }

    fn handle_prune(&self, directory: &Path, recursive: bool, dry_run: bool) -> Result<String, ApiError> {
        if !self.store.root().join(directory).is_dir() {
            return Err(ApiError::InvalidPath(
                "Please specify a valid directory.".to_string(),
            ));
        }

        let report = self
            .store
            .collect_garbage(directory, GcOptions { recursive, dry_run })?;
        if report.is_empty() {
            return Ok("Nothing to prune.".to_string());
        }

        let verb = if dry_run { "Would remove" } else { "Removed" };
        let mut lines = Vec::new();
        for orphan in &report.orphans {
            lines.push(format!("{} orphaned comment {}", verb, orphan.display()));
        }
        for container in &report.containers {
            lines.push(format!("{} empty comment store {}", verb, container.display()));
        }
        Ok(lines.join("\n"))
    }
}

fn invalid_path_message(err: StoreError) -> ApiError {
    if err.is_invalid_path() {
        ApiError::InvalidPath(err.to_string())
    } else {
        ApiError::StorageError(err)
    }
}

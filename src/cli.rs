//! Command-line interface implementation for basta.
//! Provides argument parsing and flag validation using clap.

use crate::constants::CONFIG_FILE;
use crate::error::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Command-line arguments structure for basta.
#[derive(Parser, Debug)]
#[command(author, version, about = "basta: generate new projects from template directories", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generates a new project based on the template and provided variables
    Generate(GenerateArgs),
    /// Bootstraps a new template directory
    Init(InitArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Template root directory
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// Directory where the generated project will be created; must not exist
    #[arg(long, value_name = "DIR")]
    pub dest: PathBuf,

    /// Template configuration file, relative to the template root
    #[arg(long, value_name = "FILE", default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// YAML file with the variable values; prompts interactively when omitted
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Root directory of the new template
    #[arg(long, value_name = "DIR")]
    pub name: PathBuf,
}

fn flag_error(flag: &str, message: String) -> Error {
    Error::FlagValidationError {
        flag: flag.to_string(),
        message,
    }
}

fn file_exists(flag: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(flag_error(flag, format!("({}) file not found", path.display())));
    }
    if !path.is_file() {
        return Err(flag_error(flag, format!("({}) is not a file", path.display())));
    }
    Ok(())
}

impl GenerateArgs {
    /// Full path of the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.src.join(&self.config)
    }

    /// Checks the flags before anything is read or written.
    pub fn validate(&self) -> Result<()> {
        if !self.src.exists() {
            return Err(flag_error(
                "src",
                format!("({}) directory not found", self.src.display()),
            ));
        }
        if !self.src.is_dir() {
            return Err(flag_error(
                "src",
                format!("({}) is not a directory", self.src.display()),
            ));
        }
        if self.dest.exists() {
            return Err(flag_error(
                "dest",
                format!("({}) directory already exists", self.dest.display()),
            ));
        }
        file_exists("config", &self.config_path())?;
        if let Some(input) = &self.input {
            file_exists("input", input)?;
        }
        Ok(())
    }
}

impl InitArgs {
    pub fn validate(&self) -> Result<()> {
        if self.name.as_os_str().is_empty() {
            return Err(flag_error("name", "is required".to_string()));
        }
        if self.name.exists() {
            return Err(flag_error(
                "name",
                format!("({}) already exists", self.name.display()),
            ));
        }
        Ok(())
    }
}

/// Parses command line arguments, exiting with clap's message on errors.
pub fn get_args() -> Args {
    Args::parse()
}

//! Error handling for basta.
//! Defines the error type and result alias used throughout the crate.

use thiserror::Error;

/// Errors that can occur while loading, rendering or writing a template.
///
/// The generation pipeline never logs its own failures; every error is
/// returned to the caller, which decides how to report it.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// Errors raised while walking the template directory
    #[error("Failed to walk the template directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Template entries whose paths cannot be recorded relative to the root
    #[error("Invalid template entry '{path}': {reason}.")]
    TemplateEntryError { path: String, reason: String },

    /// Malformed ignore rule, detected before any traversal
    #[error("Invalid ignore pattern '{pattern}': {reason}.")]
    IgnorePatternError { pattern: String, reason: String },

    /// Parse or execution errors of the Go template engine
    #[error("Template error: {0}.")]
    TemplateError(String),

    /// Errors raised by the MiniJinja engine
    #[error("Template rendering error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A file path rendered into something that cannot live under the destination
    #[error("Rendered path '{rendered}' of '{source_path}' is not a valid relative path.")]
    InvalidRenderedPath { source_path: String, rendered: String },

    /// Two template files rendered into the same destination path
    #[error("Template files '{first}' and '{second}' both render to '{rendered}'.")]
    DuplicateOutputPath { first: String, second: String, rendered: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors while parsing YAML documents
    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    /// A variable was declared but no value and no default was provided
    #[error("Missing value for variable '{name}'.")]
    MissingVariable { name: String },

    /// A provided value does not fit the declared variable type
    #[error("Invalid value for variable '{name}': expected {expected}, got '{value}'.")]
    InvalidVariableValue { name: String, expected: String, value: String },

    /// Errors raised by the interactive prompter
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    /// Command-line flag validation failures
    #[error("Invalid flag --{flag}: {message}.")]
    FlagValidationError { flag: String, message: String },

    #[error("Template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Output directory '{output_dir}' already exists.")]
    OutputDirectoryExistsError { output_dir: String },
}

/// Convenience type alias for results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}

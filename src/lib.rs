//! basta generates new projects from template directories.
//! A template tree is loaded into memory, its paths and contents are rendered
//! against user-provided variables, and the result is written to a fresh
//! directory that is removed again if anything goes wrong.

/// Initialization of a new template skeleton
pub mod bootstrap;

/// Command-line interface module for the basta application
pub mod cli;

/// Template configuration file (`basta.yaml`) handling
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for the basta application
pub mod error;

/// Ignore rules deciding which template entries take part in generation
pub mod ignore;

/// Template tree loading
pub mod loader;

pub mod logger;

/// Variable collection from answer files and prompts
pub mod parser;

/// User input and interaction handling
pub mod prompt;

/// Template engines behind a common trait
pub mod renderer;

/// Rendering and writing of the output directory
pub mod writer;

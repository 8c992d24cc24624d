//! basta's main application entry point and orchestration logic.
//! Handles command-line argument parsing and drives the load, render and
//! write stages of project generation.

use basta::{
    bootstrap::bootstrap,
    cli::{get_args, Args, Command, GenerateArgs, InitArgs},
    config::load_config,
    error::{default_error_handler, Result},
    loader::load_tree,
    logger::init_logger,
    parser::{get_answers, get_answers_from_file},
    prompt::DialoguerPrompter,
    renderer::get_renderer,
    writer::generate,
};
use log::{debug, info};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Generate(generate_args) => run_generate(generate_args),
        Command::Init(init_args) => run_init(init_args),
    }
}

/// Generates a project.
///
/// # Flow
/// 1. Validates flags
/// 2. Loads the template configuration
/// 3. Loads the template tree
/// 4. Collects variables from the input file or interactively
/// 5. Renders and writes the output directory
fn run_generate(args: GenerateArgs) -> Result<()> {
    debug!("{:?}", args);
    info!("Validating user input");
    args.validate()?;

    info!("Loading configuration file '{}'", args.config_path().display());
    let config = load_config(args.config_path())?;
    let matcher = config.matcher(&args.src)?;
    let renderer = get_renderer(config.engine);

    info!("Parsing template files");
    let files = load_tree(&args.src, &matcher, &*renderer)?;
    debug!("Loaded {} template files", files.len());

    let answers = match &args.input {
        Some(input) => {
            info!("Loading template variables from '{}'", input.display());
            get_answers_from_file(&config.variables, input)?
        }
        None => {
            info!("Getting template variables interactively");
            get_answers(&DialoguerPrompter::new(), &config.variables)?
        }
    };

    info!("Creating new project in '{}'", args.dest.display());
    generate(&args.dest, &files, &answers, &*renderer)?;

    info!("Done");
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    info!("Validating user input");
    args.validate()?;

    info!("Bootstrapping new template in '{}'", args.name.display());
    bootstrap(&args.name)?;

    info!("Done");
    Ok(())
}

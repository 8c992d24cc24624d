use basta::cli::{Args, Command};
use basta::error::Error;
use clap::Parser;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("basta")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_generate_args() {
    let args = make_args(&["generate", "--src", "./template", "--dest", "./output"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(!parsed.verbose);
    match parsed.command {
        Command::Generate(generate) => {
            assert_eq!(generate.src, PathBuf::from("./template"));
            assert_eq!(generate.dest, PathBuf::from("./output"));
            assert_eq!(generate.config, PathBuf::from("basta.yaml"));
            assert_eq!(generate.input, None);
            assert_eq!(generate.config_path(), PathBuf::from("./template/basta.yaml"));
        }
        other => panic!("Expected generate, got {:?}", other),
    }
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "generate",
        "-v",
        "--src",
        "t",
        "--dest",
        "o",
        "--config",
        "template.yml",
        "--input",
        "answers.yaml",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.verbose);
    match parsed.command {
        Command::Generate(generate) => {
            assert_eq!(generate.config, PathBuf::from("template.yml"));
            assert_eq!(generate.input, Some(PathBuf::from("answers.yaml")));
        }
        other => panic!("Expected generate, got {:?}", other),
    }
}

#[test]
fn test_init_args() {
    let parsed = Args::try_parse_from(make_args(&["--verbose", "init", "--name", "tmpl"])).unwrap();
    assert!(parsed.verbose);
    assert!(matches!(parsed.command, Command::Init(ref init) if init.name == PathBuf::from("tmpl")));
}

#[test]
fn test_missing_args() {
    assert!(Args::try_parse_from(make_args(&["generate", "--src", "t"])).is_err());
    assert!(Args::try_parse_from(make_args(&["init"])).is_err());
    assert!(Args::try_parse_from(make_args(&[])).is_err());
}

fn generate_args(src: &std::path::Path, dest: &std::path::Path, input: Option<&str>) -> Args {
    let mut raw = vec![
        "generate".to_string(),
        "--src".to_string(),
        src.display().to_string(),
        "--dest".to_string(),
        dest.display().to_string(),
    ];
    if let Some(input) = input {
        raw.push("--input".to_string());
        raw.push(input.to_string());
    }
    let raw: Vec<&str> = raw.iter().map(String::as_str).collect();
    Args::try_parse_from(make_args(&raw)).unwrap()
}

fn validate(args: Args) -> Result<(), Error> {
    match args.command {
        Command::Generate(generate) => generate.validate(),
        Command::Init(init) => init.validate(),
    }
}

fn flag_of(result: Result<(), Error>) -> String {
    match result {
        Err(Error::FlagValidationError { flag, .. }) => flag,
        other => panic!("Expected FlagValidationError, got {:?}", other),
    }
}

#[test]
fn test_generate_validation() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("template");
    let dest = temp_dir.path().join("output");

    assert_eq!(flag_of(validate(generate_args(&src, &dest, None))), "src");

    fs::create_dir(&src).unwrap();
    assert_eq!(flag_of(validate(generate_args(&src, &dest, None))), "config");

    fs::write(src.join("basta.yaml"), "").unwrap();
    assert!(validate(generate_args(&src, &dest, None)).is_ok());

    assert_eq!(
        flag_of(validate(generate_args(&src, &dest, Some("missing.yaml")))),
        "input"
    );

    fs::create_dir(&dest).unwrap();
    assert_eq!(flag_of(validate(generate_args(&src, &dest, None))), "dest");
}

#[test]
fn test_init_validation() {
    let temp_dir = TempDir::new().unwrap();
    let existing = temp_dir.path().display().to_string();
    let fresh = temp_dir.path().join("new").display().to_string();

    let args = Args::try_parse_from(make_args(&["init", "--name", &existing])).unwrap();
    assert_eq!(flag_of(validate(args)), "name");

    let args = Args::try_parse_from(make_args(&["init", "--name", &fresh])).unwrap();
    assert!(validate(args).is_ok());
}

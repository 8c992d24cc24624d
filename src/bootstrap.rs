//! Creates a minimal, working template skeleton.

use crate::constants::CONFIG_FILE;
use crate::error::Result;
use crate::writer::{cleanup, create_output_dir};
use log::debug;
use std::fs;
use std::path::Path;

const README_FILE: &str = "readme.md";
const README_TEXT: &str = r#"# template

This is the readme of the template.

It will not be copied to generated projects because
it is listed in the `ignore` section of basta.yaml.

To generate a project from this template run:

    basta generate --src <this-directory> --dest <new-project>

Replace this file with information that is relevant for your template!
"#;

const CONFIG_TEXT: &str = r#"---
ignore:
  - .git/
  - readme.md
  - basta.yaml

variables:
  - name: name
    type: string
    description: your name so that you can be greeted
  - name: greet
    type: string
    description: your favorite greet expression
    default: hello
"#;

const SCRIPT_FILE: &str = "main.sh";
const SCRIPT_MODE: u32 = 0o777;
const SCRIPT_TEXT: &str = r#"#!/bin/sh

# Your generated code below
echo {{.greet}} {{.name}}!
"#;

fn write_skeleton(dest: &Path) -> Result<()> {
    fs::write(dest.join(README_FILE), README_TEXT)?;
    fs::write(dest.join(CONFIG_FILE), CONFIG_TEXT)?;

    let script = dest.join(SCRIPT_FILE);
    fs::write(&script, SCRIPT_TEXT)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script, fs::Permissions::from_mode(SCRIPT_MODE))?;
    }
    #[cfg(not(unix))]
    debug!("Leaving default permissions on '{}' (mode {:o})", script.display(), SCRIPT_MODE);
    Ok(())
}

/// Creates a new template directory at `dest`.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if `dest` exists
/// * `Error::IoError` on write failures, after `dest` was removed again
pub fn bootstrap<P: AsRef<Path>>(dest: P) -> Result<()> {
    let dest = dest.as_ref();
    create_output_dir(dest)?;
    debug!("Writing template skeleton to '{}'", dest.display());

    let result = write_skeleton(dest);
    if result.is_err() {
        cleanup(dest);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::renderer::{GoTemplateRenderer, TemplateRenderer};

    #[test]
    fn test_skeleton_config_is_valid() {
        let config = parse_config(CONFIG_TEXT).unwrap();
        assert_eq!(config.variables.len(), 2);
        assert!(config.ignore.iter().any(|rule| rule == CONFIG_FILE));
        assert!(config.ignore.iter().any(|rule| rule == README_FILE));
    }

    #[test]
    fn test_skeleton_script_is_a_template() {
        let renderer = GoTemplateRenderer::new();
        assert!(renderer.is_template(SCRIPT_TEXT));
        let out = renderer
            .render(SCRIPT_TEXT, &serde_json::json!({"greet": "hi", "name": "Ann"}))
            .unwrap();
        assert!(out.ends_with("echo hi Ann!\n"));
    }
}

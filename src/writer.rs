//! Materializes a loaded template tree into a fresh output directory.
//!
//! Every path and every template content is rendered before the output
//! directory is created. Once it exists, any failure removes it again, so
//! either the whole tree is generated or nothing is left behind.

use crate::error::{Error, Result};
use crate::loader::TemplateFile;
use crate::renderer::TemplateRenderer;
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A file ready to be written, relative to the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path of the template file it was rendered from
    pub source_path: String,
    /// Rendered path, relative to the output root
    pub path: PathBuf,
    pub mode: u32,
    pub content: Vec<u8>,
}

/// Checks that a rendered path stays strictly below the output root.
///
/// Rejects absolute paths, empty segments (`a//b`) and `.`/`..` segments.
pub fn is_rendered_path_valid(rendered: &str) -> bool {
    !rendered.is_empty()
        && !rendered.starts_with('/')
        && !rendered.contains('\\')
        && rendered
            .split('/')
            .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
}

fn render_content(
    file: &TemplateFile,
    variables: &serde_json::Value,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<u8>> {
    if !file.is_template {
        return Ok(file.content.clone());
    }
    let text = file.text().ok_or_else(|| {
        Error::TemplateError(format!("'{}' is marked as a template but is not UTF-8", file.path))
    })?;
    Ok(renderer.render(text, variables)?.into_bytes())
}

/// Renders paths and contents of all files without touching the filesystem.
///
/// Files whose path renders to an empty string are left out.
///
/// # Errors
/// * Rendering errors of the path or content of any file
/// * `Error::InvalidRenderedPath` if a path escapes the output root
/// * `Error::DuplicateOutputPath` if two files render to the same path
pub fn render_files(
    files: &[TemplateFile],
    variables: &serde_json::Value,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<RenderedFile>> {
    let mut rendered_files = Vec::with_capacity(files.len());
    let mut seen: HashMap<String, String> = HashMap::new();

    for file in files {
        let rendered = renderer.render(&file.path, variables)?;
        if rendered.trim().is_empty() {
            debug!("Skipping '{}' as its path renders empty", file.path);
            continue;
        }
        if !is_rendered_path_valid(&rendered) {
            return Err(Error::InvalidRenderedPath {
                source_path: file.path.clone(),
                rendered,
            });
        }
        if let Some(first) = seen.insert(rendered.clone(), file.path.clone()) {
            return Err(Error::DuplicateOutputPath {
                first,
                second: file.path.clone(),
                rendered,
            });
        }

        let content = render_content(file, variables, renderer)?;
        debug!("Rendered '{}' -> '{}'", file.path, rendered);

        rendered_files.push(RenderedFile {
            source_path: file.path.clone(),
            path: rendered.split('/').collect(),
            mode: file.mode,
            content,
        });
    }

    Ok(rendered_files)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

fn write_file(output_root: &Path, file: &RenderedFile) -> Result<()> {
    let target = output_root.join(&file.path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, &file.content)?;
    set_mode(&target, file.mode)?;
    debug!("Wrote '{}' (mode={:o})", target.display(), file.mode);
    Ok(())
}

/// Creates `output_root`, failing if anything already exists at that path.
pub fn create_output_dir(output_root: &Path) -> Result<()> {
    let exists_error = || Error::OutputDirectoryExistsError {
        output_dir: output_root.display().to_string(),
    };
    if fs::symlink_metadata(output_root).is_ok() {
        return Err(exists_error());
    }
    fs::create_dir(output_root).map_err(|e| match e.kind() {
        std::io::ErrorKind::AlreadyExists => exists_error(),
        _ => Error::IoError(e),
    })
}

/// Best-effort removal of a partially generated output directory.
///
/// A failed removal is logged and never replaces the error that caused it.
pub fn cleanup(output_root: &Path) {
    debug!("Removing '{}'", output_root.display());
    if let Err(e) = fs::remove_dir_all(output_root) {
        warn!("Failed to remove '{}': {}", output_root.display(), e);
    }
}

/// Writes already rendered files below a fresh `output_root`.
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` if `output_root` exists; nothing is touched
/// * `Error::IoError` on any write failure, after the output root was removed
pub fn write_files<P: AsRef<Path>>(output_root: P, files: &[RenderedFile]) -> Result<()> {
    let output_root = output_root.as_ref();
    create_output_dir(output_root)?;

    let result = files.iter().try_for_each(|file| write_file(output_root, file));
    if result.is_err() {
        cleanup(output_root);
    }
    result
}

/// Generates a project from loaded template files.
///
/// # Arguments
/// * `output_root` - Directory to create; it must not exist yet
/// * `files` - Files produced by [`crate::loader::load_tree`]
/// * `variables` - Resolved variables, used as the template context
/// * `renderer` - Engine used for paths and contents
///
/// # Errors
/// * `Error::OutputDirectoryExistsError` before any rendering or mutation
/// * Rendering errors, raised before the output root is created
/// * Write errors, after which the output root no longer exists
pub fn generate<P: AsRef<Path>>(
    output_root: P,
    files: &[TemplateFile],
    variables: &serde_json::Value,
    renderer: &dyn TemplateRenderer,
) -> Result<()> {
    let output_root = output_root.as_ref();
    if fs::symlink_metadata(output_root).is_ok() {
        return Err(Error::OutputDirectoryExistsError {
            output_dir: output_root.display().to_string(),
        });
    }

    let rendered = render_files(files, variables, renderer)?;
    write_files(output_root, &rendered)
}

//! Template tree loading for basta.
//! Walks the template directory once and reads every participating file
//! into memory, classifying it as a template or a raw asset.
use crate::error::{Error, Result};
use crate::ignore::Matcher;
use crate::renderer::TemplateRenderer;
use log::debug;
use std::fs;
use std::path::{Component, Path};
use walkdir::WalkDir;

/// One file of the template tree, held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the template root, `/`-separated
    pub path: String,
    /// Permission bits of the source file
    pub mode: u32,
    /// Raw content of the source file
    pub content: Vec<u8>,
    /// Whether the content is rendered or copied verbatim
    pub is_template: bool,
}

impl TemplateFile {
    /// Content as text, for files classified as templates.
    pub fn text(&self) -> Option<&str> {
        if self.is_template {
            std::str::from_utf8(&self.content).ok()
        } else {
            None
        }
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Joins the normal components of `relative` with `/`.
fn slash_path(relative: &Path) -> Result<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                parts.push(part.to_str().ok_or_else(|| Error::TemplateEntryError {
                    path: relative.display().to_string(),
                    reason: "name is not valid UTF-8".to_string(),
                })?)
            }
            _ => {
                return Err(Error::TemplateEntryError {
                    path: relative.display().to_string(),
                    reason: "unexpected path component".to_string(),
                })
            }
        }
    }
    Ok(parts.join("/"))
}

/// Classifies `content` as a template if it is UTF-8 and parses under `renderer`.
pub fn is_template_content(content: &[u8], renderer: &dyn TemplateRenderer) -> bool {
    match std::str::from_utf8(content) {
        Ok(text) => renderer.is_template(text),
        Err(_) => false,
    }
}

/// Loads every non-ignored regular file below `template_root`.
///
/// Entries are visited depth-first in file name order, so the result is
/// deterministic. Ignored directories are not descended into.
///
/// # Errors
/// * `Error::TemplateDoesNotExistsError` if the root is missing or not a directory
/// * `Error::WalkError` / `Error::IoError` on any stat or read failure and
///   `Error::TemplateEntryError` for a path that is not UTF-8; no partial
///   result is returned
pub fn load_tree<P: AsRef<Path>>(
    template_root: P,
    matcher: &Matcher,
    renderer: &dyn TemplateRenderer,
) -> Result<Vec<TemplateFile>> {
    let template_root = template_root.as_ref();
    if !template_root.is_dir() {
        return Err(Error::TemplateDoesNotExistsError {
            template_dir: template_root.display().to_string(),
        });
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(template_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let ignored = entry.depth() > 0 && matcher.matches(entry.path());
            if ignored {
                debug!("Skipping '{}' (ignored)", entry.path().display());
            }
            !ignored
        });

    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if !file_type.is_file() {
            debug!("Skipping '{}' (not a regular file)", entry.path().display());
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(template_root)
            .map_err(|e| Error::TemplateEntryError {
                path: entry.path().display().to_string(),
                reason: e.to_string(),
            })?;
        let path = slash_path(relative)?;
        let mode = permission_bits(&entry.metadata()?);
        let content = fs::read(entry.path())?;
        let is_template = is_template_content(&content, renderer);

        debug!(
            "Loaded '{}' (mode={:o}, template={}, bytes={})",
            path,
            mode,
            is_template,
            content.len()
        );

        files.push(TemplateFile {
            path,
            mode,
            content,
            is_template,
        });
    }

    Ok(files)
}

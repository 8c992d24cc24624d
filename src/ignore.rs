//! File and directory ignore rules for basta templates.
//! A rule ending in `/` excludes a whole directory (and stops the walk from
//! descending into it); any other rule is a glob pattern anchored at the
//! template root.

use crate::constants::IGNORE_COMMENT;
use crate::error::{Error, Result};
use globset::{GlobBuilder, GlobMatcher};
use log::debug;
use std::path::{Component, Path, PathBuf};

/// A single parsed ignore rule.
#[derive(Debug, Clone)]
pub enum IgnoreRule {
    /// Excludes the directory and everything below it.
    Directory(PathBuf),
    /// Excludes every path matching the pattern, relative to the root.
    Pattern(GlobMatcher),
}

/// Immutable set of ignore rules for one template root.
#[derive(Debug, Clone)]
pub struct Matcher {
    root: PathBuf,
    rules: Vec<IgnoreRule>,
}

/// Removes `./` and leading `/` so that a rule is always relative to the root.
fn normalize_rule(rule: &str) -> String {
    let mut rule = rule;
    loop {
        if let Some(rest) = rule.strip_prefix("./") {
            rule = rest;
        } else if let Some(rest) = rule.strip_prefix('/') {
            rule = rest;
        } else {
            return rule.to_string();
        }
    }
}

/// Compiles a glob with fnmatch semantics: `*` and `?` never match `/`.
fn compile_pattern(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| Error::IgnorePatternError {
            pattern: pattern.to_string(),
            reason: e.kind().to_string(),
        })
}

impl Matcher {
    /// Builds a matcher from ignore text, one rule per line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Example
    /// ```
    /// use basta::ignore::Matcher;
    ///
    /// let matcher = Matcher::parse("/tmpl", "# comment\nbuild/\n*.log\n").unwrap();
    /// assert!(matcher.matches("/tmpl/build/out.bin"));
    /// assert!(matcher.matches("/tmpl/debug.log"));
    /// assert!(!matcher.matches("/tmpl/src/debug.log"));
    /// ```
    pub fn parse<P: AsRef<Path>>(root: P, source: &str) -> Result<Self> {
        Self::from_rules(root, source.lines())
    }

    /// Builds a matcher from an already split list of rules.
    pub fn from_rules<P, I, S>(root: P, rules: I) -> Result<Self>
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = root.as_ref().to_path_buf();
        let mut parsed = Vec::new();

        for line in rules {
            let line = line.as_ref().trim();
            if line.is_empty() || line.starts_with(IGNORE_COMMENT) {
                continue;
            }

            let rule = normalize_rule(line);
            if line.ends_with('/') {
                let dir = rule.trim_end_matches('/');
                if dir.is_empty() {
                    return Err(Error::IgnorePatternError {
                        pattern: line.to_string(),
                        reason: "directory rule must name a directory below the root"
                            .to_string(),
                    });
                }
                debug!("Ignoring directory '{}'", dir);
                parsed.push(IgnoreRule::Directory(root.join(dir)));
            } else {
                debug!("Ignoring pattern '{}'", rule);
                parsed.push(IgnoreRule::Pattern(compile_pattern(&rule)?));
            }
        }

        Ok(Self { root, rules: parsed })
    }

    /// Returns the template root the rules are anchored at.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the parsed rules, in declaration order.
    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Reports whether `path` must be left out of generation.
    ///
    /// A directory for which this returns `true` must not be descended into.
    pub fn matches<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref();

        for rule in &self.rules {
            if let IgnoreRule::Directory(dir) = rule {
                if path.ancestors().any(|ancestor| ancestor == dir) {
                    return true;
                }
            }
        }

        let Some(relative) = self.relative_slash_path(path) else {
            return false;
        };
        self.rules.iter().any(|rule| match rule {
            IgnoreRule::Pattern(glob) => glob.is_match(&relative),
            IgnoreRule::Directory(_) => false,
        })
    }

    /// Path relative to the root with `/` separators, `None` outside the root.
    fn relative_slash_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("/"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let matcher = Matcher::parse("/t", "\n# readme.md\n\n   \n").unwrap();
        assert!(matcher.rules().is_empty());
        assert!(!matcher.matches("/t/readme.md"));
    }

    #[test]
    fn test_directory_rule_matches_dir_and_descendants() {
        let matcher = Matcher::parse("/t", "build/").unwrap();
        assert!(matcher.matches("/t/build"));
        assert!(matcher.matches("/t/build/a.txt"));
        assert!(matcher.matches("/t/build/deep/er/b.txt"));
        assert!(!matcher.matches("/t/builder/a.txt"));
        assert!(!matcher.matches("/t/src/build.rs"));
    }

    #[test]
    fn test_nested_directory_rule() {
        let matcher = Matcher::parse("/t", "./a/b/").unwrap();
        assert!(matcher.matches("/t/a/b/c"));
        assert!(!matcher.matches("/t/a/c"));
        assert!(!matcher.matches("/t/b/c"));
    }

    #[test]
    fn test_star_does_not_cross_separator() {
        let matcher = Matcher::parse("/t", "*.md").unwrap();
        assert!(matcher.matches("/t/readme.md"));
        assert!(!matcher.matches("/t/docs/readme.md"));
    }

    #[test]
    fn test_question_mark_and_class() {
        let matcher = Matcher::parse("/t", "file?.txt\nlog[0-9].txt").unwrap();
        assert!(matcher.matches("/t/file1.txt"));
        assert!(!matcher.matches("/t/file10.txt"));
        assert!(matcher.matches("/t/log7.txt"));
        assert!(!matcher.matches("/t/logx.txt"));
    }

    #[test]
    fn test_pattern_with_directory_part() {
        let matcher = Matcher::parse("/t", "docs/*.md").unwrap();
        assert!(matcher.matches("/t/docs/intro.md"));
        assert!(!matcher.matches("/t/intro.md"));
    }

    #[test]
    fn test_malformed_pattern_fails_at_construction() {
        let err = Matcher::parse("/t", "ok.txt\n[unclosed").unwrap_err();
        assert!(matches!(err, Error::IgnorePatternError { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_root_directory_rule_is_rejected() {
        assert!(Matcher::parse("/t", "/").is_err());
    }

    #[test]
    fn test_paths_outside_root_only_match_directory_rules() {
        let matcher = Matcher::parse("/t", "*.md").unwrap();
        assert!(!matcher.matches("/other/readme.md"));
        assert!(!matcher.matches("/t"));
    }
}

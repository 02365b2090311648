//! Zip a validated skill directory for distribution.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::CompressionMethod;
use zip::write::FileOptions;

use crate::config::PackageConfig;
use crate::error::{Result, SmithError};
use crate::lint::{SkillValidator, ValidationOutcome};
use crate::utils::ensure_dir;

use super::SKILL_FILE;

#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    pub skill_dir: PathBuf,
    pub archive: PathBuf,
    /// Archive entry names, in the order they were written
    pub entries: Vec<String>,
    pub validation: ValidationOutcome,
}

/// Build artifacts that never go into an archive.
#[derive(Debug, Clone)]
pub struct ExcludeRules<'a> {
    config: &'a PackageConfig,
}

impl<'a> ExcludeRules<'a> {
    pub const fn new(config: &'a PackageConfig) -> Self {
        Self { config }
    }

    /// `relative` is the path below the skill directory.
    pub fn is_excluded(&self, relative: &Path) -> bool {
        let in_excluded_dir = relative.components().any(|component| match component {
            Component::Normal(part) => self
                .config
                .exclude_dirs
                .iter()
                .any(|dir| part == dir.as_str()),
            _ => false,
        });
        if in_excluded_dir {
            return true;
        }

        let Some(file_name) = relative.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.config.exclude_names.iter().any(|name| name == file_name)
            || self
                .config
                .exclude_suffixes
                .iter()
                .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

/// Files to archive, sorted, paired with their entry names.
pub fn collect_entries(skill_dir: &Path, config: &PackageConfig) -> Result<Vec<(PathBuf, String)>> {
    let base = skill_dir.parent().unwrap_or(skill_dir);
    let excludes = ExcludeRules::new(config);
    let mut entries = Vec::new();

    // Symlinked files and directories are archived as their targets.
    for entry in WalkDir::new(skill_dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if is_unreadable_link(&err) => {
                warn!(error = %err, "skipping unreadable link in skill");
                continue;
            }
            Err(err) => {
                return Err(SmithError::Archive(format!(
                    "walk {}: {err}",
                    skill_dir.display()
                )));
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let below_skill = path.strip_prefix(skill_dir).unwrap_or(path);
        if excludes.is_excluded(below_skill) {
            debug!(path = %below_skill.display(), "excluded from archive");
            continue;
        }
        let name = path
            .strip_prefix(base)
            .unwrap_or(path)
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");
        entries.push((path.to_path_buf(), name));
    }
    Ok(entries)
}

/// Symlink loops and dangling links are skipped rather than failing the walk.
fn is_unreadable_link(err: &walkdir::Error) -> bool {
    err.loop_ancestor().is_some()
        || err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

/// Validate `skill_path` and write `<output_dir>/<dir-name>.zip`.
pub fn package_skill(
    skill_path: &Path,
    output_dir: &Path,
    validator: &SkillValidator,
    comprehensive: bool,
    config: &PackageConfig,
) -> Result<PackageSummary> {
    if !skill_path.exists() {
        return Err(SmithError::NotFound(format!(
            "skill folder not found: {}",
            skill_path.display()
        )));
    }
    if !skill_path.is_dir() {
        return Err(SmithError::InvalidArgument(format!(
            "path is not a directory: {}",
            skill_path.display()
        )));
    }
    let skill_dir = std::fs::canonicalize(skill_path)?;
    if !skill_dir.join(SKILL_FILE).is_file() {
        return Err(SmithError::InvalidSkill(format!(
            "{SKILL_FILE} not found in {}",
            skill_dir.display()
        )));
    }

    let validation = validator.validate(&skill_dir, comprehensive)?;
    if !validation.valid {
        return Err(SmithError::ValidationFailed(validation.report));
    }

    let skill_name = skill_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| SmithError::InvalidArgument("skill path has no directory name".to_string()))?;

    ensure_dir(output_dir)?;
    let archive = output_dir.join(format!("{skill_name}.zip"));
    let files = collect_entries(&skill_dir, config)?;

    let mut writer = zip::ZipWriter::new(BufWriter::new(File::create(&archive)?));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut entries = Vec::with_capacity(files.len());
    let total = files.len();

    for (index, (path, name)) in files.into_iter().enumerate() {
        writer
            .start_file(name.as_str(), options)
            .map_err(|err| SmithError::Archive(format!("start {name}: {err}")))?;
        let bytes = std::fs::read(&path)?;
        writer.write_all(&bytes)?;
        debug!(entry = %name, "added ({}/{total})", index + 1);
        entries.push(name);
    }

    let mut inner = writer
        .finish()
        .map_err(|err| SmithError::Archive(format!("finish {}: {err}", archive.display())))?;
    inner.flush()?;

    info!(archive = %archive.display(), entries = entries.len(), "packaged skill");
    Ok(PackageSummary {
        skill_dir,
        archive,
        entries,
        validation,
    })
}

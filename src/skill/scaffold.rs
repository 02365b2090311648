//! Create a new skill directory from templates.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, SmithError};
use crate::lint::rules::skill_name_problem;
use crate::utils::make_executable;

use super::SKILL_FILE;
use super::templates::SkillTemplate;

pub const RESOURCE_DIRS: [&str; 3] = ["scripts", "references", "assets"];

#[derive(Debug, Clone, Serialize)]
pub struct InitSummary {
    pub name: String,
    pub skill_dir: PathBuf,
    pub minimal: bool,
    /// Paths relative to `skill_dir`, in creation order
    pub created: Vec<String>,
}

/// Create `<path>/<name>` with SKILL.md, CHANGELOG.md and resource directories.
///
/// Files written before a failure are left in place.
pub fn init_skill(name: &str, path: &Path, minimal: bool) -> Result<InitSummary> {
    if let Some(problem) = skill_name_problem(name) {
        return Err(SmithError::InvalidArgument(problem));
    }

    let skill_dir = path.join(name);
    if skill_dir.exists() {
        return Err(SmithError::AlreadyExists(skill_dir));
    }
    fs::create_dir_all(&skill_dir)?;
    info!(skill = name, dir = %skill_dir.display(), "created skill directory");

    let template = SkillTemplate::new(name, minimal);
    let mut created = Vec::new();
    let mut write = |relative: &str, content: &str| -> Result<PathBuf> {
        let target = skill_dir.join(relative);
        fs::write(&target, content)?;
        debug!(file = relative, "wrote");
        created.push(relative.to_string());
        Ok(target)
    };

    write(SKILL_FILE, &template.skill_md())?;
    let timestamp = Local::now().format("%d %b %Y %H:%M").to_string();
    write("CHANGELOG.md", &template.changelog_md(&timestamp))?;

    for dir in RESOURCE_DIRS {
        fs::create_dir_all(skill_dir.join(dir))?;
    }

    if !minimal {
        let script = write("scripts/example.py", &template.example_script())?;
        make_executable(&script)?;
        write("references/reference.md", &template.example_reference())?;
        write("assets/.gitkeep", SkillTemplate::asset_placeholder())?;
    }

    Ok(InitSummary {
        name: name.to_string(),
        skill_dir,
        minimal,
        created,
    })
}

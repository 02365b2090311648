//! Skill authoring: parse, scaffold, package and smoke-test skill directories.

pub mod document;
pub mod package;
pub mod scaffold;
pub mod smoke;
pub mod templates;

pub use document::{Frontmatter, Heading, SKILL_FILE, SkillDocument};
pub use package::{ExcludeRules, PackageSummary, package_skill};
pub use scaffold::{InitSummary, RESOURCE_DIRS, init_skill};
pub use smoke::{SmokeReport, count_example_prompts, smoke_test};
pub use templates::SkillTemplate;

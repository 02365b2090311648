//! Scaffolding templates for `skillsmith init`.
//!
//! Placeholders are `[TODO ...]` markers so that comprehensive validation
//! refuses to pass a skill until they are filled in.

use crate::utils::title_case;

/// Rendered files for a new skill.
#[derive(Debug, Clone)]
pub struct SkillTemplate {
    pub name: String,
    pub title: String,
    pub minimal: bool,
}

impl SkillTemplate {
    pub fn new(name: &str, minimal: bool) -> Self {
        Self {
            name: name.to_string(),
            title: title_case(name),
            minimal,
        }
    }

    pub fn skill_md(&self) -> String {
        let name = &self.name;
        let title = &self.title;
        if self.minimal {
            return format!(
                "---
name: {name}
description: [TODO: This skill MUST be loaded before [action]. Use it when [trigger conditions] to [purpose].]
metadata:
  version: 0.0.0
  changelog: {name}/CHANGELOG.md
---

# {title}

## Overview

[TODO: One or two sentences on what this skill enables]

## [TODO: Sections that follow the chosen structure pattern]
"
            );
        }

        format!(
            "---
name: {name}
description: [TODO: This skill MUST be loaded before [action]. Use it when [trigger conditions] to [purpose]. Write in the third person and be specific about triggers.]
metadata:
  version: 0.0.0
  changelog: {name}/CHANGELOG.md
---

# {title}

## Overview

[TODO: One or two sentences on what this skill enables]

## Structure

[TODO: Pick a structure pattern: workflow, tasks, capabilities or guidelines]

## [TODO: Main Section]

[TODO: Content such as code samples, decision trees, worked examples and pointers to resources]

## Resources

Example resource directories are included; delete the ones this skill does not need.

- **scripts/** - executable helpers (Python, shell, ...)
- **references/** - documentation loaded into context on demand
- **assets/** - files used in output (templates, images, fonts)
"
        )
    }

    /// `timestamp` is already formatted (`%d %b %Y %H:%M`).
    pub fn changelog_md(&self, timestamp: &str) -> String {
        let name = &self.name;
        format!(
            "# Changelog

All notable changes to this skill are documented in this file.

The format follows [Keep a Changelog](https://keepachangelog.com/en/1.0.0/)
and versions follow [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

## [0.0.0] - {timestamp}

### Added

- Initial release of the {name} skill
- [TODO: Initial features and capabilities]
"
        )
    }

    pub fn example_script(&self) -> String {
        format!(
            "#!/usr/bin/env python3
\"\"\"Helper script for the {name} skill.\"\"\"


def main():
    # TODO: implement
    pass


if __name__ == \"__main__\":
    main()
",
            name = self.name
        )
    }

    pub fn example_reference(&self) -> String {
        format!(
            "# {title} Reference

[TODO: API notes, schemas or detailed guides]
",
            title = self.title
        )
    }

    pub const fn asset_placeholder() -> &'static str {
        "# Put asset files here (templates, images, fonts, ...)\n"
    }
}

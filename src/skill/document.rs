//! `SKILL.md` parsing.
//!
//! A skill document is a `---`-delimited frontmatter block followed by a
//! markdown body. Fields are pulled out with regexes; there is no YAML
//! parser, so only flat `key: value` lines and the one-level `metadata:`
//! block are understood.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, SmithError};

/// File name of the skill document inside a skill directory.
pub const SKILL_FILE: &str = "SKILL.md";

static FRONTMATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\n(.*?)\n---[ \t]*(?:\n|\z)").expect("frontmatter regex")
});

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+?)\s*#*\s*$").expect("heading regex"));

/// State of the leading metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frontmatter {
    /// The document does not open with `---`.
    Missing,
    /// Opens with `---` but has no closing delimiter line.
    Malformed,
    /// The text between the delimiters.
    Present(String),
}

/// A markdown heading in the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
    /// 1-indexed line within the whole document.
    pub line: usize,
}

#[derive(Debug, Clone)]
pub struct SkillDocument {
    pub content: String,
    pub frontmatter: Frontmatter,
    pub body: String,
    body_offset: usize,
}

impl SkillDocument {
    pub fn parse(content: &str) -> Self {
        let content = content.replace("\r\n", "\n");

        if !content.starts_with("---") {
            return Self {
                body: content.clone(),
                content,
                frontmatter: Frontmatter::Missing,
                body_offset: 0,
            };
        }

        let Some(captures) = FRONTMATTER_RE.captures(&content) else {
            return Self {
                body: String::new(),
                content,
                frontmatter: Frontmatter::Malformed,
                body_offset: 0,
            };
        };

        let whole = captures.get(0).map_or(0, |m| m.end());
        let frontmatter = captures
            .get(1)
            .map_or_else(String::new, |m| m.as_str().to_string());
        let body_offset = content[..whole].matches('\n').count();
        let body = content[whole..].to_string();

        Self {
            content,
            frontmatter: Frontmatter::Present(frontmatter),
            body,
            body_offset,
        }
    }

    /// Read and parse `<skill_dir>/SKILL.md`.
    pub fn load(skill_dir: &Path) -> Result<Self> {
        let path = skill_dir.join(SKILL_FILE);
        let raw = std::fs::read_to_string(&path).map_err(|err| {
            SmithError::InvalidSkill(format!("read {}: {err}", path.display()))
        })?;
        Ok(Self::parse(&raw))
    }

    pub fn frontmatter_text(&self) -> Option<&str> {
        match &self.frontmatter {
            Frontmatter::Present(text) => Some(text),
            Frontmatter::Missing | Frontmatter::Malformed => None,
        }
    }

    /// Whether an unindented `key:` line exists in the frontmatter.
    pub fn has_top_level_key(&self, key: &str) -> bool {
        self.frontmatter_text()
            .is_some_and(|fm| fm.lines().any(|line| line_key(line) == Some(key)))
    }

    /// Value of an unindented `key: value` line.
    pub fn top_level_field(&self, key: &str) -> Option<String> {
        self.frontmatter_text()?
            .lines()
            .find(|line| line_key(line) == Some(key))
            .map(line_value)
    }

    /// Lines belonging to the `metadata:` block (indented lines that follow it).
    pub fn metadata_lines(&self) -> Vec<&str> {
        let Some(fm) = self.frontmatter_text() else {
            return Vec::new();
        };
        fm.lines()
            .skip_while(|line| line_key(line) != Some("metadata"))
            .skip(1)
            .take_while(|line| line.trim().is_empty() || line.starts_with([' ', '\t']))
            .collect()
    }

    pub fn has_metadata_key(&self, key: &str) -> bool {
        self.metadata_lines()
            .iter()
            .any(|line| line_key(line.trim_start()) == Some(key))
    }

    /// Value of `metadata.<key>`.
    pub fn metadata_field(&self, key: &str) -> Option<String> {
        self.metadata_lines()
            .into_iter()
            .map(str::trim_start)
            .find(|line| line_key(line) == Some(key))
            .map(line_value)
    }

    pub fn name(&self) -> Option<String> {
        self.top_level_field("name")
    }

    pub fn description(&self) -> Option<String> {
        self.top_level_field("description")
    }

    pub fn version(&self) -> Option<String> {
        self.metadata_field("version")
    }

    pub fn changelog(&self) -> Option<String> {
        self.metadata_field("changelog")
    }

    /// Headings in the body, skipping fenced code blocks.
    pub fn headings(&self) -> Vec<Heading> {
        let mut headings = Vec::new();
        let mut in_fence = false;
        for (idx, line) in self.body.lines().enumerate() {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }
            if let Some(captures) = HEADING_RE.captures(line) {
                headings.push(Heading {
                    level: captures[1].len(),
                    text: captures[2].to_string(),
                    line: self.body_offset + idx + 1,
                });
            }
        }
        headings
    }

    /// Text of the first `# ` heading.
    pub fn title(&self) -> Option<String> {
        self.headings()
            .into_iter()
            .find(|heading| heading.level == 1)
            .map(|heading| heading.text)
    }

    /// Texts of the `## ` section headings.
    pub fn sections(&self) -> Vec<String> {
        self.headings()
            .into_iter()
            .filter(|heading| heading.level == 2)
            .map(|heading| heading.text)
            .collect()
    }

    /// Body lines outside fenced code blocks, with 1-indexed document line numbers.
    pub fn prose_lines(&self) -> Vec<(usize, &str)> {
        let mut lines = Vec::new();
        let mut in_fence = false;
        for (idx, line) in self.body.lines().enumerate() {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                continue;
            }
            if !in_fence {
                lines.push((self.body_offset + idx + 1, line));
            }
        }
        lines
    }

    /// 1-indexed document line of a byte offset into the body.
    pub fn body_line_of(&self, byte_offset: usize) -> usize {
        let end = byte_offset.min(self.body.len());
        self.body_offset + self.body[..end].matches('\n').count() + 1
    }
}

fn line_key(line: &str) -> Option<&str> {
    let (key, _) = line.split_once(':')?;
    if key.is_empty() || key.starts_with([' ', '\t']) || key.contains(char::is_whitespace) {
        return None;
    }
    Some(key)
}

fn line_value(line: &str) -> String {
    let value = line.split_once(':').map_or("", |(_, value)| value).trim();
    strip_quotes(value).to_string()
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

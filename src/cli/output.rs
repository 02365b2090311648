use clap::ValueEnum;
use console::style;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmithError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl OutputFormat {
    /// Parse a config/env value such as `"json"` or `"human"`.
    pub fn parse_name(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" | "robot" => Ok(Self::Json),
            other => Err(SmithError::Config(format!(
                "invalid output format {other} (expected human|json)"
            ))),
        }
    }
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| SmithError::Config(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(style(text).bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        self.lines
            .push(format!("{} {value}", style(padded).dim()));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn success(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("{} {text}", style("✓").green()));
        self
    }

    pub fn failure(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("{} {text}", style("✗").red()));
        self
    }

    pub fn warning(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("{} {text}", style("!").yellow()));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

//! Page selection parsing.
//!
//! A page spec is either `all` or a comma-separated list of 1-based page
//! numbers and inclusive `a-b` ranges, e.g. `1-3,5`. Specs resolve against a
//! document length into sorted, deduplicated 0-based indices.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SmithError};

/// One comma-separated element of a page spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    /// A single 1-based page number.
    Single(usize),
    /// An inclusive 1-based range; `start <= end` is guaranteed by parsing.
    Range(usize, usize),
}

/// A parsed page selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSpec {
    #[default]
    All,
    Selection(Vec<PageToken>),
}

impl PageSpec {
    /// Resolve into 0-based indices within `[0, total)`.
    ///
    /// Page numbers outside `1..=total` are dropped rather than rejected.
    pub fn resolve(&self, total: usize) -> Vec<usize> {
        let tokens = match self {
            Self::All => return (0..total).collect(),
            Self::Selection(tokens) => tokens,
        };

        let mut pages = BTreeSet::new();
        for token in tokens {
            match *token {
                PageToken::Single(page) if (1..=total).contains(&page) => {
                    pages.insert(page - 1);
                }
                PageToken::Single(_) => {}
                PageToken::Range(start, end) => {
                    let start = start.max(1);
                    let end = end.min(total);
                    if start <= end {
                        pages.extend((start - 1)..end);
                    }
                }
            }
        }
        pages.into_iter().collect()
    }

    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for PageSpec {
    type Err = SmithError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }

        let tokens = trimmed
            .split(',')
            .map(parse_token)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::Selection(tokens))
    }
}

impl fmt::Display for PageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Selection(tokens) => {
                for (idx, token) in tokens.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ",")?;
                    }
                    match token {
                        PageToken::Single(page) => write!(f, "{page}")?,
                        PageToken::Range(start, end) => write!(f, "{start}-{end}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn parse_token(raw: &str) -> Result<PageToken> {
    let token = raw.trim();
    if let Some((start, end)) = token.split_once('-') {
        let start = parse_number(start, token)?;
        let end = parse_number(end, token)?;
        if start > end {
            return Err(SmithError::PageRange(format!(
                "reversed range '{token}' (start {start} is after end {end})"
            )));
        }
        Ok(PageToken::Range(start, end))
    } else {
        Ok(PageToken::Single(parse_number(token, token)?))
    }
}

fn parse_number(raw: &str, token: &str) -> Result<usize> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SmithError::PageRange(format!(
            "empty page number in '{token}'"
        )));
    }
    raw.parse::<usize>()
        .map_err(|_| SmithError::PageRange(format!("'{raw}' is not a page number (in '{token}')")))
}

/// Parse `spec` and resolve it against a document of `total` pages.
pub fn parse_page_range(spec: &str, total: usize) -> Result<Vec<usize>> {
    Ok(spec.parse::<PageSpec>()?.resolve(total))
}

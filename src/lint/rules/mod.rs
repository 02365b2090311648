//! Built-in validation rules.
//!
//! - **Structural rules** (`structural`): frontmatter shape; these gate validity
//! - **Quality rules** (`quality`): body and resource checks for comprehensive runs

pub mod quality;
pub mod structural;

use crate::lint::rule::BoxedRule;

pub use quality::{
    AdditionalSectionsRule, BackslashPathsRule, ChangelogFileRule, DescriptionQualityRule,
    NoPlaceholdersRule, OverviewSectionRule, SecondPersonRule, StructurePatternRule,
    TitleHeadingRule, UnreferencedDirectoriesRule,
};
pub use structural::{
    ChangelogPathRule, DescriptionContentRule, FrontmatterRule, HyphenCaseNameRule,
    MAX_SKILL_NAME_LENGTH, RequiredFieldsRule, SemverVersionRule, is_semver, skill_name_problem,
};

pub fn structural_rules() -> Vec<BoxedRule> {
    structural::structural_rules()
}

pub fn quality_rules() -> Vec<BoxedRule> {
    quality::quality_rules()
}

/// Structural rules followed by quality rules.
pub fn all_rules() -> Vec<BoxedRule> {
    let mut rules = structural_rules();
    rules.extend(quality_rules());
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_counts() {
        assert_eq!(structural_rules().len(), 6);
        assert_eq!(quality_rules().len(), 10);
        assert_eq!(all_rules().len(), 16);
    }

    #[test]
    fn rule_ids_unique() {
        let rules = all_rules();
        let mut ids: Vec<&str> = rules.iter().map(|r| r.id()).collect();
        let original_len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), original_len, "All rule IDs must be unique");
    }

    #[test]
    fn structural_rules_block() {
        for rule in structural_rules() {
            assert_eq!(rule.default_severity(), crate::lint::Severity::Error, "{}", rule.id());
        }
    }
}

//! Skill validation.
//!
//! - `ValidationRule` trait implemented by every check
//! - `ValidationEngine` runs rules and applies `ValidationConfig`
//! - `SkillValidator` wires the structural gate and the quality pass together
//!
//! # Example
//!
//! ```
//! use skillsmith::lint::{SkillValidator, ValidationConfig};
//! use skillsmith::skill::SkillDocument;
//!
//! let doc = SkillDocument::parse("---\nname: Bad_Name\n---\n");
//! let outcome = SkillValidator::new(ValidationConfig::new()).validate_document(&doc, None, false);
//! assert!(!outcome.valid);
//! ```

pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod rule;
pub mod rules;
pub mod validator;

pub use config::{ValidationConfig, ValidationContext};
pub use diagnostic::{Diagnostic, RuleCategory, Severity};
pub use engine::{RuleInfo, ValidationEngine, ValidationResult};
pub use rule::{BoxedRule, ValidationRule};
pub use rules::{all_rules, quality_rules, structural_rules};
pub use validator::{SkillValidator, ValidationOutcome, format_report, validate_skill};

//! The validation rule trait.

use super::config::ValidationContext;
use super::diagnostic::{Diagnostic, RuleCategory, Severity};

/// A stateless check over one skill document.
///
/// Rules emit diagnostics at their default severity; the engine applies
/// overrides and strict mode afterwards.
pub trait ValidationRule: Send + Sync {
    /// Stable identifier used in config files (e.g. "hyphen-case-name")
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn category(&self) -> RuleCategory;

    fn default_severity(&self) -> Severity;

    fn validate(&self, ctx: &ValidationContext<'_>) -> Vec<Diagnostic>;
}

pub type BoxedRule = Box<dyn ValidationRule>;

/// Declare a unit-struct rule whose check fits in one expression.
#[macro_export]
macro_rules! impl_rule {
    (
        $struct_name:ident,
        id: $id:expr,
        name: $name:expr,
        description: $desc:expr,
        category: $cat:expr,
        severity: $sev:expr,
        validate: |$ctx:ident| $validate_body:expr
    ) => {
        pub struct $struct_name;

        impl $crate::lint::rule::ValidationRule for $struct_name {
            fn id(&self) -> &str {
                $id
            }

            fn name(&self) -> &str {
                $name
            }

            fn description(&self) -> &str {
                $desc
            }

            fn category(&self) -> $crate::lint::diagnostic::RuleCategory {
                $cat
            }

            fn default_severity(&self) -> $crate::lint::diagnostic::Severity {
                $sev
            }

            fn validate(
                &self,
                $ctx: &$crate::lint::config::ValidationContext<'_>,
            ) -> Vec<$crate::lint::diagnostic::Diagnostic> {
                $validate_body
            }
        }
    };
}

pub use impl_rule;

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::AppError;

/// What happens to dependent rows when their owner is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Refuse the delete while dependents exist
    Restrict,
    /// Delete the dependents in the same transaction
    Cascade,
}

impl DeletePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeletePolicy::Restrict => "restrict",
            DeletePolicy::Cascade => "cascade",
        }
    }
}

impl FromStr for DeletePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restrict" => Ok(DeletePolicy::Restrict),
            "cascade" => Ok(DeletePolicy::Cascade),
            other => Err(AppError::Validation(format!(
                "unknown delete policy '{}'",
                other
            ))),
        }
    }
}

/// Per-relation overrides of the delete policy each relation declares.
///
/// Relations are named `Owner.Relation`, e.g. `Country.Hotels`.
#[derive(Debug, Clone, Default)]
pub struct DeletePolicies {
    overrides: HashMap<&'static str, DeletePolicy>,
}

impl DeletePolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, relation: &'static str, policy: DeletePolicy) -> Self {
        self.overrides.insert(relation, policy);
        self
    }

    /// Policy in force for `relation`, falling back to the declared one
    pub fn resolve(&self, relation: &str, declared: DeletePolicy) -> DeletePolicy {
        self.overrides.get(relation).copied().unwrap_or(declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("restrict".parse::<DeletePolicy>().unwrap(), DeletePolicy::Restrict);
        assert_eq!(" Cascade ".parse::<DeletePolicy>().unwrap(), DeletePolicy::Cascade);
        assert!("set-null".parse::<DeletePolicy>().is_err());
    }

    #[test]
    fn test_resolve_falls_back_to_declared() {
        let policies = DeletePolicies::new();
        assert_eq!(
            policies.resolve("Country.Hotels", DeletePolicy::Restrict),
            DeletePolicy::Restrict
        );
    }

    #[test]
    fn test_override_wins() {
        let policies = DeletePolicies::new().with("Country.Hotels", DeletePolicy::Cascade);
        assert_eq!(
            policies.resolve("Country.Hotels", DeletePolicy::Restrict),
            DeletePolicy::Cascade
        );
        assert_eq!(
            policies.resolve("Hotel.Rooms", DeletePolicy::Restrict),
            DeletePolicy::Restrict
        );
    }
}

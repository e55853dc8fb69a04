//! Workbench configuration.
//!
//! A `WorkbenchConfig` names the vendors to run and the vendor pairs whose
//! ADF JSON is diffed. It is a plain value: build it from presets or CLI
//! flags, then `validate` it (the workbench does so on construction).

use std::fmt;
use std::str::FromStr;

use crate::transformer::Vendor;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Vendor name not recognised.
    #[error("unknown vendor `{0}` (expected bitbucket, confluence or jira)")]
    UnknownVendor(String),
    /// Comparison not written as `left:right`.
    #[error("invalid comparison `{0}` (expected `left:right`)")]
    BadPair(String),
    /// Same vendor listed twice.
    #[error("vendor `{0}` is listed more than once")]
    DuplicateVendor(Vendor),
    /// Comparison names a vendor that does not run.
    #[error("comparison {pair} uses `{vendor}`, which is not enabled")]
    VendorDisabled { pair: VendorPair, vendor: Vendor },
    /// Comparison of a vendor with itself.
    #[error("comparison {0} compares a vendor with itself")]
    SelfComparison(VendorPair),
    /// Nothing to run.
    #[error("no vendors enabled")]
    NoVendors,
}

// =============================================================================
// VendorPair
// =============================================================================

/// Ordered pair of vendors; `left` is the old side of the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VendorPair {
    pub left: Vendor,
    pub right: Vendor,
}

impl VendorPair {
    pub const fn new(left: Vendor, right: Vendor) -> Self {
        Self { left, right }
    }
}

impl fmt::Display for VendorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.left, self.right)
    }
}

impl FromStr for VendorPair {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (left, right) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::BadPair(s.to_owned()))?;
        if left.trim().is_empty() || right.trim().is_empty() {
            return Err(ConfigError::BadPair(s.to_owned()));
        }
        Ok(Self::new(left.parse()?, right.parse()?))
    }
}

// =============================================================================
// WorkbenchConfig
// =============================================================================

/// Comparisons shown by default: Bitbucket against Confluence and
/// Confluence against Jira.
pub const DEFAULT_COMPARISONS: [VendorPair; 2] = [
    VendorPair::new(Vendor::Bitbucket, Vendor::Confluence),
    VendorPair::new(Vendor::Confluence, Vendor::Jira),
];

/// Vendors to run and pairs to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbenchConfig {
    /// Vendors in output order.
    pub vendors: Vec<Vendor>,
    /// Pairs whose ADF JSON is diffed, in output order.
    pub comparisons: Vec<VendorPair>,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            vendors: Vendor::ALL.to_vec(),
            comparisons: DEFAULT_COMPARISONS.to_vec(),
        }
    }
}

impl WorkbenchConfig {
    /// A single vendor with no comparisons.
    pub fn single(vendor: Vendor) -> Self {
        Self {
            vendors: vec![vendor],
            comparisons: Vec::new(),
        }
    }

    /// Every vendor compared against every later one.
    pub fn all_pairs() -> Self {
        let comparisons = Vendor::ALL
            .iter()
            .enumerate()
            .flat_map(|(i, &left)| {
                Vendor::ALL[i + 1..]
                    .iter()
                    .map(move |&right| VendorPair::new(left, right))
            })
            .collect();
        Self {
            vendors: Vendor::ALL.to_vec(),
            comparisons,
        }
    }

    /// Build from CLI-style lists; empty lists fall back to the defaults.
    ///
    /// Explicit vendors without explicit comparisons keep only the default
    /// comparisons whose vendors are both enabled.
    pub fn from_lists(vendors: Vec<Vendor>, comparisons: Vec<VendorPair>) -> Self {
        let defaults = Self::default();
        let vendors = if vendors.is_empty() { defaults.vendors } else { vendors };
        let comparisons = if comparisons.is_empty() {
            defaults
                .comparisons
                .into_iter()
                .filter(|pair| vendors.contains(&pair.left) && vendors.contains(&pair.right))
                .collect()
        } else {
            comparisons
        };
        Self { vendors, comparisons }
    }

    /// Whether `vendor` runs.
    pub fn is_enabled(&self, vendor: Vendor) -> bool {
        self.vendors.contains(&vendor)
    }

    /// Check the configuration for contradictions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.vendors.is_empty() {
            return Err(ConfigError::NoVendors);
        }

        for (i, vendor) in self.vendors.iter().enumerate() {
            if self.vendors[..i].contains(vendor) {
                return Err(ConfigError::DuplicateVendor(*vendor));
            }
        }

        for &pair in &self.comparisons {
            if pair.left == pair.right {
                return Err(ConfigError::SelfComparison(pair));
            }
            if let Some(vendor) = [pair.left, pair.right]
                .into_iter()
                .find(|v| !self.is_enabled(*v))
            {
                return Err(ConfigError::VendorDisabled { pair, vendor });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_valid() {
        let config = WorkbenchConfig::default();
        assert_eq!(config.vendors, Vendor::ALL.to_vec());
        assert_eq!(config.comparisons, DEFAULT_COMPARISONS.to_vec());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_presets() {
        assert_eq!(WorkbenchConfig::single(Vendor::Jira).validate(), Ok(()));
        let all = WorkbenchConfig::all_pairs();
        assert_eq!(all.comparisons.len(), 3);
        assert_eq!(all.validate(), Ok(()));
    }

    #[test]
    fn test_pair_from_str() {
        assert_eq!(
            "bitbucket:jira".parse::<VendorPair>(),
            Ok(VendorPair::new(Vendor::Bitbucket, Vendor::Jira))
        );
        assert_eq!(
            "bitbucket".parse::<VendorPair>(),
            Err(ConfigError::BadPair("bitbucket".into()))
        );
        assert_eq!(":jira".parse::<VendorPair>(), Err(ConfigError::BadPair(":jira".into())));
        assert_eq!(
            "jira:word".parse::<VendorPair>(),
            Err(ConfigError::UnknownVendor("word".into()))
        );
        assert_eq!(VendorPair::new(Vendor::Confluence, Vendor::Jira).to_string(), "confluence:jira");
    }

    #[test]
    fn test_from_lists() {
        let config = WorkbenchConfig::from_lists(vec![Vendor::Confluence, Vendor::Jira], vec![]);
        assert_eq!(
            config.comparisons,
            vec![VendorPair::new(Vendor::Confluence, Vendor::Jira)]
        );
        assert_eq!(WorkbenchConfig::from_lists(vec![], vec![]), WorkbenchConfig::default());
    }

    #[test]
    fn test_validate_rejects() {
        let config = WorkbenchConfig {
            vendors: vec![Vendor::Jira, Vendor::Jira],
            comparisons: vec![],
        };
        assert_eq!(config.validate(), Err(ConfigError::DuplicateVendor(Vendor::Jira)));

        let pair = VendorPair::new(Vendor::Bitbucket, Vendor::Jira);
        let config = WorkbenchConfig {
            vendors: vec![Vendor::Jira],
            comparisons: vec![pair],
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::VendorDisabled { pair, vendor: Vendor::Bitbucket })
        );

        let pair = VendorPair::new(Vendor::Jira, Vendor::Jira);
        let config = WorkbenchConfig {
            vendors: vec![Vendor::Jira],
            comparisons: vec![pair],
        };
        assert_eq!(config.validate(), Err(ConfigError::SelfComparison(pair)));

        let config = WorkbenchConfig { vendors: vec![], comparisons: vec![] };
        assert_eq!(config.validate(), Err(ConfigError::NoVendors));
    }
}

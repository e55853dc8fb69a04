//! Vendor format transformers: HTML to typed ADF documents.
//!
//! # Module Structure
//!
//! - `Transformer` - Core trait; `parse` is provided on top of the hooks
//! - `ElementRule` - What one HTML element becomes
//! - `reader` - Shared HTML walk with the generic element mapping
//! - `BitbucketTransformer`, `ConfluenceTransformer`, `JiraTransformer`
//!
//! # Example
//!
//! ```ignore
//! use adflens::transformer::{ConfluenceTransformer, Transformer};
//!
//! let doc = ConfluenceTransformer::new().parse("<p><strong>qwe</strong></p>");
//! ```

mod bitbucket;
mod confluence;
mod jira;
pub mod reader;

pub use bitbucket::BitbucketTransformer;
pub use confluence::ConfluenceTransformer;
pub use jira::JiraTransformer;

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use scraper::ElementRef;
use serde::Serialize;

use crate::config::ConfigError;
use crate::node::{BlockKind, Document, Inline, Mark};
use crate::schema::VendorSchema;

// =============================================================================
// Transformer
// =============================================================================

/// Convert vendor-flavoured HTML into a document.
///
/// Implementors are stateless; they differ only by schema, markup
/// preprocessing and vendor element rules. `parse` is total: markup the
/// vendor cannot express degrades or is dropped, never rejected.
pub trait Transformer: Send + Sync {
    /// Node and mark allow-list for this vendor.
    fn schema(&self) -> &VendorSchema;

    /// Rewrite raw markup before it is parsed.
    fn preprocess<'a>(&self, html: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(html)
    }

    /// Vendor rule for an element; `None` falls back to the generic mapping.
    fn element_rule(&self, _el: ElementRef<'_>) -> Option<ElementRule> {
        None
    }

    /// Parse HTML into a document.
    fn parse(&self, html: &str) -> Document {
        reader::read_document(self, html)
    }
}

// =============================================================================
// ElementRule
// =============================================================================

/// What a single HTML element turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementRule {
    /// A block whose content is read from the element's children
    Block(BlockKind),
    /// A code block with verbatim text
    CodeBlock {
        language: Option<String>,
        text: String,
    },
    /// An inline atom; children are not read
    Atom(Inline),
    /// Literal text; children are not read
    Text(String),
    /// A mark applied to everything inside
    Mark(Mark),
    /// Unknown block-level wrapper: children are read in place, and it
    /// ends any open paragraph on both sides
    Wrapper,
    /// Unknown inline wrapper: children are read in place
    Transparent,
    /// Dropped together with its children
    Ignore,
}

// =============================================================================
// Vendor
// =============================================================================

/// The three supported vendor formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Bitbucket,
    Confluence,
    Jira,
}

impl Vendor {
    pub const ALL: [Vendor; 3] = [Vendor::Bitbucket, Vendor::Confluence, Vendor::Jira];

    pub fn as_str(self) -> &'static str {
        match self {
            Vendor::Bitbucket => "bitbucket",
            Vendor::Confluence => "confluence",
            Vendor::Jira => "jira",
        }
    }

    /// Display title used in reports.
    pub fn title(self) -> &'static str {
        match self {
            Vendor::Bitbucket => "Bitbucket",
            Vendor::Confluence => "Confluence",
            Vendor::Jira => "Jira",
        }
    }

    /// Construct this vendor's transformer.
    pub fn transformer(self) -> Box<dyn Transformer> {
        match self {
            Vendor::Bitbucket => Box::new(BitbucketTransformer::new()),
            Vendor::Confluence => Box::new(ConfluenceTransformer::new()),
            Vendor::Jira => Box::new(JiraTransformer::new()),
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Vendor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownVendor(s.to_owned()))
    }
}

//! adflens - HTML to Atlassian Document Format and back
//!
//! ## Pipeline
//!
//! 1. A vendor [`Transformer`] (Bitbucket, Confluence or Jira) parses HTML
//!    into a typed [`Document`], dropping what its schema cannot express.
//! 2. [`JsonTransformer`] encodes the document as ADF JSON.
//! 3. [`to_html`] builds a tree back from the JSON, serializes it and
//!    [`normalize`]s the markup.
//! 4. [`compute_diff`] compares two texts line by line.
//!
//! [`Workbench`] runs all of it for a set of vendors and
//! [`report::render_page`] turns the result into one HTML page.
//!
//! ## Modules
//! - `node`: Document, Node, Block, Inline, Text, Mark
//! - `schema`: node types, vendor allow-lists, DOM mapping
//! - `transformer`: vendor HTML readers
//! - `encode` / `builder`: ADF JSON out and in
//! - `render`, `normalize`: HTML serialization
//! - `algo`, `diff`: Myers LCS and the line diff on top of it
//!
//! ## Usage
//!
//! ```
//! use adflens::{JsonTransformer, Transformer, Vendor, to_html};
//!
//! let doc = Vendor::Confluence.transformer().parse("<strong>qwe</strong>\ntext");
//! let adf = JsonTransformer::new().encode(&doc);
//! assert_eq!(to_html(Some(&adf)).unwrap(), "<p><strong>qwe</strong> text</p>");
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Modules
// =============================================================================

/// Typed ADF tree: Document, Node, Block, Inline, Text, Mark
pub mod node;

/// Node types, vendor schemas and the DOM mapping
pub mod schema;

/// Vendor HTML transformers
pub mod transformer;

/// ADF JSON encoding
pub mod encode;

/// ADF JSON to typed tree
pub mod builder;

/// HTML serialization
pub mod render;

/// HTML string normalization
pub mod normalize;

/// Attribute list helpers
pub mod attr;

/// Algorithms: myers
pub mod algo;

/// Line diff
pub mod diff;

/// Error types
pub mod error;

/// Workbench configuration
pub mod config;

/// Multi-vendor runs and comparisons
pub mod workbench;

/// HTML report page
pub mod report;

/// Prelude for common imports
pub mod prelude;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{Block, BlockKind, Children, Document, Inline, Mark, Node, Text};

// Conversion
pub use encode::JsonTransformer;
pub use normalize::normalize;
pub use render::{to_html, to_html_document};
pub use transformer::{Transformer, Vendor};

// Diff
pub use diff::{ChangeKind, DiffSegment, DiffStats, compute_diff};

// Workbench
pub use config::{ConfigError, VendorPair, WorkbenchConfig};
pub use workbench::{Comparison, Run, VendorOutput, Workbench};

// Error types
pub use error::{AdfError, AdfResult, Malformed};

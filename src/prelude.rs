//! Prelude module for common imports.
//!
//! ```
//! use adflens::prelude::*;
//! ```

// Node types
pub use crate::node::{
    Block, BlockKind, Children, Document, Inline, Mark, MarkKind, Node, PanelType, SubSup, Text,
};

// Schema
pub use crate::schema::{NodeType, VendorSchema};

// Transformers
pub use crate::encode::JsonTransformer;
pub use crate::transformer::{
    BitbucketTransformer, ConfluenceTransformer, JiraTransformer, Transformer, Vendor,
};

// Render
pub use crate::normalize::normalize;
pub use crate::render::{to_html, to_html_document};

// Diff
pub use crate::diff::{ChangeKind, DiffSegment, DiffStats, compute_diff};

// Workbench
pub use crate::config::{ConfigError, VendorPair, WorkbenchConfig};
pub use crate::report::render_page;
pub use crate::workbench::{Run, Workbench};

// Error
pub use crate::error::{AdfError, AdfResult, Malformed};

//! Workbench: run one HTML input through every configured vendor.
//!
//! Each vendor parses the input, the document is encoded to ADF JSON, and
//! the JSON is rendered back to HTML. Configured vendor pairs are then
//! compared by line-diffing their pretty-printed JSON.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::config::{ConfigError, VendorPair, WorkbenchConfig};
use crate::diff::{DiffSegment, DiffStats, compute_diff};
use crate::encode::JsonTransformer;
use crate::error::AdfResult;
use crate::node::Document;
use crate::render::to_html;
use crate::transformer::{Transformer, Vendor};

// =============================================================================
// Run results
// =============================================================================

/// What one vendor made of the input.
#[derive(Debug, Clone, Serialize)]
pub struct VendorOutput {
    pub vendor: Vendor,
    /// Typed document produced by the vendor transformer
    #[serde(skip)]
    pub document: Document,
    /// Encoded ADF JSON
    pub adf: Value,
    /// `adf` pretty-printed with two-space indentation
    #[serde(skip)]
    pub adf_pretty: String,
    /// HTML rendered back from `adf`
    pub html: String,
}

/// Line diff between two vendors' ADF JSON.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub left: Vendor,
    pub right: Vendor,
    pub stats: DiffStats,
    pub segments: Vec<DiffSegment>,
}

impl Comparison {
    pub fn pair(&self) -> VendorPair {
        VendorPair::new(self.left, self.right)
    }
}

/// Result of [`Workbench::run`], in configuration order.
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    pub outputs: Vec<VendorOutput>,
    pub comparisons: Vec<Comparison>,
}

impl Run {
    /// Output of `vendor`, if it ran.
    pub fn output(&self, vendor: Vendor) -> Option<&VendorOutput> {
        self.outputs.iter().find(|o| o.vendor == vendor)
    }

    /// Comparisons whose left side is `vendor`.
    pub fn comparisons_from(&self, vendor: Vendor) -> impl Iterator<Item = &Comparison> {
        self.comparisons.iter().filter(move |c| c.left == vendor)
    }
}

// =============================================================================
// Workbench
// =============================================================================

/// Configured set of vendor transformers.
pub struct Workbench {
    config: WorkbenchConfig,
    transformers: Vec<(Vendor, Box<dyn Transformer>)>,
    json: JsonTransformer,
}

impl Workbench {
    /// Validate `config` and construct one transformer per vendor.
    pub fn new(config: WorkbenchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let transformers = config
            .vendors
            .iter()
            .map(|&vendor| (vendor, vendor.transformer()))
            .collect();
        Ok(Self {
            config,
            transformers,
            json: JsonTransformer::new(),
        })
    }

    pub fn config(&self) -> &WorkbenchConfig {
        &self.config
    }

    /// Convert `html` with every vendor and compare the configured pairs.
    pub fn run(&self, html: &str) -> AdfResult<Run> {
        let outputs = self
            .transformers
            .iter()
            .map(|(vendor, transformer)| self.convert(*vendor, transformer.as_ref(), html))
            .collect::<AdfResult<Vec<_>>>()?;

        let comparisons = self
            .config
            .comparisons
            .iter()
            .filter_map(|pair| {
                let left = outputs.iter().find(|o| o.vendor == pair.left)?;
                let right = outputs.iter().find(|o| o.vendor == pair.right)?;
                Some(compare(left, right))
            })
            .collect();

        Ok(Run { outputs, comparisons })
    }

    fn convert(
        &self,
        vendor: Vendor,
        transformer: &dyn Transformer,
        html: &str,
    ) -> AdfResult<VendorOutput> {
        let document = transformer.parse(html);
        let adf = self.json.encode(&document);
        let adf_pretty = format!("{adf:#}");
        let rendered = to_html(Some(&adf))?;

        debug!(
            vendor = vendor.as_str(),
            nodes = document.node_count(),
            json_bytes = adf_pretty.len(),
            "converted input"
        );

        Ok(VendorOutput {
            vendor,
            document,
            adf,
            adf_pretty,
            html: rendered,
        })
    }
}

fn compare(left: &VendorOutput, right: &VendorOutput) -> Comparison {
    let segments = compute_diff(&left.adf_pretty, &right.adf_pretty);
    let stats = DiffStats::of(&segments);
    debug!(
        left = left.vendor.as_str(),
        right = right.vendor.as_str(),
        added = stats.added,
        removed = stats.removed,
        "compared vendors"
    );
    Comparison {
        left: left.vendor,
        right: right.vendor,
        stats,
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::ChangeKind;
    use crate::error::{AdfError, Malformed};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SAMPLE: &str = "<strong>qwe</strong>\ntext";

    #[test]
    fn test_workbench_is_send_sync() {
        static_assertions::assert_impl_all!(Workbench: Send, Sync);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = WorkbenchConfig {
            vendors: vec![Vendor::Jira],
            comparisons: vec![VendorPair::new(Vendor::Jira, Vendor::Bitbucket)],
        };
        assert!(matches!(
            Workbench::new(config),
            Err(ConfigError::VendorDisabled { vendor: Vendor::Bitbucket, .. })
        ));
    }

    #[test]
    fn test_sample_output() {
        let run = Workbench::new(WorkbenchConfig::default()).unwrap().run(SAMPLE).unwrap();
        assert_eq!(run.outputs.len(), 3);

        let expected = json!({
            "version": 1,
            "type": "doc",
            "content": [{
                "type": "paragraph",
                "content": [
                    {"type": "text", "text": "qwe", "marks": [{"type": "strong"}]},
                    {"type": "text", "text": " text"},
                ],
            }],
        });
        for output in &run.outputs {
            assert_eq!(output.adf, expected, "{}", output.vendor);
            assert_eq!(output.html, "<p><strong>qwe</strong> text</p>");
            assert!(output.adf_pretty.contains("\n  \"type\": \"doc\""));
        }

        assert_eq!(run.comparisons.len(), 2);
        for comparison in &run.comparisons {
            assert!(comparison.stats.is_identical());
            assert!(comparison.segments.iter().all(|s| s.kind == ChangeKind::Unchanged));
        }
    }

    #[test]
    fn test_round_trip_is_stable() {
        let json = JsonTransformer::new();
        let inputs = [
            SAMPLE,
            "<h2>Title</h2><ul><li>one</li><li><em>two</em></li></ul><pre><code>x\ny</code></pre>",
            "<p>a<br>b <a href=\"https://x.io\">link</a></p><blockquote><p>q</p></blockquote><hr>",
        ];
        for vendor in Vendor::ALL {
            let transformer = vendor.transformer();
            for input in inputs {
                let first = json.encode(&transformer.parse(input));
                let html = to_html(Some(&first)).unwrap();
                let second = json.encode(&transformer.parse(&html));
                assert_eq!(first, second, "{vendor}: {input}");
            }
        }
    }

    #[test]
    fn test_vendor_differences_are_diffed() {
        let config = WorkbenchConfig::from_lists(
            vec![Vendor::Bitbucket, Vendor::Jira],
            vec![VendorPair::new(Vendor::Bitbucket, Vendor::Jira)],
        );
        let run = Workbench::new(config)
            .unwrap()
            .run("<p><u>under</u></p>")
            .unwrap();

        let comparison = &run.comparisons[0];
        assert_eq!(comparison.pair(), VendorPair::new(Vendor::Bitbucket, Vendor::Jira));
        assert!(!comparison.stats.is_identical());
        assert_eq!(run.comparisons_from(Vendor::Bitbucket).count(), 1);
        assert_eq!(run.comparisons_from(Vendor::Jira).count(), 0);
        assert!(run.output(Vendor::Confluence).is_none());
    }

    #[test]
    fn test_malformed_json_is_rejected_on_render() {
        let err = to_html(Some(&json!({
            "type": "doc",
            "content": [{"type": "decisionList", "content": []}],
        })))
        .unwrap_err();
        let AdfError::MalformedDocument { path, reason } = err;
        assert_eq!(path, "/0");
        assert_eq!(reason, Malformed::UnknownNodeType("decisionList".into()));
    }

    #[test]
    fn test_run_serializes_to_json() {
        let run = Workbench::new(WorkbenchConfig::single(Vendor::Confluence))
            .unwrap()
            .run("<p>x</p>")
            .unwrap();
        let value = serde_json::to_value(&run).unwrap();
        assert_eq!(value["outputs"][0]["vendor"], "confluence");
        assert_eq!(value["outputs"][0]["html"], "<p>x</p>");
        assert_eq!(value["comparisons"], json!([]));
    }
}

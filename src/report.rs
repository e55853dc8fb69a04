//! Standalone HTML report for a workbench run.

use crate::diff::render_html;
use crate::render::escape_html;
use crate::workbench::{Comparison, Run, VendorOutput};

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; }
section { border-top: 1px solid #ccc; margin-top: 2em; }
pre { background: #f6f6f6; padding: 0.5em; overflow-x: auto; white-space: pre-wrap; }
.render { border: 1px dashed #bbb; padding: 0.5em; }
";

/// Render `run` for `input` as one HTML5 document.
///
/// The input is shown twice: as escaped source and rendered raw. Each
/// vendor gets its ADF JSON, its rendered HTML, the HTML source and the
/// diffs in which it is the left side.
pub fn render_page(input: &str, run: &Run) -> String {
    let mut page = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n<title>adflens report</title>\n");
    page.push_str("<style>\n");
    page.push_str(STYLE);
    page.push_str("</style>\n</head>\n<body>\n");

    page.push_str("<section id=\"input\">\n<h1>Input</h1>\n");
    push_source(&mut page, input);
    push_render(&mut page, input);
    page.push_str("</section>\n");

    for output in &run.outputs {
        push_vendor(&mut page, output, run.comparisons_from(output.vendor));
    }

    page.push_str("</body>\n</html>\n");
    page
}

fn push_vendor<'a>(
    page: &mut String,
    output: &VendorOutput,
    comparisons: impl Iterator<Item = &'a Comparison>,
) {
    let vendor = output.vendor;
    page.push_str(&format!(
        "<section id=\"{}\">\n<h2>{}</h2>\n",
        vendor.as_str(),
        vendor.title()
    ));

    page.push_str("<h3>ADF</h3>\n");
    push_source(page, &output.adf_pretty);
    page.push_str("<h3>HTML</h3>\n");
    push_render(page, &output.html);
    push_source(page, &output.html);

    for comparison in comparisons {
        page.push_str(&format!(
            "<h3>Diff {} / {}</h3>\n",
            comparison.left.title(),
            comparison.right.title()
        ));
        page.push_str("<pre>");
        page.push_str(&render_html(&comparison.segments));
        page.push_str("</pre>\n");
    }

    page.push_str("</section>\n");
}

fn push_source(page: &mut String, text: &str) {
    page.push_str("<pre>");
    page.push_str(&escape_html(text));
    page.push_str("</pre>\n");
}

fn push_render(page: &mut String, html: &str) {
    page.push_str("<div class=\"render\">");
    page.push_str(html);
    page.push_str("</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkbenchConfig;
    use crate::transformer::Vendor;
    use crate::workbench::Workbench;

    fn page_for(input: &str, config: WorkbenchConfig) -> String {
        let run = Workbench::new(config).unwrap().run(input).unwrap();
        render_page(input, &run)
    }

    #[test]
    fn test_page_shows_input_both_ways() {
        let page = page_for("<p>a &amp; b</p>", WorkbenchConfig::single(Vendor::Jira));
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<pre>&lt;p&gt;a &amp;amp; b&lt;/p&gt;</pre>"));
        assert!(page.contains("<div class=\"render\"><p>a &amp; b</p></div>"));
        assert!(page.ends_with("</html>\n"));
    }

    #[test]
    fn test_vendor_sections_in_order() {
        let page = page_for("<p>x</p>", WorkbenchConfig::default());
        let bitbucket = page.find("<h2>Bitbucket</h2>").unwrap();
        let confluence = page.find("<h2>Confluence</h2>").unwrap();
        let jira = page.find("<h2>Jira</h2>").unwrap();
        assert!(bitbucket < confluence && confluence < jira);
    }

    #[test]
    fn test_diffs_follow_left_vendor() {
        let page = page_for("<p>x</p>", WorkbenchConfig::default());
        let confluence = page.find("<h2>Confluence</h2>").unwrap();
        let jira = page.find("<h2>Jira</h2>").unwrap();

        let bb_diff = page.find("<h3>Diff Bitbucket / Confluence</h3>").unwrap();
        let cf_diff = page.find("<h3>Diff Confluence / Jira</h3>").unwrap();
        assert!(bb_diff < confluence);
        assert!(confluence < cf_diff && cf_diff < jira);
        assert!(page.contains(r#"<span style="color: grey; width: 100%">{"#));
    }

    #[test]
    fn test_vendor_preview_is_its_own_html() {
        let page = page_for("<p><u>u</u></p>", WorkbenchConfig::default());
        let confluence = page.find("<h2>Confluence</h2>").unwrap();
        let (bitbucket_section, rest) = page.split_at(confluence);
        assert!(bitbucket_section.contains("<div class=\"render\"><p>u</p></div>"));
        assert!(rest.contains("<div class=\"render\"><p><u>u</u></p></div>"));
    }
}

//! Colored terminal output utilities.

use adflens::{ChangeKind, Comparison, Run, VendorOutput};
use console::{Style, Term};

/// Terminal output formatter.
///
/// Messages go to stderr; reports go to stdout.
pub(crate) struct Output {
    term: Term,
    report: Term,
    green: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            report: Term::stdout(),
            green: Style::new().green(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Write raw text to stdout.
    pub(crate) fn print(&self, text: &str) -> std::io::Result<()> {
        self.report.write_line(text)
    }

    /// Write a workbench run as a text report to stdout.
    pub(crate) fn text_report(&self, run: &Run) -> std::io::Result<()> {
        for output in &run.outputs {
            self.vendor_section(output)?;
        }
        for comparison in &run.comparisons {
            self.comparison_section(comparison)?;
        }
        Ok(())
    }

    fn heading(&self, title: &str) -> std::io::Result<()> {
        let line = format!("== {title} ==");
        self.report
            .write_line(&self.cyan_bold.apply_to(line).to_string())
    }

    fn vendor_section(&self, output: &VendorOutput) -> std::io::Result<()> {
        self.heading(output.vendor.title())?;
        self.report.write_line("ADF:")?;
        self.report.write_line(&output.adf_pretty)?;
        self.report.write_line("HTML:")?;
        self.report.write_line(&output.html)?;
        self.report.write_line("")
    }

    fn comparison_section(&self, comparison: &Comparison) -> std::io::Result<()> {
        let stats = comparison.stats;
        self.heading(&format!(
            "Diff {} (+{} -{})",
            comparison.pair(),
            stats.added,
            stats.removed
        ))?;
        if stats.is_identical() {
            self.report.write_line(&self.dim.apply_to("identical").to_string())?;
            return self.report.write_line("");
        }

        let colored = console::colors_enabled();
        let mut text = String::new();
        for segment in &comparison.segments {
            let (style, open, close) = match segment.kind {
                ChangeKind::Added => (&self.green, "{+", "+}"),
                ChangeKind::Removed => (&self.red, "[-", "-]"),
                ChangeKind::Unchanged => (&self.dim, "", ""),
            };
            if colored {
                text.push_str(&style.apply_to(&segment.text).to_string());
            } else {
                text.push_str(open);
                text.push_str(&segment.text);
                text.push_str(close);
            }
        }
        self.report.write_line(&text)?;
        self.report.write_line("")
    }
}

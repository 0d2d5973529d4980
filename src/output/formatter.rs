//! Output formatters for console and JSON presentation

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::chart::bar_chart;
use crate::output::report::ApprovalReport;
use crate::processing::checker::RunOutcome;
use colored::{Color, Colorize};

/// Trait for formatting approval reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ApprovalReport) -> Result<String>;
}

/// Console formatter with colors, a results table and bar charts
pub struct ConsoleFormatter {
    use_colors: bool,
    show_charts: bool,
    chart_width: usize,
}

/// JSON formatter for scripting and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Report generator that coordinates different formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

const ORDER_HEADER: &str = "Order";
const NAME_HEADER: &str = "Name";
const DOCUMENT_HEADER: &str = "Source Document";

impl ConsoleFormatter {
    pub fn new(use_colors: bool, show_charts: bool, chart_width: usize) -> Self {
        Self {
            use_colors,
            show_charts,
            chart_width,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_table(&self, report: &ApprovalReport) -> String {
        let rows: Vec<(String, &str, &str)> = report
            .records()
            .map(|r| (r.rank.to_string(), r.name.as_str(), r.document_id.as_str()))
            .collect();

        let order_width = rows
            .iter()
            .map(|(order, _, _)| order.len())
            .chain(std::iter::once(ORDER_HEADER.len()))
            .max()
            .unwrap_or(0);
        let name_width = rows
            .iter()
            .map(|(_, name, _)| name.chars().count())
            .chain(std::iter::once(NAME_HEADER.len()))
            .max()
            .unwrap_or(0);

        let mut output = String::new();
        let header = format!(
            "{:>ow$}  {:<nw$}  {}",
            ORDER_HEADER,
            NAME_HEADER,
            DOCUMENT_HEADER,
            ow = order_width,
            nw = name_width
        );
        output.push_str(&self.colorize(&header, Color::Cyan));
        output.push('\n');

        for (order, name, document) in rows {
            output.push_str(&format!(
                "{:>ow$}  {:<nw$}  {}\n",
                order,
                name,
                document,
                ow = order_width,
                nw = name_width
            ));
        }

        output
    }

    fn format_charts(&self, report: &ApprovalReport) -> String {
        let stats = &report.statistics;
        let overall = vec![
            ("Total Students".to_string(), stats.total_students),
            ("Approved".to_string(), stats.total_approved),
        ];
        let per_document: Vec<(String, usize)> = stats
            .approved_per_document
            .iter()
            .map(|d| (d.document_id.clone(), d.approved))
            .collect();

        let mut output = String::new();
        output.push_str(&self.colorize(
            &bar_chart("Students vs Approved", &overall, self.chart_width),
            Color::Blue,
        ));
        output.push('\n');
        output.push_str(&self.colorize(
            &bar_chart("Approved per Document", &per_document, self.chart_width),
            Color::Yellow,
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ApprovalReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&report.metadata.title, 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        match report.outcome {
            RunOutcome::EmptyInput => {
                output.push_str(&format!(
                    "\n{}\n",
                    self.colorize("Nothing to do: provide a roster with names and at least one document.", Color::Yellow)
                ));
                return Ok(output);
            }
            RunOutcome::NoMatches => {
                output.push_str(&format!(
                    "\n{}\n",
                    self.colorize("No approved students were found in the documents provided.", Color::Yellow)
                ));
            }
            RunOutcome::Matches => {
                output.push_str(&format!(
                    "\n{}\n",
                    self.colorize("Approved students found!", Color::Green)
                ));
                output.push_str(&self.format_header("Results", 2));
                output.push_str(&self.format_table(report));
            }
        }

        let stats = &report.statistics;
        output.push_str(&self.format_header("Statistics", 2));
        output.push_str(&format!("Students in list: {}\n", stats.total_students));
        output.push_str(&format!("Approved found: {}\n", stats.total_approved));
        output.push_str(&format!(
            "Documents checked: {} ({} skipped)\n",
            stats.documents_checked, stats.documents_skipped
        ));

        if self.show_charts && report.outcome == RunOutcome::Matches {
            output.push_str(&self.format_header("Charts", 3));
            output.push_str(&self.format_charts(report));
        }

        if !report.failures().is_empty() {
            output.push_str(&self.format_header("Skipped Documents", 3));
            for failure in report.failures() {
                output.push_str(&format!(
                    "{} {}: {}\n",
                    self.colorize("✗", Color::Red),
                    failure.document_id,
                    failure.reason
                ));
            }
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ApprovalReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, show_charts: bool, chart_width: usize, pretty_json: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, show_charts, chart_width),
            json_formatter: JsonFormatter::new(pretty_json),
        }
    }

    pub fn generate_report(&self, report: &ApprovalReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::checker::{ApprovalChecker, RunSummary};
    use crate::processing::document::Document;
    use crate::processing::progress::NullProgress;
    use crate::processing::roster::Roster;

    fn report_for(roster: &str, sheets: &[(&str, &str)]) -> ApprovalReport {
        let checker = ApprovalChecker::new(Roster::parse(roster));
        let documents = sheets
            .iter()
            .map(|(id, text)| Ok(Document::from_text(*id, *text)))
            .collect::<Vec<Result<Document>>>();
        let summary = checker.run(documents, &NullProgress);
        ApprovalReport::from_summary(summary, "Approved Students Report", "roster.txt", 1)
    }

    #[test]
    fn test_console_lists_matches_and_totals() {
        let report = report_for("Maria Silva\njoão pereira", &[("lista.pdf", "MARIA SILVA\nCARLOS DIAS")]);
        let formatter = ConsoleFormatter::new(false, true, 10);

        let output = formatter.format_report(&report).unwrap();

        assert!(output.contains("Approved students found!"));
        assert!(output.contains("Order  Name         Source Document"));
        assert!(output.contains("    1  maria silva  lista.pdf"));
        assert!(output.contains("Students in list: 2"));
        assert!(output.contains("Approved found: 1"));
        assert!(output.contains("Approved per Document"));
        assert!(!output.contains("joao pereira"));
    }

    #[test]
    fn test_console_no_matches_message() {
        let report = report_for("Ana Lima", &[("lista.pdf", "CARLOS DIAS")]);
        let formatter = ConsoleFormatter::new(false, true, 10);

        let output = formatter.format_report(&report).unwrap();

        assert!(output.contains("No approved students were found"));
        assert!(!output.contains("Results"));
        assert!(!output.contains("Students vs Approved"));
    }

    #[test]
    fn test_console_empty_input_message() {
        let report = ApprovalReport::from_summary(RunSummary::empty(), "Report", "-", 0);
        let formatter = ConsoleFormatter::new(false, true, 10);

        let output = formatter.format_report(&report).unwrap();

        assert!(output.contains("Nothing to do"));
        assert!(!output.contains("Statistics"));
    }

    #[test]
    fn test_console_without_charts() {
        let report = report_for("Ana Lima", &[("lista.pdf", "ANA LIMA")]);
        let formatter = ConsoleFormatter::new(false, false, 10);

        let output = formatter.format_report(&report).unwrap();

        assert!(!output.contains("Charts"));
    }

    #[test]
    fn test_json_contains_records() {
        let report = report_for("Ana Lima", &[("lista.pdf", "ANA LIMA")]);

        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["outcome"], "Matches");
        assert_eq!(value["statistics"]["total_approved"], 1);
        assert_eq!(value["summary"]["documents"][0]["matches"][0]["name"], "ana lima");
        assert_eq!(value["summary"]["documents"][0]["matches"][0]["rank"], 1);
    }

    #[test]
    fn test_generator_dispatches_by_format() {
        let report = report_for("Ana Lima", &[("lista.pdf", "ANA LIMA")]);
        let generator = ReportGenerator::with_options(false, false, 10, true);

        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();

        assert!(console.contains("Approved students found!"));
        assert!(json.trim_start().starts_with('{'));
    }
}

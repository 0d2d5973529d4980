//! CSV and PDF exports of the approved-student listing

use crate::error::{ApprovalFinderError, Result};
use crate::output::report::ApprovalReport;
use crate::processing::checker::RunOutcome;
use log::{info, warn};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

pub const CSV_HEADERS: [&str; 3] = ["Order", "Name", "Source Document"];

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const TITLE_FONT_SIZE: f32 = 16.0;
const BODY_FONT_SIZE: f32 = 12.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Pdf,
}

/// Write one row per record, grouped per document in processing order.
pub fn write_csv<W: Write>(report: &ApprovalReport, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;

    for record in report.records() {
        csv_writer.write_record([
            record.rank.to_string(),
            record.name.clone(),
            record.document_id.clone(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

pub fn export_csv(report: &ApprovalReport, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let file = fs::File::create(path)?;
    write_csv(report, file)
}

/// Render the listing as an A4 PDF, one line per record below a title.
pub fn render_pdf(report: &ApprovalReport) -> Result<Vec<u8>> {
    let title = pdf_safe(&report.metadata.title);
    let (doc, page, layer) = PdfDocument::new(
        title.as_str(),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let title_font = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_error)?;
    let body_font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;

    let first_layer = doc.get_page(page).get_layer(layer);
    let title_y = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM;
    first_layer.use_text(
        title.as_str(),
        TITLE_FONT_SIZE,
        Mm(centered_x(&title, TITLE_FONT_SIZE)),
        Mm(title_y),
        &title_font,
    );

    // Title line plus one blank line before the listing.
    let first_line_y = title_y - 2.0 * LINE_HEIGHT_MM;
    let lines: Vec<String> = report.listing_lines().iter().map(|l| pdf_safe(l)).collect();
    let pages = paginate(&lines, lines_fitting(first_line_y), lines_fitting(PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM));

    for (idx, chunk) in pages.iter().enumerate() {
        if idx == 0 {
            write_lines(&first_layer, chunk, first_line_y, &body_font);
        } else {
            let layer = new_page(&doc, idx + 1);
            write_lines(&layer, chunk, PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM, &body_font);
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}

pub fn export_pdf(report: &ApprovalReport, path: &Path) -> Result<()> {
    let bytes = render_pdf(report)?;
    ensure_parent(path)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Write the requested exports for a run that approved someone.
///
/// An empty or matchless run writes nothing. Returns the files written.
pub fn export_reports(report: &ApprovalReport, csv_path: Option<&Path>, pdf_path: Option<&Path>) -> Result<Vec<PathBuf>> {
    let requested: Vec<&Path> = csv_path.into_iter().chain(pdf_path).collect();
    if requested.is_empty() {
        return Ok(Vec::new());
    }
    if report.outcome != RunOutcome::Matches {
        warn!("No approved students; skipping {} export(s)", requested.len());
        return Ok(Vec::new());
    }

    let mut written = Vec::new();
    if let Some(path) = csv_path {
        export_csv(report, path)?;
        info!("CSV written to {}", path.display());
        written.push(path.to_path_buf());
    }
    if let Some(path) = pdf_path {
        export_pdf(report, path)?;
        info!("PDF report written to {}", path.display());
        written.push(path.to_path_buf());
    }
    Ok(written)
}

pub fn suggest_filename(kind: ExportKind, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match kind {
        ExportKind::Csv => format!("approved_students{}.csv", timestamp_suffix),
        ExportKind::Pdf => format!("approved_students{}.pdf", timestamp_suffix),
    }
}

fn new_page(doc: &PdfDocumentReference, number: usize) -> PdfLayerReference {
    let (page, layer) = doc.add_page(
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        format!("Layer {}", number),
    );
    doc.get_page(page).get_layer(layer)
}

fn write_lines(layer: &PdfLayerReference, lines: &[String], start_y: f32, font: &IndirectFontRef) {
    let mut y = start_y;
    for line in lines {
        layer.use_text(line.as_str(), BODY_FONT_SIZE, Mm(MARGIN_MM), Mm(y), font);
        y -= LINE_HEIGHT_MM;
    }
}

/// How many lines fit between `start_y` and the bottom margin.
fn lines_fitting(start_y: f32) -> usize {
    if start_y < BOTTOM_MARGIN_MM {
        return 0;
    }
    ((start_y - BOTTOM_MARGIN_MM) / LINE_HEIGHT_MM) as usize + 1
}

/// Split lines into pages; the first page may hold fewer lines than the rest.
/// Always returns at least one (possibly empty) page.
fn paginate(lines: &[String], first_capacity: usize, capacity: usize) -> Vec<&[String]> {
    let first_capacity = first_capacity.max(1).min(lines.len());
    let (first, rest) = lines.split_at(first_capacity);

    let mut pages = vec![first];
    pages.extend(rest.chunks(capacity.max(1)));
    pages
}

fn centered_x(text: &str, font_size: f32) -> f32 {
    let width = text.chars().count() as f32 * font_size * AVG_GLYPH_WIDTH * PT_TO_MM;
    ((PAGE_WIDTH_MM - width) / 2.0).max(MARGIN_MM)
}

/// Built-in PDF fonts only cover Latin-1, so fold everything else to ASCII.
fn pdf_safe(text: &str) -> String {
    text.nfkd().filter(|c| c.is_ascii()).collect()
}

fn pdf_error(err: impl std::fmt::Debug) -> ApprovalFinderError {
    ApprovalFinderError::PdfRender(format!("{:?}", err))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::checker::ApprovalChecker;
    use crate::processing::document::Document;
    use crate::processing::progress::NullProgress;
    use crate::processing::roster::Roster;

    fn sample_report(lines: usize) -> ApprovalReport {
        let names: Vec<String> = (0..lines).map(|i| format!("ALUNO NUMERO {}", to_letters(i))).collect();
        let roster = Roster::from_names(&names);
        let checker = ApprovalChecker::new(roster);
        let summary = checker.run(
            vec![Ok(Document::from_text("lista.pdf", names.join("\n")))],
            &NullProgress,
        );
        ApprovalReport::from_summary(summary, "Approved Students Report", "roster.txt", 0)
    }

    fn to_letters(mut n: usize) -> String {
        let mut out = String::new();
        loop {
            out.insert(0, (b'A' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        out
    }

    #[test]
    fn test_csv_layout() {
        let checker = ApprovalChecker::new(Roster::parse("Maria Silva\nAna Lima\nCarlos Dias"));
        let summary = checker.run(
            vec![
                Ok(Document::from_text("a.pdf", "MARIA SILVA\nANA LIMA")),
                Ok(Document::from_text("b.pdf", "CARLOS DIAS")),
            ],
            &NullProgress,
        );
        let report = ApprovalReport::from_summary(summary, "Report", "roster.txt", 0);

        let mut buffer = Vec::new();
        write_csv(&report, &mut buffer).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Order,Name,Source Document\n1,ana lima,a.pdf\n2,maria silva,a.pdf\n1,carlos dias,b.pdf\n"
        );
    }

    #[test]
    fn test_csv_quotes_document_ids_with_commas() {
        let checker = ApprovalChecker::new(Roster::parse("Ana Lima"));
        let summary = checker.run(vec![Ok(Document::from_text("turma a, b.pdf", "ANA LIMA"))], &NullProgress);
        let report = ApprovalReport::from_summary(summary, "Report", "roster.txt", 0);

        let mut buffer = Vec::new();
        write_csv(&report, &mut buffer).unwrap();

        assert!(String::from_utf8(buffer).unwrap().contains("1,ana lima,\"turma a, b.pdf\""));
    }

    #[test]
    fn test_paginate_respects_capacities() {
        let lines: Vec<String> = (0..10).map(|i| i.to_string()).collect();

        let pages = paginate(&lines, 3, 4);

        let sizes: Vec<usize> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(sizes, vec![3, 4, 3]);
    }

    #[test]
    fn test_paginate_empty_listing_has_one_page() {
        let pages = paginate(&[], 3, 4);

        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_lines_fitting() {
        assert_eq!(lines_fitting(25.0), 2);
        assert_eq!(lines_fitting(15.0), 1);
        assert_eq!(lines_fitting(10.0), 0);
    }

    #[test]
    fn test_render_pdf_produces_pdf_bytes() {
        let report = sample_report(3);

        let bytes = render_pdf(&report).unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_render_pdf_paginates_long_listing() {
        let short = render_pdf(&sample_report(2)).unwrap();
        let long = render_pdf(&sample_report(80)).unwrap();

        assert!(long.len() > short.len());
    }

    #[test]
    fn test_pdf_safe_folds_accents() {
        assert_eq!(pdf_safe("Relatório São João.pdf"), "Relatorio Sao Joao.pdf");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(suggest_filename(ExportKind::Csv, false), "approved_students.csv");
        assert_eq!(suggest_filename(ExportKind::Pdf, false), "approved_students.pdf");
        assert!(suggest_filename(ExportKind::Pdf, true).starts_with("approved_students_"));
    }

    #[test]
    fn test_export_reports_skips_runs_without_matches() {
        let report = sample_report(0);
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("approved.csv");
        let pdf_path = dir.path().join("approved.pdf");

        let written = export_reports(&report, Some(&csv_path), Some(&pdf_path)).unwrap();

        assert_eq!(report.outcome, RunOutcome::NoMatches);
        assert!(written.is_empty());
        assert!(!csv_path.exists());
        assert!(!pdf_path.exists());
    }

    #[test]
    fn test_export_reports_writes_requested_files() {
        let report = sample_report(2);
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("approved.csv");

        let written = export_reports(&report, Some(&csv_path), None).unwrap();

        assert_eq!(written, vec![csv_path.clone()]);
        assert!(csv_path.exists());
        assert!(!dir.path().join("approved.pdf").exists());
    }
}

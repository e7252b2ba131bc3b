//! Report formatting and printing utilities.
//!
//! Gap reports print in cargo style. Every printer has a `_to` variant taking
//! a writer, which the tests use.

use std::io::{self, Write};

use colored::Colorize;

use crate::core::{gaps::GapReport, types::TranslationSet};
use crate::dashboard::DashboardError;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Keys reported once per source language collapse to one line.
fn unique(keys: &[String]) -> Vec<&str> {
    let mut seen = Vec::new();
    for key in keys {
        if !seen.contains(&key.as_str()) {
            seen.push(key.as_str());
        }
    }
    seen
}

pub fn print_gap_report(report: &GapReport, translations: &TranslationSet) {
    print_gap_report_to(report, translations, &mut io::stdout().lock());
}

pub fn print_gap_report_to<W: Write>(
    report: &GapReport,
    translations: &TranslationSet,
    writer: &mut W,
) {
    let file_count: usize = translations.values().map(|files| files.len()).sum();
    if !report.has_gaps() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Checked {}, {} - no gaps found",
                plural(translations.len(), "language", "languages"),
                plural(file_count, "translation file", "translation files")
            )
            .green()
        );
        return;
    }

    for (language, names) in &report.missing_translations {
        for name in names {
            let _ = writeln!(
                writer,
                "{}: missing translation \"{}\"  {}",
                "error".bold().red(),
                name,
                "missing-translation".dimmed().cyan()
            );
            let _ = writeln!(writer, "  {} {}/{}.json", "-->".blue(), language, name);
            let _ = writeln!(writer);
        }
    }

    for (language, files) in &report.missing_fields {
        for (name, gaps) in files {
            for key in unique(&gaps.missing) {
                let _ = writeln!(
                    writer,
                    "{}: missing field \"{}\"  {}",
                    "error".bold().red(),
                    key,
                    "missing-field".dimmed().cyan()
                );
                let _ = writeln!(writer, "  {} {}/{}.json", "-->".blue(), language, name);
                let _ = writeln!(writer);
            }
            for key in unique(&gaps.empty) {
                let _ = writeln!(
                    writer,
                    "{}: empty field \"{}\"  {}",
                    "warning".bold().yellow(),
                    key,
                    "empty-field".dimmed().cyan()
                );
                let _ = writeln!(writer, "  {} {}/{}.json", "-->".blue(), language, name);
                let _ = writeln!(writer);
            }
        }
    }

    let summary = report.summary();
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!(
            "{}, {}, {} in {}",
            plural(
                summary.missing_translation_count,
                "missing translation",
                "missing translations"
            ),
            plural(summary.missing_field_count, "missing field", "missing fields"),
            plural(summary.empty_field_count, "empty field", "empty fields"),
            plural(summary.affected_languages.len(), "language", "languages")
        )
        .red()
    );
}

pub fn print_translation_list(translations: &TranslationSet, report: &GapReport) {
    print_translation_list_to(translations, report, &mut io::stdout().lock());
}

/// One line per language, then one indented line per file with its gap counts.
pub fn print_translation_list_to<W: Write>(
    translations: &TranslationSet,
    report: &GapReport,
    writer: &mut W,
) {
    if translations.is_empty() {
        let _ = writeln!(writer, "{}", "No translations found".dimmed());
        return;
    }

    for (language, files) in translations {
        let missing = report
            .missing_translations
            .get(language)
            .map_or(0, |names| names.len());
        let header = if missing > 0 {
            format!("({}, {} missing)", plural(files.len(), "file", "files"), missing)
        } else {
            format!("({})", plural(files.len(), "file", "files"))
        };
        let _ = writeln!(writer, "{} {}", language.bold(), header.dimmed());

        for name in files.keys() {
            let gaps = report
                .missing_fields
                .get(language)
                .and_then(|files| files.get(name));
            match gaps {
                Some(gaps) if !gaps.is_empty() => {
                    let _ = writeln!(
                        writer,
                        "  {} {}",
                        name,
                        format!(
                            "{} missing, {} empty",
                            unique(&gaps.missing).len(),
                            unique(&gaps.empty).len()
                        )
                        .yellow()
                    );
                }
                _ => {
                    let _ = writeln!(writer, "  {}", name);
                }
            }
        }
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", SUCCESS_MARK.green(), message.green());
}

/// Print a rejected operation to stderr, labelled with its failure class.
pub fn print_error(err: &DashboardError) {
    print_error_to(err, &mut io::stderr().lock());
}

pub fn print_error_to<W: Write>(err: &DashboardError, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {} {}",
        FAILURE_MARK.red(),
        format!("{}:", err.kind()).bold().red(),
        err
    );
}

//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{AnalysisDetails, DocumentReport, Grade, Rule, Status};
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single document
    pub fn report(&self, report: &DocumentReport) {
        self.report_with_delta(report, "");
    }

    /// Report a single document, appending a trend note (e.g. " [was 80, up 4]")
    /// to the score line
    pub fn report_with_delta(&self, report: &DocumentReport, delta: &str) {
        self.print_header(report);
        self.print_score(report, delta);
        self.print_checks(&report.result.details);

        if !report.result.issues.is_empty() {
            self.print_issues(report);
        }
        println!();
    }

    /// Report multiple documents with summary
    pub fn report_many(&self, reports: &[DocumentReport], stats: &AggregateStats) {
        for report in reports {
            self.report(report);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (just score)
    pub fn report_quiet(&self, report: &DocumentReport) {
        let marker = if report.below_threshold() {
            format!(" {}", "below threshold".red())
        } else {
            String::new()
        };
        println!(
            "{}: {} ({}){}",
            report.file_path.display(),
            report.score(),
            self.colorize_grade(&report.grade),
            marker
        );
    }

    fn print_header(&self, report: &DocumentReport) {
        println!();
        println!(
            "{}",
            format!("SEO Analysis: {}", report.file_path.display()).bold()
        );
        println!("   Title: {}", display_or_dash(&report.title));
        println!(
            "   Keyword: {} | Slug: {}",
            report.primary_keyword.as_deref().unwrap_or("-"),
            report.slug.as_deref().unwrap_or("-")
        );
        println!();
    }

    fn print_score(&self, report: &DocumentReport, delta: &str) {
        let grade_str = self.colorize_grade(&report.grade);
        let score_bar = self.create_score_bar(report.score());

        println!("   Score: {} {}{}", score_bar, grade_str.bold(), delta.dimmed());
        println!(
            "   {}",
            ScoreCalculator::grade_description(report.grade).dimmed()
        );
        if let Some(threshold) = report.threshold {
            let line = format!("Threshold: {}", threshold);
            if report.below_threshold() {
                println!("   {} {}", line.red(), "(below)".red().bold());
            } else {
                println!("   {}", line.dimmed());
            }
        }
        println!();
    }

    fn print_checks(&self, details: &AnalysisDetails) {
        println!("   {}", "Checks:".bold());
        for (rule, status) in details.statuses() {
            println!(
                "   {} {:<18} {}",
                self.status_icon(status),
                rule.label(),
                check_summary(rule, details).dimmed()
            );
        }
        println!();
    }

    fn print_issues(&self, report: &DocumentReport) {
        println!("   {}", "Issues Found:".bold());

        let findings = report.result.details.findings();
        // Bad checks first, then warnings, each in check order
        let ordered = findings
            .iter()
            .filter(|f| f.status == Status::Bad)
            .chain(findings.iter().filter(|f| f.status == Status::Warning));

        for finding in ordered {
            println!(
                "   {} [{}] {}",
                self.status_icon(finding.status),
                finding.rule.to_string().dimmed(),
                finding.issue
            );
            println!("       {} {}", "→".dimmed(), finding.recommendation.italic());
            if self.verbose {
                let cost = format!("costs {} points", ScoreCalculator::penalty(finding.status));
                println!("       {} {}", "↳".dimmed(), cost.dimmed());
            }
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", "Summary".bold());
        println!("{}", "═".repeat(60));
        println!(
            "   Files analyzed:  {}",
            stats.files_analyzed.to_string().bold()
        );
        println!(
            "   Average score:   {} ({})",
            stats.average_score.to_string().bold(),
            self.colorize_grade(&stats.average_grade)
        );
        println!("   Total issues:    {}", stats.total_issues);
        println!(
            "   Checks:          {} good, {} warning, {} bad",
            stats.status_counts.good.to_string().green(),
            stats.status_counts.warning.to_string().yellow(),
            stats.status_counts.bad.to_string().red()
        );
        if stats.below_threshold > 0 {
            println!(
                "   {}",
                format!("{} below threshold", stats.below_threshold).red()
            );
        }
        println!();
    }

    fn status_icon(&self, status: Status) -> colored::ColoredString {
        match status {
            Status::Good => "✓".green(),
            Status::Warning => "⚠".yellow(),
            Status::Bad => "✗".red(),
        }
    }

    fn colorize_grade(&self, grade: &Grade) -> colored::ColoredString {
        let s = grade.to_string();
        match grade {
            Grade::A => s.green().bold(),
            Grade::B => s.green(),
            Grade::C => s.yellow(),
            Grade::D => s.red(),
            Grade::F => s.red().bold(),
        }
    }

    fn create_score_bar(&self, score: u8) -> String {
        let filled = (score as usize * 20) / 100;
        let empty = 20 - filled;

        let bar = format!(
            "[{}{}] {:>3}%",
            "█".repeat(filled),
            "░".repeat(empty),
            score
        );

        if self.use_colors {
            if score >= 80 {
                bar.green().to_string()
            } else if score >= 60 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            }
        } else {
            bar
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn display_or_dash(s: &str) -> &str {
    if s.trim().is_empty() {
        "-"
    } else {
        s
    }
}

/// One-line measured facts for a check
fn check_summary(rule: Rule, details: &AnalysisDetails) -> String {
    match rule {
        Rule::TitleLength => format!("{} chars", details.title.length),
        Rule::MetaDescriptionLength => format!("{} chars", details.meta_description.length),
        Rule::KeywordUsage => match details.keyword.keyword {
            None => "no keyword".to_string(),
            Some(_) => format!("density {:.2}%", details.keyword.density),
        },
        Rule::HeadingStructure => format!(
            "H1 {} / H2 {} / H3 {}",
            details.headings.h1_count, details.headings.h2_count, details.headings.h3_count
        ),
        Rule::LinkMix => format!(
            "{} internal, {} external",
            details.links.internal, details.links.external
        ),
        Rule::ImageAltText => format!(
            "{} of {} with alt text",
            details.images.with_alt, details.images.total
        ),
        Rule::Readability => format!(
            "grade {:.1} ({})",
            details.readability.score, details.readability.grade
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::AnalysisEngine;
    use crate::AnalysisInput;
    use std::path::Path;

    #[test]
    fn test_score_bar_bounds() {
        let reporter = ConsoleReporter::new().without_colors();
        assert_eq!(reporter.create_score_bar(0), format!("[{}]   0%", "░".repeat(20)));
        assert_eq!(reporter.create_score_bar(100), format!("[{}] 100%", "█".repeat(20)));
        assert!(reporter.create_score_bar(54).starts_with("[██████████░"));
    }

    #[test]
    fn test_check_summary_without_keyword() {
        let report = AnalysisEngine::new().analyze_input(
            &AnalysisInput::new("Title", "Description", "<h1>A</h1><h2>B</h2>"),
            Path::new("a.html"),
            None,
        );
        let details = &report.result.details;
        assert_eq!(check_summary(Rule::KeywordUsage, details), "no keyword");
        assert_eq!(check_summary(Rule::TitleLength, details), "5 chars");
        assert_eq!(
            check_summary(Rule::HeadingStructure, details),
            "H1 1 / H2 1 / H3 0"
        );
    }

    #[test]
    fn test_display_or_dash() {
        assert_eq!(display_or_dash(""), "-");
        assert_eq!(display_or_dash("   "), "-");
        assert_eq!(display_or_dash("Post"), "Post");
    }
}

//! Integration tests: full analysis pipeline against test-content/blog/

use pagegrade::analyzer::AnalysisEngine;
use pagegrade::config::{load_config, Config, ConfigOverride};
use pagegrade::{analyze, analyze_file, AnalysisInput, DocumentReport, Grade, Rule, Status};
use std::path::Path;

const GOOD_POST: &str = "test-content/blog/static-site-generator.post.json";
const WEAK_PAGE: &str = "test-content/blog/weak.html";
const MARKDOWN_POST: &str = "test-content/blog/markdown-front-matter.md";

fn analyze_path(path: &str) -> DocumentReport {
    AnalysisEngine::new()
        .analyze(Path::new(path), None)
        .unwrap_or_else(|e| panic!("analyze({}) failed: {:#}", path, e))
}

// --- Fixture baselines ---

#[test]
fn good_post_is_perfect() {
    let r = analyze_path(GOOD_POST);
    assert_eq!(r.score(), 100);
    assert_eq!(r.grade, Grade::A);
    assert!(r.result.issues.is_empty());
    assert!(r.result.recommendations.is_empty());

    let kw = &r.result.details.keyword;
    assert!(kw.in_title && kw.in_meta_description && kw.in_url && kw.in_first_paragraph);
    assert!((1.0..=2.0).contains(&kw.density), "density {}", kw.density);
    assert_eq!(r.result.details.headings.h3_count, 1);
    assert_eq!(r.result.details.images.with_alt, 1);
}

#[test]
fn weak_page_baseline() {
    let r = analyze_path(WEAK_PAGE);
    assert_eq!(r.score(), 38);
    assert_eq!(r.grade, Grade::F);
    assert_eq!(r.title, "Notes");
    assert_eq!(r.slug.as_deref(), Some("weak"));
    assert_eq!(r.primary_keyword, None);

    let d = &r.result.details;
    assert_eq!(d.title.status, Status::Bad);
    assert_eq!(d.meta_description.length, 0);
    assert_eq!(d.meta_description.status, Status::Bad);
    assert_eq!(d.keyword.status, Status::Good);
    assert_eq!((d.headings.h1_count, d.headings.h2_count), (2, 0));
    assert_eq!((d.links.internal, d.links.external), (0, 0));
    assert_eq!((d.images.total, d.images.with_alt), (2, 0));
    assert_eq!(d.readability.sentence_count, 1);
    assert_eq!(d.readability.status, Status::Warning);
    assert_eq!(r.result.issues.len(), 8);
}

#[test]
fn markdown_post_reads_front_matter() {
    let r = analyze_path(MARKDOWN_POST);
    assert_eq!(
        r.title,
        "Writing Front Matter That Search Engines Actually Read"
    );
    assert_eq!(r.primary_keyword.as_deref(), Some("front matter"));
    assert_eq!(r.slug.as_deref(), Some("writing-front-matter"));
    assert_eq!(r.result.details.title.status, Status::Good);
    assert_eq!(r.result.details.meta_description.status, Status::Good);
    // markdown headings are not HTML headings
    assert_eq!(r.result.details.headings.h1_count, 0);
    assert_eq!(r.score(), 76);
}

#[test]
fn issues_and_recommendations_align_with_findings() {
    for path in [GOOD_POST, WEAK_PAGE, MARKDOWN_POST] {
        let r = analyze_path(path);
        let findings = r.result.details.findings();
        let issues: Vec<&str> = findings.iter().map(|f| f.issue.as_str()).collect();
        let recs: Vec<&str> = findings.iter().map(|f| f.recommendation.as_str()).collect();
        assert_eq!(r.result.issues, issues, "{}", path);
        assert_eq!(r.result.recommendations, recs, "{}", path);
    }
}

#[test]
fn findings_follow_check_order() {
    let r = analyze_path(WEAK_PAGE);
    let order: Vec<usize> = r
        .result
        .details
        .findings()
        .iter()
        .map(|f| Rule::ALL.iter().position(|rule| *rule == f.rule).unwrap())
        .collect();
    let mut sorted = order.clone();
    sorted.sort();
    assert_eq!(order, sorted);
}

// --- Testable properties from the scoring rubric ---

#[test]
fn title_length_boundaries() {
    let good = analyze(&AnalysisInput::new("t".repeat(55), "", ""));
    assert_eq!(good.details.title.status, Status::Good);
    let bad = analyze(&AnalysisInput::new("t".repeat(10), "", ""));
    assert_eq!(bad.details.title.status, Status::Bad);
}

#[test]
fn meta_description_boundaries() {
    let good = analyze(&AnalysisInput::new("", "d".repeat(140), ""));
    assert_eq!(good.details.meta_description.status, Status::Good);
    let bad = analyze(&AnalysisInput::new("", "d".repeat(50), ""));
    assert_eq!(bad.details.meta_description.status, Status::Bad);
}

#[test]
fn next_js_end_to_end() {
    let description = "Learn how to build a modern website with Next.js 15, covering the App Router, \
server components, data fetching, styling and deployment so you can ship a fast site soon.";
    let content = r#"<h1>Build a modern website</h1>
<p>Next.js 15 makes it simple to start a new project with sensible defaults.</p>
<h2>Set up the project</h2>
<p>Read the <a href="/docs/setup">setup guide</a> and the <a href="/docs/routing">routing guide</a>.</p>
<img src="/img/app.png" alt="App Router diagram">
<h2>Deploy</h2>
<h3>Hosting options</h3>
<img src="/img/deploy.png" alt="Deployment flow">"#;
    let input = AnalysisInput::new(
        "How to Build a Modern Website with Next.js 15",
        description,
        content,
    )
    .with_keyword("Next.js 15")
    .with_slug("build-modern-website");

    let result = analyze(&input);
    let d = &result.details;
    assert_eq!(d.title.length, 45);
    assert_eq!(d.meta_description.length, 168);
    assert_eq!(d.keyword.status, Status::Warning);
    assert!(d.keyword.in_title && d.keyword.in_first_paragraph);
    assert!(!d.keyword.in_url);
    assert_eq!(d.headings.status, Status::Good);
    assert_eq!(d.images.status, Status::Good);
    assert!(result.score < 100);

    let url_issues: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.contains("URL"))
        .collect();
    assert_eq!(url_issues.len(), 1);
}

// --- Config and overrides ---

#[test]
fn config_override_sets_keyword_and_threshold() {
    let config = Config {
        threshold: Some(50),
        overrides: vec![ConfigOverride {
            files: vec!["**/weak.html".to_string()],
            threshold: Some(30),
            primary_keyword: Some("notes".to_string()),
            slug: None,
        }],
        ..Config::default()
    };
    let engine = AnalysisEngine::new();

    let weak = engine.analyze(Path::new(WEAK_PAGE), Some(&config)).unwrap();
    assert_eq!(weak.threshold, Some(30));
    assert_eq!(weak.primary_keyword.as_deref(), Some("notes"));
    assert!(weak.result.details.keyword.in_title);

    let good = engine.analyze(Path::new(GOOD_POST), Some(&config)).unwrap();
    assert_eq!(good.threshold, Some(50));
    assert_eq!(good.primary_keyword.as_deref(), Some("static site generator"));
}

#[test]
fn analyze_file_uses_config_from_work_dir() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join(".pagegraderc.json"), r#"{ "threshold": 90 }"#).unwrap();
    let post = dir.path().join("weak.html");
    std::fs::copy(WEAK_PAGE, &post).unwrap();

    let report = analyze_file(&post, dir.path(), None).unwrap();
    assert_eq!(report.threshold, Some(90));
    assert!(report.below_threshold());

    let config = load_config(dir.path(), None).unwrap();
    assert_eq!(config.threshold, Some(90));
}

// --- Multi-document runs ---

#[test]
fn parallel_matches_sequential() {
    let engine = AnalysisEngine::new();
    let paths = [GOOD_POST, WEAK_PAGE, MARKDOWN_POST];
    let sequential: Vec<DocumentReport> = engine
        .analyze_many(&paths.map(Path::new), None)
        .into_iter()
        .map(Result::unwrap)
        .collect();
    let parallel: Vec<DocumentReport> = engine
        .analyze_parallel(&paths.map(std::path::PathBuf::from), None)
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(sequential, parallel);

    let stats = AnalysisEngine::aggregate_stats(&sequential);
    assert_eq!(stats.files_analyzed, 3);
    assert_eq!(stats.average_score, ((100 + 38 + 76) / 3) as u8);
    assert_eq!(stats.average_grade, Grade::C);
    assert_eq!(
        stats.status_counts.good + stats.status_counts.warning + stats.status_counts.bad,
        21
    );
}

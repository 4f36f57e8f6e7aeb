//! pagegrade: SEO content quality scorer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use pagegrade::analyzer::AnalysisEngine;
use pagegrade::cache::AnalysisCache;
use pagegrade::config::{
    build_ignore_set, is_ignored, load_config, write_starter_config, Config, DEFAULT_THRESHOLD,
};
use pagegrade::history::{
    append_run, current_commit, find_project_root, format_delta, load_history, previous_score,
    save_history,
};
use pagegrade::parser::is_document;
use pagegrade::reporter::{ConsoleReporter, HtmlReporter, JsonReporter, SarifReporter};
use pagegrade::watcher::DocumentWatcher;
use pagegrade::DocumentReport;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// pagegrade: SEO content quality scorer for blog posts and pages
#[derive(Parser, Debug)]
#[command(name = "pagegrade")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Document or directory to analyze (with --stdin: virtual path for format and overrides)
    path: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Output in SARIF format (for GitHub Code Scanning)
    #[arg(long, conflicts_with = "json")]
    sarif: bool,

    /// Write a self-contained HTML report to FILE
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Minimum score threshold (exit 1 if any document is below)
    #[arg(long, short)]
    threshold: Option<u8>,

    /// Target keyword, overriding config and document metadata
    #[arg(long, short)]
    keyword: Option<String>,

    /// URL slug, overriding config and the path-derived slug
    #[arg(long)]
    slug: Option<String>,

    /// Read a single document from stdin
    #[arg(long)]
    stdin: bool,

    /// Quiet mode (minimal output)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output
    #[arg(long, short)]
    verbose: bool,

    /// Path to config file (default: search .pagegraderc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Watch for file changes and re-analyze
    #[arg(long)]
    watch: bool,

    /// Only analyze staged (git) documents (for pre-commit hooks)
    #[arg(long, conflicts_with = "changed")]
    staged: bool,

    /// Only analyze documents changed since last commit (git diff HEAD)
    #[arg(long)]
    changed: bool,

    /// Disable caching (re-analyze all files even if unchanged)
    #[arg(long)]
    no_cache: bool,

    /// Clear the analysis cache before running
    #[arg(long)]
    clear_cache: bool,

    /// Run analysis in parallel (default for directories with many files)
    #[arg(long)]
    parallel: bool,

    /// Number of parallel threads (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run MCP server for AI assistants (stdio JSON-RPC)
    Mcp,

    /// Create .pagegraderc.json with sensible defaults
    Init {
        /// Minimum score threshold (default 70)
        #[arg(long)]
        threshold: Option<u8>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

/// Documents scored per run before switching to rayon
const PARALLEL_MIN_FILES: usize = 10;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

/// Diagnostics go to stderr so stdout stays clean for JSON, SARIF and MCP
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pagegrade=debug")
        } else {
            EnvFilter::new("pagegrade=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<ExitCode> {
    if let Some(cmd) = &args.command {
        return match cmd {
            Commands::Mcp => {
                pagegrade::mcp::run_mcp_server().context("MCP server failed")?;
                Ok(ExitCode::SUCCESS)
            }
            Commands::Init {
                threshold,
                dir,
                force,
            } => run_init(*threshold, dir.as_deref(), *force),
        };
    }

    let engine = build_engine(&args);

    if args.stdin {
        return run_stdin(&args, &engine);
    }

    let Some(path) = args.path.clone() else {
        anyhow::bail!("A path is required unless --stdin or a subcommand is used");
    };

    if args.watch {
        return run_watch(&args, &engine, &path);
    }

    let work_dir = work_dir_for(&path);
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    // contentRoot narrows directory scans, relative to the given path
    let search_path = match config.content_root {
        Some(ref root) if path.is_dir() => path.join(root),
        _ => path.clone(),
    };

    let patterns = config.get_document_patterns();
    let files = if args.staged || args.changed {
        let git_root = git_toplevel(work_dir)
            .or_else(|| find_project_root(work_dir))
            .unwrap_or_else(|| work_dir.to_path_buf());
        let git_commands = if args.staged {
            vec![vec!["diff", "--cached", "--name-only"]]
        } else {
            vec![
                vec!["diff", "HEAD", "--name-only"],
                vec!["ls-files", "--others", "--exclude-standard"],
            ]
        };
        collect_git_documents(&git_root, &git_commands, ignore_set.as_ref(), &patterns)?
    } else {
        collect_documents(&search_path, ignore_set.as_ref(), &patterns)?
    };

    if files.is_empty() {
        if args.staged || args.changed {
            if !args.quiet {
                eprintln!("{}: No changed documents to analyze", "Info".blue());
            }
            return Ok(ExitCode::SUCCESS);
        }
        eprintln!("{}: No documents found", "Warning".yellow());
        return Ok(ExitCode::from(2));
    }

    let project_root = find_project_root(work_dir).unwrap_or_else(|| work_dir.to_path_buf());
    let mut cache = if args.no_cache {
        AnalysisCache::disabled()
    } else {
        AnalysisCache::new(&project_root)
    };

    if args.clear_cache {
        cache.clear();
        if !args.quiet {
            eprintln!("{}: Cache cleared", "Info".blue());
        }
    }
    let cache_stats = cache.stats();
    tracing::debug!(
        entries = cache_stats.entries,
        enabled = cache_stats.enabled,
        "cache loaded"
    );

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let use_parallel = args.parallel || files.len() > PARALLEL_MIN_FILES;
    let (reports, had_errors) = if use_parallel {
        analyze_files_parallel_cached(&engine, &files, &config, &mut cache, args.quiet)
    } else {
        analyze_files_sequential_cached(&engine, &files, &config, &mut cache, args.quiet)
    };

    if !args.staged && !args.changed {
        cache.cleanup(&files);
    }
    if let Err(e) = cache.save() {
        if !args.quiet {
            eprintln!("{}: Failed to save cache: {:#}", "Warning".yellow(), e);
        }
    }

    if reports.is_empty() {
        eprintln!("{}: All documents failed to analyze", "Error".red());
        return Ok(ExitCode::from(2));
    }

    output_reports(&args, &reports, Some(&project_root))?;
    Ok(exit_code(&args, &reports, had_errors))
}

fn build_engine(args: &Args) -> AnalysisEngine {
    let mut engine = AnalysisEngine::new();
    if let Some(ref keyword) = args.keyword {
        engine = engine.with_keyword(keyword.clone());
    }
    if let Some(ref slug) = args.slug {
        engine = engine.with_slug(slug.clone());
    }
    if let Some(threshold) = args.threshold {
        engine = engine.with_threshold(threshold);
    }
    engine
}

fn work_dir_for(path: &Path) -> &Path {
    if path.is_file() {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    } else {
        path
    }
}

/// Score one document read from stdin. JSON input is read as a post, anything
/// else as HTML, unless a path with a known extension is given.
fn run_stdin(args: &Args, engine: &AnalysisEngine) -> Result<ExitCode> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read document from stdin")?;

    let virtual_path = match args.path {
        Some(ref p) => p.clone(),
        None if source.trim_start().starts_with('{') => PathBuf::from("stdin.post.json"),
        None => PathBuf::from("stdin.html"),
    };

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let config = load_config(&cwd, args.config.as_deref())?.merge_with_cli(args.threshold);
    let report = engine.analyze_source(&source, &virtual_path, Some(&config))?;
    let reports = vec![report];

    output_reports(args, &reports, None)?;
    Ok(exit_code(args, &reports, false))
}

/// Print (or write) reports in the requested format. Console runs also record
/// scores in the trend history when a project root is known.
fn output_reports(
    args: &Args,
    reports: &[DocumentReport],
    project_root: Option<&Path>,
) -> Result<()> {
    let stats = AnalysisEngine::aggregate_stats(reports);

    if let Some(ref html_path) = args.html {
        let html = HtmlReporter::new().report(reports, &stats);
        std::fs::write(html_path, html).with_context(|| {
            format!("Failed to write HTML report to {}", html_path.display())
        })?;
        if !args.quiet {
            eprintln!(
                "{}: HTML report written to {}",
                "Info".blue(),
                html_path.display()
            );
        }
    }

    if args.sarif {
        println!("{}", SarifReporter::new().report(reports));
        return Ok(());
    }
    if args.json {
        let reporter = JsonReporter::new().pretty();
        if reports.len() == 1 {
            println!("{}", reporter.report(&reports[0]));
        } else {
            println!("{}", reporter.report_with_summary(reports, &stats));
        }
        return Ok(());
    }
    if args.html.is_some() {
        return Ok(());
    }

    let history = project_root.map(load_history);
    let mut reporter = ConsoleReporter::new();
    if args.verbose {
        reporter = reporter.verbose();
    }

    if args.quiet {
        for report in reports {
            match history {
                Some(ref h) => {
                    let delta = format_delta(previous_score(h, &report.file_path), report.score());
                    println!(
                        "{}: {} ({}){}",
                        report.file_path.display(),
                        report.score(),
                        report.grade,
                        delta
                    );
                }
                None => reporter.report_quiet(report),
            }
        }
    } else if reports.len() == 1 {
        let delta = history
            .as_ref()
            .map(|h| format_delta(previous_score(h, &reports[0].file_path), reports[0].score()))
            .unwrap_or_default();
        reporter.report_with_delta(&reports[0], &delta);
    } else {
        reporter.report_many(reports, &stats);
    }

    if let (Some(root), Some(mut history)) = (project_root, history) {
        append_run(&mut history, reports, current_commit(root));
        if let Err(e) = save_history(root, &history) {
            tracing::warn!(error = %e, "failed to save history");
        }
    }

    Ok(())
}

/// 1 when any document is under its threshold, 2 when some document failed
fn exit_code(args: &Args, reports: &[DocumentReport], had_errors: bool) -> ExitCode {
    let below: Vec<&DocumentReport> = reports.iter().filter(|r| r.below_threshold()).collect();
    if !below.is_empty() {
        if !args.quiet && !args.json && !args.sarif {
            for report in &below {
                eprintln!(
                    "{}: {} scored {}, below threshold {}",
                    "Failed".red().bold(),
                    report.file_path.display(),
                    report.score(),
                    report.threshold.unwrap_or_default()
                );
            }
        }
        return ExitCode::from(1);
    }

    if had_errors {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn run_init(threshold: Option<u8>, dir: Option<&Path>, force: bool) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let dir = dir.unwrap_or(&cwd);
    let path = write_starter_config(dir, threshold, force)?;

    println!(
        "{}: Created {} with threshold={}",
        "Done".green().bold(),
        path.display(),
        threshold.unwrap_or(DEFAULT_THRESHOLD)
    );
    Ok(ExitCode::SUCCESS)
}

fn run_watch(args: &Args, engine: &AnalysisEngine, path: &Path) -> Result<ExitCode> {
    let work_dir = work_dir_for(path);
    let config = load_config(work_dir, args.config.as_deref())?.merge_with_cli(args.threshold);
    let ignore_set = if config.ignore.is_empty() {
        None
    } else {
        Some(build_ignore_set(&config.ignore)?)
    };

    let watcher = DocumentWatcher::watch(path, config.get_document_patterns())
        .context("Failed to create file watcher")?;
    eprintln!("{}: Watching for changes... (Ctrl+C to stop)", "Info".blue());

    let reporter = ConsoleReporter::new();
    loop {
        let paths = watcher.next_changes();
        let changed = paths.into_iter().filter(|p| {
            ignore_set
                .as_ref()
                .map(|set| !is_ignored(p, set))
                .unwrap_or(true)
        });
        for path in changed {
            match engine.analyze(&path, Some(&config)) {
                Ok(report) if args.quiet => reporter.report_quiet(&report),
                Ok(report) => reporter.report(&report),
                Err(e) => eprintln!("{}: {:#}", "Error".red(), e),
            }
        }
    }
}

fn git_toplevel(dir: &Path) -> Option<PathBuf> {
    let output = std::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!root.is_empty()).then(|| PathBuf::from(root))
}

/// Collect documents named by one or more git commands that print paths
/// relative to `git_root`
fn collect_git_documents(
    git_root: &Path,
    commands: &[Vec<&str>],
    ignore_set: Option<&globset::GlobSet>,
    patterns: &[String],
) -> Result<Vec<PathBuf>> {
    let mut names = String::new();
    for (i, git_args) in commands.iter().enumerate() {
        let output = std::process::Command::new("git")
            .args(git_args)
            .current_dir(git_root)
            .output()
            .context("Failed to run git (is this a git repo?)")?;
        if !output.status.success() {
            // Only the first command is required; later ones add extras
            if i == 0 {
                anyhow::bail!(
                    "git {} failed: {}",
                    git_args.join(" "),
                    String::from_utf8_lossy(&output.stderr)
                );
            }
            continue;
        }
        names.push_str(&String::from_utf8_lossy(&output.stdout));
        names.push('\n');
    }

    let mut files: Vec<PathBuf> = names
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| git_root.join(line))
        .filter(|candidate| is_candidate(candidate, ignore_set, patterns) && candidate.exists())
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_documents(
    path: &Path,
    ignore_set: Option<&globset::GlobSet>,
    patterns: &[String],
) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        if let Some(set) = ignore_set {
            if is_ignored(path, set) {
                return Ok(vec![]);
            }
        }
        return Ok(vec![path.to_path_buf()]);
    }

    if !path.is_dir() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|p| is_candidate(p, ignore_set, patterns))
        .collect();

    files.sort();
    Ok(files)
}

fn is_candidate(path: &Path, ignore_set: Option<&globset::GlobSet>, patterns: &[String]) -> bool {
    if path.components().any(|c| c.as_os_str() == "node_modules") {
        return false;
    }
    if !is_document(path, patterns) {
        return false;
    }
    ignore_set.map(|set| !is_ignored(path, set)).unwrap_or(true)
}

fn report_failure(file: &Path, e: &anyhow::Error, quiet: bool) {
    if !quiet {
        eprintln!(
            "{}: Failed to analyze {}: {:#}",
            "Error".red(),
            file.display(),
            e
        );
    }
}

fn report_cache_hits(hits: usize, total: usize, quiet: bool) {
    if !quiet && hits > 0 {
        eprintln!(
            "{}: {} documents from cache, {} analyzed",
            "Cache".blue(),
            hits,
            total - hits
        );
    }
}

/// Analyze documents sequentially with caching
fn analyze_files_sequential_cached(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    cache: &mut AnalysisCache,
    quiet: bool,
) -> (Vec<DocumentReport>, bool) {
    let mut reports = Vec::new();
    let mut had_errors = false;
    let mut cache_hits = 0;

    for file in files {
        let content = std::fs::read_to_string(file).ok();
        let context = engine.cache_context(file, Some(config));

        if let Some(ref content) = content {
            if let Some(cached) = cache.get(file, content, &context) {
                reports.push(cached);
                cache_hits += 1;
                continue;
            }
        }

        match engine.analyze(file, Some(config)) {
            Ok(report) => {
                if let Some(ref content) = content {
                    cache.set(file, content, &context, report.clone());
                }
                reports.push(report);
            }
            Err(e) => {
                report_failure(file, &e, quiet);
                had_errors = true;
            }
        }
    }

    report_cache_hits(cache_hits, files.len(), quiet);
    (reports, had_errors)
}

/// Analyze documents in parallel. Cache lookups happen on the workers; fresh
/// reports are stored afterwards since the cache is not shared mutably.
fn analyze_files_parallel_cached(
    engine: &AnalysisEngine,
    files: &[PathBuf],
    config: &Config,
    cache: &mut AnalysisCache,
    quiet: bool,
) -> (Vec<DocumentReport>, bool) {
    use rayon::prelude::*;

    enum Outcome {
        Cached(DocumentReport),
        Fresh {
            report: DocumentReport,
            content: Option<String>,
            context: String,
        },
        Failed,
    }

    let cache_ref: &AnalysisCache = cache;
    let outcomes: Vec<(&PathBuf, Outcome)> = files
        .par_iter()
        .map(|file| {
            let content = std::fs::read_to_string(file).ok();
            let context = engine.cache_context(file, Some(config));
            if let Some(cached) = content
                .as_deref()
                .and_then(|c| cache_ref.get(file, c, &context))
            {
                return (file, Outcome::Cached(cached));
            }
            match engine.analyze(file, Some(config)) {
                Ok(report) => (
                    file,
                    Outcome::Fresh {
                        report,
                        content,
                        context,
                    },
                ),
                Err(e) => {
                    report_failure(file, &e, quiet);
                    (file, Outcome::Failed)
                }
            }
        })
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut had_errors = false;
    let mut cache_hits = 0;
    for (file, outcome) in outcomes {
        match outcome {
            Outcome::Cached(report) => {
                cache_hits += 1;
                reports.push(report);
            }
            Outcome::Fresh {
                report,
                content,
                context,
            } => {
                if let Some(content) = content {
                    cache.set(file, &content, &context, report.clone());
                }
                reports.push(report);
            }
            Outcome::Failed => had_errors = true,
        }
    }

    report_cache_hits(cache_hits, files.len(), quiet);
    (reports, had_errors)
}

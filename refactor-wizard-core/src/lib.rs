// refactor-wizard-core/src/lib.rs

// declare modules
pub mod config;
pub mod error;
pub mod git;
pub mod refactor;
pub mod session;
pub mod walker;

// re-export key structs/functions for external use by other crates
pub use anyhow::{Context, Result};
pub use clap::Parser; // re-export Parser for the CLI and NAPI crates
pub use console::style; // re-export for CLI/NAPI crates if they do printing
pub use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
pub use dotenv::dotenv;
pub use indicatif::{ProgressBar, ProgressStyle};

pub use crate::config::Config;
pub use crate::error::RefactorError;
pub use crate::refactor::{
    compile_pairs, has_regex_metacharacters, parse_input, refactor_string, CompiledPair, Refactor,
    RefactorTarget, SubstitutionPair,
};
pub use crate::session::RefactorSession;
pub use crate::walker::{rewrite_tree, Rename, WalkSummary};

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::io::AsyncReadExt;

// argument parsing struct - shared by the CLI and NAPI crates
#[derive(Parser, Debug, Clone)]
#[command(name = "refactor-wizard-core")] // generic name for the core functionality
pub struct CoreCliArgs {
    /// directory to refactor recursively (file contents and file names)
    #[arg(short, long)]
    pub dir: Option<String>,

    /// replacement pairs: "<source1> <replacement1> <source2> <replacement2> ..."
    #[arg(short, long)]
    pub pairs: Option<String>,

    /// print per-file detail instead of a spinner
    #[arg(short, long)]
    pub verbose: bool,

    /// skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// print the walk summary as json (requires --pairs)
    #[arg(short, long)]
    pub json: bool,
}

/// what a finished flow hands back to the host crate
#[derive(Debug)]
pub enum FlowOutcome {
    /// transformed selection text (already written to stdout)
    Selection(String),
    /// summary of the last walk, or None when the user quit without one
    Directory(Option<WalkSummary>),
}

// the core refactor flow shared by the CLI and NAPI hosts
pub async fn execute_refactor_wizard_flow(args: CoreCliArgs) -> Result<FlowOutcome> {
    dotenv().ok();
    let config = Config::load()?;
    let mut session = RefactorSession::new();

    match resolve_target(&args).await? {
        RefactorTarget::Selection(text) => run_selection_mode(&args, &mut session, text).await,
        RefactorTarget::Directory(root) => {
            run_directory_mode(&args, &config, &mut session, root).await
        }
    }
}

/// decide what this invocation operates on
///
/// --dir selects directory mode; otherwise the selection is whatever is piped
/// on stdin. an interactive terminal on stdin means there is no text surface.
async fn resolve_target(args: &CoreCliArgs) -> Result<RefactorTarget> {
    if let Some(dir) = &args.dir {
        return Ok(RefactorTarget::Directory(PathBuf::from(dir)));
    }
    if atty::is(atty::Stream::Stdin) {
        return Err(RefactorError::NoActiveSurface.into());
    }
    let mut text = String::new();
    tokio::io::stdin()
        .read_to_string(&mut text)
        .await
        .context("failed to read selection from stdin")?;
    Ok(RefactorTarget::Selection(text))
}

/// reject empty selections before any substitution runs
fn validate_selection(text: String) -> std::result::Result<String, RefactorError> {
    if text.is_empty() {
        Err(RefactorError::EmptySelection)
    } else {
        Ok(text)
    }
}

async fn run_selection_mode(
    args: &CoreCliArgs,
    session: &mut RefactorSession,
    text: String,
) -> Result<FlowOutcome> {
    let pairs_text = args
        .pairs
        .clone()
        .ok_or_else(|| anyhow::anyhow!("selection mode needs --pairs (stdin is the text surface)"))?;
    let selection = validate_selection(text)?;

    let refactor = parse_input(&pairs_text)?;
    warn_if_pattern_like(&pairs_text);
    session.push(&pairs_text, refactor.clone());

    let compiled = compile_pairs(&refactor)?;
    let transformed = refactor_string(&compiled, &selection);

    // raw transformed text on stdout so the host can substitute it in place;
    // everything styled goes to stderr in this mode
    print!("{transformed}");
    std::io::stdout()
        .flush()
        .context("failed to write transformed selection")?;

    Ok(FlowOutcome::Selection(transformed))
}

async fn run_directory_mode(
    args: &CoreCliArgs,
    config: &Config,
    session: &mut RefactorSession,
    root: PathBuf,
) -> Result<FlowOutcome> {
    if args.json && args.pairs.is_none() {
        return Err(anyhow::anyhow!("--json requires --pairs"));
    }
    if !root.is_dir() {
        return Err(RefactorError::NotADirectory { path: root }.into());
    }

    if !args.json {
        println!("{}", style("\nrefactor-wizard 🪄").cyan().bold());
        println!(
            "{}\n",
            style("pair-based search/replace over file contents and file names").dim()
        );
    }

    confirm_dirty_tree(args, config, &root)?;

    if let Some(pairs_text) = args.pairs.clone() {
        let refactor = parse_input(&pairs_text)?;
        warn_if_pattern_like(&pairs_text);
        session.push(&pairs_text, refactor.clone());

        let summary = run_walk(&root, &refactor, args).await?;
        print_summary(&summary, args)?;
        return Ok(FlowOutcome::Directory(Some(summary)));
    }

    interactive_directory_loop(args, config, session, &root).await
}

/// warn (and ask) before rewriting a tree with uncommitted git changes
fn confirm_dirty_tree(args: &CoreCliArgs, config: &Config, root: &Path) -> Result<()> {
    if args.yes || args.json || !config.confirm_directory() {
        return Ok(());
    }
    match git::uncommitted_change_count(root) {
        Ok(Some(count)) if count > 0 => {
            println!(
                "{}",
                style(format!(
                    "⚠️  {count} uncommitted change{} under this tree may be overwritten",
                    if count == 1 { "" } else { "s" }
                ))
                .yellow()
                .bold()
            );
            let proceed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("continue anyway?")
                .default(false)
                .interact()?;
            if !proceed {
                return Err(anyhow::anyhow!("aborted: directory has uncommitted changes"));
            }
        }
        Ok(_) => {}
        Err(err) => {
            // advisory only - a broken git setup never blocks the refactor
            eprintln!(
                "{} {}",
                style("⚠️  could not check git status:").yellow(),
                style(err).yellow()
            );
        }
    }
    Ok(())
}

async fn interactive_directory_loop(
    args: &CoreCliArgs,
    config: &Config,
    session: &mut RefactorSession,
    root: &Path,
) -> Result<FlowOutcome> {
    println!("{}", style("press ctrl+c at any time to exit").dim());

    let mut last_summary = None;

    loop {
        let mut options = vec![
            "enter a new pattern".to_string(),
            "compose a pattern in your editor".to_string(),
        ];
        for label in session.labels() {
            options.push(format!("reuse: {label}"));
        }
        options.push("quit".to_string());

        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("what would you like to do?")
            .default(0)
            .items(&options)
            .interact()?;

        let refactor = if choice == options.len() - 1 {
            break;
        } else if choice == 0 {
            let pairs_text: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("replacement pairs (<source> <replacement> ...)")
                .with_initial_text(config.default_query())
                .interact_text()?;
            match parse_and_record(&pairs_text, session) {
                Some(refactor) => refactor,
                None => continue,
            }
        } else if choice == 1 {
            match open_editor_for_pairs(&config.default_query())? {
                Some(pairs_text) => match parse_and_record(&pairs_text, session) {
                    Some(refactor) => refactor,
                    None => continue,
                },
                None => {
                    println!("{}", style("edit cancelled").yellow());
                    continue;
                }
            }
        } else {
            // stable history index: menu slots 2.. map onto session order
            match session.get(choice - 2) {
                Some(entry) => entry.refactor.clone(),
                None => continue,
            }
        };

        let summary = run_walk(root, &refactor, args).await?;
        print_summary(&summary, args)?;
        last_summary = Some(summary);
    }

    Ok(FlowOutcome::Directory(last_summary))
}

/// parse pair text, surface errors inline, record successes in the session
fn parse_and_record(pairs_text: &str, session: &mut RefactorSession) -> Option<Refactor> {
    match parse_input(pairs_text) {
        Ok(refactor) => {
            warn_if_pattern_like(pairs_text);
            session.push(pairs_text, refactor.clone());
            Some(refactor)
        }
        Err(err) => {
            eprintln!("{}", style(err).red());
            None
        }
    }
}

/// compile and run one walk, with a spinner unless per-file or json output is on
async fn run_walk(root: &Path, refactor: &Refactor, args: &CoreCliArgs) -> Result<WalkSummary> {
    let compiled = compile_pairs(refactor)?;

    let spinner = if args.verbose || args.json {
        None
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&[
                    "🪄 ⠋", "🪄 ⠙", "🪄 ⠹", "🪄 ⠸",
                    "🪄 ⠼", "🪄 ⠴", "🪄 ⠦", "🪄 ⠧",
                    "🪄 ⠇", "🪄 ⠏",
                ])
                .template("{spinner} rewriting files...")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        Some(spinner)
    };

    let result = rewrite_tree(root, &compiled, args.verbose && !args.json).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    result.context("failed to rewrite directory tree")
}

fn print_summary(summary: &WalkSummary, args: &CoreCliArgs) -> Result<()> {
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("failed to serialise walk summary")?
        );
        return Ok(());
    }

    println!(
        "\n{}",
        style(format!(
            "✅ {} file{} visited, {} file{} written",
            summary.files_visited,
            if summary.files_visited == 1 { "" } else { "s" },
            summary.files_written,
            if summary.files_written == 1 { "" } else { "s" },
        ))
        .green()
        .bold()
    );

    if !summary.renames.is_empty() {
        println!("{}", style("renamed (originals kept in place):").cyan().bold());
        for rename in &summary.renames {
            println!("{}", style(format!("  {} -> {}", rename.from, rename.to)).yellow());
        }
    }
    println!();
    Ok(())
}

/// sources are live regex patterns; give a heads-up when the input looks like one
fn warn_if_pattern_like(pairs_text: &str) {
    if has_regex_metacharacters(pairs_text) {
        eprintln!(
            "{}",
            style("note: sources are regular expressions - metacharacters match as patterns, $n in replacements expands captures")
                .dim()
        );
    }
}

// helper for composing a long pair string in an external editor
fn open_editor_for_pairs(seed: &str) -> Result<Option<String>> {
    use std::{
        env,
        fs::{self, File},
        process::{Command, Stdio},
        time::{SystemTime, UNIX_EPOCH},
    };
    use crossterm::terminal::disable_raw_mode;
    use which::which;

    // pick a filename with a monotonically-increasing suffix
    let millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    let tmp_path = env::temp_dir().join(format!("refactor-wizard-{millis}.txt"));

    {
        let mut file = File::create(&tmp_path)
            .with_context(|| format!("failed to create {}", tmp_path.display()))?;
        file.write_all(seed.as_bytes())
            .context("failed to write pair seed")?;
    }

    let _ = disable_raw_mode();

    let editor = if let Ok(vis) = env::var("VISUAL") {
        vis
    } else if let Ok(ed) = env::var("EDITOR") {
        ed
    } else {
        // fallback to first available editor
        let candidates = ["code -w", "nvim", "vim", "vi", "nano"];
        candidates
            .iter()
            .find(|&&cand| which(cand.split_whitespace().next().unwrap_or(cand)).is_ok())
            .map(|&s| s.to_string())
            .unwrap_or_else(|| "nano".to_string())
    };

    // split the editor string into command and arguments if any (e.g., "code -w")
    let mut editor_parts = editor.split_whitespace();
    let editor_executable = editor_parts.next().unwrap_or(&editor);
    let editor_args = editor_parts.collect::<Vec<&str>>();

    let status = Command::new(editor_executable)
        .args(&editor_args)
        .arg(&tmp_path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("failed to execute editor '{editor}'"))?;

    if !status.success() {
        eprintln!(
            "{}",
            style(format!("editor '{editor}' exited with error: {status}")).yellow()
        );
        let _ = fs::remove_file(&tmp_path);
        return Ok(None);
    }

    let edited = fs::read_to_string(&tmp_path)
        .with_context(|| format!("failed to read {}", tmp_path.display()))?;
    let _ = fs::remove_file(&tmp_path);

    // pairs live on a single line; take the first non-empty one
    let pairs_text = edited
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .to_string();
    if pairs_text.is_empty() || pairs_text == seed {
        println!("{}", style("no changes detected; nothing to run").yellow());
        return Ok(None);
    }
    Ok(Some(pairs_text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_selection_is_rejected_before_substitution() {
        assert!(matches!(
            validate_selection(String::new()),
            Err(RefactorError::EmptySelection)
        ));
        assert_eq!(validate_selection("text".to_string()).unwrap(), "text");
    }

    #[test]
    fn parse_and_record_grows_the_session() {
        let mut session = RefactorSession::new();
        assert!(parse_and_record("channel group", &mut session).is_some());
        assert!(parse_and_record("one two three", &mut session).is_none());
        assert_eq!(session.len(), 1);
    }
}

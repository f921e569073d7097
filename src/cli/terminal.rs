//! Interactive terminal surface.
//!
//! Prompts and results go to stdout; input is read line by line from stdin.

use async_trait::async_trait;
use console::style;
use indicatif::ProgressBar;
use std::io::Write;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::process::Command;
use tracing::debug;

use crate::cli::display::{
    count_label, document_overview, highlight_in_context, low_confidence_notice, pending_count,
    suggestion_lines,
};
use crate::cli::output::{create_spinner, ProgressBarExt};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{LinkCandidate, Suggestion};
use crate::domain::ports::{Interaction, ResolverEvent};

const COMMAND_HELP: &str =
    "y accept, v view, or type a URL to use it, or more context to ask again";

/// [`Interaction`] backed by the user's terminal.
pub struct TerminalInteraction {
    input: Lines<BufReader<Stdin>>,
    spinner: Option<ProgressBar>,
    confidence_floor: f64,
    position: usize,
    total: usize,
}

impl TerminalInteraction {
    pub fn new(confidence_floor: f64) -> Self {
        Self {
            input: BufReader::new(tokio::io::stdin()).lines(),
            spinner: None,
            confidence_floor,
            position: 0,
            total: 0,
        }
    }

    async fn prompt(&mut self, text: &str) -> Option<String> {
        self.stop_spinner();
        print!("{text}");
        flush_or_log(&mut std::io::stdout());
        match self.input.next_line().await {
            Ok(Some(line)) => Some(line),
            Ok(None) => None,
            Err(err) => {
                debug!(error = %err, "failed to read from stdin");
                None
            }
        }
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Finish the running spinner with a warning, or print it.
    fn warn(&mut self, message: String) {
        match self.spinner.take() {
            Some(spinner) => spinner.finish_warning(message),
            None => println!("{} {message}", style("!").yellow().bold()),
        }
    }

    /// Finish the running spinner with an error, or print it.
    fn fail(&mut self, message: String) {
        match self.spinner.take() {
            Some(spinner) => spinner.finish_error(message),
            None => println!("{} {message}", style("✗").red().bold()),
        }
    }
}

#[async_trait]
impl Interaction for TerminalInteraction {
    async fn begin_document(&mut self, candidates: &[LinkCandidate]) {
        self.total = pending_count(candidates);
        self.position = 0;
        for line in document_overview(candidates) {
            println!("{line}");
        }
    }

    async fn begin_candidate(&mut self, candidate: &LinkCandidate) {
        self.position += 1;
        println!();
        println!(
            "{} {}",
            style(format!("[{}/{}]", self.position, self.total)).dim(),
            style(candidate.description()).bold()
        );
        println!("  {}", highlight_in_context(candidate));
    }

    async fn report(&mut self, event: ResolverEvent) {
        match event {
            ResolverEvent::RequestingSuggestion { round } => {
                self.stop_spinner();
                let message = if round <= 1 {
                    "Asking for a suggestion...".to_string()
                } else {
                    format!("Asking for a suggestion (round {round})...")
                };
                self.spinner = Some(create_spinner(message));
            }
            ResolverEvent::Verifying { url } => {
                self.spinner
                    .get_or_insert_with(|| create_spinner(""))
                    .set_message(format!("Checking {url}..."));
            }
            ResolverEvent::Reachable { .. } => self.stop_spinner(),
            ResolverEvent::Unreachable { url, status } => {
                let reason = if status == 0 {
                    "could not be reached".to_string()
                } else {
                    format!("returned HTTP {status}")
                };
                self.warn(format!("{url} {reason}; asking again"));
            }
            ResolverEvent::PreviouslyRejected { url } => {
                self.warn(format!("{url} was already rejected; asking again"));
            }
            ResolverEvent::ServiceFailed(err) => {
                self.fail(err.to_string());
            }
            ResolverEvent::AutoRoundLimit { rounds } => {
                self.warn(format!(
                    "No usable suggestion after {}.",
                    count_label(rounds as usize, "attempt", "attempts")
                ));
            }
            ResolverEvent::ConfidenceTooLow { confidence, floor } => println!(
                "{} {}",
                style("!").yellow().bold(),
                low_confidence_notice(confidence, floor)
            ),
            ResolverEvent::InvalidSelection { index, available } => println!(
                "{} No suggestion #{index} ({} available).",
                style("!").yellow().bold(),
                available
            ),
            ResolverEvent::InvalidUrl(err) | ResolverEvent::BrowserFailed(err) => {
                self.fail(err.to_string());
            }
            ResolverEvent::BrowserOpened { url } => {
                println!("{} Opened {url}", style("→").cyan());
            }
            ResolverEvent::ContextAdded { .. } => {
                println!("{} Asking again with your context.", style("→").cyan());
            }
            ResolverEvent::Settled { url, user_supplied } => {
                let source = if user_supplied { " (your URL)" } else { "" };
                println!("{} Using {url}{source}", style("✓").green().bold());
            }
            ResolverEvent::Skipped => {
                self.stop_spinner();
                println!("{} Skipped", style("✗").dim());
            }
        }
    }

    async fn present(&mut self, _candidate: &LinkCandidate, suggestions: &[Suggestion]) {
        self.stop_spinner();
        for line in suggestion_lines(suggestions, self.confidence_floor) {
            println!("{line}");
        }
        println!("  {}", style(COMMAND_HELP).dim());
    }

    async fn read_command(&mut self) -> Option<String> {
        let prompt = format!("{} ", style(">").cyan().bold());
        self.prompt(&prompt).await
    }

    async fn confirm(&mut self, question: &str) -> bool {
        loop {
            let Some(answer) = self.prompt(&format!("{question} [y/n] ")).await else {
                return false;
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => println!("Please answer y or n."),
            }
        }
    }

    async fn open_in_browser(&mut self, url: &str) -> DomainResult<()> {
        launch_detached(browser_command(url))
    }
}

/// Flush `out`, logging a failure instead of surfacing it.
fn flush_or_log(out: &mut impl Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(err) => {
            debug!(error = %err, "failed to flush stdout");
            false
        }
    }
}

/// Start `command` detached from the terminal and reap it in the background.
///
/// Only a failure to start is reported. The launcher's exit status is never
/// waited on.
fn launch_detached(mut command: Command) -> DomainResult<()> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| DomainError::Browser(e.to_string()))?;
    tokio::spawn(async move {
        if let Err(err) = child.wait().await {
            debug!(error = %err, "browser launcher could not be reaped");
        }
    });
    Ok(())
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

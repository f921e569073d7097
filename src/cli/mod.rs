//! Command-line surface: argument parsing, terminal interaction, and
//! result display.

pub mod display;
pub mod output;
pub mod terminal;
pub mod types;

use console::style;

pub use terminal::TerminalInteraction;
pub use types::Cli;

use crate::services::RunSummary;

/// Print the end-of-run summary.
pub fn print_summary(summary: &RunSummary) {
    if summary.is_noop() {
        println!("No links found to process.");
        return;
    }

    println!();
    println!("{}", style("Summary").bold());
    for line in display::summary_lines(&summary.candidates) {
        println!("  {line}");
    }
    println!(
        "{} of {} resolved.",
        summary.settled(),
        display::count_label(summary.candidates.len(), "link", "links")
    );
    if let Some(path) = &summary.written_to {
        println!("Wrote {}", path.display());
    }
}

/// Print an error with its cause chain and exit with status 1.
pub fn handle_error(err: &anyhow::Error) -> ! {
    eprintln!("{} {err}", style("Error:").red().bold());
    for cause in err.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
    std::process::exit(1);
}

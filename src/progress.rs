//! Progress display module
//!
//! Progress observer hook for the engine, plus styled progress bars and
//! console output for the pentesting aesthetic.

use crate::charset::Charset;
use crate::estimate::Estimate;
use crate::generator::GenerationSummary;
use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Receives `(words_written, total_words)` after every emitted word
pub trait ProgressObserver {
    fn on_progress(&mut self, count: u64, total: u64);
}

impl<F: FnMut(u64, u64)> ProgressObserver for F {
    fn on_progress(&mut self, count: u64, total: u64) {
        self(count, total)
    }
}

/// Observer that drives an indicatif bar
pub fn bar_observer(pb: &ProgressBar) -> impl FnMut(u64, u64) + '_ {
    move |count: u64, _total: u64| pb.set_position(count)
}

/// Print the application banner
pub fn print_banner() {
    let banner = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                                                                              ║
║   ██╗    ██╗ ██████╗ ██████╗ ██████╗ ██╗     ██╗███████╗████████╗           ║
║   ██║    ██║██╔═══██╗██╔══██╗██╔══██╗██║     ██║██╔════╝╚══██╔══╝           ║
║   ██║ █╗ ██║██║   ██║██████╔╝██║  ██║██║     ██║███████╗   ██║              ║
║   ██║███╗██║██║   ██║██╔══██╗██║  ██║██║     ██║╚════██║   ██║              ║
║   ╚███╔███╔╝╚██████╔╝██║  ██║██████╔╝███████╗██║███████║   ██║              ║
║    ╚══╝╚══╝  ╚═════╝ ╚═╝  ╚═╝╚═════╝ ╚══════╝╚═╝╚══════╝   ╚═╝              ║
║                                                                              ║
║    ██████╗ ███████╗███╗   ██╗                                                ║
║   ██╔════╝ ██╔════╝████╗  ██║                                                ║
║   ██║  ███╗█████╗  ██╔██╗ ██║                                                ║
║   ██║   ██║██╔══╝  ██║╚██╗██║                                                ║
║   ╚██████╔╝███████╗██║ ╚████║                                                ║
║    ╚═════╝ ╚══════╝╚═╝  ╚═══╝                                                ║
║                                                                              ║
║                  Streaming Brute-Force Wordlist Generation                    ║
║                         For Penetration Testing                               ║
║                                                              v1.0.0          ║
╚══════════════════════════════════════════════════════════════════════════════╝
"#;

    println!("{}", banner.green());
}

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print a bullet point
pub fn print_bullet(text: &str) {
    println!("  {} {}", "•".green(), text);
}

/// List the built-in presets with their symbols
pub fn print_charsets() {
    print_header("Available character sets");
    for preset in Charset::ALL_PRESETS {
        print_bullet(&format!("{} {}", format!("{:<5}", preset.name()).bold(), preset.symbols()));
    }
}

/// Print the pre-run plan
pub fn print_plan(plan: &Estimate) {
    print_header("Plan");

    if plan.truncated {
        print_warning(&format!(
            "Total words truncated to {}",
            format_big(&plan.total_words.to_string())
        ));
        print_info(&format!(
            "Full combination count: {}",
            format_big(&plan.combinations.to_string())
        ));
    }

    print_info(&format!("Total words:    {}", format_big(&plan.total_words.to_string())));
    print_info(&format!(
        "Estimated size: {:.2} MB ({})",
        plan.estimated_megabytes(),
        ByteSize(plan.estimated_bytes_u64())
    ));
}

/// Create a styled progress bar
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({percent}%) {per_sec} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░")
    );

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Print final statistics
pub fn print_summary(summary: &GenerationSummary, elapsed: Duration) {
    println!();
    println!("{}", "═".repeat(60).green());
    println!("{}", "                   GENERATION COMPLETE".green().bold());
    println!("{}", "═".repeat(60).green());
    println!();

    println!("  {} {}", "Words written:  ".green(), format_number(summary.words_written));
    println!("  {} {}", "Planned words:  ".green(), format_big(&summary.total_words.to_string()));
    if summary.truncated {
        println!("  {} {}", "Truncated:      ".yellow(), "yes (max words reached)".yellow());
    }
    println!("  {} {}", "Data written:   ".green(), ByteSize(summary.bytes_written));
    println!("  {} {:?}", "Wordlist:       ".green().bold(), summary.output_path);
    if let Some(ref zip) = summary.archive_path {
        println!("  {} {:?}", "Archive:        ".green().bold(), zip);
    }

    println!();
    println!("  {} {}", "Duration:       ".green(), format_duration(elapsed));

    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        println!(
            "  {} {:.2} words/sec",
            "Throughput:     ".green(),
            summary.words_written as f64 / secs
        );
    }
    println!();
    println!("{}", "═".repeat(60).green());
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    format_big(&n.to_string())
}

/// Insert thousand separators into a decimal digit string
fn format_big(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

//! Wordlist Generator - Streaming brute-force wordlist generation for penetration testing
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;
use std::time::Instant;

use bytesize::ByteSize;
use wordlist_generator::cli::Args;
use wordlist_generator::generator::{GenerationRequest, Generator};
use wordlist_generator::progress::{
    bar_observer, create_progress_bar, ProgressObserver, print_banner, print_charsets, print_error, print_header,
    print_info, print_plan, print_success, print_summary,
};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Print banner unless quiet mode
    if !args.quiet {
        print_banner();
    }

    if args.list_charsets {
        print_charsets();
        return Ok(());
    }

    // Create generation request
    let generator = Generator::new(GenerationRequest::from_args(&args)?);

    // Show configuration
    if !args.quiet && args.verbose {
        print_config(generator.request());
    }

    if !args.quiet {
        print_plan(generator.plan());
    }

    // Size guard before anything touches the disk
    if let Some(limit) = args.parse_max_size()? {
        if generator.plan().estimated_bytes_u64() > limit {
            anyhow::bail!(
                "Estimated size {} exceeds --max-size {}",
                ByteSize(generator.plan().estimated_bytes_u64()),
                ByteSize(limit)
            );
        }
    }

    if args.dry_run {
        print_header("DRY RUN - No files will be written");
        return Ok(());
    }

    let started = Instant::now();
    let pb = if args.quiet {
        indicatif::ProgressBar::hidden()
    } else {
        create_progress_bar(generator.plan().total_words_u64(), "Generating wordlist")
    };

    let mut observer = bar_observer(&pb);
    let result = generator.generate(Some(&mut observer as &mut dyn ProgressObserver));
    pb.finish_and_clear();
    let summary = result?;

    if !args.quiet {
        print_success(&format!("Wordlist saved to {:?}", summary.output_path));
        if let Some(ref zip) = summary.archive_path {
            print_success(&format!("Wordlist compressed to {:?}", zip));
        }
        print_summary(&summary, started.elapsed());
    }

    Ok(())
}

/// Print configuration summary
fn print_config(request: &GenerationRequest) {
    print_header("Configuration");

    print_info(&format!("Alphabet:     {} ({} symbols)", request.alphabet, request.alphabet.len()));
    print_info(&format!("Lengths:      {}-{}", request.range.min(), request.range.max()));
    print_info(&format!("Output:       {:?}", request.output));
    if !request.prefix.is_empty() {
        print_info(&format!("Prefix:       {}", request.prefix));
    }
    match request.max_words {
        Some(n) => print_info(&format!("Max words:    {}", n)),
        None => print_info("Max words:    unlimited"),
    }
    print_info(&format!("Compress:     {}", request.compress));
    print_info(&format!("Buffer size:  {}", ByteSize(request.buffer_size as u64)));
}

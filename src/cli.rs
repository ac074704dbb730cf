//! Command-line interface definition for wordlist-generator
//!
//! Provides argument parsing for the wordlist generation tool.

use clap::Parser;
use std::path::PathBuf;

/// Brute-force wordlist generator for penetration testing
///
/// Enumerates every word over a character set for a range of lengths and
/// streams them to a file, optionally prefixed, capped and zipped.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-generator",
    author = "m0h1nd4",
    version,
    about = "Brute-force wordlist generator for penetration testing",
    long_about = r#"
╔══════════════════════════════════════════════════════════════════════════════╗
║                        WORDLIST-GENERATOR v1.0.0                             ║
║                   Streaming Brute-Force Wordlist Builder                      ║
║                         For Penetration Testing                               ║
╚══════════════════════════════════════════════════════════════════════════════╝

Generate every combination of a character set for a range of word lengths.
Output is streamed to disk, so lists far larger than RAM are fine.

EXAMPLES:
    # All 4-digit PINs
    wordlist-generator -c Num -m 4 -M 4

    # Lowercase words of length 1-3 with a prefix
    wordlist-generator -c abcdefghijklmnopqrstuvwxyz -m 1 -M 3 -p admin_

    # Digits without 0 and 1, capped at one million words, zipped
    wordlist-generator -c Num -e 01 -m 6 -M 8 -n 1000000 -z

    # Only show how big the list would be
    wordlist-generator -c All -m 1 -M 6 --dry-run

CHARACTER SETS:
    Chat  - a-z followed by A-Z
    Num   - 0-9
    SYM   - !@#$%^&*()-_=+[]{}|;:',.<>?/`~
    All   - Chat + Num + SYM
    Any other value is used literally as the character set.
"#,
    after_help = "Use responsibly and for authorized purposes only."
)]
pub struct Args {
    /// Character set: Chat, Num, SYM, All, or literal characters
    #[arg(short, long, value_name = "SET", default_value = "All")]
    pub charset: String,

    /// Characters to remove from the character set
    #[arg(short, long, value_name = "CHARS")]
    pub exclude: Option<String>,

    /// Minimum word length
    #[arg(short, long, value_name = "LEN", default_value_t = 1)]
    pub min: u32,

    /// Maximum word length
    #[arg(short = 'M', long, value_name = "LEN", required_unless_present = "list_charsets")]
    pub max: Option<u32>,

    /// Output file
    #[arg(short, long, value_name = "FILE", default_value = "wordlist.txt")]
    pub output: PathBuf,

    /// Prefix prepended to every word
    #[arg(short, long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Stop after this many words (0 = unlimited)
    #[arg(short = 'n', long, value_name = "NUM", default_value_t = 0)]
    pub max_words: u64,

    /// Also write <output>.zip
    #[arg(short = 'z', long, default_value_t = false)]
    pub compress: bool,

    /// Refuse to start if the estimated size exceeds this (e.g., "500MB", "2GB")
    #[arg(long, value_name = "SIZE")]
    pub max_size: Option<String>,

    /// Dry run - show the plan without writing files
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// List the built-in character sets and exit
    #[arg(long, default_value_t = false)]
    pub list_charsets: bool,

    /// Write buffer size (default: 8MB)
    #[arg(long, value_name = "SIZE", default_value = "8MB")]
    pub buffer_size: String,

    /// Quiet mode - minimal output
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        let size = parse_size(&self.buffer_size)?;
        if size == 0 {
            anyhow::bail!("Buffer size must be greater than zero");
        }
        Ok(size as usize)
    }

    /// Parse the size limit, if any, to bytes
    pub fn parse_max_size(&self) -> anyhow::Result<Option<u64>> {
        self.max_size.as_deref().map(parse_size).transpose()
    }
}

/// Parse human-readable size string to bytes
pub fn parse_size(size_str: &str) -> anyhow::Result<u64> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("TB") {
        (n, 1u64 << 40)
    } else if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1 << 30)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1 << 20)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1 << 10)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    num.checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Size too large: '{}'", size_str))
}

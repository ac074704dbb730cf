//! # Wordlist Generator
//!
//! Streaming brute-force wordlist generation for penetration testing.
//!
//! ## Features
//!
//! - **Character set presets**: `Chat`, `Num`, `SYM`, `All`, or any custom string
//! - **Exclusions**: Drop individual characters from the set, order preserved
//! - **Exact planning**: Word count and size estimate before anything is written
//! - **Streaming output**: Words go straight to disk, memory use stays flat
//! - **Cutoff**: Stop after a maximum number of words, even mid-length
//! - **ZIP output**: Optional single-entry deflate archive next to the wordlist
//!
//! ## Usage
//!
//! ```bash
//! # All 4-digit PINs
//! wordlist-generator -c Num -m 4 -M 4
//!
//! # Letters of length 1-3, capped and zipped
//! wordlist-generator -c Chat -m 1 -M 3 -n 10000 -z
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use wordlist_generator::charset::Alphabet;
//! use wordlist_generator::estimate::LengthRange;
//! use wordlist_generator::generator::{GenerationRequest, Generator};
//!
//! let alphabet = Alphabet::resolve("Num", "5").unwrap();
//! let range = LengthRange::new(4, 6).unwrap();
//! let request = GenerationRequest::new(alphabet, range, "pins.txt").with_prefix("pin");
//!
//! let generator = Generator::new(request);
//! println!("{} words planned", generator.plan().total_words);
//! // generator.generate(None).unwrap();
//! ```

pub mod archive;
pub mod charset;
pub mod cli;
pub mod enumerate;
pub mod error;
pub mod estimate;
pub mod generator;
pub mod output;
pub mod progress;

pub use cli::Args;
pub use error::{CompressionError, GenerationError};
pub use generator::{generate, GenerationRequest, GenerationSummary, Generator};

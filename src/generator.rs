//! Core generation engine
//!
//! Plans a run (exact total + size estimate), streams every word to the
//! output file and optionally packs the result into a ZIP archive.

use crate::archive;
use crate::charset::Alphabet;
use crate::cli::Args;
use crate::enumerate::Words;
use crate::error::{GenerationError, Result};
use crate::estimate::{estimate, Estimate, LengthRange};
use crate::output::{stream_words, OutputWriter, DEFAULT_BUFFER_SIZE};
use crate::progress::ProgressObserver;

use num_bigint::BigUint;
use std::num::NonZeroU64;
use std::path::PathBuf;

/// Everything needed for one run. Immutable once handed to a `Generator`.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub alphabet: Alphabet,
    pub range: LengthRange,
    pub output: PathBuf,
    pub prefix: String,
    /// Stop after this many words (`None` = unlimited)
    pub max_words: Option<NonZeroU64>,
    pub compress: bool,
    pub buffer_size: usize,
}

impl GenerationRequest {
    pub fn new(alphabet: Alphabet, range: LengthRange, output: impl Into<PathBuf>) -> Self {
        Self {
            alphabet,
            range,
            output: output.into(),
            prefix: String::new(),
            max_words: None,
            compress: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_max_words(mut self, max_words: Option<NonZeroU64>) -> Self {
        self.max_words = max_words;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let alphabet = Alphabet::resolve(&args.charset, args.exclude.as_deref().unwrap_or(""))?;
        let max = args
            .max
            .ok_or_else(|| anyhow::anyhow!("Maximum word length (--max) is required"))?;
        let range = LengthRange::new(args.min, max)?;

        Ok(Self::new(alphabet, range, args.output.clone())
            .with_prefix(args.prefix.clone().unwrap_or_default())
            .with_max_words(NonZeroU64::new(args.max_words))
            .with_compression(args.compress)
            .with_buffer_size(args.parse_buffer_size()?))
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Words planned after applying the cutoff
    pub total_words: BigUint,
    pub words_written: u64,
    pub bytes_written: u64,
    /// Heuristic size estimate computed before writing
    pub estimated_bytes: BigUint,
    pub truncated: bool,
    pub output_path: PathBuf,
    pub archive_path: Option<PathBuf>,
}

/// Wordlist engine for a single request
pub struct Generator {
    request: GenerationRequest,
    plan: Estimate,
}

impl Generator {
    /// Compute the plan up front so callers can inspect it before writing anything
    pub fn new(request: GenerationRequest) -> Self {
        let plan = estimate(
            request.alphabet.len(),
            request.range,
            &request.prefix,
            request.max_words,
        );

        log::debug!(
            "Planned {} words (~{} bytes, truncated: {})",
            plan.total_words,
            plan.estimated_bytes,
            plan.truncated
        );

        Self { request, plan }
    }

    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn plan(&self) -> &Estimate {
        &self.plan
    }

    /// Fresh enumeration of the words this request covers, without prefix or cutoff
    pub fn words(&self) -> Words {
        Words::new(&self.request.alphabet, self.request.range)
    }

    /// Write the wordlist, then compress it if requested.
    ///
    /// A write failure returns immediately and leaves the partial file in
    /// place; compression is not attempted in that case.
    pub fn generate(self, observer: Option<&mut dyn ProgressObserver>) -> Result<GenerationSummary> {
        let path = self.request.output.clone();
        let limit = self.request.max_words.map(NonZeroU64::get);

        log::info!("Writing wordlist to {:?}", path);

        let mut writer = OutputWriter::create(&path, self.request.buffer_size)
            .map_err(|source| GenerationError::IoWrite {
                path: path.clone(),
                written: 0,
                source,
            })?;

        let result = stream_words(
            &mut writer,
            self.words(),
            &self.request.prefix,
            limit,
            self.plan.total_words_u64(),
            observer,
        );

        let bytes_written = writer.bytes_written();
        // Closes the file before the archive reads it; counts only lines the file accepted
        let words_written = writer.finish();

        if let Err(source) = result {
            return Err(GenerationError::IoWrite {
                path,
                written: words_written,
                source,
            });
        }

        log::info!("Wrote {} words ({} bytes)", words_written, bytes_written);

        let archive_path = if self.request.compress {
            let zip = archive::compress_file(&path).map_err(|source| GenerationError::Compression {
                path: path.clone(),
                source,
            })?;
            Some(zip)
        } else {
            None
        };

        Ok(GenerationSummary {
            total_words: self.plan.total_words,
            words_written,
            bytes_written,
            estimated_bytes: self.plan.estimated_bytes,
            truncated: self.plan.truncated,
            output_path: path,
            archive_path,
        })
    }
}

/// Plan and run `request` in one call
pub fn generate(
    request: GenerationRequest,
    observer: Option<&mut dyn ProgressObserver>,
) -> Result<GenerationSummary> {
    Generator::new(request).generate(observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn request(dir: &TempDir, symbols: &str, min: u32, max: u32) -> GenerationRequest {
        GenerationRequest::new(
            Alphabet::new(symbols.chars()).unwrap(),
            LengthRange::new(min, max).unwrap(),
            dir.path().join("wordlist.txt"),
        )
    }

    fn lines(path: &std::path::Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_two_symbols_two_lengths() {
        let dir = TempDir::new().unwrap();
        let summary = generate(request(&dir, "ab", 1, 2), None).unwrap();

        assert_eq!(lines(&summary.output_path), vec!["a", "b", "aa", "ab", "ba", "bb"]);
        assert_eq!(summary.words_written, 6);
        assert_eq!(summary.total_words, BigUint::from(6u32));
        assert!(!summary.truncated);
        assert!(summary.archive_path.is_none());
    }

    #[test]
    fn test_cutoff_mid_length() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "01", 2, 2).with_max_words(NonZeroU64::new(2));
        let summary = generate(req, None).unwrap();

        assert_eq!(fs::read_to_string(&summary.output_path).unwrap(), "00\n01\n");
        assert!(summary.truncated);
        assert_eq!(summary.total_words, BigUint::from(2u32));
        assert_eq!(summary.words_written, 2);
    }

    #[test]
    fn test_cutoff_across_lengths() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "abc", 1, 3).with_max_words(NonZeroU64::new(5));
        let summary = generate(req, None).unwrap();

        assert_eq!(lines(&summary.output_path), vec!["a", "b", "c", "aa", "ab"]);
    }

    #[test]
    fn test_excluded_preset() {
        let dir = TempDir::new().unwrap();
        let req = GenerationRequest::new(
            Alphabet::resolve("Num", "5").unwrap(),
            LengthRange::new(1, 1).unwrap(),
            dir.path().join("digits.txt"),
        );
        let summary = generate(req, None).unwrap();

        assert_eq!(
            lines(&summary.output_path),
            vec!["0", "1", "2", "3", "4", "6", "7", "8", "9"]
        );
    }

    #[test]
    fn test_line_lengths_with_prefix() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, "xyz", 2, 3).with_prefix("pw_");
        let summary = generate(req, None).unwrap();

        let all = lines(&summary.output_path);
        assert_eq!(all.len(), 9 + 27);
        for line in &all {
            assert!(line.starts_with("pw_"));
            let len = line.len() - 3;
            assert!((2..=3).contains(&len), "bad length in {:?}", line);
        }
        assert_eq!(summary.bytes_written, 9 * 6 + 27 * 7);
    }

    #[test]
    fn test_single_symbol() {
        let dir = TempDir::new().unwrap();
        let summary = generate(request(&dir, "z", 1, 4), None).unwrap();

        assert_eq!(lines(&summary.output_path), vec!["z", "zz", "zzz", "zzzz"]);
    }

    #[test]
    fn test_byte_identical_reruns() {
        let dir = TempDir::new().unwrap();
        let first = generate(request(&dir, "a1!", 1, 3), None).unwrap();
        let first_bytes = fs::read(&first.output_path).unwrap();

        let second = generate(request(&dir, "a1!", 1, 3), None).unwrap();
        assert_eq!(fs::read(&second.output_path).unwrap(), first_bytes);
    }

    #[test]
    fn test_progress_observer() {
        let dir = TempDir::new().unwrap();
        let mut calls = Vec::new();
        let mut observer = |count: u64, total: u64| calls.push((count, total));

        let req = request(&dir, "ab", 1, 2).with_max_words(NonZeroU64::new(4));
        generate(req, Some(&mut observer as &mut dyn ProgressObserver)).unwrap();

        assert_eq!(calls, vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_plan_before_write() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(request(&dir, "ab", 1, 2).with_prefix("p"));

        assert_eq!(generator.plan().total_words_u64(), 6);
        assert_eq!(generator.plan().estimated_bytes_u64(), 6 * (1 + 1 + 1));
        assert!(!dir.path().join("wordlist.txt").exists());
        assert_eq!(generator.words().count(), 6);
    }

    #[test]
    fn test_compressed_output() {
        let dir = TempDir::new().unwrap();
        let summary = generate(request(&dir, "ab", 1, 3).with_compression(true), None).unwrap();

        let zip = summary.archive_path.unwrap();
        assert_eq!(zip, dir.path().join("wordlist.txt.zip"));
        assert!(zip.exists());
        assert!(summary.output_path.exists());
    }

    #[test]
    fn test_unwritable_output() {
        let dir = TempDir::new().unwrap();
        let req = GenerationRequest::new(
            Alphabet::new("ab".chars()).unwrap(),
            LengthRange::new(1, 1).unwrap(),
            dir.path().join("missing").join("wordlist.txt"),
        );

        match generate(req, None) {
            Err(GenerationError::IoWrite { written, .. }) => assert_eq!(written, 0),
            other => panic!("expected IoWrite, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_alphabet_creates_nothing() {
        let dir = TempDir::new().unwrap();

        assert!(matches!(
            Alphabet::resolve("abc", "abc"),
            Err(GenerationError::EmptyAlphabet)
        ));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_full_device_reports_no_words() {
        // /dev/full accepts the open but refuses every write
        let req = GenerationRequest::new(
            Alphabet::new("ab".chars()).unwrap(),
            LengthRange::new(1, 2).unwrap(),
            "/dev/full",
        );

        match generate(req, None) {
            Err(GenerationError::IoWrite { written, .. }) => assert_eq!(written, 0),
            other => panic!("expected IoWrite, got {:?}", other),
        }
    }

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("wordlist-generator").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_from_args() {
        let args = parse(&[
            "-c", "Num",
            "-e", "5",
            "-m", "2",
            "-M", "4",
            "-o", "pins.txt",
            "-p", "pin",
            "-n", "100",
            "-z",
            "--buffer-size", "64KB",
        ]);
        let req = GenerationRequest::from_args(&args).unwrap();

        assert_eq!(req.alphabet.to_string(), "012346789");
        assert_eq!((req.range.min(), req.range.max()), (2, 4));
        assert_eq!(req.output, PathBuf::from("pins.txt"));
        assert_eq!(req.prefix, "pin");
        assert_eq!(req.max_words, NonZeroU64::new(100));
        assert!(req.compress);
        assert_eq!(req.buffer_size, 64 * 1024);
    }

    #[test]
    fn test_from_args_zero_max_words_is_unlimited() {
        let req = GenerationRequest::from_args(&parse(&["-M", "2", "-n", "0"])).unwrap();

        assert_eq!(req.max_words, None);
        assert_eq!(req.prefix, "");
        assert!(!req.compress);
        assert_eq!(req.buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_from_args_rejects_inverted_range() {
        let err = GenerationRequest::from_args(&parse(&["-m", "5", "-M", "2"])).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerationError>(),
            Some(GenerationError::InvalidRange { min: 5, max: 2 })
        ));
    }

    #[test]
    fn test_from_args_rejects_empty_alphabet() {
        let err = GenerationRequest::from_args(&parse(&["-c", "ab", "-e", "ba", "-M", "2"])).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerationError>(),
            Some(GenerationError::EmptyAlphabet)
        ));
    }

    #[test]
    fn test_from_args_requires_max() {
        let err = GenerationRequest::from_args(&parse(&["--list-charsets"])).unwrap_err();

        assert!(err.to_string().contains("--max"));
    }
}

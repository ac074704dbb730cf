//! ZIP archive output
//!
//! Packs a finished wordlist into a single-entry, deflate-compressed
//! `<file>.zip` next to it. The source file is never modified. ZIP64 is not
//! written, so both sizes of the entry must fit in 32 bits.

use crate::error::CompressionError;
use chrono::{DateTime, Datelike, Timelike, Utc};
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const LOCAL_HEADER_SIG: u32 = 0x04034b50;
const CENTRAL_HEADER_SIG: u32 = 0x02014b50;
const END_OF_CENTRAL_DIR_SIG: u32 = 0x06054b50;

const LOCAL_HEADER_LEN: u64 = 30;
const VERSION: u16 = 20; // 2.0: deflate
const FLAG_UTF8_NAME: u16 = 1 << 11;
const METHOD_DEFLATE: u16 = 8;
const ZIP32_LIMIT: u64 = u32::MAX as u64;

const READ_CHUNK: usize = 64 * 1024;

/// Sizes and checksum of the single entry, patched in after streaming
#[derive(Debug, Default, Clone, Copy)]
struct EntryInfo {
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    dos_time: u16,
    dos_date: u16,
}

/// Path of the archive for `path`: the full file name with `.zip` appended
pub fn archive_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".zip");
    PathBuf::from(name)
}

/// Compress `source` into `<source>.zip` and return the archive path.
///
/// A half-written archive is removed on failure.
pub fn compress_file(source: &Path) -> Result<PathBuf, CompressionError> {
    let dest = archive_path(source);

    match write_archive(source, &dest) {
        Ok(()) => {
            log::info!("Archive written to {:?}", dest);
            Ok(dest)
        }
        Err(e) => {
            let _ = fs::remove_file(&dest);
            Err(e)
        }
    }
}

fn write_archive(source: &Path, dest: &Path) -> Result<(), CompressionError> {
    let metadata = fs::metadata(source)?;
    if metadata.len() > ZIP32_LIMIT {
        return Err(CompressionError::TooLarge(metadata.len()));
    }

    // The entry must carry the artifact's exact base name
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CompressionError::InvalidEntryName(source.to_path_buf()))?
        .to_string();

    let (dos_time, dos_date) = dos_datetime(metadata.modified().unwrap_or(UNIX_EPOCH));
    let mut entry = EntryInfo {
        dos_time,
        dos_date,
        ..EntryInfo::default()
    };

    let mut input = BufReader::new(File::open(source)?);
    let mut out = BufWriter::new(File::create(dest)?);

    // Placeholder header; sizes and CRC are rewritten once the data is known
    write_local_header(&mut out, &name, &entry)?;
    let data_start = LOCAL_HEADER_LEN + name.len() as u64;

    let mut hasher = crc32fast::Hasher::new();
    let mut uncompressed: u64 = 0;
    {
        let mut encoder = DeflateEncoder::new(&mut out, Compression::default());
        let mut buf = vec![0u8; READ_CHUNK];
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            hasher.update(&buf[..n]);
            encoder.write_all(&buf[..n])?;
            uncompressed += n as u64;
        }
        encoder.finish()?;
    }

    let data_end = out.stream_position()?;
    let compressed = data_end - data_start;
    if uncompressed > ZIP32_LIMIT || compressed > ZIP32_LIMIT {
        return Err(CompressionError::TooLarge(uncompressed.max(compressed)));
    }

    entry.crc32 = hasher.finalize();
    entry.compressed_size = compressed as u32;
    entry.uncompressed_size = uncompressed as u32;

    write_central_directory(&mut out, &name, &entry, data_end)?;

    out.seek(SeekFrom::Start(0))?;
    write_local_header(&mut out, &name, &entry)?;
    out.flush()?;

    Ok(())
}

fn write_local_header<W: Write>(w: &mut W, name: &str, entry: &EntryInfo) -> io::Result<()> {
    w.write_all(&LOCAL_HEADER_SIG.to_le_bytes())?;
    w.write_all(&VERSION.to_le_bytes())?;
    w.write_all(&FLAG_UTF8_NAME.to_le_bytes())?;
    w.write_all(&METHOD_DEFLATE.to_le_bytes())?;
    w.write_all(&entry.dos_time.to_le_bytes())?;
    w.write_all(&entry.dos_date.to_le_bytes())?;
    w.write_all(&entry.crc32.to_le_bytes())?;
    w.write_all(&entry.compressed_size.to_le_bytes())?;
    w.write_all(&entry.uncompressed_size.to_le_bytes())?;
    w.write_all(&(name.len() as u16).to_le_bytes())?;
    w.write_all(&0u16.to_le_bytes())?; // extra field length
    w.write_all(name.as_bytes())
}

fn write_central_directory<W: Write>(
    w: &mut W,
    name: &str,
    entry: &EntryInfo,
    offset: u64,
) -> io::Result<()> {
    let name_len = name.len() as u16;

    w.write_all(&CENTRAL_HEADER_SIG.to_le_bytes())?;
    w.write_all(&VERSION.to_le_bytes())?; // made by
    w.write_all(&VERSION.to_le_bytes())?; // needed to extract
    w.write_all(&FLAG_UTF8_NAME.to_le_bytes())?;
    w.write_all(&METHOD_DEFLATE.to_le_bytes())?;
    w.write_all(&entry.dos_time.to_le_bytes())?;
    w.write_all(&entry.dos_date.to_le_bytes())?;
    w.write_all(&entry.crc32.to_le_bytes())?;
    w.write_all(&entry.compressed_size.to_le_bytes())?;
    w.write_all(&entry.uncompressed_size.to_le_bytes())?;
    w.write_all(&name_len.to_le_bytes())?;
    w.write_all(&0u16.to_le_bytes())?; // extra field length
    w.write_all(&0u16.to_le_bytes())?; // comment length
    w.write_all(&0u16.to_le_bytes())?; // disk number
    w.write_all(&0u16.to_le_bytes())?; // internal attributes
    w.write_all(&0u32.to_le_bytes())?; // external attributes
    w.write_all(&0u32.to_le_bytes())?; // local header offset
    w.write_all(name.as_bytes())?;

    let central_size = 46 + name_len as u32;

    w.write_all(&END_OF_CENTRAL_DIR_SIG.to_le_bytes())?;
    w.write_all(&0u16.to_le_bytes())?; // this disk
    w.write_all(&0u16.to_le_bytes())?; // disk with central directory
    w.write_all(&1u16.to_le_bytes())?; // entries on this disk
    w.write_all(&1u16.to_le_bytes())?; // total entries
    w.write_all(&central_size.to_le_bytes())?;
    w.write_all(&(offset as u32).to_le_bytes())?;
    w.write_all(&0u16.to_le_bytes()) // comment length
}

/// MS-DOS `(time, date)` pair in UTC. Dates before 1980 clamp to 1980-01-01.
fn dos_datetime(time: SystemTime) -> (u16, u16) {
    let dt = DateTime::<Utc>::from(time);
    if dt.year() < 1980 {
        return (0, (1 << 5) | 1);
    }

    let year = (dt.year().min(2107) - 1980) as u32;
    let time = (dt.hour() << 11) | (dt.minute() << 5) | (dt.second() / 2);
    let date = (year << 9) | (dt.month() << 5) | dt.day();

    (time as u16, date as u16)
}

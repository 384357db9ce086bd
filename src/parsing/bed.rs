//! Streaming reader for BED interval files.
//!
//! Only the first four columns are used: `contig start stop name`. Columns
//! may be separated by tabs or runs of whitespace. Header lines (`#`,
//! `track`, `browser`) are skipped, and so are rows that cannot be parsed;
//! a malformed row is logged and never aborts the read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tracing::warn;

use crate::parsing::ParseError;

/// A single BED interval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedEntry {
    pub contig: String,
    pub start: u64,
    pub stop: u64,
    pub name: String,
}

impl BedEntry {
    /// Parse one data line
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if the line has fewer than four
    /// fields or non-integer coordinates.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut fields = line.split_whitespace();
        let (Some(contig), Some(start), Some(stop), Some(name)) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(ParseError::InvalidFormat(format!(
                "expected at least 4 fields: '{line}'"
            )));
        };

        let start: u64 = start
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("Invalid start: '{start}'")))?;
        let stop: u64 = stop
            .parse()
            .map_err(|_| ParseError::InvalidFormat(format!("Invalid stop: '{stop}'")))?;

        Ok(Self {
            contig: contig.to_string(),
            start,
            stop,
            name: name.to_string(),
        })
    }
}

fn is_header_line(line: &str) -> bool {
    line.starts_with('#')
        || matches!(line.split_whitespace().next(), Some("track" | "browser"))
}

/// Lazy iterator over the entries of a BED stream
///
/// Yields `Err` only for I/O failures; the stream ends after the first one.
pub struct BedReader<R> {
    inner: R,
    source: String,
    line_num: usize,
    buf: Vec<u8>,
    failed: bool,
}

impl<R: BufRead> BedReader<R> {
    /// Wrap a reader. `source` names the stream in log messages.
    pub fn new(inner: R, source: impl Into<String>) -> Self {
        Self {
            inner,
            source: source.into(),
            line_num: 0,
            buf: Vec::new(),
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for BedReader<R> {
    type Item = Result<BedEntry, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.buf.clear();
            match self.inner.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => {
                    self.failed = true;
                    return Some(Err(ParseError::Io(e)));
                }
            }
            self.line_num += 1;

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    warn!(
                        "Skipping non-UTF-8 BED line {} in {}: {}",
                        self.line_num, self.source, e
                    );
                    continue;
                }
            };
            if line.is_empty() || is_header_line(line) {
                continue;
            }

            match BedEntry::parse(line) {
                Ok(entry) => return Some(Ok(entry)),
                Err(e) => {
                    warn!(
                        "Skipping malformed BED line {} in {}: {}",
                        self.line_num, self.source, e
                    );
                }
            }
        }
    }
}

/// Open a BED file for streaming, decompressing `.gz` files
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened.
pub fn open_bed(path: &Path) -> Result<BedReader<Box<dyn BufRead>>, ParseError> {
    let file = File::open(path)?;

    let is_gzip = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"));

    let reader: Box<dyn BufRead> = if is_gzip {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(BedReader::new(reader, path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn read_all(text: &str) -> Vec<BedEntry> {
        BedReader::new(Cursor::new(text.to_string()), "test")
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_parse_tab_and_space_delimited() {
        let entries = read_all("chr1\t100\t200\texon1\nchr2 300   400 exon2 0 +\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0],
            BedEntry {
                contig: "chr1".to_string(),
                start: 100,
                stop: 200,
                name: "exon1".to_string(),
            }
        );
        assert_eq!(entries[1].contig, "chr2");
        assert_eq!(entries[1].name, "exon2");
    }

    #[test]
    fn test_skips_headers_and_malformed_rows() {
        let bed = r"track name=exons
browser position chr1:1-1000
# comment

chr1	100	200
chr1	abc	200	bad_start
chr1	500	600	good
";
        let entries = read_all(bed);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "good");
    }

    #[test]
    fn test_non_utf8_row_is_skipped() {
        let mut bed = b"chr1\t0\t100\tgood\n".to_vec();
        bed.extend_from_slice(b"chr1\t0\t100\tbad\xff\xfe\n");
        bed.extend_from_slice(b"chr1\t0\t100\tafter\n");

        let entries: Vec<BedEntry> = BedReader::new(Cursor::new(bed), "test")
            .collect::<Result<_, _>>()
            .unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["good", "after"]);
    }

    #[test]
    fn test_contigs_named_like_headers_are_data() {
        let entries = read_all("track name=x\ntrack_1\t10\t20\tf1\nbrowser_2 30 40 f2\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].contig, "track_1");
        assert_eq!(entries[1].contig, "browser_2");
    }

    #[test]
    fn test_entry_parse_errors() {
        assert!(BedEntry::parse("chr1\t100\t200").is_err());
        assert!(BedEntry::parse("chr1\t100\tzzz\tname").is_err());
        assert!(BedEntry::parse("chr1\t-5\t200\tname").is_err());
    }

    #[test]
    fn test_open_gzip_bed() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let mut file = NamedTempFile::with_suffix(".bed.gz").unwrap();
        {
            let mut encoder = GzEncoder::new(&mut file, Compression::default());
            encoder.write_all(b"chr1\t10\t20\tfeatureA\n").unwrap();
            encoder.finish().unwrap();
        }

        let entries: Vec<BedEntry> = open_bed(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "featureA");
    }

    #[test]
    fn test_open_missing_file() {
        let result = open_bed(Path::new("/nonexistent/features.bed"));
        assert!(matches!(result, Err(ParseError::Io(_))));
    }
}

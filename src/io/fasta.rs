use anyhow::{anyhow, Result};
use std::io::{BufRead, Write};
use std::path::Path;

use crate::seqs::SeqMap;

pub const DEFAULT_WIDTH: usize = 60;

#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub name: String,
    pub desc: Option<String>,
    pub seq: Vec<u8>,
}

pub struct FastaReader<R: BufRead> {
    reader: R,
    line: String,
    done: bool,
    pending_header: Option<String>,
}

fn split_header(header: &str) -> (String, Option<String>) {
    let mut parts = header.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or("").to_string();
    let desc = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    (name, desc)
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            done: false,
            pending_header: None,
        }
    }

    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self.reader.read_line(&mut self.line)?;
        if n == 0 {
            self.done = true;
        }
        Ok(n > 0)
    }

    pub fn next_record(&mut self) -> Result<Option<FastaRecord>> {
        if self.done && self.pending_header.is_none() {
            return Ok(None);
        }

        // skip anything before the first '>'
        let header = match self.pending_header.take() {
            Some(h) => h,
            None => loop {
                if !self.read_line()? {
                    return Ok(None);
                }
                if let Some(h) = self.line.strip_prefix('>') {
                    break h.trim().to_string();
                }
            },
        };
        let (name, desc) = split_header(&header);

        let mut seq = Vec::new();
        while self.read_line()? {
            if let Some(h) = self.line.strip_prefix('>') {
                self.pending_header = Some(h.trim().to_string());
                break;
            }
            seq.extend(
                self.line
                    .bytes()
                    .filter(|b| !b.is_ascii_whitespace())
                    .map(|b| b.to_ascii_uppercase()),
            );
        }

        Ok(Some(FastaRecord { name, desc, seq }))
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<FastaRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// 读取全部记录到 SeqMap；重复的名字记录警告并保留较长的序列
pub fn read_seq_map<R: BufRead>(reader: R) -> Result<SeqMap> {
    let mut map = SeqMap::new();
    for rec in FastaReader::new(reader) {
        let rec = rec?;
        map.add(rec.name, rec.seq, true);
    }
    Ok(map)
}

pub fn read_seq_map_from_path(path: impl AsRef<Path>) -> Result<SeqMap> {
    let path = path.as_ref();
    let fh = std::fs::File::open(path)
        .map_err(|e| anyhow!("cannot open FASTA '{}': {}", path.display(), e))?;
    read_seq_map(std::io::BufReader::new(fh))
}

pub struct FastaWriter<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(out: W) -> Self {
        Self::with_width(out, DEFAULT_WIDTH)
    }

    /// `width == 0` writes each sequence on a single line.
    pub fn with_width(out: W, width: usize) -> Self {
        Self { out, width }
    }

    pub fn write_record(&mut self, name: &str, seq: &[u8]) -> Result<()> {
        writeln!(self.out, ">{}", name)?;
        if self.width == 0 || seq.is_empty() {
            self.out.write_all(seq)?;
            writeln!(self.out)?;
            return Ok(());
        }
        for chunk in seq.chunks(self.width) {
            self.out.write_all(chunk)?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    pub fn write_map(&mut self, map: &SeqMap) -> Result<()> {
        for (name, seq) in map {
            self.write_record(name, seq)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

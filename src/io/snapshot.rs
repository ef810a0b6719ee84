use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::evolve::KimuraParams;
use crate::seqs::SeqMap;

pub const EXTENSION: &str = "sqd";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
    pub source_file: Option<String>,
    pub build_args: Option<String>,
    /// RFC 3339
    pub created: Option<String>,
    /// set when the sequences were produced by an evolution run
    pub params: Option<KimuraParams>,
    pub seed: Option<u64>,
}

impl SnapshotMeta {
    /// Metadata stamped with the current time and command line.
    pub fn now(source_file: Option<String>) -> Self {
        Self {
            source_file,
            build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
            created: Some(chrono::Utc::now().to_rfc3339()),
            params: None,
            seed: None,
        }
    }
}

/// bincode 序列化的 SeqMap 快照，保留序列顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub meta: SnapshotMeta,
    pub seqs: SeqMap,
}

impl Snapshot {
    pub fn new(seqs: SeqMap, meta: SnapshotMeta) -> Self {
        Self { meta, seqs }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let f = std::fs::File::create(path)
            .map_err(|e| anyhow!("cannot create snapshot '{}': {}", path.display(), e))?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        w.flush()?;
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path)
            .map_err(|e| anyhow!("cannot open snapshot '{}': {}", path.display(), e))?;
        let snap: Self = bincode::deserialize_from(std::io::BufReader::new(f))
            .map_err(|e| anyhow!("'{}' is not a valid snapshot: {}", path.display(), e))?;
        Ok(snap)
    }
}

/// True when `path` carries the snapshot extension.
pub fn is_snapshot_path(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == EXTENSION)
}

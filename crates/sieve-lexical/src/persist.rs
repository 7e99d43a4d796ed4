//! On-disk lexical artifacts.
//!
//! Two JSON files live in the cache directory: the BM25 index and the
//! document alignment. The alignment file carries the blake3 digest of the
//! index file bytes, so a stale or foreign index is detected on load.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sieve_core::errors::LexicalError;
use tracing::{debug, warn};

use crate::bm25::Bm25Index;
use crate::index::IndexedDocument;

pub const INDEX_FILE: &str = "bm25_index.json";
pub const DOCUMENTS_FILE: &str = "bm25_documents.json";
const FORMAT_VERSION: u32 = 1;
const FALLBACK_DIR: &str = "sieve-cache";
const WRITE_CHECK: &str = ".sieve-write-check";

#[derive(Serialize, Deserialize)]
struct DocumentsArtifact {
    version: u32,
    index_digest: String,
    documents: Vec<IndexedDocument>,
}

/// The configured directory if it can be created and written, otherwise
/// `<tmp>/sieve-cache`.
pub fn resolve_cache_dir(configured: &Path) -> PathBuf {
    if is_writable(configured) {
        return configured.to_path_buf();
    }
    let fallback = std::env::temp_dir().join(FALLBACK_DIR);
    warn!(
        configured = %configured.display(),
        fallback = %fallback.display(),
        "cache directory not writable, using fallback"
    );
    if let Err(e) = fs::create_dir_all(&fallback) {
        warn!(path = %fallback.display(), error = %e, "fallback cache directory unavailable");
    }
    fallback
}

fn is_writable(dir: &Path) -> bool {
    if fs::create_dir_all(dir).is_err() {
        return false;
    }
    let marker = dir.join(WRITE_CHECK);
    let ok = fs::write(&marker, b"ok").is_ok();
    let _ = fs::remove_file(&marker);
    ok
}

fn io_err(path: &Path, e: impl std::fmt::Display) -> LexicalError {
    LexicalError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
}

fn corrupted(path: &Path, reason: impl Into<String>) -> LexicalError {
    LexicalError::CacheCorrupted {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}

/// Write via a sibling temp file and rename, so readers never see a torn file.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), LexicalError> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, bytes).map_err(|e| io_err(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| io_err(path, e))
}

pub fn save(
    dir: &Path,
    bm25: &Bm25Index,
    documents: &[IndexedDocument],
) -> Result<(), LexicalError> {
    fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;

    let index_path = dir.join(INDEX_FILE);
    let index_bytes = serde_json::to_vec(bm25).map_err(|e| io_err(&index_path, e))?;
    let digest = blake3::hash(&index_bytes).to_hex().to_string();

    let docs_path = dir.join(DOCUMENTS_FILE);
    let docs_bytes = serde_json::to_vec(&DocumentsArtifact {
        version: FORMAT_VERSION,
        index_digest: digest,
        documents: documents.to_vec(),
    })
    .map_err(|e| io_err(&docs_path, e))?;

    write_atomic(&index_path, &index_bytes)?;
    write_atomic(&docs_path, &docs_bytes)?;
    debug!(dir = %dir.display(), documents = documents.len(), "lexical artifacts written");
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>, LexicalError> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(LexicalError::CacheMissing {
            path: path.display().to_string(),
        }),
        Err(e) => Err(io_err(path, e)),
    }
}

pub fn load(dir: &Path) -> Result<(Bm25Index, Vec<IndexedDocument>), LexicalError> {
    let index_path = dir.join(INDEX_FILE);
    let docs_path = dir.join(DOCUMENTS_FILE);

    let index_bytes = read(&index_path)?;
    let docs_bytes = read(&docs_path)?;

    let artifact: DocumentsArtifact =
        serde_json::from_slice(&docs_bytes).map_err(|e| corrupted(&docs_path, e.to_string()))?;
    if artifact.version != FORMAT_VERSION {
        return Err(corrupted(
            &docs_path,
            format!("format version {} (expected {FORMAT_VERSION})", artifact.version),
        ));
    }

    let digest = blake3::hash(&index_bytes).to_hex().to_string();
    if digest != artifact.index_digest {
        return Err(corrupted(&index_path, "digest does not match document alignment"));
    }

    let bm25: Bm25Index =
        serde_json::from_slice(&index_bytes).map_err(|e| corrupted(&index_path, e.to_string()))?;
    if bm25.len() != artifact.documents.len() {
        return Err(corrupted(
            &docs_path,
            format!(
                "{} documents for an index of {}",
                artifact.documents.len(),
                bm25.len()
            ),
        ));
    }

    Ok((bm25, artifact.documents))
}

use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ledger::{Document, STORAGE_KEY};

use super::{Result, StorageBackend};

const BLOB_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Filesystem JSON persistence for the document blob and its backups.
///
/// The blob lives under the fixed well-known file name; backups are
/// timestamped siblings under `backups/`, pruned to a bounded count.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    base_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(base_dir: PathBuf) -> Result<Self> {
        Self::with_retention(base_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(base_dir: PathBuf, retention: usize) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self {
            base_dir,
            retention: retention.max(1),
        })
    }

    /// Resolves the platform data directory, the file-system stand-in for
    /// where a browser keeps its local storage.
    pub fn new_default() -> Result<Self> {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kasa");
        Self::new(base)
    }

    pub fn blob_path(&self) -> PathBuf {
        self.base_dir
            .join(format!("{}.{}", STORAGE_KEY, BLOB_EXTENSION))
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir().join(backup_name)
    }

    fn backups_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    fn prune_backups(&self) -> Result<()> {
        let entries = self.list_backups()?;
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(&entry));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> Result<Document> {
        let data = fs::read_to_string(self.blob_path())?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, doc: &Document) -> Result<()> {
        let path = self.blob_path();
        let json = serde_json::to_string_pretty(doc)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn backup(&self, doc: &Document, note: Option<&str>) -> Result<PathBuf> {
        let dir = self.backups_dir();
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", STORAGE_KEY, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let path = dir.join(format!("{}.{}", stem, BLOB_EXTENSION));
        write_atomic(&path, &serde_json::to_string_pretty(doc)?)?;
        self.prune_backups()?;
        Ok(path)
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        let dir = self.backups_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BLOB_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        entries.sort_by_key(|name| Reverse(parse_backup_timestamp(name)));
        Ok(entries)
    }

    fn restore(&self, backup_name: &str) -> Result<Document> {
        let data = fs::read_to_string(self.backup_path(backup_name))?;
        Ok(serde_json::from_str(&data)?)
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Extracts the `%Y%m%d_%H%M` stamp from a backup file name; note labels may
/// trail the stamp.
fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BLOB_EXTENSION))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    for pair in segments.windows(2) {
        if is_digits(pair[0], 8) && is_digits(pair[1], 4) {
            let raw = format!("{}{}", pair[0], pair[1]);
            return NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
                .ok()
                .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }
    None
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

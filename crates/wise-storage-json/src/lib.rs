use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use wise_core::{CoreError, LedgerStore};
use wise_domain::Ledger;

const LEDGER_FILE_STEM: &str = "ledger";
const JSON_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Directory layout used by [`JsonLedgerStore`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub ledger_file: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    /// `<root>/ledger.json` with backups under `<root>/backups/`.
    pub fn under(root: &Path) -> Self {
        Self {
            ledger_file: root.join(format!("{LEDGER_FILE_STEM}.{JSON_EXTENSION}")),
            backup_root: root.join("backups"),
        }
    }
}

/// Describes a persisted snapshot of the ledger document.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerBackupInfo {
    pub id: String,
    pub created_at: Option<NaiveDateTime>,
    pub path: PathBuf,
}

/// Stores the whole ledger as one pretty-printed JSON document.
///
/// Every save writes a temporary sibling and renames it over the target, so
/// transactions and recurring pointers always land together. The previous
/// document is copied to the backup directory first.
#[derive(Debug, Clone)]
pub struct JsonLedgerStore {
    paths: StoragePaths,
    retention: usize,
}

impl JsonLedgerStore {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        if let Some(parent) = paths.ledger_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            paths,
            retention: retention.max(1),
        })
    }

    pub fn ledger_path(&self) -> &Path {
        &self.paths.ledger_file
    }

    pub fn backup_dir(&self) -> &Path {
        &self.paths.backup_root
    }

    /// Writes an explicit snapshot of `ledger`, optionally tagged with a note.
    pub fn backup(&self, ledger: &Ledger, note: Option<&str>) -> Result<LedgerBackupInfo, CoreError> {
        let path = self.next_backup_path(note);
        write_atomic(&path, &serialize_ledger(ledger)?)?;
        self.prune_backups()?;
        Ok(backup_info(path))
    }

    /// Backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<LedgerBackupInfo>, CoreError> {
        let dir = self.backup_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(JSON_EXTENSION) {
                continue;
            }
            entries.push(backup_info(path));
        }
        entries.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(entries)
    }

    /// Copies a backup over the live document and returns its contents.
    pub fn restore_backup(&self, backup: &LedgerBackupInfo) -> Result<Ledger, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!("backup `{}` not found", backup.id)));
        }
        let ledger = load_ledger_from_path(&backup.path)?;
        self.save_ledger(&ledger)?;
        Ok(ledger)
    }

    fn next_backup_path(&self, note: Option<&str>) -> PathBuf {
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{LEDGER_FILE_STEM}_{timestamp}");
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let mut path = self.backup_dir().join(format!("{stem}.{JSON_EXTENSION}"));
        let mut counter = 1;
        while path.exists() {
            counter += 1;
            path = self
                .backup_dir()
                .join(format!("{stem}-{counter}.{JSON_EXTENSION}"));
        }
        path
    }

    fn backup_existing_file(&self) -> Result<(), CoreError> {
        let source = self.ledger_path();
        if !source.exists() {
            return Ok(());
        }
        let target = self.next_backup_path(None);
        fs::create_dir_all(self.backup_dir())?;
        fs::copy(source, &target)?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for entry in self.list_backups()?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                tracing::warn!(backup = %entry.id, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn load_ledger(&self) -> Result<Ledger, CoreError> {
        match fs::read_to_string(self.ledger_path()) {
            Ok(data) => parse_ledger(&data),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.ledger_path().display(), "no ledger yet, starting empty");
                Ok(Ledger::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<(), CoreError> {
        self.backup_existing_file()?;
        save_ledger_to_path(ledger, self.ledger_path())
    }
}

/// Saves a ledger to an arbitrary path via a temporary file and rename.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<(), CoreError> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_ledger(ledger)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<Ledger, CoreError> {
    parse_ledger(&fs::read_to_string(path)?)
}

fn parse_ledger(data: &str) -> Result<Ledger, CoreError> {
    serde_json::from_str(data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn serialize_ledger(ledger: &Ledger) -> Result<String, CoreError> {
    serde_json::to_string_pretty(ledger).map_err(|err| CoreError::Serde(err.to_string()))
}

fn backup_info(path: PathBuf) -> LedgerBackupInfo {
    let id = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string();
    LedgerBackupInfo {
        created_at: parse_backup_timestamp(&id),
        id,
        path,
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_backup_timestamp(id: &str) -> Option<NaiveDateTime> {
    let rest = id.strip_prefix(&format!("{LEDGER_FILE_STEM}_"))?;
    let raw = rest.get(..15)?;
    NaiveDateTime::parse_from_str(raw, "%Y%m%d_%H%M%S").ok()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}

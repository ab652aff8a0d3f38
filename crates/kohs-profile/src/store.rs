use std::{
    fmt, fs,
    fs::File,
    io::{self, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use tracing::{error, warn};

use crate::UserProfile;

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ProfileStoreError {
    #[display("profile storage I/O failed: {_0}")]
    Io(io::Error),
    #[display("profile data is not valid JSON: {_0}")]
    Json(serde_json::Error),
}

/// Backing storage for a [`UserProfile`].
///
/// A file store keeps the profile as pretty-printed JSON; a memory store
/// keeps the same JSON text in the process, for tests and throwaway runs.
#[derive(Debug, Clone)]
pub enum ProfileStore {
    File(PathBuf),
    Memory(Option<String>),
}

impl fmt::Display for ProfileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Memory(_) => f.write_str("<memory>"),
        }
    }
}

impl ProfileStore {
    pub fn file<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::File(path.into())
    }

    #[must_use]
    pub const fn memory() -> Self {
        Self::Memory(None)
    }

    /// Loads the stored profile.
    ///
    /// Missing data yields a fresh default profile. Unreadable or corrupted
    /// data is logged and also yields a default profile, so a broken file
    /// never prevents the game from starting.
    ///
    /// A broken file is moved aside to `<path>.corrupt` before anything else
    /// is written. If it cannot be moved, the store detaches from the file
    /// and keeps later saves in memory, leaving the file untouched.
    #[must_use]
    pub fn load(&mut self) -> UserProfile {
        match self.read() {
            Ok(Some(profile)) => profile,
            Ok(None) => UserProfile::default(),
            Err(e) => {
                warn!(store = %self, "failed to load profile, starting with an empty one: {e}");
                self.set_aside();
                UserProfile::default()
            }
        }
    }

    fn set_aside(&mut self) {
        let Self::File(path) = self else {
            return;
        };
        let backup = backup_path(path);
        match fs::rename(&*path, &backup) {
            Ok(()) => {
                warn!(backup = %backup.display(), "moved unreadable profile aside");
            }
            Err(e) => {
                error!(
                    store = %path.display(),
                    "failed to move unreadable profile aside, changes stay in memory: {e}"
                );
                *self = Self::memory();
            }
        }
    }

    fn read(&self) -> Result<Option<UserProfile>, ProfileStoreError> {
        let text = match self {
            Self::File(path) => match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
                Err(e) => return Err(e.into()),
            },
            Self::Memory(None) => return Ok(None),
            Self::Memory(Some(text)) => text.clone(),
        };
        Ok(Some(serde_json::from_str(&text)?))
    }

    /// Writes `profile`, replacing whatever was stored.
    pub fn save(&mut self, profile: &UserProfile) -> Result<(), ProfileStoreError> {
        match self {
            Self::File(path) => write_json_file(path, profile),
            Self::Memory(slot) => {
                *slot = Some(serde_json::to_string(profile)?);
                Ok(())
            }
        }
    }

    /// Deletes the stored profile. Clearing an empty store succeeds.
    pub fn clear(&mut self) -> Result<(), ProfileStoreError> {
        match self {
            Self::File(path) => match fs::remove_file(path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            },
            Self::Memory(slot) => {
                *slot = None;
                Ok(())
            }
        }
    }
}

/// First free name of the form `<path>.corrupt`, `<path>.corrupt.1`, ...
fn backup_path(path: &Path) -> PathBuf {
    let mut base = path.as_os_str().to_owned();
    base.push(".corrupt");
    let mut candidate = PathBuf::from(&base);
    let mut n = 1;
    while candidate.exists() {
        let mut name = base.clone();
        name.push(format!(".{n}"));
        candidate = PathBuf::from(name);
        n += 1;
    }
    candidate
}

fn write_json_file(path: &Path, profile: &UserProfile) -> Result<(), ProfileStoreError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, profile)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{
        path::PathBuf,
        process,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    /// Returns a path under the system temp dir that no other test uses.
    pub(crate) fn temp_path(name: &str) -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("kohs-profile-test-{}-{n}", process::id()))
            .join(name)
    }

    fn sample_profile() -> UserProfile {
        UserProfile {
            user_id: "temp_1700000000000_abc1234".to_owned(),
            sessions: Vec::new(),
            created_at: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = ProfileStore::memory();
        assert!(!store.load().has_user_id());

        store.save(&sample_profile()).unwrap();
        assert_eq!(store.load(), sample_profile());

        store.clear().unwrap();
        assert!(!store.load().has_user_id());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = temp_path("profile.json");
        let mut store = ProfileStore::file(&path);
        assert!(!store.load().has_user_id());

        store.save(&sample_profile()).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"userId\": \"temp_1700000000000_abc1234\""));
        assert_eq!(store.load(), sample_profile());

        store.clear().unwrap();
        assert!(!path.exists());
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupted_file_degrades_to_default() {
        let path = temp_path("corrupted.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let mut store = ProfileStore::file(&path);
        assert!(matches!(store.read(), Err(ProfileStoreError::Json(_))));
        let profile = store.load();
        assert!(!profile.has_user_id());
        assert!(profile.sessions.is_empty());

        // The broken file was moved aside, untouched.
        let backup = path.with_file_name("corrupted.json.corrupt");
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");

        // Saving writes a fresh file and leaves the backup alone.
        store.save(&sample_profile()).unwrap();
        assert_eq!(store.load(), sample_profile());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ not json");
    }

    #[test]
    fn test_existing_backup_is_not_overwritten() {
        let path = temp_path("profile.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let first = path.with_file_name("profile.json.corrupt");
        fs::write(&first, "older").unwrap();
        fs::write(&path, "newer").unwrap();

        let mut store = ProfileStore::file(&path);
        assert!(store.load().sessions.is_empty());
        assert_eq!(fs::read_to_string(&first).unwrap(), "older");
        assert_eq!(
            fs::read_to_string(path.with_file_name("profile.json.corrupt.1")).unwrap(),
            "newer"
        );
    }

    #[test]
    fn test_corrupted_memory_degrades_to_default() {
        let mut store = ProfileStore::Memory(Some("[1, 2, 3]".to_owned()));
        assert!(store.load().sessions.is_empty());
    }
}

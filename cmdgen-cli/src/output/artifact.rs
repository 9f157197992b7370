//! Store for generated command files, addressed by identifier

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use uuid::Uuid;

use crate::generate::GenerationResult;

/// Identifier of a stored artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(Uuid);

impl ArtifactId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier handed back by a caller.
    ///
    /// Only UUIDs are accepted, so an identifier can never name a path
    /// outside the store.
    pub fn parse(s: &str) -> Result<Self> {
        let id = Uuid::parse_str(s.trim())
            .with_context(|| format!("Invalid artifact identifier: {}", s))?;
        Ok(Self(id))
    }

    fn file_name(&self) -> String {
        format!("{}.txt", self.0)
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ArtifactId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Directory of generated command files.
///
/// Artifacts persist until [`remove`](ArtifactStore::remove) is called.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .with_context(|| format!("Failed to create artifact directory: {}", root.display()))?;
        Ok(Self { root })
    }

    /// Directory the store writes to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist the commands of `result` and return the new artifact's identifier
    pub fn save(&self, result: &GenerationResult) -> Result<ArtifactId> {
        let id = ArtifactId::new();
        super::write_commands(self.path(&id), result)?;
        log::debug!("Stored artifact {}", id);
        Ok(id)
    }

    /// Location of an artifact's file (whether or not it exists)
    pub fn path(&self, id: &ArtifactId) -> PathBuf {
        self.root.join(id.file_name())
    }

    /// Read an artifact's contents
    pub fn read(&self, id: &ArtifactId) -> Result<String> {
        let path = self.path(id);
        if !path.exists() {
            bail!("Artifact not found: {}", id);
        }
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read artifact: {}", path.display()))
    }

    /// Delete an artifact. Returns whether it existed.
    pub fn remove(&self, id: &ArtifactId) -> Result<bool> {
        let path = self.path(id);
        match std::fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed artifact {}", id);
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove artifact: {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::CommandRecord;

    fn sample() -> GenerationResult {
        GenerationResult {
            commands: vec![
                CommandRecord {
                    row: 2,
                    command: "Mod Bscex:MSISDN=1001,SMSRouterID=5;".into(),
                },
                CommandRecord {
                    row: 4,
                    command: "Mod Bscex:MSISDN=1002,SMSRouterID=7;".into(),
                },
            ],
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_save_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path().join("artifacts")).unwrap();

        let id = store.save(&sample()).unwrap();
        assert!(store.path(&id).exists());
        assert_eq!(
            store.read(&id).unwrap(),
            "Mod Bscex:MSISDN=1001,SMSRouterID=5;\nMod Bscex:MSISDN=1002,SMSRouterID=7;"
        );

        assert!(store.remove(&id).unwrap());
        assert!(!store.path(&id).exists());
        assert!(!store.remove(&id).unwrap());
        assert!(store.read(&id).is_err());
    }

    #[test]
    fn test_each_save_gets_its_own_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();

        let a = store.save(&sample()).unwrap();
        let b = store.save(&sample()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_id() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();
        let id = store.save(&sample()).unwrap();

        let parsed: ArtifactId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);

        assert!(ArtifactId::parse("../../etc/passwd").is_err());
        assert!(ArtifactId::parse("generated_commands.txt").is_err());
    }
}

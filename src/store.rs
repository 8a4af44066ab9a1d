// src/store.rs
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use crate::types::Snapshot;

/// Key-value persistence for per-source state. One digest record and one
/// content record per source name; reads of an unknown name return `None`,
/// which is distinct from an empty digest and always counts as "no baseline".
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn get_digest(&self, source: &str) -> Result<Option<String>>;
    /// Overwrites the full raw body kept for audit/inspection.
    async fn put_content(&self, source: &str, body: &str) -> Result<()>;
    async fn put_digest(&self, source: &str, digest: &str) -> Result<()>;

    /// Content before digest, so a crash between the two writes never leaves
    /// a digest pointing at missing content.
    async fn persist(&self, snap: &Snapshot) -> Result<()> {
        self.put_content(&snap.source, &snap.body).await?;
        self.put_digest(&snap.source, &snap.digest).await?;
        Ok(())
    }
}

/// Directory-of-files store: `<key>.html` for the body, `<key>.hash` for the
/// digest. The directory is created lazily on first write; writes go through
/// a temp file and rename so each record is updated atomically.
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn content_path(&self, source: &str) -> PathBuf {
        self.dir.join(format!("{}.html", safe_key(source)))
    }

    fn digest_path(&self, source: &str) -> PathBuf {
        self.dir.join(format!("{}.hash", safe_key(source)))
    }

    async fn write_atomic(&self, path: &Path, data: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, data)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .await
            .with_context(|| format!("renaming into {}", path.display()))?;
        Ok(())
    }
}

/// Filesystem-safe transform of a source name; keeps names readable while
/// neutralizing path separators and other path-hostile characters.
pub fn safe_key(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c => c,
        })
        .collect()
}

#[async_trait::async_trait]
impl SnapshotStore for FsStore {
    async fn get_digest(&self, source: &str) -> Result<Option<String>> {
        let path = self.digest_path(source);
        match fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    async fn put_content(&self, source: &str, body: &str) -> Result<()> {
        self.write_atomic(&self.content_path(source), body).await
    }

    async fn put_digest(&self, source: &str, digest: &str) -> Result<()> {
        self.write_atomic(&self.digest_path(source), digest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_key_replaces_path_hostile_chars() {
        assert_eq!(safe_key("Works & Services Department"), "Works & Services Department");
        assert_eq!(safe_key("Dept A/B"), "Dept A-B");
        assert_eq!(safe_key("a\\b:c"), "a-b-c");
    }

    #[tokio::test]
    async fn absent_digest_reads_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = FsStore::new(tmp.path().join("state"));
        assert_eq!(store.get_digest("Dept A").await.unwrap(), None);
        // dir is not created by a read
        assert!(!tmp.path().join("state").exists());
    }

    #[tokio::test]
    async fn writes_create_dir_lazily_and_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("state");
        let store = FsStore::new(&dir);

        store.put_digest("Dept A", "abc").await.unwrap();
        assert!(dir.exists());
        assert_eq!(store.get_digest("Dept A").await.unwrap().as_deref(), Some("abc"));

        store.put_digest("Dept A", "def").await.unwrap();
        assert_eq!(store.get_digest("Dept A").await.unwrap().as_deref(), Some("def"));

        store.put_content("Dept A", "<html>v1</html>").await.unwrap();
        let body = std::fs::read_to_string(dir.join("Dept A.html")).unwrap();
        assert_eq!(body, "<html>v1</html>");
        // no temp residue after a successful write
        assert!(!dir.join("Dept A.tmp").exists());
    }
}

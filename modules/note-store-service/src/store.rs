//! Filesystem-backed note storage: one `{name}.txt` file per note, flat,
//! directly inside the cache directory.

use note_store_types::Note;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const NOTE_EXTENSION: &str = "txt";

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid note name")]
    InvalidName,
    #[error("note content must not be empty")]
    EmptyContent,
    #[error("a note with this name already exists")]
    AlreadyExists,
    #[error("note not found")]
    NotFound,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type NoteResult<T> = Result<T, NoteError>;

/// Rejects names that could escape the storage root or that the
/// filesystem cannot hold as a single path component.
pub fn validate_name(name: &str) -> NoteResult<()> {
    if name.is_empty()
        || name == "."
        || name.contains("..")
        || name.contains(['/', '\\', '\0'])
    {
        return Err(NoteError::InvalidName);
    }
    Ok(())
}

pub struct NoteStore {
    root: PathBuf,
}

impl NoteStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates the storage directory if it does not exist yet.
    pub async fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).await?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn note_path(&self, name: &str) -> NoteResult<PathBuf> {
        validate_name(name)?;
        Ok(self.root.join(format!("{}.{}", name, NOTE_EXTENSION)))
    }

    pub async fn get(&self, name: &str) -> NoteResult<String> {
        let path = self.note_path(name)?;
        fs::read_to_string(&path).await.map_err(not_found_or_io)
    }

    /// Reads every note in the directory. A single unreadable note fails the
    /// whole listing.
    pub async fn list(&self) -> NoteResult<Vec<Note>> {
        let mut notes = Vec::new();
        let mut read_dir = fs::read_dir(&self.root).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION) {
                continue;
            }
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };
            let text = fs::read_to_string(&path).await?;
            notes.push(Note { name, text });
        }

        notes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(notes)
    }

    /// Exclusive create: of two racing creates for one name, exactly one wins.
    pub async fn create(&self, name: &str, text: &str) -> NoteResult<()> {
        if text.is_empty() {
            return Err(NoteError::EmptyContent);
        }
        let path = self.note_path(name)?;

        let file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => NoteError::AlreadyExists,
                _ => NoteError::Io(e),
            })?;
        fill_new_note(file, &path, text).await
    }

    /// Full overwrite of an existing note. Never creates one.
    pub async fn update(&self, name: &str, text: &str) -> NoteResult<()> {
        let path = self.note_path(name)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(not_found_or_io)?;
        file.write_all(text.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }

    pub async fn delete(&self, name: &str) -> NoteResult<()> {
        let path = self.note_path(name)?;
        fs::remove_file(&path).await.map_err(not_found_or_io)
    }
}

/// Writes the body of a freshly created note file. On failure the file is
/// removed so no empty or partial note stays behind to block a retry.
async fn fill_new_note<W>(mut file: W, path: &Path, text: &str) -> NoteResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = async {
        file.write_all(text.as_bytes()).await?;
        file.flush().await
    }
    .await;

    if let Err(e) = written {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path).await {
            log::error!("Failed to remove partial note {}: {}", path.display(), cleanup);
        }
        return Err(NoteError::Io(e));
    }
    Ok(())
}

fn not_found_or_io(e: std::io::Error) -> NoteError {
    match e.kind() {
        ErrorKind::NotFound => NoteError::NotFound,
        _ => NoteError::Io(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tempfile::TempDir;

    /// Writer that fails every write, like a full disk.
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("no space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    fn temp_store() -> (NoteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        (NoteStore::new(dir.path()), dir)
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("todo").is_ok());
        assert!(validate_name("my note-1").is_ok());
        assert!(validate_name(".hidden").is_ok());

        for bad in ["", ".", "..", "../etc/passwd", "a/b", "a\\b", "a..b", "nul\0"] {
            assert!(
                matches!(validate_name(bad), Err(NoteError::InvalidName)),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (store, dir) = temp_store();
        store.create("todo", "buy milk").await.unwrap();

        assert_eq!(store.get("todo").await.unwrap(), "buy milk");
        let on_disk = std::fs::read_to_string(dir.path().join("todo.txt")).unwrap();
        assert_eq!(on_disk, "buy milk");
    }

    #[tokio::test]
    async fn test_create_existing_keeps_content() {
        let (store, _dir) = temp_store();
        store.create("todo", "first").await.unwrap();

        let err = store.create("todo", "second").await.unwrap_err();
        assert!(matches!(err, NoteError::AlreadyExists));
        assert_eq!(store.get("todo").await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_create_empty_content_creates_nothing() {
        let (store, dir) = temp_store();
        let err = store.create("a", "").await.unwrap_err();
        assert!(matches!(err, NoteError::EmptyContent));
        assert!(!dir.path().join("a.txt").exists());
    }

    #[tokio::test]
    async fn test_failed_create_write_leaves_no_note() {
        let (store, dir) = temp_store();
        let path = dir.path().join("todo.txt");
        std::fs::write(&path, "").unwrap();

        let err = fill_new_note(FullDisk, &path, "buy milk").await.unwrap_err();
        assert!(matches!(err, NoteError::Io(_)));
        assert!(!path.exists());

        assert!(store.list().await.unwrap().is_empty());
        store.create("todo", "buy milk").await.unwrap();
        assert_eq!(store.get("todo").await.unwrap(), "buy milk");
    }

    #[tokio::test]
    async fn test_update_missing_creates_nothing() {
        let (store, dir) = temp_store();
        let err = store.update("ghost", "boo").await.unwrap_err();
        assert!(matches!(err, NoteError::NotFound));
        assert!(!dir.path().join("ghost.txt").exists());
    }

    #[tokio::test]
    async fn test_update_overwrites_fully() {
        let (store, _dir) = temp_store();
        store.create("todo", "a fairly long original body").await.unwrap();
        store.update("todo", "short").await.unwrap();
        assert_eq!(store.get("todo").await.unwrap(), "short");

        // Empty content is only rejected on create.
        store.update("todo", "").await.unwrap();
        assert_eq!(store.get("todo").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, _dir) = temp_store();
        assert!(matches!(store.delete("todo").await, Err(NoteError::NotFound)));

        store.create("todo", "x").await.unwrap();
        store.delete("todo").await.unwrap();
        assert!(matches!(store.get("todo").await, Err(NoteError::NotFound)));
    }

    #[tokio::test]
    async fn test_list() {
        let (store, dir) = temp_store();
        assert!(store.list().await.unwrap().is_empty());

        store.create("b", "two").await.unwrap();
        store.create("a", "one").await.unwrap();
        std::fs::write(dir.path().join("README.md"), "not a note").unwrap();
        std::fs::create_dir(dir.path().join("sub.txt")).unwrap();

        let notes = store.list().await.unwrap();
        assert_eq!(
            notes,
            vec![
                Note {
                    name: "a".into(),
                    text: "one".into(),
                },
                Note {
                    name: "b".into(),
                    text: "two".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_list_fails_on_unreadable_note() {
        let (store, dir) = temp_store();
        store.create("good", "fine").await.unwrap();
        std::fs::write(dir.path().join("bad.txt"), [0xff, 0xfe, 0xfd]).unwrap();

        assert!(matches!(store.list().await, Err(NoteError::Io(_))));
    }

    #[tokio::test]
    async fn test_traversal_never_touches_fs() {
        let (store, dir) = temp_store();
        let outside = dir.path().join("outside");
        std::fs::create_dir(&outside).unwrap();
        let nested = NoteStore::new(outside.join("root"));

        let err = nested.create("../escape", "x").await.unwrap_err();
        assert!(matches!(err, NoteError::InvalidName));
        assert!(!outside.join("escape.txt").exists());
        assert!(matches!(store.get("../x").await, Err(NoteError::InvalidName)));
    }

    #[tokio::test]
    async fn test_open_creates_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("notes").join("cache");
        let store = NoteStore::open(&root).await.unwrap();
        assert!(store.root().is_dir());
    }

    #[tokio::test]
    async fn test_concurrent_creates_single_winner() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(NoteStore::new(dir.path()));

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create("race", &format!("writer {}", i)).await
            }));
        }

        let mut won = 0;
        for h in handles {
            match h.await.unwrap() {
                Ok(()) => won += 1,
                Err(NoteError::AlreadyExists) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(won, 1);
    }
}

use whisper_endpoint::application::ports::{ScratchError, ScratchStore};
use whisper_endpoint::infrastructure::storage::LocalScratchStore;

#[tokio::test]
async fn given_path_under_root_when_writing_then_bytes_land_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalScratchStore::new(dir.path().to_path_buf()).unwrap();
    let path = dir.path().join("req-1").join("audio.wav");

    let written = store.write(&path, b"RIFF").await.unwrap();

    assert_eq!(written, 4);
    assert_eq!(std::fs::read(&path).unwrap(), b"RIFF");
}

#[tokio::test]
async fn given_written_file_when_deleting_then_file_and_request_directory_are_gone() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalScratchStore::new(dir.path().to_path_buf()).unwrap();
    let request_dir = dir.path().join("req-1");
    let path = request_dir.join("audio.wav");
    store.write(&path, b"data").await.unwrap();

    store.delete(&path).await.unwrap();

    assert!(!path.exists());
    assert!(!request_dir.exists());
    assert!(dir.path().exists());
}

#[tokio::test]
async fn given_missing_file_when_deleting_then_not_found_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalScratchStore::new(dir.path().to_path_buf()).unwrap();

    let result = store.delete(&dir.path().join("audio.wav")).await;

    assert!(matches!(result, Err(ScratchError::NotFound(_))));
}

#[tokio::test]
async fn given_path_outside_root_when_writing_then_refused() {
    let dir = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let store = LocalScratchStore::new(dir.path().to_path_buf()).unwrap();
    let path = other.path().join("audio.wav");

    let result = store.write(&path, b"data").await;

    assert!(matches!(result, Err(ScratchError::OutsideRoot(_))));
    assert!(!path.exists());
}

#[tokio::test]
async fn given_request_directory_without_file_when_deleting_then_directory_is_removed() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalScratchStore::new(dir.path().to_path_buf()).unwrap();
    let request_dir = dir.path().join("req-2");
    std::fs::create_dir_all(&request_dir).unwrap();

    let result = store.delete(&request_dir.join("audio.wav")).await;

    assert!(matches!(result, Err(ScratchError::NotFound(_))));
    assert!(!request_dir.exists());
    assert!(dir.path().exists());
}

use std::path::{Path, PathBuf};

use uuid::Uuid;

use whisper_endpoint::domain::{ArtifactNaming, ArtifactPath, ObjectLocation};

#[test]
fn given_flat_naming_when_deriving_then_path_is_root_plus_final_segment() {
    let location = ObjectLocation::new("b", "dir/audio.wav");

    let path =
        ArtifactPath::derive(Path::new("/tmp"), &location, ArtifactNaming::Flat, Uuid::new_v4())
            .unwrap();

    assert_eq!(path.as_path(), Path::new("/tmp/audio.wav"));
}

#[test]
fn given_per_request_naming_when_deriving_then_request_id_directory_is_inserted() {
    let location = ObjectLocation::new("b", "a/b/c/clip.mp3");
    let request_id = Uuid::new_v4();

    let path = ArtifactPath::derive(
        Path::new("/scratch"),
        &location,
        ArtifactNaming::PerRequest,
        request_id,
    )
    .unwrap();

    let expected: PathBuf = ["/scratch", &request_id.to_string(), "clip.mp3"]
        .iter()
        .collect();
    assert_eq!(path.as_path(), expected.as_path());
}

#[test]
fn given_same_key_and_two_requests_when_deriving_per_request_then_paths_differ() {
    let location = ObjectLocation::new("b", "audio.wav");
    let root = Path::new("/tmp");

    let a = ArtifactPath::derive(root, &location, ArtifactNaming::PerRequest, Uuid::new_v4());
    let b = ArtifactPath::derive(root, &location, ArtifactNaming::PerRequest, Uuid::new_v4());

    assert_ne!(a.unwrap(), b.unwrap());
}

#[test]
fn given_key_ending_in_slash_when_deriving_then_rejected() {
    let location = ObjectLocation::new("b", "uploads/");

    let result =
        ArtifactPath::derive(Path::new("/tmp"), &location, ArtifactNaming::Flat, Uuid::nil());

    assert!(result.is_err());
}

#[test]
fn given_parent_directory_segment_when_deriving_then_rejected() {
    let location = ObjectLocation::new("b", "uploads/..");

    let result =
        ArtifactPath::derive(Path::new("/tmp"), &location, ArtifactNaming::Flat, Uuid::nil());

    assert!(result.is_err());
}

#[test]
fn given_key_without_directories_when_taking_file_name_then_returns_whole_key() {
    let location = ObjectLocation::new("b", "audio.wav");

    assert_eq!(location.file_name(), "audio.wav");
    assert_eq!(location.to_string(), "b/audio.wav");
}

// tests/blob_store_tests.rs
use chrono::{TimeZone, Utc};
use vitrine::errors::AppError;
use vitrine::services::blob_store::{content_type_for, sanitize_filename, BlobKey, BlobStore, LocalBlobStore};

#[test]
fn upload_keys_live_under_the_watches_prefix() {
  let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
  let key = BlobKey::for_upload("Lume Shot.jpeg", at);
  let rest = key.as_str().strip_prefix("watches/1700000000123-").unwrap();
  let (tag, filename) = rest.split_once('-').unwrap();
  assert_eq!(tag.len(), 8);
  assert!(tag.chars().all(|c| c.is_ascii_hexdigit()));
  assert_eq!(filename, "Lume_Shot.jpeg");
  assert_eq!(BlobKey::parse(key.as_str()), Some(key));
}

#[test]
fn same_name_in_the_same_millisecond_gets_distinct_keys() {
  let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
  let first = BlobKey::for_upload("IMG_0001.jpg", at);
  let second = BlobKey::for_upload("IMG_0001.jpg", at);
  assert_ne!(first, second);
  assert!(first.as_str().ends_with("-IMG_0001.jpg"));
  assert!(second.as_str().ends_with("-IMG_0001.jpg"));
}

#[test]
fn filenames_are_reduced_to_safe_characters() {
  assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
  assert_eq!(sanitize_filename("C:\\photos\\dial.png"), "dial.png");
  assert_eq!(sanitize_filename(".hidden"), "hidden");
  assert_eq!(sanitize_filename("..."), "image");
  assert_eq!(sanitize_filename("montre été.jpg"), "montre__t_.jpg");
}

#[test]
fn parse_rejects_keys_outside_the_namespace() {
  assert!(BlobKey::parse("watches/1-a.jpg").is_some());
  assert!(BlobKey::parse("other/1-a.jpg").is_none());
  assert!(BlobKey::parse("watches/").is_none());
  assert!(BlobKey::parse("watches/../secret").is_none());
  assert!(BlobKey::parse("watches/sub/a.jpg").is_none());
  assert!(BlobKey::parse("watches/..\\a.jpg").is_none());
  assert!(BlobKey::parse("watchesX/a.jpg").is_none());
}

#[test]
fn content_type_follows_the_extension() {
  assert_eq!(content_type_for("watches/1-a.JPG"), "image/jpeg");
  assert_eq!(content_type_for("watches/1-a.webp"), "image/webp");
  assert_eq!(content_type_for("watches/1-noext"), "application/octet-stream");
}

#[tokio::test]
async fn local_store_writes_once_and_reads_back() {
  let dir = tempfile::tempdir().unwrap();
  let store = LocalBlobStore::open(dir.path(), "https://cdn.shop.test/").await.unwrap();
  let key = BlobKey::parse("watches/42-crown.png").unwrap();

  let url = store.put(&key, vec![1, 2, 3]).await.unwrap();
  assert_eq!(url, "https://cdn.shop.test/media/watches/42-crown.png");
  assert!(dir.path().join("watches/42-crown.png").exists());

  let blob = store.get(&key).await.unwrap().unwrap();
  assert_eq!(blob.bytes, vec![1, 2, 3]);
  assert_eq!(blob.content_type, "image/png");

  let err = store.put(&key, vec![9]).await.unwrap_err();
  assert!(matches!(err, AppError::UploadFailed(_)));
  assert_eq!(store.get(&key).await.unwrap().unwrap().bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn local_store_misses_return_none() {
  let dir = tempfile::tempdir().unwrap();
  let store = LocalBlobStore::open(dir.path().join("media"), "http://shop.test").await.unwrap();
  let key = BlobKey::parse("watches/1-missing.jpg").unwrap();
  assert!(store.get(&key).await.unwrap().is_none());
}

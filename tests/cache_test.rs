//! キャッシュ機能テスト
//!
//! Vision APIレスポンスキャッシュの動作を検証

use miamz::cache::{compute_hash, CacheFile};
use miamz_common::{AnnotateImageResponse, LabelAnnotation, VisionResponse};
use tempfile::tempdir;

fn response_with(label: &str) -> VisionResponse {
    VisionResponse {
        responses: vec![AnnotateImageResponse {
            label_annotations: vec![LabelAnnotation {
                description: label.to_string(),
                score: Some(0.9),
                ..Default::default()
            }],
            ..Default::default()
        }],
    }
}

/// 空のキャッシュファイル
#[test]
fn test_cache_file_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = CacheFile::load(dir.path());

    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

/// キャッシュの保存と読み込み
#[test]
fn test_cache_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    cache.insert("abc123".to_string(), "frigo.jpg".to_string(), 1024, response_with("Tomato"));
    cache.save(dir.path()).expect("キャッシュ保存失敗");

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);

    let cached = loaded.get("abc123").expect("キャッシュが見つからない");
    assert_eq!(cached, &response_with("Tomato"));
}

/// キャッシュヒット判定
#[test]
fn test_cache_hit() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = CacheFile::load(dir.path());

    let hash = compute_hash(b"fake photo");
    cache.insert(hash.clone(), "cached.jpg".to_string(), 10, response_with("Cheese"));

    assert!(cache.get(&hash).is_some());
    assert!(cache.get(&compute_hash(b"other photo")).is_none());
}

/// キャッシュの上書き
#[test]
fn test_cache_overwrite() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = CacheFile::load(dir.path());

    cache.insert("same_hash".to_string(), "a.jpg".to_string(), 1000, response_with("Egg"));
    cache.insert("same_hash".to_string(), "a.jpg".to_string(), 1000, response_with("Milk"));

    assert_eq!(cache.get("same_hash"), Some(&response_with("Milk")));
    assert_eq!(cache.len(), 1);
}

/// キャッシュファイルが破損している場合
#[test]
fn test_cache_corrupted_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(CacheFile::cache_path(dir.path()), "{ invalid json }").unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// バージョン不一致は空として扱う
#[test]
fn test_cache_version_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(
        CacheFile::cache_path(dir.path()),
        r#"{"version": 99, "entries": {}}"#,
    )
    .unwrap();

    assert!(CacheFile::load(dir.path()).is_empty());
}

/// キャッシュ削除
#[test]
fn test_cache_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut cache = CacheFile::load(dir.path());
    cache.insert("h".to_string(), "a.jpg".to_string(), 1, response_with("Egg"));
    cache.save(dir.path()).unwrap();

    assert!(CacheFile::clear(dir.path()).unwrap());
    assert!(!CacheFile::cache_path(dir.path()).exists());
    assert!(!CacheFile::clear(dir.path()).unwrap());
}

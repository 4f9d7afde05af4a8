//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use miamz::config::Config;
use miamz::error::MiamzError;
use miamz::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないパスをスキャンした場合
#[test]
fn test_scan_nonexistent_path() {
    let result = scanner::scan_path(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(MiamzError::FileNotFound(_))));
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("liste.txt"), "lait, œufs").unwrap();

    // エラーではなく空のVecを返す
    let result = scanner::scan_path(dir.path()).unwrap();
    assert!(result.is_empty());
}

/// MiamzErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        MiamzError::Config("seuil invalide".to_string()),
        MiamzError::MissingApiKey,
        MiamzError::FileNotFound("frigo.jpg".to_string()),
        MiamzError::NoImagesFound("/photos".to_string()),
        MiamzError::ImageLoad("format inconnu".to_string()),
        MiamzError::Upstream { status: 403, message: "API key not valid.".to_string() },
        MiamzError::MalformedResponse("EOF".to_string()),
        MiamzError::Http("timeout".to_string()),
        MiamzError::Prompt("not a terminal".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = format!("{}", MiamzError::MissingApiKey);
    assert!(display.contains("miamz config"));
    assert!(display.contains("GOOGLE_VISION_API_KEY"));
}

/// Upstreamはステータスコードを含む
#[test]
fn test_upstream_display_has_status() {
    let err = MiamzError::Upstream {
        status: 429,
        message: "Quota exceeded".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("429"));
    assert!(display.contains("Quota exceeded"));
}

/// 解析失敗系の分類
#[test]
fn test_is_extraction_failure() {
    assert!(MiamzError::Upstream { status: 500, message: String::new() }.is_extraction_failure());
    assert!(MiamzError::MalformedResponse(String::new()).is_extraction_failure());
    assert!(MiamzError::Http(String::new()).is_extraction_failure());

    let reported: MiamzError = miamz_common::Error::ServiceReported {
        code: 3,
        message: "Bad image data.".to_string(),
    }
    .into();
    assert!(reported.is_extraction_failure());

    assert!(MiamzError::MissingApiKey.is_extraction_failure());

    assert!(!MiamzError::FileNotFound(String::new()).is_extraction_failure());
    assert!(!MiamzError::ImageLoad(String::new()).is_extraction_failure());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: MiamzError = io_err.into();
    assert!(matches!(err, MiamzError::Io(_)));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: MiamzError = json_err.into();
    assert!(matches!(err, MiamzError::JsonParse(_)));
}

/// common::Errorは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let err: MiamzError = miamz_common::Error::DuplicateRecipeId(4).into();
    assert!(matches!(err, MiamzError::Common(_)));
    assert_eq!(format!("{}", err), "Duplicate recipe id: 4");
}

/// 設定ファイルのAPIキーが空文字なら未設定扱い
#[test]
fn test_blank_api_key_is_missing() {
    if std::env::var(miamz::config::API_KEY_ENV).is_ok() {
        eprintln!("GOOGLE_VISION_API_KEY set; skipping");
        return;
    }
    let config = Config {
        api_key: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(matches!(config.get_api_key(), Err(MiamzError::MissingApiKey)));
}

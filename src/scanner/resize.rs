use crate::error::Result;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;

const UPLOAD_JPEG_QUALITY: u8 = 85;

/// 送信用に画像を整える
///
/// 長辺が `max_size` を超える場合のみ縮小してJPEGに再エンコードする。
/// `max_size == 0` なら縮小しない。
pub fn prepare_for_upload(bytes: Vec<u8>, max_size: u32) -> Result<Vec<u8>> {
    if max_size == 0 {
        return Ok(bytes);
    }

    let img = image::load_from_memory(&bytes)?;
    let (width, height) = img.dimensions();
    if width <= max_size && height <= max_size {
        return Ok(bytes);
    }

    let resized = img.resize(max_size, max_size, FilterType::Triangle).to_rgb8();
    tracing::debug!(
        from = %format!("{}x{}", width, height),
        to = %format!("{}x{}", resized.width(), resized.height()),
        "photo downscaled"
    );

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, UPLOAD_JPEG_QUALITY).encode_image(&resized)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MiamzError;

    #[test]
    fn test_small_image_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("petit.png");
        image::RgbImage::new(8, 4).save(&path).unwrap();

        let original = std::fs::read(&path).unwrap();
        let prepared = prepare_for_upload(original.clone(), 16).unwrap();
        assert_eq!(prepared, original);
    }

    #[test]
    fn test_large_image_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grand.png");
        image::RgbImage::new(40, 20).save(&path).unwrap();

        let prepared = prepare_for_upload(std::fs::read(&path).unwrap(), 10).unwrap();
        let decoded = image::load_from_memory(&prepared).unwrap();
        assert_eq!(decoded.dimensions(), (10, 5));
    }

    #[test]
    fn test_not_an_image() {
        let bytes = b"pas une image".to_vec();

        assert!(matches!(prepare_for_upload(bytes.clone(), 10), Err(MiamzError::ImageLoad(_))));
        // 縮小しない設定なら中身は検証しない
        assert_eq!(prepare_for_upload(bytes.clone(), 0).unwrap(), bytes);
    }
}

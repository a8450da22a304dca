use image::{DynamicImage, ImageOutputFormat};
use std::io::Cursor;

use super::DeliveryError;
use crate::core::room::RoomObservation;

/// 推送用的图片
#[derive(Debug, Clone)]
pub struct ImageArtifact {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub file_name: &'static str,
}

impl ImageArtifact {
    /// 截图重新编码为 JPEG，只做格式转换
    pub fn jpeg(observation: &RoomObservation, quality: u8) -> Result<Self, DeliveryError> {
        Ok(Self {
            bytes: compress_to_jpeg(&observation.data, quality)?,
            mime: "image/jpeg",
            file_name: "room.jpg",
        })
    }

    /// 原样发送截图
    pub fn raw(observation: &RoomObservation) -> Self {
        Self {
            bytes: observation.data.clone(),
            mime: "image/png",
            file_name: "room.png",
        }
    }
}

fn compress_to_jpeg(data: &[u8], quality: u8) -> Result<Vec<u8>, DeliveryError> {
    let img = image::load_from_memory(data)?;
    // JPEG 不支持透明通道
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut buffer = Cursor::new(Vec::new());
    rgb.write_to(&mut buffer, ImageOutputFormat::Jpeg(quality.clamp(1, 100)))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn create_png(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 30, 30, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buffer, ImageFormat::Png)
            .expect("无法编码 PNG");
        buffer.into_inner()
    }

    #[test]
    fn test_png_reencoded_as_jpeg() {
        let observation = RoomObservation::from_bytes(create_png(32, 24));
        let artifact = ImageArtifact::jpeg(&observation, 80).expect("编码失败");

        assert_eq!(artifact.mime, "image/jpeg");
        // JPEG SOI 标记
        assert_eq!(&artifact.bytes[..2], &[0xFF, 0xD8]);

        let decoded = image::load_from_memory(&artifact.bytes).expect("无法解码 JPEG");
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_non_image_observation_fails() {
        let observation = RoomObservation::from_bytes(b"<html></html>".to_vec());
        assert!(matches!(
            ImageArtifact::jpeg(&observation, 80),
            Err(DeliveryError::Image(_))
        ));
    }

    #[test]
    fn test_raw_keeps_bytes() {
        let observation = RoomObservation::from_bytes(vec![9u8; 10]);
        let artifact = ImageArtifact::raw(&observation);
        assert_eq!(artifact.bytes, vec![9u8; 10]);
        assert_eq!(artifact.mime, "image/png");
    }
}

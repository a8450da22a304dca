//! 采集接口 - 浏览器自动化在外部完成，这里只约定"给一个房间，返回它的内容"

use log::debug;
use scraper::Selector;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

use crate::core::road::parser::{parse_selector, select_markers};
use crate::core::road::RoadError;
use crate::core::room::{CapturedRoom, RoomKey, RoomObservation};

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot not found: {0}")]
    MissingSnapshot(PathBuf),
    #[error(transparent)]
    Road(#[from] RoadError),
    #[error("capture failed: {0}")]
    Other(String),
}

pub trait RoomCapture {
    fn capture(&mut self, key: &RoomKey) -> Result<CapturedRoom, CaptureError>;
}

/// 从快照目录读取房间内容
///
/// 目录结构：`<root>/<camp>/<index>.png` 为截图，`<root>/<camp>/<index>.html` 为渲染后的 HTML。
pub struct SnapshotDirCapture {
    root: PathBuf,
    selector: Selector,
    started: Instant,
}

impl SnapshotDirCapture {
    pub fn new(root: impl Into<PathBuf>, marker_selector: &str) -> Result<Self, CaptureError> {
        Ok(Self {
            root: root.into(),
            selector: parse_selector(marker_selector)?,
            started: Instant::now(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn snapshot_path(&self, key: &RoomKey, ext: &str) -> PathBuf {
        self.root.join(&key.camp).join(format!("{}.{}", key.index, ext))
    }

    fn read_required(path: &Path) -> Result<Vec<u8>, CaptureError> {
        if !path.exists() {
            return Err(CaptureError::MissingSnapshot(path.to_path_buf()));
        }
        Ok(fs::read(path)?)
    }
}

impl RoomCapture for SnapshotDirCapture {
    fn capture(&mut self, key: &RoomKey) -> Result<CapturedRoom, CaptureError> {
        let image_path = self.snapshot_path(key, "png");
        let html_path = self.snapshot_path(key, "html");

        let image = Self::read_required(&image_path)?;
        let html = String::from_utf8_lossy(&Self::read_required(&html_path)?).into_owned();

        let markers = select_markers(&html, &self.selector);
        debug!("📸 {}: {} bytes, {} markers", key, image.len(), markers.len());

        let elapsed_ms = self.started.elapsed().as_millis() as u64;
        Ok(CapturedRoom::new(
            RoomObservation::new(image, elapsed_ms),
            markers,
        ))
    }
}

//! 推送接口 - 核心只负责组装通知，怎么发出去由实现决定

use thiserror::Error;

use crate::core::analysis::AnalysisResult;
use crate::core::room::RoomKey;

pub mod artifact;
pub mod telegram;

pub use artifact::ImageArtifact;
pub use telegram::{TelegramConfig, TelegramDelivery};

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("HTTP 请求失败: {0}")]
    Http(#[from] reqwest::Error),
    #[error("图片编码失败: {0}")]
    Image(#[from] image::ImageError),
    #[error("推送被拒绝 ({code:?}): {description}")]
    Rejected {
        code: Option<i32>,
        description: String,
    },
    #[error("推送未配置")]
    NotConfigured,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub key: RoomKey,
    pub caption: String,
    pub image: ImageArtifact,
    pub analysis: AnalysisResult,
}

pub trait Delivery {
    fn deliver(&mut self, notification: &Notification) -> Result<(), DeliveryError>;
}

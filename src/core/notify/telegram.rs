use log::{debug, info};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{Delivery, DeliveryError, Notification};

pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// 格式：123456:ABC-DEF...
    pub bot_token: String,
    pub chat_id: String,
    pub api_base: String,
    pub parse_mode: Option<String>,
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            chat_id: String::new(),
            api_base: TELEGRAM_API_BASE.to_string(),
            parse_mode: None,
            timeout_secs: 30,
        }
    }
}

impl TelegramConfig {
    pub fn is_configured(&self) -> bool {
        !self.bot_token.is_empty() && !self.chat_id.is_empty()
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.bot_token,
            method
        )
    }
}

#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
    error_code: Option<i32>,
}

/// Telegram Bot API 推送 - sendPhoto 附带说明文字
pub struct TelegramDelivery {
    config: TelegramConfig,
    client: Client,
}

impl TelegramDelivery {
    pub fn new(config: TelegramConfig) -> Result<Self, DeliveryError> {
        if !config.is_configured() {
            return Err(DeliveryError::NotConfigured);
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, client })
    }

    fn build_form(&self, notification: &Notification) -> Result<Form, DeliveryError> {
        let photo = Part::bytes(notification.image.bytes.clone())
            .file_name(notification.image.file_name)
            .mime_str(notification.image.mime)?;

        let form = Form::new()
            .text("chat_id", self.config.chat_id.clone())
            .text("caption", notification.caption.clone())
            .part("photo", photo);

        Ok(match &self.config.parse_mode {
            Some(mode) => form.text("parse_mode", mode.clone()),
            None => form,
        })
    }
}

impl Delivery for TelegramDelivery {
    fn deliver(&mut self, notification: &Notification) -> Result<(), DeliveryError> {
        let form = self.build_form(notification)?;
        debug!(
            "📤 {}: sending {} bytes to chat {}",
            notification.key,
            notification.image.bytes.len(),
            self.config.chat_id
        );

        let response: TelegramResponse = self
            .client
            .post(self.config.api_url("sendPhoto"))
            .multipart(form)
            .send()?
            .json()?;

        if response.ok {
            info!("✅ {} delivered", notification.key);
            Ok(())
        } else {
            Err(DeliveryError::Rejected {
                code: response.error_code,
                description: response
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            })
        }
    }
}

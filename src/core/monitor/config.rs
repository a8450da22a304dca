use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::core::analysis::AnalyzerConfig;
use crate::core::notify::TelegramConfig;
use crate::core::road::parser::parse_selector;
use crate::core::road::{MarkerRules, DEFAULT_MARKER_SELECTOR};
use crate::core::room::RoomKey;

// 营地名同时用作快照目录名
static CAMP_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("camp name pattern"));
static BOT_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+:[A-Za-z0-9_-]+$").expect("bot token pattern"));

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 解析失败: {0}")]
    Parse(#[from] json5::Error),
    #[error("配置无效: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub camps: Vec<String>,
    pub rooms_per_camp: u32,
    /// 只给外部调度器参考，核心不做任何计时
    pub poll_interval_secs: u64,
    pub analyzer: AnalyzerConfig,
    pub markers: MarkerRules,
    pub marker_selector: String,
    pub jpeg_quality: u8,
    pub telegram: TelegramConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            camps: vec![
                "sa-gaming".to_string(),
                "sexy-baccarat".to_string(),
                "wm-casino".to_string(),
            ],
            rooms_per_camp: 4,
            poll_interval_secs: 60,
            analyzer: AnalyzerConfig::default(),
            markers: MarkerRules::default(),
            marker_selector: DEFAULT_MARKER_SELECTOR.to_string(),
            jpeg_quality: 80,
            telegram: TelegramConfig::default(),
        }
    }
}

impl MonitorConfig {
    pub fn for_camps<S: Into<String>>(camps: impl IntoIterator<Item = S>, rooms_per_camp: u32) -> Self {
        Self {
            camps: camps.into_iter().map(Into::into).collect(),
            rooms_per_camp,
            ..Default::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json5(&raw)
    }

    pub fn from_json5(raw: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = json5::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.camps.is_empty() {
            return Err(ConfigError::Invalid("camps 不能为空".to_string()));
        }

        let mut seen = HashSet::new();
        for camp in &self.camps {
            if !CAMP_NAME.is_match(camp) {
                return Err(ConfigError::Invalid(format!("非法营地名: {:?}", camp)));
            }
            if !seen.insert(camp.as_str()) {
                return Err(ConfigError::Invalid(format!("营地重复: {}", camp)));
            }
        }

        if self.rooms_per_camp == 0 {
            return Err(ConfigError::Invalid("rooms_per_camp 必须大于 0".to_string()));
        }

        let analyzer = &self.analyzer;
        if analyzer.window == 0 || analyzer.dragon_threshold < 2 || analyzer.ping_pong_min_len < 3 {
            return Err(ConfigError::Invalid(format!(
                "分析参数无效: window={}, dragon_threshold={}, ping_pong_min_len={}",
                analyzer.window, analyzer.dragon_threshold, analyzer.ping_pong_min_len
            )));
        }

        let rules = &self.markers;
        if rules.banker.is_empty() || rules.player.is_empty() || rules.tie.is_empty() {
            return Err(ConfigError::Invalid("标记子串不能为空".to_string()));
        }

        parse_selector(&self.marker_selector).map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality 超出范围: {}",
                self.jpeg_quality
            )));
        }

        if !self.telegram.bot_token.is_empty() && !BOT_TOKEN.is_match(&self.telegram.bot_token) {
            return Err(ConfigError::Invalid("bot_token 格式不正确".to_string()));
        }

        Ok(())
    }

    /// 按配置顺序列出所有房间：营地依次，房间序号从 1 开始
    pub fn rooms(&self) -> Vec<RoomKey> {
        self.camps
            .iter()
            .flat_map(|camp| (1..=self.rooms_per_camp).map(move |i| RoomKey::new(camp.clone(), i)))
            .collect()
    }
}

//! 房间监控管理器 - 一次轮询周期的完整流程

use log::{debug, info, warn};
use serde::Serialize;
use std::sync::{Arc, Mutex};

use super::config::MonitorConfig;
use crate::core::analysis::{render_caption, SequenceAnalyzer};
use crate::core::capture::RoomCapture;
use crate::core::notify::{Delivery, ImageArtifact, Notification};
use crate::core::road::OutcomeExtractor;
use crate::core::room::{CapturedRoom, ChangeDetector, RoomKey};

/// 单个周期的统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    pub observed: u64,
    pub unchanged: u64,
    pub analysed: u64,
    pub delivered: u64,
    pub capture_failures: u64,
    pub delivery_failures: u64,
}

/// 累计统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonitorStats {
    pub cycles: u64,
    pub observed: u64,
    pub unchanged: u64,
    pub analysed: u64,
    pub delivered: u64,
    pub capture_failures: u64,
    pub delivery_failures: u64,
    pub tracked_rooms: usize,
}

impl MonitorStats {
    fn absorb(&mut self, report: &CycleReport, tracked_rooms: usize) {
        self.cycles += 1;
        self.observed += report.observed;
        self.unchanged += report.unchanged;
        self.analysed += report.analysed;
        self.delivered += report.delivered;
        self.capture_failures += report.capture_failures;
        self.delivery_failures += report.delivery_failures;
        self.tracked_rooms = tracked_rooms;
    }
}

pub struct MonitorManager {
    rooms: Vec<RoomKey>,
    detector: ChangeDetector,
    extractor: OutcomeExtractor,
    analyzer: SequenceAnalyzer,
    jpeg_quality: u8,
    stats: Arc<Mutex<MonitorStats>>,
}

impl MonitorManager {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            rooms: config.rooms(),
            detector: ChangeDetector::new(),
            extractor: OutcomeExtractor::with_rules(config.markers.clone())
                .with_window(config.analyzer.window),
            analyzer: SequenceAnalyzer::with_config(config.analyzer.clone()),
            jpeg_quality: config.jpeg_quality,
            stats: Arc::new(Mutex::new(MonitorStats::default())),
        }
    }

    pub fn rooms(&self) -> &[RoomKey] {
        &self.rooms
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    /// 统计句柄，读取时不需要等当前周期结束
    pub fn stats_handle(&self) -> Arc<Mutex<MonitorStats>> {
        Arc::clone(&self.stats)
    }

    pub fn get_stats(&self) -> MonitorStats {
        match self.stats.lock() {
            Ok(stats) => stats.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// 按配置顺序逐个房间处理，不并发、不计时、不重试
    pub fn run_cycle(
        &mut self,
        capture: &mut dyn RoomCapture,
        delivery: &mut dyn Delivery,
    ) -> CycleReport {
        let mut report = CycleReport::default();
        let rooms = self.rooms.clone();

        for key in &rooms {
            let captured = match capture.capture(key) {
                Ok(captured) => captured,
                Err(e) => {
                    warn!("⚠️ {} capture failed, skipped: {}", key, e);
                    report.capture_failures += 1;
                    continue;
                }
            };
            report.observed += 1;

            let Some(notification) = self.process_room(key, &captured) else {
                report.unchanged += 1;
                continue;
            };
            report.analysed += 1;

            // 指纹已经记下，推送失败不回滚
            match delivery.deliver(&notification) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!("⚠️ {} delivery failed: {}", key, e);
                    report.delivery_failures += 1;
                }
            }
        }

        info!(
            "🔁 cycle done: observed={} unchanged={} delivered={} failures={}/{}",
            report.observed,
            report.unchanged,
            report.delivered,
            report.capture_failures,
            report.delivery_failures
        );

        if let Ok(mut stats) = self.stats.lock() {
            stats.absorb(&report, self.detector.tracked_rooms());
        }

        report
    }

    /// 核心路径：变化检测 → 提取 → 分析 → 组装通知；内容没变返回 None
    pub fn process_room(&mut self, key: &RoomKey, captured: &CapturedRoom) -> Option<Notification> {
        let decision = self.detector.check(key, &captured.observation);
        if !decision.changed {
            return None;
        }

        let outcomes = self.extractor.extract(&captured.markers);
        debug!(
            "🎲 {} {:?}: {} outcomes, raw {}",
            key,
            decision.reason,
            outcomes.len(),
            self.extractor.render_raw(&captured.markers)
        );

        let analysis = self.analyzer.analyze(&outcomes);
        let caption = render_caption(key, &analysis);

        let image = ImageArtifact::jpeg(&captured.observation, self.jpeg_quality).unwrap_or_else(|e| {
            warn!("⚠️ {} JPEG encode failed, sending raw snapshot: {}", key, e);
            ImageArtifact::raw(&captured.observation)
        });

        Some(Notification {
            key: key.clone(),
            caption,
            image,
            analysis,
        })
    }
}

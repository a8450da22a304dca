use log::debug;
use rayon::prelude::*;

use super::fingerprint::ContentFingerprint;
use super::observation::{RoomKey, RoomObservation};
use super::tracker::SessionTracker;

/// 变化检测器 - 对房间内容取指纹，内容没变就不再处理
///
/// 追踪器在返回"需要处理"之前就已经更新，下游分析或推送失败时
/// 同一份内容不会被重复处理（至多一次推送）。
pub struct ChangeDetector {
    tracker: SessionTracker,
}

/// 检测决策结果
#[derive(Debug, Clone, Copy)]
pub struct ChangeDecision {
    pub changed: bool,
    pub reason: ChangeReason,
    pub fingerprint: ContentFingerprint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeReason {
    FirstSeen,      // 首次出现，处理
    ContentChanged, // 内容变化，处理
    Unchanged,      // 与上次相同，丢弃
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::with_tracker(SessionTracker::new())
    }

    pub fn with_tracker(tracker: SessionTracker) -> Self {
        Self { tracker }
    }

    pub fn should_process(&mut self, key: &RoomKey, observation: &RoomObservation) -> bool {
        self.check(key, observation).changed
    }

    pub fn check(&mut self, key: &RoomKey, observation: &RoomObservation) -> ChangeDecision {
        self.check_fingerprint(key, ContentFingerprint::of(observation))
    }

    /// 比较并更新，指纹已经算好时直接用
    pub fn check_fingerprint(
        &mut self,
        key: &RoomKey,
        fingerprint: ContentFingerprint,
    ) -> ChangeDecision {
        let reason = match self.tracker.get(key) {
            Some(previous) if previous == fingerprint => {
                debug!("⏸️ {} unchanged ({})", key, fingerprint.short());
                return ChangeDecision {
                    changed: false,
                    reason: ChangeReason::Unchanged,
                    fingerprint,
                };
            }
            Some(_) => ChangeReason::ContentChanged,
            None => ChangeReason::FirstSeen,
        };

        self.tracker.set(key.clone(), fingerprint);
        debug!("🆕 {} {:?} ({})", key, reason, fingerprint.short());

        ChangeDecision {
            changed: true,
            reason,
            fingerprint,
        }
    }

    /// 批量处理 - 指纹并行计算，比较与更新按输入顺序串行执行
    pub fn check_batch(&mut self, batch: &[(RoomKey, RoomObservation)]) -> Vec<ChangeDecision> {
        let fingerprints: Vec<ContentFingerprint> = batch
            .par_iter()
            .map(|(_, observation)| ContentFingerprint::of(observation))
            .collect();

        batch
            .iter()
            .zip(fingerprints)
            .map(|((key, _), fingerprint)| self.check_fingerprint(key, fingerprint))
            .collect()
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn tracked_rooms(&self) -> usize {
        self.tracker.len()
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

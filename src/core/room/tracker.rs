use std::collections::HashMap;

use super::fingerprint::ContentFingerprint;
use super::observation::RoomKey;

/// 会话追踪器 - 每个房间只记住最近一次的指纹
///
/// 进程内常驻，只增不删：条目只会被新增或覆盖，没有淘汰、过期或删除接口。
#[derive(Debug, Default)]
pub struct SessionTracker {
    last_seen: HashMap<RoomKey, ContentFingerprint>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &RoomKey) -> Option<ContentFingerprint> {
        self.last_seen.get(key).copied()
    }

    pub fn set(&mut self, key: RoomKey, fingerprint: ContentFingerprint) {
        self.last_seen.insert(key, fingerprint);
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoomKey, &ContentFingerprint)> {
        self.last_seen.iter()
    }
}

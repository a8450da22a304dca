use std::fmt;
use std::time::Duration;

/// 房间标识：(营地名, 房间序号)，整个运行期间保持稳定
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey {
    pub camp: String,
    pub index: u32,
}

impl RoomKey {
    pub fn new(camp: impl Into<String>, index: u32) -> Self {
        Self {
            camp: camp.into(),
            index,
        }
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.camp, self.index)
    }
}

/// 单次轮询采集到的房间原始内容（通常是截图字节）
/// 只在一个轮询周期内存在
#[derive(Debug, Clone)]
pub struct RoomObservation {
    pub data: Vec<u8>,
    pub captured_at: Duration, // 相对采集器启动的时间
}

impl RoomObservation {
    pub fn new(data: Vec<u8>, captured_at_ms: u64) -> Self {
        Self {
            data,
            captured_at: Duration::from_millis(captured_at_ms),
        }
    }

    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::new(data.into(), 0)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// 采集器交付的完整结果：原始内容 + 按文档顺序排列的标记标识
#[derive(Debug, Clone)]
pub struct CapturedRoom {
    pub observation: RoomObservation,
    pub markers: Vec<String>,
}

impl CapturedRoom {
    pub fn new(observation: RoomObservation, markers: Vec<String>) -> Self {
        Self {
            observation,
            markers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_key_display() {
        let key = RoomKey::new("sa-gaming", 3);
        assert_eq!(key.to_string(), "sa-gaming#3");
    }

    #[test]
    fn test_room_key_equality_is_by_value() {
        assert_eq!(RoomKey::new("wm", 1), RoomKey::new(String::from("wm"), 1));
        assert_ne!(RoomKey::new("wm", 1), RoomKey::new("wm", 2));
        assert_ne!(RoomKey::new("wm", 1), RoomKey::new("sexy", 1));
    }

    #[test]
    fn test_observation_creation() {
        let obs = RoomObservation::new(vec![1, 2, 3], 1500);
        assert_eq!(obs.len(), 3);
        assert!(!obs.is_empty());
        assert_eq!(obs.captured_at.as_millis(), 1500);

        let empty = RoomObservation::from_bytes(Vec::new());
        assert!(empty.is_empty());
    }
}

use crate::core::road::Outcome;

/// 长龙：同一边连续出现的次数阈值
pub const DRAGON_THRESHOLD: usize = 4;
/// 单跳：判定所需的最少庄闲局数
pub const PING_PONG_MIN_LEN: usize = 5;

/// 去掉和局，只保留庄闲序列
pub fn sides_only(outcomes: &[Outcome]) -> Vec<Outcome> {
    outcomes.iter().copied().filter(|o| o.is_side()).collect()
}

/// 从左往右扫描，第一个连续次数达到阈值的一边即为长龙
pub fn detect_dragon(sides: &[Outcome], threshold: usize) -> Option<Outcome> {
    if threshold == 0 || sides.len() < threshold {
        return None;
    }

    let mut run = 0usize;
    let mut current: Option<Outcome> = None;

    for &side in sides {
        if current == Some(side) {
            run += 1;
        } else {
            current = Some(side);
            run = 1;
        }
        if run >= threshold {
            return Some(side);
        }
    }

    None
}

/// 严格的周期 2 交替：整个序列上每个位置都与前两位相同
pub fn is_ping_pong(sides: &[Outcome], min_len: usize) -> bool {
    if sides.len() < min_len.max(2) {
        return false;
    }
    (2..sides.len()).all(|i| sides[i] == sides[i - 2])
}

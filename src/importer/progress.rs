// ==========================================
// 法规条文语料库 - 导入进度上报
// ==========================================
// 职责: 定义进度监听 trait，导入器只依赖 trait
// 说明: 调用方（API / CLI / 测试）自行实现展示方式
// ==========================================

use crate::domain::types::ImportPhase;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 进度事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    /// 当前阶段
    pub phase: ImportPhase,
    /// 阶段内百分比（0-100）
    pub percent: u8,
}

impl ImportProgress {
    pub fn new(phase: ImportPhase, percent: u8) -> Self {
        Self { phase, percent }
    }
}

/// 按比例计算百分比：round(done / total * 100)
///
/// total 为 0 时返回 100
pub fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (done as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// 进度监听者 Trait
pub trait ProgressListener: Send + Sync {
    fn on_progress(&self, progress: ImportProgress);
}

/// 空实现
pub struct NoopProgressListener;

impl ProgressListener for NoopProgressListener {
    fn on_progress(&self, _progress: ImportProgress) {}
}

/// 写日志的实现（CLI 使用）
pub struct LoggingProgressListener;

impl ProgressListener for LoggingProgressListener {
    fn on_progress(&self, progress: ImportProgress) {
        info!(phase = %progress.phase, percent = progress.percent, "导入进度");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_of_rounds() {
        assert_eq!(percent_of(1, 3), 33);
        assert_eq!(percent_of(2, 3), 67);
        assert_eq!(percent_of(3, 3), 100);
        assert_eq!(percent_of(50, 101), 50);
        assert_eq!(percent_of(100, 101), 99);
        assert_eq!(percent_of(0, 0), 100);
    }
}

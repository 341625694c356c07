// ==========================================
// 法规条文语料库 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 导入阶段 (Import Phase)
// ==========================================
// 状态机: Idle → Phase1Running → Phase2Running → Completed
// 无取消/回滚状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportPhase {
    Idle,          // 未开始
    Phase1Running, // 创建条文
    Phase2Running, // 解析并写入引用
    Completed,     // 完成
}

impl fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportPhase::Idle => write!(f, "IDLE"),
            ImportPhase::Phase1Running => write!(f, "PHASE1_RUNNING"),
            ImportPhase::Phase2Running => write!(f, "PHASE2_RUNNING"),
            ImportPhase::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 文件格式 (Sheet Format)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetFormat {
    Xlsx,
    Xls,
    Csv,
}

impl SheetFormat {
    /// 按扩展名识别（大小写不敏感）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" => Some(SheetFormat::Xlsx),
            "xls" => Some(SheetFormat::Xls),
            "csv" => Some(SheetFormat::Csv),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_format_from_extension() {
        assert_eq!(SheetFormat::from_extension("XLSX"), Some(SheetFormat::Xlsx));
        assert_eq!(SheetFormat::from_extension("csv"), Some(SheetFormat::Csv));
        assert_eq!(SheetFormat::from_extension("ods"), None);
    }

    #[test]
    fn test_import_phase_serde() {
        let json = serde_json::to_string(&ImportPhase::Phase2Running).unwrap();
        assert_eq!(json, "\"PHASE2_RUNNING\"");
    }
}

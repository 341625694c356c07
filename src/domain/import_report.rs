// ==========================================
// 法规条文语料库 - 导入结果模型
// ==========================================
// 用途: 导入接口返回值（逐项成功/失败汇总）
// 说明: 单项失败是数据，不是错误；整批只在结构/校验错误时失败
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ItemOutcome - 阶段 1 单条结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemOutcome {
    Created { number: String, id: String },
    Failed { number: String, message: String },
}

impl ItemOutcome {
    pub fn created_id(&self) -> Option<&str> {
        match self {
            ItemOutcome::Created { id, .. } => Some(id),
            ItemOutcome::Failed { .. } => None,
        }
    }
}

// ==========================================
// LinkOutcome - 阶段 2 单条引用结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkOutcome {
    Created {
        source: String,
        target: String,
    },
    Failed {
        source: String,
        target: String,
        message: String,
    },
}

// ==========================================
// 错误明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryError {
    pub identifier_hint: String, // 条文编号
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkError {
    pub source: String, // 源条文编号
    pub target: String, // 目标（法规代码 + 条文编号）
    pub message: String,
}

// ==========================================
// 分项汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimarySummary {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<PrimaryError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummary {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<LinkError>,
}

// ==========================================
// ImportResult - 导入结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub primary: PrimarySummary,
    pub links: LinkSummary,
    /// 存在任一失败项（非原子导入，已创建的条文不会回滚）
    pub partial: bool,
}

impl ImportResult {
    pub fn total_primary(&self) -> usize {
        self.primary.success + self.primary.failed
    }

    pub fn total_links(&self) -> usize {
        self.links.success + self.links.failed
    }
}

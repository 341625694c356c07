// ==========================================
// 法规条文语料库 - 条文导入领域模型
// ==========================================
// 职责: 定义批量导入管道中的强类型记录
// 生命周期: 仅在单次导入调用内存在
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始行记录（列名 → 单元格文本）
///
/// 只在解析器与校验器之间流转，校验器之后不再出现
pub type RawRow = HashMap<String, String>;

/// 带表格行号的原始行
///
/// row_number 为数据行号（表头之后从 1 开始），空行跳过后仍保留原行号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub row_number: usize,
    pub cells: RawRow,
}

impl SheetRow {
    pub fn new(row_number: usize, cells: RawRow) -> Self {
        Self { row_number, cells }
    }
}

// ==========================================
// ImportRecord - 条文导入记录
// ==========================================
// 对齐: 导入模板一行 = 一条记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub number: String,          // 条文编号（nomor，如 "340" / "27 ayat (3)"）
    pub title: Option<String>,   // 标题（judul）
    pub body: String,            // 正文（isi）
    pub note: Option<String>,    // 释义（penjelasan）
    pub keywords: Vec<String>,   // 关键词（逗号分隔，保序）
    pub links: Vec<LinkRequest>, // 交叉引用（最多 5 条）

    // 元信息
    pub row_number: usize, // 数据行号（从 1 开始，仅用于提示）
}

impl ImportRecord {
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }
}

// ==========================================
// LinkRequest - 交叉引用请求
// ==========================================
// 约束: target_law_code 与 target_number 必须同时存在
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRequest {
    pub target_law_code: String, // 目标法规代码（link{i}_targetUU）
    pub target_number: String,   // 目标条文编号（link{i}_targetNomor）
    pub note: Option<String>,    // 引用说明（link{i}_keterangan）
}

impl LinkRequest {
    /// 人类可读的目标标识，如 "KUHP 340"
    pub fn target_label(&self) -> String {
        format!("{} {}", self.target_law_code, self.target_number)
    }
}

// ==========================================
// LawCodeRef - 法规（父文档）引用
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawCodeRef {
    pub id: String,   // 内部 ID
    pub code: String, // 法规代码（如 "KUHP"）
}

// ==========================================
// NewArticleLink - 待写入的已解析引用
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticleLink {
    pub source_id: String,
    pub target_id: String,
    pub note: Option<String>,
    pub actor_id: String,
}

// ==========================================
// ImportContext - 调用方上下文
// ==========================================
// 显式传入导入器，不读取任何全局状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportContext {
    pub actor_id: String,           // 操作人
    pub parent_document_id: String, // 本批次全部条文所属法规 ID
}

impl ImportContext {
    pub fn new(actor_id: impl Into<String>, parent_document_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            parent_document_id: parent_document_id.into(),
        }
    }
}

// ==========================================
// IdentifierMap - 批次内标识映射
// ==========================================
// 键: (法规 ID, 条文编号) → 阶段 1 新建条文 ID
// 仅由本批次阶段 1 成功创建的记录填充
#[derive(Debug, Clone, Default)]
pub struct IdentifierMap {
    entries: HashMap<(String, String), String>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入映射，返回被覆盖的旧 ID（同批次重复编号时）
    pub fn insert(&mut self, law_code_id: &str, number: &str, id: String) -> Option<String> {
        self.entries
            .insert((law_code_id.to_string(), number.to_string()), id)
    }

    pub fn get(&self, law_code_id: &str, number: &str) -> Option<&str> {
        self.entries
            .get(&(law_code_id.to_string(), number.to_string()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

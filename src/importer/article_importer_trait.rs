// ==========================================
// 法规条文语料库 - 条文导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 文件解析 → 行校验 → 标识预取 → 两阶段写入 → 结果汇总
// ==========================================

use crate::domain::article::{ImportContext, ImportRecord, RawRow, SheetRow};
use crate::domain::import_report::ImportResult;
use crate::domain::types::SheetFormat;
use crate::importer::error::ImporterResult;
use crate::importer::progress::ProgressListener;
use async_trait::async_trait;

// ==========================================
// ArticleImporter Trait
// ==========================================
// 用途: 条文批量导入主接口
// 实现者: ArticleImporterImpl
#[async_trait]
pub trait ArticleImporter: Send + Sync {
    /// 从表格字节导入条文及其交叉引用
    ///
    /// # 参数
    /// - bytes: 上传文件内容
    /// - format: 文件格式
    /// - ctx: 调用方上下文（操作人 + 目标法规）
    /// - progress: 进度监听器
    ///
    /// # 返回
    /// - Ok(ImportResult): 逐项成功/失败汇总（单项失败不会返回 Err）
    /// - Err: 结构错误（解析失败/无数据行/未选择法规/预取失败）或行校验错误
    ///
    /// # 导入流程
    /// 1. 文件解析
    /// 2. 行校验（任一行失败即整文件拒绝）
    /// 3. 法规代码预取
    /// 4. 阶段 1: 逐条创建条文
    /// 5. 阶段 2: 解析引用并分块写入
    /// 6. 结果汇总
    async fn import_bytes(
        &self,
        bytes: &[u8],
        format: SheetFormat,
        ctx: &ImportContext,
        progress: &dyn ProgressListener,
    ) -> ImporterResult<ImportResult>;

    /// 导入已校验的记录（跳过解析与校验）
    async fn import_records(
        &self,
        records: Vec<ImportRecord>,
        ctx: &ImportContext,
        progress: &dyn ProgressListener,
    ) -> ImporterResult<ImportResult>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 表格解析接口（阶段 0）
// 实现者: CsvParser / ExcelParser / LegacyExcelParser
pub trait FileParser: Send + Sync {
    /// 解析表格字节为带行号的原始行记录
    ///
    /// # 约束
    /// - 第一行为表头
    /// - 所有值转为去空白字符串，缺失单元格为 ""
    /// - 空行跳过，但不影响后续行的行号
    /// - 无数据行时返回 EmptySheet
    fn parse_bytes(&self, bytes: &[u8]) -> ImporterResult<Vec<SheetRow>>;
}

// ==========================================
// RecordValidator Trait
// ==========================================
// 用途: 行校验接口（阶段 1 之前）
// 实现者: ArticleRecordValidator
pub trait RecordValidator: Send + Sync {
    /// 将单个原始行校验并转换为 ImportRecord
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 数据行号（从 1 开始）
    fn validate(&self, row: &RawRow, row_number: usize) -> ImporterResult<ImportRecord>;

    /// 校验整个文件（快速失败：第一处错误即中止）
    fn validate_all(&self, rows: &[SheetRow]) -> ImporterResult<Vec<ImportRecord>> {
        rows.iter()
            .map(|row| self.validate(&row.cells, row.row_number))
            .collect()
    }
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 文本清洗接口
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM）
    fn clean_text(&self, value: &str) -> String;

    /// 标准化 NULL 值（空字符串/空白 → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 拆分关键词（逗号分隔，TRIM，去空，保序）
    fn split_keywords(&self, value: &str) -> Vec<String>;
}

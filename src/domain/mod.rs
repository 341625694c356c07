// ==========================================
// 法规条文语料库 - 领域模型层
// ==========================================
// 职责: 定义导入记录、结果与状态类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod article;
pub mod import_report;
pub mod types;

// 重导出核心类型
pub use article::{
    IdentifierMap, ImportContext, ImportRecord, LawCodeRef, LinkRequest, NewArticleLink, RawRow,
    SheetRow,
};
pub use import_report::{
    ImportResult, ItemOutcome, LinkError, LinkOutcome, LinkSummary, PrimaryError, PrimarySummary,
};
pub use types::{ImportPhase, SheetFormat};

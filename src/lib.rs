// ==========================================
// 法规条文语料库 - 核心库
// ==========================================
// 职责: 表格批量导入法规条文，并解析条文间交叉引用
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录、结果与状态类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 解析、校验、两阶段导入
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ImportPhase, SheetFormat};

// 领域实体
pub use domain::{
    ImportContext, ImportRecord, ImportResult, ItemOutcome, LinkOutcome, LinkRequest,
};

// 导入器
pub use importer::{ArticleImporter, ArticleImporterImpl, ImportError};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "法规条文语料库导入工具";

// ==========================================
// 法规条文语料库 - 导入层
// ==========================================
// 职责: 表格文件 → 条文 + 条文引用
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod article_importer_impl;
pub mod article_importer_trait;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod identifier_resolver;
pub mod progress;
pub mod record_validator;
pub mod result_aggregator;
pub mod template;

// 重导出核心类型
pub use article_importer_impl::{parse_and_validate, ArticleImporterImpl};
pub use data_cleaner::{join_keywords, DataCleaner as DataCleanerImpl};
pub use error::{ImportError, ImporterResult};
pub use file_parser::{CsvParser, ExcelParser, LegacyExcelParser, UniversalFileParser};
pub use identifier_resolver::IdentifierResolver;
pub use progress::{
    percent_of, ImportProgress, LoggingProgressListener, NoopProgressListener, ProgressListener,
};
pub use record_validator::{columns, ArticleRecordValidator, MAX_LINKS_PER_RECORD};
pub use result_aggregator::ResultAggregator;
pub use template::{template_headers, write_csv_template};

// 重导出 Trait 接口
pub use article_importer_trait::{ArticleImporter, DataCleaner, FileParser, RecordValidator};

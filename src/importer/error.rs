// ==========================================
// 法规条文语料库 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 仅结构错误与校验错误会中止整批导入；
//       阶段 1/2 的单项失败以 ItemOutcome/LinkOutcome 记录，不走错误通道
// ==========================================

use crate::i18n::t_with_args;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误（结构错误）=====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("文件无数据行")]
    EmptySheet,

    // ===== 调用方选择缺失（结构错误）=====
    #[error("未选择目标法规")]
    MissingParentDocument,

    #[error("操作人为空")]
    MissingActor,

    // ===== 行校验错误（整文件拒绝）=====
    #[error("必填字段缺失 (行 {row}, 字段 {field})")]
    MissingRequiredField { row: usize, field: String },

    #[error("引用字段不成对 (行 {row}): 已填写 {field}，缺少 {companion}")]
    IncompleteLinkPair {
        row: usize,
        field: String,
        companion: String,
    },

    // ===== 数据访问错误（预取失败等）=====
    #[error("数据访问失败: {0}")]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    /// 是否为行校验错误（相对于结构错误）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ImportError::MissingRequiredField { .. } | ImportError::IncompleteLinkPair { .. }
        )
    }

    /// 出错的行号（仅校验错误）
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::MissingRequiredField { row, .. }
            | ImportError::IncompleteLinkPair { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// 面向最终用户的本地化描述
    pub fn localized(&self) -> String {
        match self {
            ImportError::FileNotFound(path) => {
                t_with_args("import.file_not_found", &[("path", path)])
            }
            ImportError::UnsupportedFormat(ext) => {
                t_with_args("import.unsupported_format", &[("ext", ext)])
            }
            ImportError::EmptySheet => t_with_args("import.empty_sheet", &[]),
            ImportError::MissingParentDocument => t_with_args("import.missing_parent", &[]),
            ImportError::MissingRequiredField { row, field } => t_with_args(
                "validation.required_field",
                &[("row", &row.to_string()), ("field", field)],
            ),
            ImportError::IncompleteLinkPair {
                row,
                field,
                companion,
            } => t_with_args(
                "validation.link_pair_incomplete",
                &[
                    ("row", &row.to_string()),
                    ("field", field),
                    ("companion", companion),
                ],
            ),
            other => other.to_string(),
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsError>
impl From<calamine::XlsError> for ImportError {
    fn from(err: calamine::XlsError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImporterResult<T> = Result<T, ImportError>;

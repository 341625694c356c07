// ==========================================
// 法规条文语料库 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 按 SQLite 扩展错误码区分约束类型，不解析错误文本
// ==========================================

use rusqlite::ffi;
use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} ({id})")]
    NotFound { entity: String, id: String },

    #[error("数据库不可用: {0}")]
    DatabaseConnectionError(String),

    #[error("连接锁已损坏: {0}")]
    LockError(String),

    #[error("事务提交失败: {0}")]
    DatabaseTransactionError(String),

    #[error("SQL 执行失败: {0}")]
    DatabaseQueryError(String),

    // ===== 约束 =====
    /// 例如同一对条文的重复引用
    #[error("重复记录: {0}")]
    UniqueConstraintViolation(String),

    /// 例如引用指向不存在的条文
    #[error("关联记录不存在: {0}")]
    ForeignKeyViolation(String),

    // ===== 列值 =====
    #[error("列 {field} 的值无法解析: {message}")]
    FieldValueError { field: String, message: String },

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl RepositoryError {
    /// 是否为约束冲突（重复/外键）
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::UniqueConstraintViolation(_) | RepositoryError::ForeignKeyViolation(_)
        )
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        let rusqlite::Error::SqliteFailure(code, detail) = &err else {
            return match err {
                rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                    entity: "row".to_string(),
                    id: "-".to_string(),
                },
                other => RepositoryError::DatabaseQueryError(other.to_string()),
            };
        };

        let message = detail.clone().unwrap_or_else(|| code.to_string());
        match code.code {
            ErrorCode::ConstraintViolation => match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    RepositoryError::UniqueConstraintViolation(message)
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => RepositoryError::ForeignKeyViolation(message),
                _ => RepositoryError::DatabaseQueryError(message),
            },
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen => {
                RepositoryError::DatabaseConnectionError(message)
            }
            _ => RepositoryError::DatabaseQueryError(message),
        }
    }
}

// 关键词列以 JSON 数组存储
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::FieldValueError {
            field: "keywords".to_string(),
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

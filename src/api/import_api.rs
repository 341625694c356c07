// ==========================================
// 条文导入 API
// ==========================================
// 职责: 封装条文导入相关功能（选择法规 → 导入文件 → 返回汇总）
// 说明: 每次调用独立打开连接，仓储与配置共享同一连接
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::article::ImportContext;
use crate::domain::import_report::ImportResult;
use crate::domain::types::SheetFormat;
use crate::i18n::{t, t_with_args};
use crate::importer::{
    parse_and_validate, ArticleImporter, ArticleImporterImpl, ProgressListener, UniversalFileParser,
};
use crate::repository::{ArticleImportRepository, ArticleImportRepositoryImpl};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{info, instrument, warn};

type DefaultImporter = ArticleImporterImpl<ArticleImportRepositoryImpl, ConfigManager>;

/// 导入 API 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 导入汇总（条文 + 引用）
    pub result: ImportResult,
    /// 文件数据行数
    pub total_rows: usize,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
    /// 来源文件名
    pub file_name: String,
}

/// 预检结果（只解析与校验，不写库）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// 合法记录数
    pub records: usize,
    /// 引用总数
    pub links: usize,
}

/// 导入 API
pub struct ImportApi {
    db_path: String,
}

impl ImportApi {
    /// 创建新的 ImportApi 实例
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    fn create_importer(&self) -> ApiResult<DefaultImporter> {
        let conn = open_sqlite_connection(&self.db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn).map_err(|e| ApiError::DatabaseError(e.to_string()))?;
        let conn = Arc::new(Mutex::new(conn));

        let repo = ArticleImportRepositoryImpl::from_connection(conn.clone())?;
        let config = ConfigManager::from_connection(conn)
            .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;

        Ok(ArticleImporterImpl::new(repo, config))
    }

    /// 法规代码 → 启用中的法规 ID
    async fn resolve_law_code(
        &self,
        importer: &DefaultImporter,
        law_code: &str,
    ) -> ApiResult<String> {
        let code = law_code.trim();
        if code.is_empty() {
            return Err(ApiError::ImportRejected(t("import.missing_parent")));
        }

        importer
            .repository()
            .list_active_law_codes()
            .await?
            .into_iter()
            .find(|lc| lc.code.trim() == code)
            .map(|lc| lc.id)
            .ok_or_else(|| {
                warn!(law_code = code, "目标法规不存在或未启用");
                ApiError::ImportRejected(t_with_args("import.parent_not_active", &[("code", code)]))
            })
    }

    /// 导入条文文件
    ///
    /// # 参数
    /// - file_path: 文件路径（.xlsx/.xls/.csv）
    /// - law_code: 目标法规代码（如 "KUHP"）
    /// - actor_id: 操作人
    /// - progress: 进度监听
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入汇总（可能部分失败，见 result.partial）
    /// - Err(ApiError): 整批被拒绝或存储不可用，未写入任何数据
    #[instrument(skip(self, progress))]
    pub async fn import_file(
        &self,
        file_path: &str,
        law_code: &str,
        actor_id: &str,
        progress: &dyn ProgressListener,
    ) -> ApiResult<ImportApiResponse> {
        let (bytes, format) = UniversalFileParser.read_file(file_path)?;
        let file_name = Path::new(file_path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.to_string());

        self.import_bytes(&bytes, format, &file_name, law_code, actor_id, progress)
            .await
    }

    /// 导入内存中的文件内容
    #[instrument(skip(self, bytes, progress), fields(size = bytes.len()))]
    pub async fn import_bytes(
        &self,
        bytes: &[u8],
        format: SheetFormat,
        file_name: &str,
        law_code: &str,
        actor_id: &str,
        progress: &dyn ProgressListener,
    ) -> ApiResult<ImportApiResponse> {
        let start_time = Instant::now();

        if actor_id.trim().is_empty() {
            return Err(ApiError::InvalidInput(t_with_args(
                "import.rejected",
                &[("reason", "actor_id")],
            )));
        }

        let importer = self.create_importer()?;
        let law_code_id = self.resolve_law_code(&importer, law_code).await?;

        let records = parse_and_validate(bytes, format)?;
        let total_rows = records.len();

        let ctx = ImportContext::new(actor_id.trim(), law_code_id);
        let result = importer.import_records(records, &ctx, progress).await?;

        let elapsed_ms = start_time.elapsed().as_millis() as i64;
        info!(
            file_name,
            law_code,
            total_rows,
            partial = result.partial,
            elapsed_ms,
            "文件导入完成"
        );

        Ok(ImportApiResponse {
            result,
            total_rows,
            elapsed_ms,
            file_name: file_name.to_string(),
        })
    }

    /// 预检文件（解析 + 行校验，不打开数据库）
    pub async fn validate_file(&self, file_path: &str) -> ApiResult<ValidationSummary> {
        let (bytes, format) = UniversalFileParser.read_file(file_path)?;
        let records = parse_and_validate(&bytes, format)?;

        Ok(ValidationSummary {
            records: records.len(),
            links: records.iter().map(|r| r.links.len()).sum(),
        })
    }
}

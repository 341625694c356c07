// ==========================================
// 法规条文语料库 - 条文导入 Repository Trait
// ==========================================
// 职责: 定义导入相关数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::article::{ImportRecord, LawCodeRef, NewArticleLink};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ArticleImportRepository Trait
// ==========================================
// 用途: 条文批量导入所需的全部协作接口
// 实现者: ArticleImportRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait ArticleImportRepository: Send + Sync {
    // ===== 法规查询 =====

    /// 列出全部启用中的法规（id, code）
    async fn list_active_law_codes(&self) -> RepositoryResult<Vec<LawCodeRef>>;

    // ===== 条文写入 =====

    /// 创建单条条文
    ///
    /// # 参数
    /// - record: 已校验的导入记录
    /// - law_code_id: 所属法规 ID
    /// - actor_id: 操作人
    ///
    /// # 返回
    /// - Ok(String): 新条文 ID
    /// - Err: 约束违反、数据库错误等（由调用方记为单项失败）
    async fn create_article(
        &self,
        record: &ImportRecord,
        law_code_id: &str,
        actor_id: &str,
    ) -> RepositoryResult<String>;

    // ===== 引用写入 =====

    /// 批量创建条文引用（整批原子：要么全部成功，要么全部失败）
    ///
    /// # 返回
    /// - Ok(usize): 写入条数
    /// - Err: 整批失败（不报告批内逐行结果）
    async fn bulk_create_links(&self, links: &[NewArticleLink]) -> RepositoryResult<usize>;

    // ===== 点查 =====

    /// 按（法规 ID, 条文编号）查找启用中的条文
    ///
    /// # 返回
    /// - Ok(Some(id)): 找到
    /// - Ok(None): 不存在（预期结果，不是错误）
    async fn find_active_article(
        &self,
        law_code_id: &str,
        number: &str,
    ) -> RepositoryResult<Option<String>>;
}

// ==========================================
// 法规条文语料库 - 标识解析器
// ==========================================
// 职责: 人类可读标识 → 内部 ID
// - 法规代码: 预取启用中法规后本地查表
// - 目标条文: (法规 ID, 条文编号) 逐次点查存储
// 说明: 未找到是预期结果（None），不是错误
// ==========================================

use crate::repository::{ArticleImportRepository, RepositoryResult};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

pub struct IdentifierResolver<'a, R>
where
    R: ArticleImportRepository + ?Sized,
{
    repo: &'a R,
    law_codes: HashMap<String, String>, // code → id
    prefetched: bool,
}

impl<'a, R> IdentifierResolver<'a, R>
where
    R: ArticleImportRepository + ?Sized,
{
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            law_codes: HashMap::new(),
            prefetched: false,
        }
    }

    /// 预取全部启用中的法规（阶段 2 之前必须调用一次）
    #[instrument(skip(self))]
    pub async fn prefetch(&mut self) -> RepositoryResult<usize> {
        let law_codes = self.repo.list_active_law_codes().await?;
        self.law_codes = law_codes
            .into_iter()
            .map(|lc| (lc.code.trim().to_string(), lc.id))
            .collect();
        self.prefetched = true;

        info!(count = self.law_codes.len(), "法规代码预取完成");
        Ok(self.law_codes.len())
    }

    pub fn is_prefetched(&self) -> bool {
        self.prefetched
    }

    /// 法规代码 → 法规 ID（精确匹配）
    pub fn resolve_document(&self, code: &str) -> Option<&str> {
        debug_assert!(self.prefetched, "resolve_document called before prefetch");
        self.law_codes.get(code.trim()).map(String::as_str)
    }

    /// (法规 ID, 条文编号) → 条文 ID（点查存储，可命中历史导入的条文）
    pub async fn resolve_target(
        &self,
        law_code_id: &str,
        number: &str,
    ) -> RepositoryResult<Option<String>> {
        let found = self.repo.find_active_article(law_code_id, number).await?;
        if found.is_none() {
            debug!(law_code_id, number, "目标条文不存在");
        }
        Ok(found)
    }
}

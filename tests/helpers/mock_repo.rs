// ==========================================
// Mock 仓储实现 - 用于导入引擎测试
// ==========================================
// 可注入: 条文创建失败、引用块写入失败、预取失败
// ==========================================

use async_trait::async_trait;
use legal_corpus_import::domain::article::{ImportRecord, LawCodeRef, NewArticleLink};
use legal_corpus_import::repository::{
    ArticleImportRepository, RepositoryError, RepositoryResult,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// 已创建的条文
#[derive(Debug, Clone)]
pub struct CreatedArticle {
    pub id: String,
    pub law_code_id: String,
    pub number: String,
    pub actor_id: String,
}

#[derive(Debug, Default)]
struct MockState {
    created: Vec<CreatedArticle>,
    links: Vec<NewArticleLink>,
    bulk_calls: Vec<usize>,
}

/// Mock 仓储结构
#[derive(Debug, Default)]
pub struct MockRepo {
    law_codes: Vec<LawCodeRef>,
    existing: HashMap<(String, String), String>,
    fail_numbers: HashSet<String>,
    fail_chunks: HashSet<usize>,
    fail_prefetch: bool,
    state: Mutex<MockState>,
}

impl MockRepo {
    /// 启用中的法规: KUHP(uu-kuhp), UU-ITE(uu-ite)
    pub fn new() -> Self {
        Self::default()
            .with_law_code("uu-kuhp", "KUHP")
            .with_law_code("uu-ite", "UU-ITE")
    }

    pub fn with_law_code(mut self, id: &str, code: &str) -> Self {
        self.law_codes.push(LawCodeRef {
            id: id.to_string(),
            code: code.to_string(),
        });
        self
    }

    /// 预置历史条文
    pub fn with_existing(mut self, law_code_id: &str, number: &str, id: &str) -> Self {
        self.existing
            .insert((law_code_id.to_string(), number.to_string()), id.to_string());
        self
    }

    /// 指定编号的条文创建失败
    pub fn failing_article(mut self, number: &str) -> Self {
        self.fail_numbers.insert(number.to_string());
        self
    }

    /// 第 n 次（从 0 开始）引用块写入失败
    pub fn failing_chunk(mut self, call_index: usize) -> Self {
        self.fail_chunks.insert(call_index);
        self
    }

    pub fn failing_prefetch(mut self) -> Self {
        self.fail_prefetch = true;
        self
    }

    pub fn created(&self) -> Vec<CreatedArticle> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn links(&self) -> Vec<NewArticleLink> {
        self.state.lock().unwrap().links.clone()
    }

    /// 每次引用块写入的大小
    pub fn bulk_calls(&self) -> Vec<usize> {
        self.state.lock().unwrap().bulk_calls.clone()
    }
}

#[async_trait]
impl ArticleImportRepository for MockRepo {
    async fn list_active_law_codes(&self) -> RepositoryResult<Vec<LawCodeRef>> {
        if self.fail_prefetch {
            return Err(RepositoryError::DatabaseConnectionError(
                "store offline".to_string(),
            ));
        }
        Ok(self.law_codes.clone())
    }

    async fn create_article(
        &self,
        record: &ImportRecord,
        law_code_id: &str,
        actor_id: &str,
    ) -> RepositoryResult<String> {
        if self.fail_numbers.contains(&record.number) {
            return Err(RepositoryError::DatabaseQueryError(format!(
                "cannot insert {}",
                record.number
            )));
        }

        let mut state = self.state.lock().unwrap();
        let id = format!("art-{}", state.created.len() + 1);
        state.created.push(CreatedArticle {
            id: id.clone(),
            law_code_id: law_code_id.to_string(),
            number: record.number.clone(),
            actor_id: actor_id.to_string(),
        });
        Ok(id)
    }

    async fn bulk_create_links(&self, links: &[NewArticleLink]) -> RepositoryResult<usize> {
        let mut state = self.state.lock().unwrap();
        let call_index = state.bulk_calls.len();
        state.bulk_calls.push(links.len());

        if self.fail_chunks.contains(&call_index) {
            return Err(RepositoryError::DatabaseTransactionError(format!(
                "chunk {} rejected",
                call_index
            )));
        }
        state.links.extend_from_slice(links);
        Ok(links.len())
    }

    async fn find_active_article(
        &self,
        law_code_id: &str,
        number: &str,
    ) -> RepositoryResult<Option<String>> {
        let state = self.state.lock().unwrap();
        let created = state
            .created
            .iter()
            .find(|a| a.law_code_id == law_code_id && a.number == number)
            .map(|a| a.id.clone());

        Ok(created.or_else(|| {
            self.existing
                .get(&(law_code_id.to_string(), number.to_string()))
                .cloned()
        }))
    }
}

// ==========================================
// 法规条文语料库 - 条文导入 Repository 实现
// ==========================================
// 职责: 实现导入相关数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::article::{ImportRecord, LawCodeRef, NewArticleLink};
use crate::repository::article_import_repo::ArticleImportRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

// ==========================================
// ArticleImportRepositoryImpl
// ==========================================
pub struct ArticleImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ArticleImportRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（会再次应用统一 PRAGMA，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中批量插入引用
    fn insert_links_tx(tx: &Transaction, links: &[NewArticleLink]) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO article_links (
                id, source_article_id, target_article_id, note, created_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )?;

        let now = Utc::now().to_rfc3339();
        let mut count = 0;
        for link in links {
            stmt.execute(params![
                Uuid::new_v4().to_string(),
                link.source_id,
                link.target_id,
                link.note,
                link.actor_id,
                now,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    // ===== 维护与查询辅助 =====

    /// 新增法规（供初始化数据与测试使用）
    pub fn insert_law_code(
        &self,
        code: &str,
        name: Option<&str>,
        is_active: bool,
    ) -> RepositoryResult<String> {
        let conn = self.lock()?;
        let id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO law_codes (id, code, name, is_active) VALUES (?1, ?2, ?3, ?4)",
            params![id, code, name, is_active as i32],
        )?;
        Ok(id)
    }

    /// 统计某法规下启用中的条文数
    pub fn count_articles(&self, law_code_id: &str) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM articles WHERE law_code_id = ?1 AND deleted_at IS NULL",
            params![law_code_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// 统计引用总数
    pub fn count_links(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM article_links", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// 读取条文关键词
    pub fn get_keywords(&self, article_id: &str) -> RepositoryResult<Vec<String>> {
        let conn = self.lock()?;
        let raw: String = conn.query_row(
            "SELECT keywords FROM articles WHERE id = ?1",
            params![article_id],
            |row| row.get(0),
        )?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl ArticleImportRepository for ArticleImportRepositoryImpl {
    async fn list_active_law_codes(&self) -> RepositoryResult<Vec<LawCodeRef>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, code FROM law_codes WHERE is_active = 1 AND deleted_at IS NULL ORDER BY code",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(LawCodeRef {
                id: row.get(0)?,
                code: row.get(1)?,
            })
        })?;

        let mut law_codes = Vec::new();
        for row in rows {
            law_codes.push(row?);
        }
        Ok(law_codes)
    }

    async fn create_article(
        &self,
        record: &ImportRecord,
        law_code_id: &str,
        actor_id: &str,
    ) -> RepositoryResult<String> {
        let keywords_json = serde_json::to_string(&record.keywords)?;
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO articles (
                id, law_code_id, number, title, body, note, keywords,
                created_by, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                id,
                law_code_id,
                record.number,
                record.title,
                record.body,
                record.note,
                keywords_json,
                actor_id,
                now,
                now,
            ],
        )?;

        debug!(article_id = %id, number = %record.number, "条文已创建");
        Ok(id)
    }

    async fn bulk_create_links(&self, links: &[NewArticleLink]) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;

        // 出错时 tx 被 drop，整批回滚
        let count = Self::insert_links_tx(&tx, links)?;

        tx.commit()?;
        Ok(count)
    }

    async fn find_active_article(
        &self,
        law_code_id: &str,
        number: &str,
    ) -> RepositoryResult<Option<String>> {
        let conn = self.lock()?;
        let id = conn
            .query_row(
                r#"
                SELECT id FROM articles
                WHERE law_code_id = ?1 AND number = ?2 AND deleted_at IS NULL
                ORDER BY created_at, rowid
                LIMIT 1
                "#,
                params![law_code_id, number],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn setup_repo() -> ArticleImportRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ArticleImportRepositoryImpl::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn record(number: &str) -> ImportRecord {
        ImportRecord {
            number: number.to_string(),
            title: None,
            body: "Isi".to_string(),
            note: None,
            keywords: vec!["x".to_string(), "y".to_string()],
            links: Vec::new(),
            row_number: 1,
        }
    }

    #[tokio::test]
    async fn test_list_active_law_codes_skips_inactive() {
        let repo = setup_repo();
        repo.insert_law_code("KUHP", Some("Kitab Undang-Undang Hukum Pidana"), true)
            .unwrap();
        repo.insert_law_code("LAMA", None, false).unwrap();

        let codes = repo.list_active_law_codes().await.unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code, "KUHP");
    }

    #[tokio::test]
    async fn test_create_and_find_article() {
        let repo = setup_repo();
        let uu = repo.insert_law_code("KUHP", None, true).unwrap();

        let id = repo.create_article(&record("340"), &uu, "admin").await.unwrap();
        assert_eq!(repo.find_active_article(&uu, "340").await.unwrap(), Some(id.clone()));
        assert_eq!(repo.find_active_article(&uu, "341").await.unwrap(), None);
        assert_eq!(repo.get_keywords(&id).unwrap(), vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_create_article_unknown_law_code_fails() {
        let repo = setup_repo();
        let result = repo.create_article(&record("1"), "missing", "admin").await;
        assert!(matches!(result, Err(RepositoryError::ForeignKeyViolation(_))));
    }

    #[tokio::test]
    async fn test_bulk_create_links_is_atomic() {
        let repo = setup_repo();
        let uu = repo.insert_law_code("KUHP", None, true).unwrap();
        let a = repo.create_article(&record("1"), &uu, "admin").await.unwrap();
        let b = repo.create_article(&record("2"), &uu, "admin").await.unwrap();

        let link = |s: &str, t: &str| NewArticleLink {
            source_id: s.to_string(),
            target_id: t.to_string(),
            note: None,
            actor_id: "admin".to_string(),
        };

        // 批内重复 → 唯一约束违反 → 整批回滚
        let result = repo
            .bulk_create_links(&[link(&a, &b), link(&b, &a), link(&a, &b)])
            .await;
        assert!(matches!(result, Err(RepositoryError::UniqueConstraintViolation(_))));
        assert_eq!(repo.count_links().unwrap(), 0);

        assert_eq!(repo.bulk_create_links(&[link(&a, &b)]).await.unwrap(), 1);
        assert_eq!(repo.count_links().unwrap(), 1);
    }
}

// ==========================================
// 法规条文语料库 - 条文批量导入器实现
// ==========================================
// 职责: 整合导入流程，从表格到数据库
// 流程: 解析 → 校验 → 法规预取 → 阶段 1 建条文 → 阶段 2 解析并写引用 → 汇总
// ==========================================
// 失败策略:
// - 解析/校验/上下文缺失/预取失败: 整批中止，不写入任何数据
// - 阶段 1 单条失败: 记录后继续
// - 阶段 2 解析失败: 记录后继续；分块写入失败: 整块记为失败后继续
// - 不回滚: 阶段 1 已创建的条文不会因后续失败被删除
// ==========================================

use crate::config::{ImportConfigReader, DEFAULT_LINK_CHUNK_SIZE};
use crate::domain::article::{IdentifierMap, ImportContext, ImportRecord, NewArticleLink};
use crate::domain::import_report::{ImportResult, ItemOutcome, LinkOutcome};
use crate::domain::types::{ImportPhase, SheetFormat};
use crate::i18n::t_with_args;
use crate::importer::article_importer_trait::{ArticleImporter, RecordValidator};
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::identifier_resolver::IdentifierResolver;
use crate::importer::progress::{percent_of, ImportProgress, ProgressListener};
use crate::importer::record_validator::ArticleRecordValidator;
use crate::importer::result_aggregator::ResultAggregator;
use crate::repository::ArticleImportRepository;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// 已解析、待写入的引用
#[derive(Debug, Clone)]
struct PendingLink {
    link: NewArticleLink,
    source: String, // 源条文编号
    target: String, // "法规代码 条文编号"
}

impl PendingLink {
    fn created(&self) -> LinkOutcome {
        LinkOutcome::Created {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }

    fn failed(&self, message: &str) -> LinkOutcome {
        LinkOutcome::Failed {
            source: self.source.clone(),
            target: self.target.clone(),
            message: message.to_string(),
        }
    }
}

// ==========================================
// ArticleImporterImpl - 条文批量导入器实现
// ==========================================
pub struct ArticleImporterImpl<R, C>
where
    R: ArticleImportRepository,
    C: ImportConfigReader,
{
    // 数据访问层
    repo: R,

    // 配置读取器
    config: C,
}

impl<R, C> ArticleImporterImpl<R, C>
where
    R: ArticleImportRepository,
    C: ImportConfigReader,
{
    /// 创建新的导入器实例
    ///
    /// # 参数
    /// - repo: 导入数据仓储
    /// - config: 配置读取器
    pub fn new(repo: R, config: C) -> Self {
        Self { repo, config }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    async fn link_chunk_size(&self) -> usize {
        match self.config.get_link_chunk_size().await {
            Ok(size) if size > 0 => size,
            Ok(_) => DEFAULT_LINK_CHUNK_SIZE,
            Err(e) => {
                warn!(error = %e, "读取分块大小失败，使用默认值");
                DEFAULT_LINK_CHUNK_SIZE
            }
        }
    }

    /// 阶段 1: 逐条创建条文
    ///
    /// # 返回
    /// - 与 records 等长的逐条结果
    /// - 本批次标识映射
    async fn run_phase1(
        &self,
        records: &[ImportRecord],
        ctx: &ImportContext,
        progress: &dyn ProgressListener,
    ) -> (Vec<ItemOutcome>, IdentifierMap) {
        let total = records.len();
        let mut outcomes = Vec::with_capacity(total);
        let mut identifier_map = IdentifierMap::new();

        for (idx, record) in records.iter().enumerate() {
            let outcome = match self
                .repo
                .create_article(record, &ctx.parent_document_id, &ctx.actor_id)
                .await
            {
                Ok(id) => {
                    if let Some(previous) =
                        identifier_map.insert(&ctx.parent_document_id, &record.number, id.clone())
                    {
                        warn!(
                            number = %record.number,
                            previous_id = %previous,
                            row = record.row_number,
                            "同一文件内条文编号重复，引用将指向后创建的条文"
                        );
                    }
                    ItemOutcome::Created {
                        number: record.number.clone(),
                        id,
                    }
                }
                Err(e) => {
                    warn!(
                        number = %record.number,
                        row = record.row_number,
                        error = %e,
                        "条文创建失败"
                    );
                    ItemOutcome::Failed {
                        number: record.number.clone(),
                        message: t_with_args("article.create_failed", &[("error", &e.to_string())]),
                    }
                }
            };
            outcomes.push(outcome);

            progress.on_progress(ImportProgress::new(
                ImportPhase::Phase1Running,
                percent_of(idx + 1, total),
            ));
        }

        (outcomes, identifier_map)
    }

    /// 阶段 2a: 解析引用（不写入）
    ///
    /// # 返回
    /// - 待写入引用
    /// - 解析失败的引用结果
    async fn resolve_links(
        &self,
        records: &[ImportRecord],
        item_outcomes: &[ItemOutcome],
        identifier_map: &IdentifierMap,
        resolver: &IdentifierResolver<'_, R>,
        ctx: &ImportContext,
    ) -> (Vec<PendingLink>, Vec<LinkOutcome>) {
        let mut pending = Vec::new();
        let mut failures = Vec::new();

        for (record, outcome) in records.iter().zip(item_outcomes) {
            if !record.has_links() {
                continue;
            }

            // 源条文创建失败：其引用静默跳过，不计入引用失败
            if outcome.created_id().is_none() {
                debug!(
                    number = %record.number,
                    links = record.links.len(),
                    "源条文未创建，跳过引用"
                );
                continue;
            }
            let Some(source_id) = identifier_map.get(&ctx.parent_document_id, &record.number)
            else {
                continue;
            };

            for link in &record.links {
                let target = link.target_label();
                let failed = |message: String| LinkOutcome::Failed {
                    source: record.number.clone(),
                    target: target.clone(),
                    message,
                };

                // 1. 法规代码 → 法规 ID（预取表）
                let Some(law_code_id) = resolver.resolve_document(&link.target_law_code) else {
                    failures.push(failed(t_with_args(
                        "link.law_code_not_found",
                        &[("code", &link.target_law_code)],
                    )));
                    continue;
                };

                // 2. (法规 ID, 条文编号) → 条文 ID（点查存储）
                match resolver.resolve_target(law_code_id, &link.target_number).await {
                    Ok(Some(target_id)) => pending.push(PendingLink {
                        link: NewArticleLink {
                            source_id: source_id.to_string(),
                            target_id,
                            note: link.note.clone(),
                            actor_id: ctx.actor_id.clone(),
                        },
                        source: record.number.clone(),
                        target: target.clone(),
                    }),
                    Ok(None) => failures.push(failed(t_with_args(
                        "link.target_not_found",
                        &[
                            ("code", &link.target_law_code),
                            ("number", &link.target_number),
                        ],
                    ))),
                    Err(e) => {
                        warn!(target = %target, error = %e, "目标条文查询失败");
                        failures.push(failed(t_with_args(
                            "link.lookup_failed",
                            &[("error", &e.to_string())],
                        )));
                    }
                }
            }
        }

        (pending, failures)
    }

    /// 阶段 2b: 按块顺序写入引用
    ///
    /// 块写入失败时，该块内全部引用记为失败（共享同一错误信息）
    async fn flush_links(
        &self,
        pending: &[PendingLink],
        chunk_size: usize,
        progress: &dyn ProgressListener,
    ) -> Vec<LinkOutcome> {
        let total = pending.len();
        let mut outcomes = Vec::with_capacity(total);

        for (chunk_idx, chunk) in pending.chunks(chunk_size.max(1)).enumerate() {
            let chunk_start = chunk_idx * chunk_size.max(1);
            progress.on_progress(ImportProgress::new(
                ImportPhase::Phase2Running,
                percent_of(chunk_start, total),
            ));

            let links: Vec<NewArticleLink> = chunk.iter().map(|p| p.link.clone()).collect();
            match self.repo.bulk_create_links(&links).await {
                Ok(count) => {
                    debug!(chunk = chunk_idx, count, "引用块写入完成");
                    outcomes.extend(chunk.iter().map(PendingLink::created));
                }
                Err(e) => {
                    error!(
                        chunk = chunk_idx,
                        size = chunk.len(),
                        error = %e,
                        "引用块写入失败"
                    );
                    let message = t_with_args("link.chunk_failed", &[("error", &e.to_string())]);
                    outcomes.extend(chunk.iter().map(|p| p.failed(&message)));
                }
            }
        }

        outcomes
    }
}

/// 解析并校验（不触碰存储，预检与导入共用）
pub fn parse_and_validate(
    bytes: &[u8],
    format: SheetFormat,
) -> ImporterResult<Vec<ImportRecord>> {
    let rows = UniversalFileParser.parse(bytes, format)?;
    debug!(total_rows = rows.len(), "文件解析完成");

    ArticleRecordValidator::default()
        .validate_all(&rows)
        .map_err(|e| {
            warn!(row = ?e.row(), error = %e, "行校验失败，整文件拒绝");
            e
        })
}

/// 校验调用方上下文
fn check_context(ctx: &ImportContext) -> ImporterResult<()> {
    if ctx.parent_document_id.trim().is_empty() {
        return Err(ImportError::MissingParentDocument);
    }
    if ctx.actor_id.trim().is_empty() {
        return Err(ImportError::MissingActor);
    }
    Ok(())
}

#[async_trait]
impl<R, C> ArticleImporter for ArticleImporterImpl<R, C>
where
    R: ArticleImportRepository,
    C: ImportConfigReader,
{
    #[instrument(
        skip(self, bytes, format, ctx, progress),
        fields(format = ?format, size = bytes.len())
    )]
    async fn import_bytes(
        &self,
        bytes: &[u8],
        format: SheetFormat,
        ctx: &ImportContext,
        progress: &dyn ProgressListener,
    ) -> ImporterResult<ImportResult> {
        check_context(ctx)?;

        let records = parse_and_validate(bytes, format)?;
        info!(records = records.len(), "文件解析与校验通过");

        self.import_records(records, ctx, progress).await
    }

    #[instrument(skip(self, records, ctx, progress), fields(total = records.len()))]
    async fn import_records(
        &self,
        records: Vec<ImportRecord>,
        ctx: &ImportContext,
        progress: &dyn ProgressListener,
    ) -> ImporterResult<ImportResult> {
        check_context(ctx)?;
        if records.is_empty() {
            return Err(ImportError::EmptySheet);
        }

        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();

        info!(
            batch_id = %batch_id,
            total = records.len(),
            law_code_id = %ctx.parent_document_id,
            actor = %ctx.actor_id,
            "开始导入条文"
        );
        progress.on_progress(ImportProgress::new(ImportPhase::Idle, 0));

        // === 法规预取（失败即中止，此时未写入任何数据）===
        let mut resolver = IdentifierResolver::new(&self.repo);
        resolver.prefetch().await.map_err(|e| {
            error!(error = %e, "法规预取失败");
            ImportError::from(e)
        })?;

        // === 阶段 1: 创建条文 ===
        debug!("阶段 1: 创建条文");
        let (item_outcomes, identifier_map) = self.run_phase1(&records, ctx, progress).await;
        info!(
            created = identifier_map.len(),
            attempted = item_outcomes.len(),
            "阶段 1 完成"
        );

        // === 阶段 2: 解析并写入引用 ===
        debug!("阶段 2: 解析引用");
        progress.on_progress(ImportProgress::new(ImportPhase::Phase2Running, 0));
        let (pending, mut link_outcomes) = self
            .resolve_links(&records, &item_outcomes, &identifier_map, &resolver, ctx)
            .await;

        let chunk_size = self.link_chunk_size().await;
        info!(
            pending = pending.len(),
            unresolved = link_outcomes.len(),
            chunk_size,
            "引用解析完成，开始分块写入"
        );
        link_outcomes.extend(self.flush_links(&pending, chunk_size, progress).await);

        // === 汇总 ===
        let result = ResultAggregator::aggregate(&item_outcomes, &link_outcomes);
        progress.on_progress(ImportProgress::new(ImportPhase::Completed, 100));

        info!(
            batch_id = %batch_id,
            primary_success = result.primary.success,
            primary_failed = result.primary.failed,
            links_success = result.links.success,
            links_failed = result.links.failed,
            partial = result.partial,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "条文导入完成"
        );

        Ok(result)
    }
}

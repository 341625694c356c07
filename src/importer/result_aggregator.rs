// ==========================================
// 法规条文语料库 - 结果汇总器
// ==========================================
// 职责: 阶段 1/2 逐项结果 → ImportResult
// 说明: 纯函数折叠，无副作用
// ==========================================

use crate::domain::import_report::{
    ImportResult, ItemOutcome, LinkError, LinkOutcome, LinkSummary, PrimaryError, PrimarySummary,
};

pub struct ResultAggregator;

impl ResultAggregator {
    /// 汇总阶段 1 结果
    pub fn summarize_primary(outcomes: &[ItemOutcome]) -> PrimarySummary {
        outcomes
            .iter()
            .fold(PrimarySummary::default(), |mut acc, outcome| {
                match outcome {
                    ItemOutcome::Created { .. } => acc.success += 1,
                    ItemOutcome::Failed { number, message } => {
                        acc.failed += 1;
                        acc.errors.push(PrimaryError {
                            identifier_hint: number.clone(),
                            message: message.clone(),
                        });
                    }
                }
                acc
            })
    }

    /// 汇总阶段 2 结果
    pub fn summarize_links(outcomes: &[LinkOutcome]) -> LinkSummary {
        outcomes
            .iter()
            .fold(LinkSummary::default(), |mut acc, outcome| {
                match outcome {
                    LinkOutcome::Created { .. } => acc.success += 1,
                    LinkOutcome::Failed {
                        source,
                        target,
                        message,
                    } => {
                        acc.failed += 1;
                        acc.errors.push(LinkError {
                            source: source.clone(),
                            target: target.clone(),
                            message: message.clone(),
                        });
                    }
                }
                acc
            })
    }

    /// 合并为最终结果（无条件返回）
    pub fn aggregate(primary: &[ItemOutcome], links: &[LinkOutcome]) -> ImportResult {
        let primary = Self::summarize_primary(primary);
        let links = Self::summarize_links(links);
        let partial = primary.failed > 0 || links.failed > 0;

        ImportResult {
            primary,
            links,
            partial,
        }
    }
}

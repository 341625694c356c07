// ==========================================
// 法规条文语料库 - 行校验器实现
// ==========================================
// 职责: 原始行 → ImportRecord（强类型）
// 规则（按顺序）:
// 1. nomor 必填
// 2. isi 必填
// 3. keywords 逗号拆分，保序
// 4. link{1..5}: targetUU 与 targetNomor 必须成对出现
// 策略: 快速失败，任一行不合法即整文件拒绝
// ==========================================

use crate::domain::article::{ImportRecord, LinkRequest, RawRow};
use crate::importer::article_importer_trait::{DataCleaner as _, RecordValidator};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImporterResult};

/// 模板支持的引用列组数
pub const MAX_LINKS_PER_RECORD: usize = 5;

// ==========================================
// 模板列名
// ==========================================
pub mod columns {
    pub const NUMBER: &str = "nomor";
    pub const TITLE: &str = "judul";
    pub const BODY: &str = "isi";
    pub const NOTE: &str = "penjelasan";
    pub const KEYWORDS: &str = "keywords";

    pub fn link_target_code(i: usize) -> String {
        format!("link{}_targetUU", i)
    }

    pub fn link_target_number(i: usize) -> String {
        format!("link{}_targetNomor", i)
    }

    pub fn link_note(i: usize) -> String {
        format!("link{}_keterangan", i)
    }
}

fn cell<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(String::as_str).unwrap_or("")
}

// ==========================================
// ArticleRecordValidator
// ==========================================
pub struct ArticleRecordValidator {
    cleaner: DataCleaner,
}

impl Default for ArticleRecordValidator {
    fn default() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl ArticleRecordValidator {
    fn required(&self, row: &RawRow, column: &str, row_number: usize) -> ImporterResult<String> {
        let value = self.cleaner.clean_text(cell(row, column));
        if value.is_empty() {
            return Err(ImportError::MissingRequiredField {
                row: row_number,
                field: column.to_string(),
            });
        }
        Ok(value)
    }

    fn links(&self, row: &RawRow, row_number: usize) -> ImporterResult<Vec<LinkRequest>> {
        let mut links = Vec::new();
        for i in 1..=MAX_LINKS_PER_RECORD {
            let code_col = columns::link_target_code(i);
            let number_col = columns::link_target_number(i);

            let code = self.cleaner.normalize_null(Some(cell(row, &code_col)));
            let number = self.cleaner.normalize_null(Some(cell(row, &number_col)));

            match (code, number) {
                (None, None) => continue,
                (Some(_), None) => {
                    return Err(ImportError::IncompleteLinkPair {
                        row: row_number,
                        field: code_col,
                        companion: number_col,
                    })
                }
                (None, Some(_)) => {
                    return Err(ImportError::IncompleteLinkPair {
                        row: row_number,
                        field: number_col,
                        companion: code_col,
                    })
                }
                (Some(target_law_code), Some(target_number)) => links.push(LinkRequest {
                    target_law_code,
                    target_number,
                    note: self
                        .cleaner
                        .normalize_null(Some(cell(row, &columns::link_note(i)))),
                }),
            }
        }
        Ok(links)
    }
}

impl RecordValidator for ArticleRecordValidator {
    fn validate(&self, row: &RawRow, row_number: usize) -> ImporterResult<ImportRecord> {
        let number = self.required(row, columns::NUMBER, row_number)?;
        let body = self.required(row, columns::BODY, row_number)?;
        let keywords = self.cleaner.split_keywords(cell(row, columns::KEYWORDS));
        let links = self.links(row, row_number)?;

        Ok(ImportRecord {
            number,
            title: self.cleaner.normalize_null(Some(cell(row, columns::TITLE))),
            body,
            note: self.cleaner.normalize_null(Some(cell(row, columns::NOTE))),
            keywords,
            links,
            row_number,
        })
    }
}

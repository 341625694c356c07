// ==========================================
// 法规条文语料库 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 关键词拆分与拼接
// ==========================================

use crate::importer::article_importer_trait::DataCleaner as DataCleanerTrait;

/// 关键词分隔符
pub const KEYWORD_SEPARATOR: char = ',';

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    fn split_keywords(&self, value: &str) -> Vec<String> {
        value
            .split(KEYWORD_SEPARATOR)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 拼接关键词为模板单元格文本（"a, b, c"）
pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_null() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_null(Some("   ")), None);
        assert_eq!(cleaner.normalize_null(None), None);
        assert_eq!(
            cleaner.normalize_null(Some(" Pembunuhan ")),
            Some("Pembunuhan".to_string())
        );
    }

    #[test]
    fn test_split_keywords_preserves_order() {
        let cleaner = DataCleaner;
        let keywords = cleaner.split_keywords(" pidana, ,pembunuhan ,berencana,, ");
        assert_eq!(keywords, vec!["pidana", "pembunuhan", "berencana"]);
    }

    #[test]
    fn test_split_keywords_empty() {
        let cleaner = DataCleaner;
        assert!(cleaner.split_keywords("").is_empty());
        assert!(cleaner.split_keywords(" , ,").is_empty());
    }

    #[test]
    fn test_keyword_round_trip() {
        let cleaner = DataCleaner;
        let keywords = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let text = join_keywords(&keywords);
        assert_eq!(text, "a, b, c");
        assert_eq!(cleaner.split_keywords(&text), keywords);
    }
}

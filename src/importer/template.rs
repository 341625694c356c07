// ==========================================
// 法规条文语料库 - 导入模板
// ==========================================
// 职责: 生成 CSV 导入模板（表头 + 一行示例）
// 说明: 列名与 record_validator::columns 保持一致
// ==========================================

use crate::importer::data_cleaner::join_keywords;
use crate::importer::error::ImporterResult;
use crate::importer::record_validator::{columns, MAX_LINKS_PER_RECORD};
use std::io::Write;

/// 模板表头（固定列 + 5 组引用列）
pub fn template_headers() -> Vec<String> {
    let mut headers: Vec<String> = [
        columns::NUMBER,
        columns::TITLE,
        columns::BODY,
        columns::NOTE,
        columns::KEYWORDS,
    ]
    .iter()
    .map(|c| c.to_string())
    .collect();

    for i in 1..=MAX_LINKS_PER_RECORD {
        headers.push(columns::link_target_code(i));
        headers.push(columns::link_target_number(i));
        headers.push(columns::link_note(i));
    }
    headers
}

fn example_row(width: usize) -> Vec<String> {
    let keywords = join_keywords(&["pencurian".to_string(), "pidana".to_string()]);
    let mut row = vec![
        "362".to_string(),
        "Pencurian".to_string(),
        "Barang siapa mengambil barang sesuatu, yang seluruhnya atau sebagian kepunyaan orang lain..."
            .to_string(),
        String::new(),
        keywords,
        "KUHP".to_string(),
        "340".to_string(),
        "lihat juga".to_string(),
    ];
    row.resize(width, String::new());
    row
}

/// 写出 CSV 模板
pub fn write_csv_template<W: Write>(writer: W) -> ImporterResult<()> {
    let headers = template_headers();
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(&headers)?;
    csv_writer.write_record(example_row(headers.len()))?;
    csv_writer.flush()?;
    Ok(())
}

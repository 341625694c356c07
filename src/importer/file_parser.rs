// ==========================================
// 法规条文语料库 - 文件解析器实现
// ==========================================
// 阶段 0: 表格字节 → 原始行记录
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 说明: 只做结构转换，不校验列是否存在（交给 RecordValidator）
// ==========================================

use crate::domain::article::{RawRow, SheetRow};
use crate::domain::types::SheetFormat;
use crate::importer::article_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImporterResult};
use calamine::{Data, Reader, Xls, Xlsx};
use csv::ReaderBuilder;
use std::fmt::Display;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// 按表头组装行记录
///
/// - 输入为 (数据行号, 单元格)
/// - 每个非空表头在每行都有值，缺失单元格为 ""
/// - 完全空白的行跳过，行号不重排
/// - 无数据行时返回 EmptySheet
fn assemble_rows<I>(headers: &[String], rows: I) -> ImporterResult<Vec<SheetRow>>
where
    I: IntoIterator<Item = (usize, Vec<String>)>,
{
    let mut records = Vec::new();
    for (row_number, cells) in rows {
        let mut row_map = RawRow::new();
        for (col_idx, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = cells.get(col_idx).cloned().unwrap_or_default();
            row_map.insert(header.clone(), value);
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }

        records.push(SheetRow::new(row_number, row_map));
    }

    if records.is_empty() {
        return Err(ImportError::EmptySheet);
    }

    Ok(records)
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImporterResult<Vec<SheetRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        // 读取表头（Excel 另存的 CSV 可能带 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches(UTF8_BOM).trim().to_string())
            .collect();

        // 只含分隔符的行（",,"）照常计行号；完全空的物理行不构成记录
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            rows.push((idx + 1, record.iter().map(|v| v.trim().to_string()).collect()));
        }

        debug!(columns = headers.len(), rows = rows.len(), "CSV 解析完成");
        assemble_rows(&headers, rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================

/// 单元格转字符串（数值单元格 340.0 显示为 "340"）
fn cell_to_string(cell: &Data) -> String {
    cell.to_string().trim().to_string()
}

/// 读取工作簿第一个工作表
fn read_first_sheet<RS, R>(workbook: &mut R) -> ImporterResult<Vec<SheetRow>>
where
    RS: Read + Seek,
    R: Reader<RS>,
    R::Error: Display,
{
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

    // 提取表头（第一行）
    let mut rows = range.rows();
    let header_row = rows.next().ok_or(ImportError::EmptySheet)?;
    let headers: Vec<String> = header_row.iter().map(cell_to_string).collect();

    let data_rows = rows
        .enumerate()
        .map(|(idx, row)| (idx + 1, row.iter().map(cell_to_string).collect::<Vec<_>>()));

    debug!(sheet = %sheet_name, columns = headers.len(), "Excel 工作表读取完成");
    assemble_rows(&headers, data_rows)
}

/// .xlsx 解析器
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImporterResult<Vec<SheetRow>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;
        read_first_sheet(&mut workbook)
    }
}

/// .xls 解析器
pub struct LegacyExcelParser;

impl FileParser for LegacyExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImporterResult<Vec<SheetRow>> {
        let mut workbook: Xls<_> = Xls::new(Cursor::new(bytes))?;
        read_first_sheet(&mut workbook)
    }
}

// ==========================================
// 通用文件解析器（根据格式自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 按格式解析字节
    pub fn parse(&self, bytes: &[u8], format: SheetFormat) -> ImporterResult<Vec<SheetRow>> {
        match format {
            SheetFormat::Csv => CsvParser.parse_bytes(bytes),
            SheetFormat::Xlsx => ExcelParser.parse_bytes(bytes),
            SheetFormat::Xls => LegacyExcelParser.parse_bytes(bytes),
        }
    }

    /// 根据扩展名识别格式
    pub fn detect_format(&self, path: &Path) -> ImporterResult<SheetFormat> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        SheetFormat::from_extension(ext)
            .ok_or_else(|| ImportError::UnsupportedFormat(ext.to_string()))
    }

    /// 读取文件并返回（内容, 格式）
    pub fn read_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImporterResult<(Vec<u8>, SheetFormat)> {
        let path = file_path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let format = self.detect_format(path)?;
        let bytes = std::fs::read(path)?;
        Ok((bytes, format))
    }

    /// 读取并解析文件
    pub fn parse_file<P: AsRef<Path>>(&self, file_path: P) -> ImporterResult<Vec<SheetRow>> {
        let (bytes, format) = self.read_file(file_path)?;
        self.parse(&bytes, format)
    }
}

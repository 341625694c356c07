// ==========================================
// 法规条文语料库 - 配置层
// ==========================================
// 职责: 系统配置管理与默认数据库路径
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod import_config_trait;

use std::path::PathBuf;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use import_config_trait::{
    ConfigError, ImportConfigReader, DEFAULT_LINK_CHUNK_SIZE, DEFAULT_LOCALE,
};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "LEGAL_CORPUS_DB_PATH";

/// 获取默认数据库路径
///
/// 优先级: 环境变量 LEGAL_CORPUS_DB_PATH > 用户数据目录 > 当前目录
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./legal_corpus.db");

    // 尝试获取用户数据目录
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("legal-corpus");

        // 确保目录存在
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("legal_corpus.db");
        }
    }

    path.to_string_lossy().to_string()
}

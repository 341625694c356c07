// ==========================================
// 法规条文语料库 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

/// 配置读取错误
pub type ConfigError = Box<dyn Error + Send + Sync>;

/// 引用分块写入默认大小
pub const DEFAULT_LINK_CHUNK_SIZE: usize = 50;

/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "id";

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入模块所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    /// 获取引用分块写入大小
    ///
    /// # 默认值
    /// - 50
    async fn get_link_chunk_size(&self) -> Result<usize, ConfigError>;

    /// 获取默认语言
    ///
    /// # 默认值
    /// - "id"
    async fn get_default_locale(&self) -> Result<String, ConfigError>;
}

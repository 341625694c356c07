// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use legal_corpus_import::config::{ConfigError, ImportConfigReader};

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub link_chunk_size: usize,
    pub default_locale: String,
    /// 为 true 时所有读取均返回错误
    pub failing: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            link_chunk_size: 50,
            default_locale: "id".to_string(),
            failing: false,
        }
    }
}

impl MockConfig {
    /// 指定分块大小
    pub fn with_chunk_size(size: usize) -> Self {
        Self {
            link_chunk_size: size,
            ..Self::default()
        }
    }

    /// 读取总是失败的配置
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.failing {
            return Err("config store unavailable".into());
        }
        Ok(())
    }
}

#[async_trait]
impl ImportConfigReader for MockConfig {
    async fn get_link_chunk_size(&self) -> Result<usize, ConfigError> {
        self.check()?;
        Ok(self.link_chunk_size)
    }

    async fn get_default_locale(&self) -> Result<String, ConfigError> {
        self.check()?;
        Ok(self.default_locale.clone())
    }
}

// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持印尼语（产品语言）、英文、中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言代码
pub const SUPPORTED_LOCALES: [&str; 3] = ["id", "en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 规范化语言代码（大小写、下划线不敏感）
///
/// # 示例
/// - "EN" → "en"
/// - "zh_cn" → "zh-CN"
/// - "fr" → None
pub fn normalize_locale(code: &str) -> Option<&'static str> {
    let wanted = code.trim().replace('_', "-");
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|supported| supported.eq_ignore_ascii_case(&wanted))
}

/// 设置语言（不支持的语言代码忽略）
///
/// # 返回
/// - true: 已切换
/// - false: 语言代码不受支持
pub fn set_locale(locale: &str) -> bool {
    match normalize_locale(locale) {
        Some(code) => {
            rust_i18n::set_locale(code);
            true
        }
        None => false,
    }
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use legal_corpus_import::i18n::t;
/// let msg = t("common.success");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use legal_corpus_import::i18n::t_with_args;
/// let msg = t_with_args("link.law_code_not_found", &[("code", "KUHP")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

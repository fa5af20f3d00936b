// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和法文,用于餐盒标签上的打印文字
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 支持的语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "fr"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "fr"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 规范化语言代码,不支持的语言回退到 "en"
pub fn normalize_locale(locale: &str) -> &'static str {
    let lang = locale.trim().split(['-', '_']).next().unwrap_or("").to_lowercase();
    SUPPORTED_LOCALES
        .iter()
        .copied()
        .find(|l| *l == lang)
        .unwrap_or("en")
}

/// 翻译消息（当前语言）
///
/// # 示例
/// ```no_run
/// use meal_delivery_core::i18n::t;
/// let msg = t("label.large");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（指定语言,不修改全局语言）
///
/// # 示例
/// ```no_run
/// use meal_delivery_core::i18n::t_in;
/// let msg = t_in("label.ingredients", "fr");
/// ```
pub fn t_in(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = normalize_locale(locale)).to_string()
}

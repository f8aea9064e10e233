// ============================================================================
// LocSync - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 国际化支持和翻译管理
// 边界:
//   - ✅ 翻译表查找
//   - ✅ 翻译宏定义和实现
//   - ✅ 参数化翻译支持
//   - ❌ 不应包含具体翻译内容
//   - ❌ 不应包含业务逻辑
//
// ============================================================================

pub mod en_us;
pub mod zh_cn;

/// 获取翻译文本
pub fn get_translation(key: &str) -> String {
    // 每次都从配置获取语言设置
    let language = get_language_from_config().unwrap_or_else(|| "en_us".to_string());
    lookup(&language, key)
}

fn lookup(language: &str, key: &str) -> String {
    let translation_data = match language {
        "zh_cn" => zh_cn::TRANSLATIONS,
        _ => en_us::TRANSLATIONS, // 默认使用英文
    };

    translation_data
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
        .unwrap_or_else(|| format!("Unknown translation key: {}", key))
}

/// 从配置获取语言设置，配置未初始化时返回 None
fn get_language_from_config() -> Option<String> {
    crate::models::config::Config::get_language().ok()
}

/// 简单翻译宏
#[macro_export]
macro_rules! t {
    ($key:expr) => {
        $crate::i18n::get_translation($key)
    };
}

/// 带参数翻译的辅助函数
pub fn format_with_args(template: String, args: Vec<String>) -> String {
    let mut result = template;
    let mut cursor = 0;
    for arg in args.iter() {
        // 替换下一个 {} 占位符，跳过已替换的参数内容
        match result[cursor..].find("{}") {
            Some(offset) => {
                let pos = cursor + offset;
                result.replace_range(pos..pos + 2, arg);
                cursor = pos + arg.len();
            }
            None => break,
        }
    }
    result
}

/// 带参数的翻译宏
#[macro_export]
macro_rules! tf {
    ($key:expr, $($arg:expr),*) => {{
        let template = $crate::i18n::get_translation($key);
        let args = vec![$(format!("{}", $arg)),*];
        $crate::i18n::format_with_args(template, args)
    }};
}

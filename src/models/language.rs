// ============================================================================
// LocSync - 语言数据模型
// ============================================================================
//
// 文件: src/models/language.rs
// 职责: 语言集合与远端语言信息的数据结构定义
// 边界:
//   - ✅ 语言代码集合（去重、保序）
//   - ✅ 远端语言统计信息
//   - ✅ 语言过滤器解析
//   - ❌ 不应包含集合对账逻辑
//   - ❌ 不应包含网络请求
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 语言代码集合
///
/// 代码区分大小写，按字符串完全相等比较。插入顺序仅用于展示。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageSet {
    codes: Vec<String>,
}

impl LanguageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入语言代码，已存在时返回 false
    pub fn insert<S: Into<String>>(&mut self, code: S) -> bool {
        let code = code.into();
        if self.contains(&code) {
            return false;
        }
        self.codes.push(code);
        true
    }

    pub fn remove(&mut self, code: &str) -> bool {
        match self.codes.iter().position(|c| c == code) {
            Some(index) => {
                self.codes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code)
    }

    /// 差集：self 中有而 other 中没有的代码
    pub fn difference(&self, other: &LanguageSet) -> LanguageSet {
        self.codes
            .iter()
            .filter(|code| !other.contains(code))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.codes.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = LanguageSet::new();
        for code in iter {
            set.insert(code);
        }
        set
    }
}

impl fmt::Display for LanguageSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codes.join(", "))
    }
}

/// 调用方指定的语言过滤器，为空表示不过滤
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageFilter(LanguageSet);

impl LanguageFilter {
    /// 从命令行参数构建，支持重复参数与逗号分隔
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Self {
        let codes = args
            .iter()
            .flat_map(|arg| arg.as_ref().split(','))
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);
        Self(codes.collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn codes(&self) -> &LanguageSet {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for LanguageFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// 远端项目中的语言及其翻译进度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteLanguage {
    pub name: String,
    pub code: String,
    /// 已翻译词条数
    #[serde(default)]
    pub translations: u64,
    /// 完成百分比
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub updated: Option<String>,
}

impl RemoteLanguage {
    pub fn codes(languages: &[RemoteLanguage]) -> LanguageSet {
        languages.iter().map(|l| l.code.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_set_dedups_and_keeps_order() {
        let set: LanguageSet = ["fr", "en", "fr", "uk"].into_iter().collect();
        assert_eq!(set.to_vec(), vec!["fr", "en", "uk"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_language_set_is_case_sensitive() {
        let set: LanguageSet = ["pt-br"].into_iter().collect();
        assert!(set.contains("pt-br"));
        assert!(!set.contains("pt-BR"));
    }

    #[test]
    fn test_difference() {
        let local: LanguageSet = ["en", "fr", "uk"].into_iter().collect();
        let remote: LanguageSet = ["en", "de"].into_iter().collect();
        assert_eq!(local.difference(&remote).to_vec(), vec!["fr", "uk"]);
        assert_eq!(remote.difference(&local).to_vec(), vec!["de"]);
    }

    #[test]
    fn test_filter_from_args_splits_commas() {
        let filter = LanguageFilter::from_args(&["fr,de", " uk ", ""]);
        assert_eq!(filter.codes().to_vec(), vec!["fr", "de", "uk"]);
        assert!(LanguageFilter::from_args::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_remote_language_deserialization() {
        let json = r#"{"name":"French","code":"fr","translations":300,"percentage":60.5,"updated":"2024-01-15T10:30:00+0000"}"#;
        let language: RemoteLanguage = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(language.code, "fr");
        assert_eq!(language.translations, 300);
        assert!((language.percentage - 60.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remote_language_missing_counts_default_to_zero() {
        let json = r#"{"name":"German","code":"de"}"#;
        let language: RemoteLanguage = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(language.translations, 0);
        assert!(language.updated.is_none());
    }
}

// ============================================================================
// LocSync - 语言对账
// ============================================================================
//
// 文件: src/core/reconciler.rs
// 职责: 本地与远端语言集合的纯计算
// 边界:
//   - ✅ 双向缺失语言计算
//   - ✅ 按方向与过滤器选取目标语言
//   - ✅ 源语言自动推断
//   - ✅ 排除规则应用
//   - ❌ 不应包含任何外部调用
//   - ❌ 不应包含输出逻辑
//
// ============================================================================

use glob::Pattern;

use crate::error::{Result, SyncError};
use crate::models::language::{LanguageFilter, LanguageSet, RemoteLanguage};
use crate::models::outcome::SyncDirection;

/// 两侧缺失的语言（仅供提示）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingLanguages {
    /// 本地有、远端无
    pub missing_remotely: LanguageSet,
    /// 远端有、本地无
    pub missing_locally: LanguageSet,
}

/// 目标语言选取结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSelection {
    pub targets: LanguageSet,
    /// 过滤器中请求、本地存在但远端尚未创建的语言，需先在远端添加
    pub newly_discovered: LanguageSet,
}

pub fn compute_missing(local: &LanguageSet, remote: &LanguageSet) -> MissingLanguages {
    MissingLanguages {
        missing_remotely: local.difference(remote),
        missing_locally: remote.difference(local),
    }
}

/// 选取本次同步要处理的语言
///
/// 下载方向以远端语言为基准，上传方向以本地语言为基准，源语言始终排除。
/// 过滤器中两侧都不存在的代码会导致整体失败，错误中列出两侧可用语言。
pub fn select_targets(
    direction: SyncDirection,
    remote: &LanguageSet,
    local: &LanguageSet,
    source: Option<&str>,
    filter: &LanguageFilter,
) -> Result<TargetSelection> {
    let mut base = match direction {
        SyncDirection::Download => remote.clone(),
        SyncDirection::Upload => local.clone(),
    };
    if let Some(source) = source {
        base.remove(source);
    }

    if filter.is_empty() {
        return Ok(TargetSelection {
            targets: base,
            newly_discovered: LanguageSet::new(),
        });
    }

    let mut selection = TargetSelection::default();
    let mut invalid = LanguageSet::new();

    for code in filter.codes().iter() {
        if Some(code) == source {
            continue;
        }
        if base.contains(code) {
            selection.targets.insert(code);
        } else if direction == SyncDirection::Download && local.contains(code) {
            selection.newly_discovered.insert(code);
            selection.targets.insert(code);
        } else {
            invalid.insert(code);
        }
    }

    if !invalid.is_empty() {
        return Err(SyncError::InvalidLanguages {
            invalid: invalid.to_vec(),
            local: local.to_vec(),
            remote: remote.to_vec(),
        });
    }

    Ok(selection)
}

/// 翻译词条最多的远端语言即为源语言，并列时取第一个
pub fn detect_source_language(remote: &[RemoteLanguage]) -> Result<&RemoteLanguage> {
    remote
        .iter()
        .fold(None::<&RemoteLanguage>, |best, language| match best {
            Some(current) if current.translations >= language.translations => Some(current),
            _ => Some(language),
        })
        .ok_or(SyncError::NoSourceLanguage)
}

/// 移除匹配任一排除模式的语言
pub fn apply_exclusions(set: &LanguageSet, patterns: &[String]) -> Result<LanguageSet> {
    let patterns = patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                SyncError::Configuration(format!("invalid languages.exclude pattern '{}': {}", p, e))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(set
        .iter()
        .filter(|code| !patterns.iter().any(|pattern| pattern.matches(code)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn set(codes: &[&str]) -> LanguageSet {
        codes.iter().copied().collect()
    }

    fn filter(codes: &[&str]) -> LanguageFilter {
        codes.iter().copied().collect()
    }

    fn remote_language(code: &str, translations: u64) -> RemoteLanguage {
        RemoteLanguage {
            name: code.to_uppercase(),
            code: code.to_string(),
            translations,
            percentage: 0.0,
            updated: None,
        }
    }

    #[test]
    fn test_compute_missing() {
        let missing = compute_missing(&set(&["en", "fr", "uk"]), &set(&["en", "de"]));
        assert_eq!(missing.missing_remotely, set(&["fr", "uk"]));
        assert_eq!(missing.missing_locally, set(&["de"]));
    }

    #[test]
    fn test_detect_source_language() {
        let remote = vec![remote_language("fr", 300), remote_language("en", 500), remote_language("uk", 100)];
        assert_eq!(detect_source_language(&remote).expect("Should detect").code, "en");
    }

    #[test]
    fn test_detect_source_language_tie_takes_first() {
        let remote = vec![remote_language("de", 10), remote_language("fr", 50), remote_language("en", 50)];
        assert_eq!(detect_source_language(&remote).expect("Should detect").code, "fr");
    }

    #[test]
    fn test_detect_source_language_empty() {
        assert!(matches!(detect_source_language(&[]), Err(SyncError::NoSourceLanguage)));
    }

    #[test]
    fn test_download_without_filter_is_remote_minus_source() {
        let selection = select_targets(
            SyncDirection::Download,
            &set(&["en", "fr", "de"]),
            &set(&["en"]),
            Some("en"),
            &LanguageFilter::default(),
        )
        .expect("Should select");
        assert_eq!(selection.targets, set(&["fr", "de"]));
        assert!(selection.newly_discovered.is_empty());
    }

    #[test]
    fn test_download_filter_discovers_local_only_languages() {
        let selection = select_targets(
            SyncDirection::Download,
            &set(&["en", "fr"]),
            &set(&["en", "fr", "uk"]),
            Some("en"),
            &filter(&["uk", "fr"]),
        )
        .expect("Should select");
        assert_eq!(selection.targets, set(&["uk", "fr"]));
        assert_eq!(selection.newly_discovered, set(&["uk"]));
    }

    #[test]
    fn test_upload_filter_never_discovers() {
        let err = select_targets(
            SyncDirection::Upload,
            &set(&["en", "de"]),
            &set(&["en", "fr"]),
            None,
            &filter(&["de"]),
        )
        .unwrap_err();
        assert!(matches!(err, SyncError::InvalidLanguages { ref invalid, .. } if invalid == &vec!["de".to_string()]));
    }

    #[test]
    fn test_upload_first_run_scenario() {
        let selection = select_targets(
            SyncDirection::Upload,
            &set(&["en"]),
            &set(&["en", "fr", "uk"]),
            None,
            &filter(&["fr"]),
        )
        .expect("Should select");
        assert_eq!(selection.targets, set(&["fr"]));
        assert!(!selection.targets.contains("uk"));
    }

    #[test]
    fn test_filter_naming_only_the_source_selects_nothing() {
        let selection = select_targets(
            SyncDirection::Download,
            &set(&["en", "fr"]),
            &set(&["en"]),
            Some("en"),
            &filter(&["en"]),
        )
        .expect("Should select");
        assert!(selection.targets.is_empty());
    }

    #[test]
    fn test_invalid_codes_error_lists_both_sides() {
        let err = select_targets(
            SyncDirection::Download,
            &set(&["en", "fr"]),
            &set(&["en", "uk"]),
            Some("en"),
            &filter(&["fr", "xx", "yy"]),
        )
        .unwrap_err();
        match err {
            SyncError::InvalidLanguages { invalid, local, remote } => {
                assert_eq!(invalid, vec!["xx", "yy"]);
                assert_eq!(local, vec!["en", "uk"]);
                assert_eq!(remote, vec!["en", "fr"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_apply_exclusions() {
        let languages = set(&["en", "zh-Hans", "zh-Hant", "fr"]);
        let kept = apply_exclusions(&languages, &["zh-*".to_string()]).expect("Should apply");
        assert_eq!(kept, set(&["en", "fr"]));
        assert_eq!(apply_exclusions(&languages, &[]).expect("Should apply"), languages);
    }

    #[test]
    fn test_apply_exclusions_rejects_bad_pattern() {
        let err = apply_exclusions(&set(&["en"]), &["[".to_string()]).unwrap_err();
        assert!(matches!(err, SyncError::Configuration(_)));
    }

    fn code() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["en", "fr", "de", "uk", "es", "it", "ja", "pt-br", "zh-Hans"])
            .prop_map(str::to_string)
    }

    fn codes() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(code(), 0..8)
    }

    fn direction() -> impl Strategy<Value = SyncDirection> {
        prop_oneof![Just(SyncDirection::Upload), Just(SyncDirection::Download)]
    }

    proptest! {
        #[test]
        fn prop_source_never_targeted(
            direction in direction(),
            remote in codes(),
            local in codes(),
            wanted in codes(),
            source in code(),
        ) {
            let remote: LanguageSet = remote.into_iter().collect();
            let local: LanguageSet = local.into_iter().collect();
            let filter: LanguageFilter = wanted.into_iter().collect();
            if let Ok(selection) = select_targets(direction, &remote, &local, Some(&source), &filter) {
                prop_assert!(!selection.targets.contains(&source));
                prop_assert!(!selection.newly_discovered.contains(&source));
            }
        }

        #[test]
        fn prop_filter_subset_of_base_selects_exactly_filter(
            direction in direction(),
            base in codes(),
            other in codes(),
            picks in prop::collection::vec(any::<prop::sample::Index>(), 1..5),
            source in prop::option::of(code()),
        ) {
            let base: LanguageSet = base.into_iter().collect();
            prop_assume!(!base.is_empty());
            let other: LanguageSet = other.into_iter().collect();
            let wanted: LanguageFilter = picks
                .iter()
                .map(|i| base.to_vec()[i.index(base.len())].clone())
                .collect();

            let (remote, local) = match direction {
                SyncDirection::Download => (&base, &other),
                SyncDirection::Upload => (&other, &base),
            };
            let selection = select_targets(direction, remote, local, source.as_deref(), &wanted)
                .expect("subset filter must be valid");

            let mut expected = wanted.codes().clone();
            if let Some(source) = &source {
                expected.remove(source);
            }
            prop_assert_eq!(selection.targets, expected);
            prop_assert!(selection.newly_discovered.is_empty());
        }

        #[test]
        fn prop_empty_filter_selects_base_minus_source(
            direction in direction(),
            remote in codes(),
            local in codes(),
            source in prop::option::of(code()),
        ) {
            let remote: LanguageSet = remote.into_iter().collect();
            let local: LanguageSet = local.into_iter().collect();
            let empty = LanguageFilter::default();
            let selection = select_targets(direction, &remote, &local, source.as_deref(), &empty)
                .expect("empty filter is always valid");

            let mut expected = match direction {
                SyncDirection::Download => remote.clone(),
                SyncDirection::Upload => local.clone(),
            };
            if let Some(source) = &source {
                expected.remove(source);
            }
            prop_assert_eq!(selection.targets, expected);
            prop_assert!(selection.newly_discovered.is_empty());
        }

        #[test]
        fn prop_unknown_code_is_reported(
            direction in direction(),
            remote in codes(),
            local in codes(),
        ) {
            let remote: LanguageSet = remote.into_iter().collect();
            let local: LanguageSet = local.into_iter().collect();
            let filter: LanguageFilter = ["fr", "tlh"].into_iter().collect();
            match select_targets(direction, &remote, &local, None, &filter) {
                Err(SyncError::InvalidLanguages { invalid, .. }) => {
                    prop_assert!(invalid.contains(&"tlh".to_string()));
                }
                other => prop_assert!(false, "expected InvalidLanguages, got {:?}", other),
            }
        }
    }
}

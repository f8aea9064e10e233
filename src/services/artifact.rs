// ============================================================================
// LocSync - 翻译文件统计
// ============================================================================
//
// 文件: src/services/artifact.rs
// 职责: 导出/下载的翻译文件的统计信息
// 边界:
//   - ✅ 文件大小与词条数统计
//   - ❌ 不应解析或修改文件内容
//
// ============================================================================

use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

static TRANS_UNIT: OnceLock<Regex> = OnceLock::new();

/// 翻译文件统计（仅供参考，不影响流程）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtifactStats {
    pub bytes: u64,
    pub terms: usize,
}

impl ArtifactStats {
    /// 读取文件统计，无法读取时返回 None
    pub fn inspect(path: &Path) -> Option<Self> {
        let content = std::fs::read(path).ok()?;
        Some(Self::from_bytes(&content))
    }

    pub fn from_bytes(content: &[u8]) -> Self {
        let text = String::from_utf8_lossy(content);
        let pattern = TRANS_UNIT.get_or_init(|| Regex::new(r"<trans-unit[\s>]").expect("valid pattern"));
        Self {
            bytes: content.len() as u64,
            terms: pattern.find_iter(&text).count(),
        }
    }
}

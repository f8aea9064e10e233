// ============================================================================
// LocSync - POEditor 客户端
// ============================================================================
//
// 文件: src/services/poeditor.rs
// 职责: POEditor v2 API 的 HTTP 调用
// 边界:
//   - ✅ 请求构建与响应解析
//   - ✅ 响应状态封装转换为错误
//   - ✅ "语言已存在" 的幂等识别
//   - ❌ 不应包含限速与重试逻辑
//   - ❌ 不应包含语言对账逻辑
//
// ============================================================================

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use super::{AddLanguageStatus, DownloadRequest, RemoteService, UploadOptions, UploadStats};
use crate::error::{Result, SyncError};
use crate::models::config::RemoteConfig;
use crate::models::language::RemoteLanguage;

/// 响应状态封装
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: ResponseStatus,
    result: Option<T>,
}

#[derive(Debug, Deserialize)]
struct ResponseStatus {
    status: String,
    #[serde(default)]
    code: StatusCode,
    #[serde(default)]
    message: String,
}

/// 状态码可能是字符串也可能是数字
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StatusCode {
    Text(String),
    Number(i64),
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::Text(String::new())
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusCode::Text(code) => write!(f, "{}", code),
            StatusCode::Number(code) => write!(f, "{}", code),
        }
    }
}

impl ResponseStatus {
    fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// 添加已存在的语言时返回的失败消息
    fn is_already_exists(&self) -> bool {
        self.message.to_lowercase().contains("already")
    }

    fn into_error(self, operation: &str) -> SyncError {
        SyncError::Remote {
            operation: operation.to_string(),
            code: self.code.to_string(),
            message: self.message,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LanguagesResult {
    #[serde(default)]
    languages: Vec<RemoteLanguage>,
}

#[derive(Debug, Deserialize)]
struct ExportResult {
    url: String,
}

/// POEditor API 客户端
pub struct PoEditorClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    project_id: String,
}

impl PoEditorClient {
    pub fn new(
        base_url: &str,
        api_token: impl Into<String>,
        project_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SyncError::Configuration(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            project_id: project_id.into(),
        })
    }

    pub fn from_config(config: &RemoteConfig, api_token: String) -> Result<Self> {
        Self::new(
            &config.base_url,
            api_token,
            config.project_id.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn auth_fields(&self) -> Vec<(&'static str, String)> {
        vec![("api_token", self.api_token.clone()), ("id", self.project_id.clone())]
    }

    /// 发送表单请求，返回原始状态封装
    async fn post_form<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        fields: Vec<(&'static str, String)>,
    ) -> Result<Envelope<T>> {
        let mut form = self.auth_fields();
        form.extend(fields);

        debug!("POST {} ({})", self.endpoint(path), operation);
        let response = self
            .client
            .post(self.endpoint(path))
            .form(&form)
            .send()
            .await
            .map_err(|e| SyncError::network(operation, e))?;

        Self::parse_envelope(operation, response).await
    }

    async fn parse_envelope<T: DeserializeOwned>(
        operation: &str,
        response: reqwest::Response,
    ) -> Result<Envelope<T>> {
        let status = response.status();
        let body = response.text().await.map_err(|e| SyncError::network(operation, e))?;

        serde_json::from_str(&body).map_err(|_| SyncError::Remote {
            operation: operation.to_string(),
            code: status.as_u16().to_string(),
            message: truncate(&body, 200),
        })
    }

    /// 成功状态下取出 result
    fn into_result<T>(operation: &str, envelope: Envelope<T>) -> Result<T> {
        if !envelope.response.is_success() {
            return Err(envelope.response.into_error(operation));
        }
        envelope.result.ok_or_else(|| SyncError::Remote {
            operation: operation.to_string(),
            code: envelope.response.code.to_string(),
            message: "response has no result".to_string(),
        })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

#[async_trait]
impl RemoteService for PoEditorClient {
    async fn list_languages(&self) -> Result<Vec<RemoteLanguage>> {
        let envelope = self
            .post_form::<LanguagesResult>("list languages", "languages/list", Vec::new())
            .await?;
        Ok(Self::into_result("list languages", envelope)?.languages)
    }

    async fn add_language(&self, language: &str) -> Result<AddLanguageStatus> {
        let envelope = self
            .post_form::<serde_json::Value>(
                "add language",
                "languages/add",
                vec![("language", language.to_string())],
            )
            .await?;

        if envelope.response.is_success() {
            Ok(AddLanguageStatus::Added)
        } else if envelope.response.is_already_exists() {
            debug!("language {} already exists remotely", language);
            Ok(AddLanguageStatus::AlreadyExists)
        } else {
            Err(envelope.response.into_error("add language"))
        }
    }

    async fn upload_translations(
        &self,
        language: &str,
        file_name: &str,
        content: Vec<u8>,
        options: &UploadOptions,
    ) -> Result<UploadStats> {
        const OPERATION: &str = "upload";

        let mut form = Form::new();
        for (name, value) in self.auth_fields() {
            form = form.text(name, value);
        }
        let form = form
            .text("updating", options.updating.as_str())
            .text("language", language.to_string())
            .text("overwrite", flag(options.overwrite))
            .text("sync_terms", flag(options.sync_terms))
            .text("fuzzy_trigger", flag(options.fuzzy_trigger))
            .part("file", Part::bytes(content).file_name(file_name.to_string()));

        debug!("POST {} ({} {})", self.endpoint("projects/upload"), OPERATION, language);
        let response = self
            .client
            .post(self.endpoint("projects/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SyncError::network(OPERATION, e))?;

        let envelope = Self::parse_envelope::<UploadStats>(OPERATION, response).await?;
        Self::into_result(OPERATION, envelope)
    }

    async fn download_translations(&self, request: &DownloadRequest<'_>, dest: &Path) -> Result<()> {
        const OPERATION: &str = "download";

        let mut fields = vec![
            ("language", request.language.to_string()),
            ("type", request.file_type.to_string()),
        ];
        if !request.filters.is_empty() {
            let filters = serde_json::to_string(request.filters).unwrap_or_default();
            fields.push(("filters", filters));
        }
        if let Some(reference) = request.reference {
            fields.push(("source_language", reference.to_string()));
        }

        let envelope = self
            .post_form::<ExportResult>(OPERATION, "projects/export", fields)
            .await?;
        let export = Self::into_result(OPERATION, envelope)?;

        debug!("GET {}", export.url);
        let response = self
            .client
            .get(&export.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SyncError::network(OPERATION, e))?;
        let bytes = response.bytes().await.map_err(|e| SyncError::network(OPERATION, e))?;

        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}

// ============================================================================
// LocSync - English Translation Table
// ============================================================================
//
// 文件: src/i18n/en_us.rs
// 职责: English translation content definition
// 边界:
//   - ✅ English translation strings definition
//   - ❌ Should not contain translation logic
//   - ❌ Should not contain other language translations
//
// ============================================================================

/// English translation table
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // Shared sync messages
    ("sync.source_language", "Source language: {}"),
    ("sync.language_added", "Added language {} on POEditor"),
    ("sync.language_exists", "Language {} already exists on POEditor"),
    ("sync.rate_limit_wait", "Waiting for the {} rate limit ({}s)..."),
    ("sync.skipped", "Skipping {}: {}"),
    // Upload
    ("upload.start", "Starting upload..."),
    ("upload.initial_mode", "Initial upload: target languages will be created on POEditor first"),
    ("upload.targets", "Languages to upload: {}"),
    ("upload.no_targets", "No languages to upload"),
    (
        "upload.missing_remotely",
        "Languages missing on POEditor: {} (use --initial to create them)",
    ),
    ("upload.exporting", "Exporting localizations with xcodebuild..."),
    (
        "upload.waiting_after_add",
        "Waiting for POEditor before the first upload...",
    ),
    (
        "upload.language_done",
        "Uploaded {} (terms added: {}, translations added: {}, updated: {})",
    ),
    ("upload.language_failed", "Upload of {} failed: {}"),
    ("upload.completed", "Upload completed"),
    ("upload.aborted", "Upload aborted"),
    // Download
    ("download.start", "Starting download..."),
    ("download.targets", "Languages to download: {}"),
    ("download.no_targets", "No languages to download"),
    (
        "download.missing_remotely",
        "Languages in the project but not on POEditor: {}",
    ),
    (
        "download.missing_locally",
        "Languages on POEditor but not in the project (will be added by import): {}",
    ),
    ("download.downloading", "Downloading {}..."),
    ("download.importing", "Importing {} with xcodebuild..."),
    ("download.language_done", "Imported {}"),
    ("download.language_failed", "Processing {} failed: {}"),
    ("download.completed", "Download completed"),
    ("download.aborted", "Download aborted"),
    // Status
    ("status.start", "Fetching languages from POEditor..."),
    ("status.title", "POEditor languages"),
    ("status.no_remote_languages", "The POEditor project has no languages"),
    ("status.no_source_language", "Source language could not be detected"),
    ("status.missing_remotely", "Missing on POEditor: {}"),
    ("status.missing_locally", "Missing in the project: {}"),
    // Summary
    ("summary.upload_title", "Upload summary"),
    ("summary.download_title", "Download summary"),
    ("summary.source_language", "Source language: {}"),
    ("summary.not_attempted_reason", "not attempted"),
    ("summary.artifact_stats", "{} terms, {} bytes"),
    (
        "summary.upload_stats",
        "terms +{} -{}, translations +{} ~{}",
    ),
    ("summary.succeeded", "Succeeded: {}"),
    ("summary.skipped", "Skipped: {}"),
    ("summary.failed", "Failed: {}"),
    ("summary.not_attempted", "Not attempted: {}"),
    ("summary.added_remotely", "Added on POEditor: {}"),
    ("summary.added_locally", "Added to the project: {}"),
    ("summary.duration", "Duration: {}s"),
    // Init
    ("init.start", "Initializing configuration..."),
    ("init.config_exists", "Configuration file already exists: {}"),
    ("init.use_force_hint", "Use --force to overwrite it"),
    ("init.config_created", "Configuration file created: {}"),
    (
        "init.next_steps",
        "Set project.path, remote.api_token and remote.project_id, then run `locsync status`",
    ),
    ("init.create_failed", "Failed to create configuration file: {}"),
];

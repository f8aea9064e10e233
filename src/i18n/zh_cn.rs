// ============================================================================
// LocSync - 中文翻译表
// ============================================================================
//
// 文件: src/i18n/zh_cn.rs
// 职责: 中文翻译内容定义
// 边界:
//   - ✅ 中文翻译字符串定义
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含其他语言翻译
//
// ============================================================================

/// 中文翻译表
pub const TRANSLATIONS: &[(&str, &str)] = &[
    // 通用同步信息
    ("sync.source_language", "源语言: {}"),
    ("sync.language_added", "已在 POEditor 添加语言 {}"),
    ("sync.language_exists", "POEditor 上已存在语言 {}"),
    ("sync.rate_limit_wait", "等待 {} 限速 ({}秒)..."),
    ("sync.skipped", "跳过 {}: {}"),
    // 上传
    ("upload.start", "开始上传..."),
    ("upload.initial_mode", "首次上传: 先在 POEditor 创建目标语言"),
    ("upload.targets", "待上传语言: {}"),
    ("upload.no_targets", "没有需要上传的语言"),
    ("upload.missing_remotely", "POEditor 缺少语言: {} (使用 --initial 创建)"),
    ("upload.exporting", "正在用 xcodebuild 导出本地化..."),
    ("upload.waiting_after_add", "首次上传前等待 POEditor..."),
    ("upload.language_done", "已上传 {} (新增词条: {}, 新增翻译: {}, 更新翻译: {})"),
    ("upload.language_failed", "上传 {} 失败: {}"),
    ("upload.completed", "上传完成"),
    ("upload.aborted", "上传中止"),
    // 下载
    ("download.start", "开始下载..."),
    ("download.targets", "待下载语言: {}"),
    ("download.no_targets", "没有需要下载的语言"),
    ("download.missing_remotely", "工程中存在但 POEditor 缺少的语言: {}"),
    ("download.missing_locally", "POEditor 存在但工程缺少的语言 (导入后将新增): {}"),
    ("download.downloading", "正在下载 {}..."),
    ("download.importing", "正在用 xcodebuild 导入 {}..."),
    ("download.language_done", "已导入 {}"),
    ("download.language_failed", "处理 {} 失败: {}"),
    ("download.completed", "下载完成"),
    ("download.aborted", "下载中止"),
    // 状态
    ("status.start", "正在获取 POEditor 语言..."),
    ("status.title", "POEditor 语言"),
    ("status.no_remote_languages", "POEditor 项目中没有任何语言"),
    ("status.no_source_language", "无法推断源语言"),
    ("status.missing_remotely", "POEditor 缺少: {}"),
    ("status.missing_locally", "工程缺少: {}"),
    // 汇总
    ("summary.upload_title", "上传汇总"),
    ("summary.download_title", "下载汇总"),
    ("summary.source_language", "源语言: {}"),
    ("summary.not_attempted_reason", "未处理"),
    ("summary.artifact_stats", "{} 个词条, {} 字节"),
    ("summary.upload_stats", "词条 +{} -{}, 翻译 +{} ~{}"),
    ("summary.succeeded", "成功: {}"),
    ("summary.skipped", "跳过: {}"),
    ("summary.failed", "失败: {}"),
    ("summary.not_attempted", "未处理: {}"),
    ("summary.added_remotely", "POEditor 新增: {}"),
    ("summary.added_locally", "工程新增: {}"),
    ("summary.duration", "耗时: {}秒"),
    // 初始化
    ("init.start", "初始化配置..."),
    ("init.config_exists", "配置文件已存在: {}"),
    ("init.use_force_hint", "使用 --force 覆盖"),
    ("init.config_created", "已创建配置文件: {}"),
    ("init.next_steps", "请填写 project.path、remote.api_token 和 remote.project_id，然后运行 `locsync status`"),
    ("init.create_failed", "创建配置文件失败: {}"),
];

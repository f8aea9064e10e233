// ============================================================================
// LocSync - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 启动异步运行时并执行 CLI
// 边界:
//   - ✅ 错误链输出与退出码
//   - ❌ 不应包含命令逻辑
//
// ============================================================================

use std::process::ExitCode;

use locsync::cli::run_cli;
use locsync::utils::logger::Logger;

#[tokio::main]
async fn main() -> ExitCode {
    match run_cli().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Logger::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

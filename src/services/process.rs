// ============================================================================
// LocSync - 外部命令执行
// ============================================================================
//
// 文件: src/services/process.rs
// 职责: 阻塞式外部命令执行与输出捕获
// 边界:
//   - ✅ 命令执行和输出捕获
//   - ✅ 单次调用超时控制
//   - ✅ 非零退出码转换为错误
//   - ❌ 不应包含具体工具的参数拼装
//
// ============================================================================

use std::ffi::OsStr;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, SyncError};

/// 命令执行结果
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub duration: Duration,
}

fn combine(stdout: &str, stderr: &str) -> String {
    match (stdout.trim(), stderr.trim()) {
        ("", err) => err.to_string(),
        (out, "") => out.to_string(),
        (out, err) => format!("{}\n{}", out, err),
    }
}

/// 执行命令并等待结束，非零退出视为失败
pub async fn run_command<I, S>(program: &str, args: I, timeout: Duration) -> Result<CommandOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let start_time = Instant::now();

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    debug!("running {:?}", command.as_std());

    let child = command.spawn().map_err(|e| SyncError::ExternalTool {
        tool: program.to_string(),
        code: None,
        output: e.to_string(),
    })?;

    // 超时后 future 被丢弃，子进程随之被杀死
    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output?,
        Err(_) => {
            return Err(SyncError::ExternalToolTimeout {
                tool: program.to_string(),
                timeout,
            })
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let duration = start_time.elapsed();

    debug!("{} exited with {:?} after {:?}", program, output.status.code(), duration);

    if !output.status.success() {
        return Err(SyncError::ExternalTool {
            tool: program.to_string(),
            code: output.status.code(),
            output: combine(&stdout, &stderr),
        });
    }

    Ok(CommandOutput { stdout, duration })
}

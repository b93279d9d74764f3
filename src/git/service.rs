use std::path::PathBuf;
use std::process::Command;

use crate::error::AppError;

/// 差分の最大文字数
const MAX_DIFF_CHARS: usize = 10000;

/// diffから除外するロックファイルのパススペック
const LOCKFILE_EXCLUDES: [&str; 2] = [":(exclude)*lock.json", ":(exclude)*lock.yaml"];

/// Git操作サービス
pub struct GitService {
    repo_path: PathBuf,
}

impl GitService {
    /// 現在のディレクトリに対するGitServiceを作成
    pub fn new() -> Self {
        Self::in_dir(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// 指定ディレクトリに対するGitServiceを作成
    pub fn in_dir(repo_path: PathBuf) -> Self {
        Self { repo_path }
    }

    /// 現在のディレクトリがGitリポジトリであることを確認
    pub fn verify_repository(&self) -> Result<(), AppError> {
        let git_dir = self.repo_path.join(".git");
        if git_dir.exists() {
            Ok(())
        } else {
            // Gitリポジトリのサブディレクトリにいる場合もチェック
            let output = Command::new("git")
                .args(["rev-parse", "--git-dir"])
                .current_dir(&self.repo_path)
                .output()
                .map_err(|e| AppError::GitError(e.to_string()))?;

            if output.status.success() {
                Ok(())
            } else {
                Err(AppError::NotGitRepository)
            }
        }
    }

    /// ステージ済みのdiffを取得（ロックファイルとバイナリファイルを除外）
    ///
    /// 除外・切り詰め後に空になった場合はNoStagedChangesを返す。
    pub fn staged_diff(&self) -> Result<String, AppError> {
        let mut args = vec!["diff", "--cached", "--", "."];
        args.extend(LOCKFILE_EXCLUDES);

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| AppError::GitError(e.to_string()))?;

        if !output.status.success() {
            return Err(AppError::GitError(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        let diff = String::from_utf8_lossy(&output.stdout).to_string();
        let diff = Self::truncate_diff(&Self::filter_binary_diff(&diff));
        let diff = diff.trim();

        if diff.is_empty() {
            return Err(AppError::NoStagedChanges);
        }

        Ok(diff.to_string())
    }

    /// 指定されたメッセージでコミットを作成
    ///
    /// メッセージは呼び出し側でサニタイズ済みであること。単一の引数として
    /// 渡すためシェル展開は発生しない。
    pub fn commit(&self, message: &str) -> Result<(), AppError> {
        let output = Command::new("git")
            .args(["commit", "-m", message])
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| AppError::GitError(e.to_string()))?;

        if !output.status.success() {
            return Err(AppError::GitError(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(())
    }

    /// diffを最大文字数に切り詰める
    fn truncate_diff(diff: &str) -> String {
        if diff.chars().count() <= MAX_DIFF_CHARS {
            return diff.to_string();
        }

        // 文字数でカット
        let truncated: String = diff.chars().take(MAX_DIFF_CHARS).collect();

        // 最後の完全な行まで切り詰める（中途半端な行を避ける）
        if let Some(last_newline) = truncated.rfind('\n') {
            format!(
                "{}\n\n... (diff truncated: exceeded {} characters)",
                &truncated[..last_newline],
                MAX_DIFF_CHARS
            )
        } else {
            format!(
                "{}\n\n... (diff truncated: exceeded {} characters)",
                truncated, MAX_DIFF_CHARS
            )
        }
    }

    /// git diffの出力からバイナリファイルの差分を除外
    fn filter_binary_diff(diff_text: &str) -> String {
        if diff_text.is_empty() {
            return String::new();
        }

        let lines: Vec<&str> = diff_text.lines().collect();
        let mut filtered_lines = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];

            if line.starts_with("diff --git") {
                // 新しいdiffブロックの開始
                let block_start = i;
                i += 1;

                // このブロックがバイナリかどうかをチェック
                let mut is_binary = false;
                while i < lines.len() && !lines[i].starts_with("diff --git") {
                    if lines[i].contains("Binary files") && lines[i].contains("differ") {
                        is_binary = true;
                        break;
                    }
                    i += 1;
                }

                // バイナリでなければブロックを追加
                if !is_binary {
                    for line in lines.iter().take(i).skip(block_start) {
                        filtered_lines.push(*line);
                    }
                } else {
                    // バイナリブロックをスキップ（次のdiff --gitまで進む）
                    while i < lines.len() && !lines[i].starts_with("diff --git") {
                        i += 1;
                    }
                }
                continue;
            } else {
                filtered_lines.push(line);
            }
            i += 1;
        }

        filtered_lines.join("\n")
    }
}

impl Default for GitService {
    fn default() -> Self {
        Self::new()
    }
}

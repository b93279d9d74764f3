use clap::{Parser, Subcommand};

/// OpenAI APIを使用したスマートコミットメッセージ生成ツール
#[derive(Parser, Debug)]
#[command(name = "git-gpt")]
#[command(about = "OpenAI APIを使用したスマートコミットメッセージ生成ツール")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// サブコマンド
#[derive(Subcommand, Debug)]
pub enum Command {
    /// ステージ済みの変更からコミットメッセージを生成してコミット
    Commit,
    /// 使用するモデルを選択して保存
    Model,
    /// コミットメッセージの言語を選択して保存
    Lang,
    /// プレフィックス（feat:, fix:など）の有効/無効を切り替え
    Prefix,
    /// コミットメッセージ内の絵文字の許可/禁止を切り替え
    Emoji,
    /// OpenAI APIキーを管理（追加・表示・削除）
    #[command(name = "api-key", visible_alias = "open-api-key")]
    ApiKey,
    /// 現在の設定を表示
    Config,
}

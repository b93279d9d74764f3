use thiserror::Error;

/// アプリケーションエラーの種類
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gitリポジトリではありません。Gitリポジトリ内でこのコマンドを実行してください。")]
    NotGitRepository,

    #[error("ステージ済みの変更がありません。'git add'でファイルをステージしてからコミットしてください。")]
    NoStagedChanges,

    #[error("OpenAI APIキーが設定されていません。'git gpt api-key'で登録してください。")]
    MissingApiKey,

    #[error("OpenAI APIキーが無効です。'git gpt api-key'で登録し直してください。")]
    InvalidApiKey,

    #[error("モデル「{0}」が見つかりません。'git gpt model'で利用可能なモデルを選択してください。")]
    ModelNotFound(String),

    #[error("レート制限に達しました。しばらく時間をおいてから再実行してください。")]
    RateLimited,

    #[error("OpenAI APIエラー: {0}")]
    OpenAiError(String),

    #[error("Gitコマンドが失敗しました: {0}")]
    GitError(String),

    #[error("ユーザーが操作をキャンセルしました")]
    UserCancelled,

    #[error("設定エラー: {0}")]
    ConfigError(String),
}

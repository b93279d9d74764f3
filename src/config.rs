use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AppError;

/// 設定ファイル名（ホームディレクトリ直下）
const CONFIG_FILE_NAME: &str = ".git-gpt-commit-config.json";

/// 選択可能なモデル（表示名と識別子）
pub const AVAILABLE_MODELS: [(&str, &str); 4] = [
    ("gpt-4o-mini (Recommended - Fast & Affordable)", "gpt-4o-mini"),
    ("gpt-4o (Flagship - Best Quality)", "gpt-4o"),
    ("gpt-4-turbo (High Performance)", "gpt-4-turbo"),
    ("gpt-3.5-turbo (Legacy)", "gpt-3.5-turbo"),
];

/// コミットメッセージに使用できる言語
pub const AVAILABLE_LANGUAGES: [&str; 12] = [
    "English",
    "Spanish",
    "日本語",
    "Français",
    "Deutsch",
    "Italiano",
    "한국어",
    "简体中文",
    "繁體中文",
    "Nederlands",
    "Русский",
    "Português do Brasil",
];

/// デフォルトのモデル
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// デフォルトの言語
fn default_language() -> String {
    "English".to_string()
}

fn default_true() -> bool {
    true
}

/// アプリケーション設定
///
/// ファイルに存在しないキーはデフォルト値で補完される。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// 使用するモデル
    #[serde(default = "default_model")]
    pub model: String,
    /// コミットメッセージの言語
    #[serde(default = "default_language")]
    pub language: String,
    /// プレフィックス（feat:, fix:など）の有効/無効
    #[serde(default = "default_true")]
    pub prefix_enabled: bool,
    /// 絵文字の許可/禁止
    #[serde(default = "default_true")]
    pub allow_emojis: bool,
    /// OpenAI APIキー（未設定なら環境変数にフォールバック）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            language: default_language(),
            prefix_enabled: true,
            allow_emojis: true,
            api_key: None,
        }
    }
}

/// 設定ストア
///
/// 読み込みはファイル → デフォルトのマージ、書き込みはキー単位で
/// ファイル全体を再構成して保存する（既知でないキーも保持される）。
pub struct ConfigStore {
    path: PathBuf,
    config: Config,
}

impl ConfigStore {
    /// 設定ファイルのパスを取得（~/.git-gpt-commit-config.json）
    pub fn default_path() -> Result<PathBuf, AppError> {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or_else(|| AppError::ConfigError("Could not find home directory".to_string()))
    }

    /// デフォルトパスから設定を読み込む
    pub fn load() -> Result<Self, AppError> {
        Ok(Self::load_from(Self::default_path()?))
    }

    /// 指定パスから設定を読み込む
    ///
    /// ファイルが存在しない・読めない・壊れている場合は警告を表示して
    /// デフォルト設定にフォールバックする（エラーにはしない）。
    pub fn load_from(path: PathBuf) -> Self {
        let config = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match serde_json::from_str::<Config>(&content) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!(
                            "警告: 設定ファイルの構文エラー ({}): {}\nデフォルト設定を使用します。",
                            path.display(),
                            e
                        );
                        Config::default()
                    }
                },
                Err(e) => {
                    eprintln!(
                        "警告: 設定ファイルの読み込みに失敗しました ({}): {}\nデフォルト設定を使用します。",
                        path.display(),
                        e
                    );
                    Config::default()
                }
            }
        } else {
            Config::default()
        };

        Self { path, config }
    }

    /// 現在の設定への参照を取得
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 現在の設定のコピーを取得
    pub fn snapshot(&self) -> Config {
        self.config.clone()
    }

    /// 設定ファイルのパスを取得
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// モデルを設定して保存
    pub fn set_model(&mut self, model: &str) {
        self.config.model = model.to_string();
        self.persist_field("model", Value::String(model.to_string()));
    }

    /// 言語を設定して保存
    pub fn set_language(&mut self, language: &str) {
        self.config.language = language.to_string();
        self.persist_field("language", Value::String(language.to_string()));
    }

    /// プレフィックスの有効/無効を設定して保存
    pub fn set_prefix_enabled(&mut self, enabled: bool) {
        self.config.prefix_enabled = enabled;
        self.persist_field("prefixEnabled", Value::Bool(enabled));
    }

    /// 絵文字の許可/禁止を設定して保存
    pub fn set_allow_emojis(&mut self, allowed: bool) {
        self.config.allow_emojis = allowed;
        self.persist_field("allowEmojis", Value::Bool(allowed));
    }

    /// APIキーを設定して保存
    pub fn set_api_key(&mut self, key: &str) {
        self.config.api_key = Some(key.to_string());
        self.persist_field("apiKey", Value::String(key.to_string()));
    }

    /// APIキーをファイルから削除し、メモリ上はデフォルトに戻す
    pub fn delete_api_key(&mut self) {
        self.config.api_key = None;
        self.remove_field("apiKey");
    }

    /// 1キーだけマージしてファイル全体を書き直す
    ///
    /// ファイルを読み直してからマージするため、他の（未知のものを含む）
    /// キーは失われない。後勝ちでロックはしない。
    fn persist_field(&self, key: &str, value: Value) {
        let mut object = self.read_file_object();
        object.insert(key.to_string(), value);
        self.write_file_object(&object);
    }

    /// 1キーを取り除いてファイル全体を書き直す
    fn remove_field(&self, key: &str) {
        let mut object = self.read_file_object();
        object.remove(key);
        self.write_file_object(&object);
    }

    /// ファイルの内容をJSONオブジェクトとして読み込む
    ///
    /// 読めない・壊れている場合は空のオブジェクトとして扱う。
    fn read_file_object(&self) -> Map<String, Value> {
        if !self.path.exists() {
            return Map::new();
        }

        match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(object)) => object,
                Ok(_) | Err(_) => {
                    eprintln!(
                        "警告: 設定ファイルの構文エラー ({})。内容を再構成します。",
                        self.path.display()
                    );
                    Map::new()
                }
            },
            Err(e) => {
                eprintln!(
                    "警告: 設定ファイルの読み込みに失敗しました ({}): {}",
                    self.path.display(),
                    e
                );
                Map::new()
            }
        }
    }

    /// JSONオブジェクトをファイルに保存する（失敗しても警告のみ）
    fn write_file_object(&self, object: &Map<String, Value>) {
        let content = match serde_json::to_string_pretty(object) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("警告: 設定のシリアライズに失敗しました: {}", e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, content) {
            eprintln!(
                "警告: 設定ファイルの書き込みに失敗しました ({}): {}",
                self.path.display(),
                e
            );
        }
    }
}

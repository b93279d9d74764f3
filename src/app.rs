use std::path::Path;

use colored::Colorize;
use dialoguer::{Confirm, Password, Select};

use crate::cli::{Cli, Command};
use crate::config::{ConfigStore, AVAILABLE_LANGUAGES, AVAILABLE_MODELS};
use crate::error::AppError;
use crate::git::GitService;
use crate::mask::mask_api_key;
use crate::openai::{build_messages, CompletionParams, OpenAiService};
use crate::sanitize::sanitize_commit_message;

/// アプリケーションのメインオーケストレーター
pub struct App {
    config: ConfigStore,
    git: GitService,
}

impl App {
    /// 新しいAppインスタンスを作成
    pub fn new() -> Result<Self, AppError> {
        Ok(Self {
            config: ConfigStore::load()?,
            git: GitService::new(),
        })
    }

    /// サブコマンドに応じたワークフローを実行
    pub fn run(&mut self, cli: &Cli) -> Result<(), AppError> {
        match cli.command {
            Command::Commit => self.run_commit(),
            Command::Model => self.run_model(),
            Command::Lang => self.run_lang(),
            Command::Prefix => self.run_prefix(),
            Command::Emoji => self.run_emoji(),
            Command::ApiKey => self.run_api_key(),
            Command::Config => self.run_config(),
        }
    }

    /// コミットワークフローを実行
    fn run_commit(&self) -> Result<(), AppError> {
        self.git.verify_repository()?;

        // ステージ済みのdiffを取得（空ならここで終了、APIは呼ばない）
        let diff = self.git.staged_diff()?;

        // APIキーを解決してクライアントを作成
        let api_key = self.resolve_api_key()?;
        let openai = OpenAiService::new(&api_key)?;

        let config = self.config.config();
        let messages = build_messages(&diff, &config.language, config.prefix_enabled);

        // コミットメッセージを生成
        println!("{}", "Generating commit message...".cyan());
        let raw_message =
            openai.generate_completion(&CompletionParams::new(&config.model, messages))?;
        let message = sanitize_commit_message(&raw_message, config.allow_emojis);

        // 生成されたメッセージを表示
        println!();
        println!("{}", "Generated commit message:".green().bold());
        println!("{}", "─".repeat(50).dimmed());
        println!("{}", message);
        println!("{}", "─".repeat(50).dimmed());
        println!();

        // 確認してコミット
        if self.confirm_commit()? {
            self.git.commit(&message)?;
            println!("{}", "✓ Commit created successfully!".green().bold());
            Ok(())
        } else {
            println!("{}", "Commit cancelled.".yellow());
            Err(AppError::UserCancelled)
        }
    }

    /// 設定 → .env → 環境変数の順でAPIキーを解決
    fn resolve_api_key(&self) -> Result<String, AppError> {
        if let Some(key) = &self.config.config().api_key {
            if !key.trim().is_empty() {
                return Ok(key.clone());
            }
        }

        // カレントディレクトリの.envを読み込んでから環境変数を確認
        let _ = dotenvy::from_path(Path::new(".env"));

        match std::env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::MissingApiKey),
        }
    }

    /// コミット確認プロンプトを表示（デフォルトはYes）
    fn confirm_commit(&self) -> Result<bool, AppError> {
        Confirm::new()
            .with_prompt("Create this commit?")
            .default(true)
            .interact()
            .map_err(|_| AppError::UserCancelled)
    }

    /// モデル選択ワークフローを実行
    fn run_model(&mut self) -> Result<(), AppError> {
        let titles: Vec<&str> = AVAILABLE_MODELS.iter().map(|(title, _)| *title).collect();
        let current = AVAILABLE_MODELS
            .iter()
            .position(|(_, value)| *value == self.config.config().model)
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt("Select a model")
            .items(&titles)
            .default(current)
            .interact_opt()
            .map_err(|_| AppError::UserCancelled)?;

        if let Some(index) = selection {
            let model = AVAILABLE_MODELS[index].1;
            self.config.set_model(model);
            println!("Model set to {} and saved to configuration", model);
        } else {
            println!("{}", "Action cancelled.".yellow());
        }

        Ok(())
    }

    /// 言語選択ワークフローを実行
    fn run_lang(&mut self) -> Result<(), AppError> {
        let current = AVAILABLE_LANGUAGES
            .iter()
            .position(|lang| *lang == self.config.config().language)
            .unwrap_or(0);

        let selection = Select::new()
            .with_prompt("Select a language for commit messages")
            .items(&AVAILABLE_LANGUAGES)
            .default(current)
            .interact_opt()
            .map_err(|_| AppError::UserCancelled)?;

        if let Some(index) = selection {
            let language = AVAILABLE_LANGUAGES[index];
            self.config.set_language(language);
            println!("Language set to {} and saved to configuration", language);
        } else {
            println!("{}", "Action cancelled.".yellow());
        }

        Ok(())
    }

    /// プレフィックスの有効/無効を切り替え
    fn run_prefix(&mut self) -> Result<(), AppError> {
        let current = self.config.config().prefix_enabled;
        println!(
            "Prefixes are currently {}.",
            if current { "enabled" } else { "disabled" }
        );

        let selection = Select::new()
            .with_prompt("Set commit message prefixes (e.g., fix:, feat:, refactor:)")
            .items(&["Enable prefixes", "Disable prefixes"])
            .default(if current { 0 } else { 1 })
            .interact_opt()
            .map_err(|_| AppError::UserCancelled)?;

        if let Some(index) = selection {
            let enabled = index == 0;
            self.config.set_prefix_enabled(enabled);
            println!(
                "Prefix {} and saved to configuration",
                if enabled { "enabled" } else { "disabled" }
            );
        } else {
            println!("{}", "Action cancelled.".yellow());
        }

        Ok(())
    }

    /// 絵文字の許可/禁止を切り替え
    fn run_emoji(&mut self) -> Result<(), AppError> {
        let current = self.config.config().allow_emojis;
        println!(
            "Emojis are currently {}.",
            if current { "enabled" } else { "disabled" }
        );

        let selection = Select::new()
            .with_prompt("Allow emojis in commit messages?")
            .items(&["Enable emojis 🎉", "Disable emojis"])
            .default(if current { 0 } else { 1 })
            .interact_opt()
            .map_err(|_| AppError::UserCancelled)?;

        if let Some(index) = selection {
            let allowed = index == 0;
            self.config.set_allow_emojis(allowed);
            println!(
                "Emojis {} and saved to configuration",
                if allowed { "enabled" } else { "disabled" }
            );
        } else {
            println!("{}", "Action cancelled.".yellow());
        }

        Ok(())
    }

    /// APIキー管理ワークフローを実行
    fn run_api_key(&mut self) -> Result<(), AppError> {
        let selection = Select::new()
            .with_prompt("What would you like to do with your OpenAI API key?")
            .items(&[
                "Add or update API key",
                "Show API key (masked)",
                "Delete API key",
            ])
            .default(0)
            .interact_opt()
            .map_err(|_| AppError::UserCancelled)?;

        match selection {
            Some(0) => {
                let input = Password::new()
                    .with_prompt("Enter your OpenAI API key")
                    .allow_empty_password(true)
                    .interact()
                    .map_err(|_| AppError::UserCancelled)?;

                if input.is_empty() {
                    println!("{}", "Action cancelled.".yellow());
                } else {
                    self.config.set_api_key(&input);
                    println!("API key saved to configuration.");
                }
            }
            Some(1) => {
                println!(
                    "OpenAI API key: {}",
                    mask_api_key(self.config.config().api_key.as_deref())
                );
            }
            Some(2) => {
                let confirmed = Confirm::new()
                    .with_prompt("Are you sure you want to delete your stored API key?")
                    .default(false)
                    .interact()
                    .map_err(|_| AppError::UserCancelled)?;

                if confirmed {
                    self.config.delete_api_key();
                    println!("API key deleted from configuration.");
                } else {
                    println!("{}", "Action cancelled.".yellow());
                }
            }
            _ => println!("{}", "Action cancelled.".yellow()),
        }

        Ok(())
    }

    /// 現在の設定を表示（APIキーはマスクして表示）
    fn run_config(&self) -> Result<(), AppError> {
        let config = self.config.snapshot();

        println!(
            "  prefix: {}",
            if config.prefix_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!("   model: {}", config.model);
        println!("    lang: {}", config.language);
        println!(
            "   emoji: {}",
            if config.allow_emojis {
                "enabled"
            } else {
                "disabled"
            }
        );
        println!("  apikey: {}", mask_api_key(config.api_key.as_deref()));
        println!("    path: {}", self.config.path().display());

        Ok(())
    }
}

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::prompt::ChatMessage;

/// OpenAIチャット補完APIのエンドポイント
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// デフォルトの温度
const DEFAULT_TEMPERATURE: f64 = 0.7;

/// デフォルトの最大補完トークン数
const DEFAULT_MAX_TOKENS: u32 = 200;

/// 補完リクエストのパラメータ
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl CompletionParams {
    /// デフォルトの温度・トークン数でパラメータを作成
    pub fn new(model: &str, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.to_string(),
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// チャット補完APIのリクエストボディ
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
    max_completion_tokens: u32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// エラーレスポンスのボディ（{"error": {"message": ...}}）
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI APIクライアント
pub struct OpenAiService {
    http: Client,
    api_key: String,
}

impl OpenAiService {
    /// APIキーを束縛したクライアントを作成
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::MissingApiKey);
        }

        Ok(Self {
            http: Client::new(),
            api_key: api_key.to_string(),
        })
    }

    /// 補完を1回だけリクエストし、最初の候補のテキストを返す
    ///
    /// この層ではリトライしない。リトライが必要なら呼び出し側の責務。
    pub fn generate_completion(&self, params: &CompletionParams) -> Result<String, AppError> {
        let request = ChatCompletionRequest {
            model: &params.model,
            messages: &params.messages,
            temperature: params.temperature,
            max_completion_tokens: params.max_tokens,
        };

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| AppError::OpenAiError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Self::map_api_error(status, &params.model, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .map_err(|e| AppError::OpenAiError(format!("unexpected response: {}", e)))?;

        let message = completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if message.is_empty() {
            return Err(AppError::OpenAiError(
                "OpenAI returned an empty response".to_string(),
            ));
        }

        Ok(message)
    }

    /// HTTPステータスコードをエラー種別に対応付ける
    ///
    /// メッセージ本文はプロバイダー依存で不安定なため、分類には使わない。
    fn map_api_error(status: StatusCode, model: &str, body: &str) -> AppError {
        match status {
            StatusCode::UNAUTHORIZED => AppError::InvalidApiKey,
            StatusCode::NOT_FOUND => AppError::ModelNotFound(model.to_string()),
            StatusCode::TOO_MANY_REQUESTS => AppError::RateLimited,
            _ => AppError::OpenAiError(
                Self::extract_error_message(body)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            ),
        }
    }

    /// エラーレスポンスのボディからメッセージを抽出
    fn extract_error_message(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .map(|parsed| parsed.error.message)
    }
}

use serde::Serialize;

/// チャットメッセージのロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// OpenAIチャットAPIに渡すメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// システムメッセージを構築
///
/// ペルソナ・対象言語・サブジェクト行の文字数ガイドを固定する。
fn build_system_message(language: &str) -> ChatMessage {
    ChatMessage {
        role: Role::System,
        content: format!(
            "You are an expert Git commit message writer. \
             Generate semantic, meaningful commit messages that explain the PURPOSE \
             and IMPACT of changes, not just what changed. \
             Focus on WHY the change was made and its benefits. \
             Write in {language}. \
             Keep messages concise but descriptive, under 72 characters for the subject line."
        ),
    }
}

/// diffを埋め込んだユーザーメッセージを構築
///
/// prefix_enabledの場合のみConventional Commitsのプレフィックス語彙を指示する。
fn build_user_message(diff: &str, prefix_enabled: bool) -> ChatMessage {
    let content = if prefix_enabled {
        format!(
            r#"Analyze the following git diff and generate a semantic commit message that explains the purpose and impact of these changes.
Use an appropriate conventional commit prefix (feat:, fix:, chore:, refactor:, perf:, test:, style:, docs:, build:, ci:, revert:) based on the type and intent of changes.
Structure: <prefix>: <what> to <achieve what benefit/fix what issue>
Example: "feat: add user authentication to improve security"

Git diff summary:
{diff}

Commit message: "#
        )
    } else {
        format!(
            r#"Analyze the following git diff and generate a semantic commit message that explains the purpose and impact of these changes.
Focus on the intent and benefit of the changes, not just listing what was modified.
Structure: <what was done> to <achieve what benefit/fix what issue>
Example: "Add user authentication to improve application security"

Git diff summary:
{diff}

Commit message: "#
        )
    };

    ChatMessage {
        role: Role::User,
        content,
    }
}

/// リクエストに使用するメッセージ列を構築（system → userの順で2件）
///
/// 純粋関数。同じ入力に対して常に同じ結果を返す。
pub fn build_messages(diff: &str, language: &str, prefix_enabled: bool) -> Vec<ChatMessage> {
    vec![
        build_system_message(language),
        build_user_message(diff, prefix_enabled),
    ]
}

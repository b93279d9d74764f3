/// APIキーを表示用にマスクする
///
/// 未設定なら"none"、8文字以下なら"****"、それ以外は先頭4文字と
/// 末尾4文字だけを表示する。
pub fn mask_api_key(key: Option<&str>) -> String {
    let key = match key {
        Some(key) if !key.is_empty() => key,
        _ => return "none".to_string(),
    };

    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

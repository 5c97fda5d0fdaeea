use std::collections::BTreeSet;

use tracing::warn;

/// 规范化关键词：去除首尾空白并转为小写，丢弃空串
pub fn normalize_keywords<I, S>(keywords: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// 关键词集合序列化为 JSON 文本（数据库存储格式）
pub fn keywords_to_json(keywords: &BTreeSet<String>) -> serde_json::Result<String> {
    serde_json::to_string(keywords)
}

/// 从 JSON 文本解析字符串列表，数据损坏时记录警告并返回空列表
///
/// `context` 标明来源字段，如 `section 3 requested_netids`。
pub fn list_from_json(raw: &str, context: &str) -> Vec<String> {
    match serde_json::from_str(raw) {
        Ok(list) => list,
        Err(e) => {
            warn!("Corrupt JSON list in {}, treating as empty: {} (raw: {:?})", context, e, raw);
            Vec::new()
        }
    }
}

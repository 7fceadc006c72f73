//! Guard 模块
//!
//! QuantifierGuard: 防止口语约数（"两三个"、"五六本"）被拆成多个数字
//!
//! 连续两个以上的数字紧跟量词时，先换成占位符，转换完成后再原样放回。

use std::collections::HashMap;

use regex::{Captures, Regex};

use crate::error::{NumConvError, NumConvResult};
use crate::itn::converter::{self, ConversionResult, NumeralChange};
use crate::itn::LocaleProfile;

/// 默认量词（不含 年/月/日 等日期用字，避免 "二零二三年" 被保护）
pub const DEFAULT_QUANTIFIERS: &[&str] = &[
    "个", "只", "件", "本", "张", "条", "位", "名", "次", "份", "块", "头", "匹", "杯", "瓶",
    "辆", "棵", "把", "家", "岁", "斤", "种", "台", "部",
];

/// 占位符使用私用区字符
const PLACEHOLDER_RANGE: std::ops::RangeInclusive<u32> = 0xE000..=0xF8FF;

/// QuantifierGuard - 量词约数守卫
#[derive(Debug, Clone)]
pub struct QuantifierGuard {
    profile: LocaleProfile,
    pattern: Regex,
}

impl QuantifierGuard {
    /// 根据量词列表与词表中的数字词条构造守卫
    ///
    /// 单位词条（十百千万亿）不参与匹配；单个数字加量词（"一个"）不受保护。
    pub fn new<I, S>(quantifiers: I, profile: &LocaleProfile) -> NumConvResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let quantifiers: Vec<String> = quantifiers
            .into_iter()
            .map(|q| q.as_ref().to_string())
            .filter(|q| !q.is_empty())
            .collect();
        if quantifiers.is_empty() {
            return Err(NumConvError::QuantifierPattern(
                "quantifier list is empty".to_string(),
            ));
        }

        let digits = alternation(profile.digit_tokens());
        let quantifiers = alternation(quantifiers.iter().map(String::as_str));
        let source = format!("(?:{digits}){{2,}}(?:{quantifiers})");
        let pattern =
            Regex::new(&source).map_err(|e| NumConvError::QuantifierPattern(e.to_string()))?;

        tracing::debug!("量词保护模式: {}", source);
        Ok(Self {
            profile: profile.clone(),
            pattern,
        })
    }

    /// 使用默认量词列表
    pub fn with_defaults(profile: &LocaleProfile) -> NumConvResult<Self> {
        Self::new(DEFAULT_QUANTIFIERS.iter().copied(), profile)
    }

    pub fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    /// 把受保护的片段换成占位符
    pub fn protect(&self, text: &str) -> ProtectedText {
        let mut assigned: HashMap<String, char> = HashMap::new();
        let mut restorations: Vec<(char, String)> = Vec::new();
        let mut candidates = PLACEHOLDER_RANGE
            .filter_map(char::from_u32)
            .filter(|&c| !text.contains(c) && !self.profile.mentions_char(c));

        let protected = self.pattern.replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            if let Some(&placeholder) = assigned.get(matched) {
                return placeholder.to_string();
            }
            match candidates.next() {
                Some(placeholder) => {
                    assigned.insert(matched.to_string(), placeholder);
                    restorations.push((placeholder, matched.to_string()));
                    placeholder.to_string()
                }
                None => {
                    tracing::warn!("占位符已用尽，不保护: {}", matched);
                    matched.to_string()
                }
            }
        });

        let text = protected.into_owned();
        if !restorations.is_empty() {
            tracing::debug!("量词保护: {} 处", restorations.len());
        }
        ProtectedText { text, restorations }
    }

    /// 保护约数后转换，再还原
    pub fn convert(&self, text: &str) -> String {
        let protected = self.protect(text);
        let converted = converter::convert(&protected.text, &self.profile);
        protected.restore(&converted)
    }

    /// 与 `convert` 相同，但保留变更记录（偏移量对应原始文本与最终输出）
    pub fn convert_with_changes(&self, text: &str) -> ConversionResult {
        let protected = self.protect(text);
        let converted = converter::convert_with_changes(&protected.text, &self.profile);
        let restored = protected.restore(&converted.text);

        let changes = converted
            .changes
            .into_iter()
            .map(|change| {
                let original_span = protected.map_offset(&protected.text, change.original_span.start)
                    ..protected.map_offset(&protected.text, change.original_span.end);
                let normalized_span = protected.map_offset(&converted.text, change.normalized_span.start)
                    ..protected.map_offset(&converted.text, change.normalized_span.end);
                NumeralChange {
                    original_text: text[original_span.clone()].to_string(),
                    original_span,
                    normalized_text: change.normalized_text,
                    normalized_span,
                }
            })
            .collect();

        ConversionResult {
            text: restored,
            changes,
        }
    }
}

/// 已替换占位符的文本
#[derive(Debug, Clone)]
pub struct ProtectedText {
    /// 替换后的文本
    pub text: String,
    restorations: Vec<(char, String)>,
}

impl ProtectedText {
    /// 受保护的片段数
    pub fn protected_count(&self) -> usize {
        self.restorations.len()
    }

    /// 把占位符换回原文
    pub fn restore(&self, converted: &str) -> String {
        if self.restorations.is_empty() {
            return converted.to_string();
        }

        let mut out = String::with_capacity(converted.len());
        for ch in converted.chars() {
            match self.original_of(ch) {
                Some(original) => out.push_str(original),
                None => out.push(ch),
            }
        }
        out
    }

    fn original_of(&self, ch: char) -> Option<&str> {
        self.restorations
            .iter()
            .find(|(placeholder, _)| *placeholder == ch)
            .map(|(_, original)| original.as_str())
    }

    /// 含占位符文本中的偏移 → 还原后文本中的偏移
    fn map_offset(&self, text: &str, offset: usize) -> usize {
        let mut mapped = offset;
        for ch in text[..offset].chars() {
            if let Some(original) = self.original_of(ch) {
                mapped = mapped + original.len() - ch.len_utf8();
            }
        }
        mapped
    }
}

/// 转换但保留量词约数
///
/// 量词列表无法编译成模式时退化为普通转换。
pub fn convert_ignoring_quantifiers<I, S>(text: &str, quantifiers: I, profile: &LocaleProfile) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    match QuantifierGuard::new(quantifiers, profile) {
        Ok(guard) => guard.convert(text),
        Err(err) => {
            tracing::warn!("量词保护不可用，直接转换: {}", err);
            converter::convert(text, profile)
        }
    }
}

/// 构造最长优先的正则分支
fn alternation<'t>(tokens: impl Iterator<Item = &'t str>) -> String {
    let mut tokens: Vec<&str> = tokens.filter(|t| !t.is_empty()).collect();
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    tokens.dedup();
    tokens
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
}

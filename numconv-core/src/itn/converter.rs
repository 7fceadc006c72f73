//! Converter - 全文转换
//!
//! 从左到右扫描整段文本：遇到数字表达的首符就交给 Parser 消费一个最长表达，
//! 其余词元原样输出。解析失败时回滚位置，把该词元当普通文字输出。

use std::ops::Range;

use crate::itn::{LocaleProfile, Parser, Scanner};

/// 单处转换记录（用于回滚）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralChange {
    /// 原始文本范围（字节）
    pub original_span: Range<usize>,
    /// 原始文本
    pub original_text: String,
    /// 输出文本范围（字节）
    pub normalized_span: Range<usize>,
    /// 输出文本（包含插入的分隔空格）
    pub normalized_text: String,
}

/// 转换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// 转换后的文本
    pub text: String,
    /// 变更记录列表，按出现顺序
    pub changes: Vec<NumeralChange>,
}

impl ConversionResult {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

/// 转换文本中的全部数字表达
///
/// 对任意输入都返回结果，不会失败。
///
/// # 示例
/// ```
/// # use numconv_core::itn::{convert, LocaleProfile};
/// assert_eq!(convert("买这个电脑我花了一万五", &LocaleProfile::chinese()), "买这个电脑我花了15000");
/// ```
pub fn convert(text: &str, profile: &LocaleProfile) -> String {
    convert_with_changes(text, profile).text
}

/// 转换并记录每一处变更
pub fn convert_with_changes(text: &str, profile: &LocaleProfile) -> ConversionResult {
    let mut scanner = Scanner::new(text, profile);
    let mut out = String::with_capacity(text.len());
    let mut changes = Vec::new();
    let mut last_was_numeral = false;
    // 上一段输出是否为转换结果（数字或小数点）
    let mut after_conversion = false;

    scanner.advance();
    while let Some(token) = scanner.lookahead() {
        // "十两"、"一两" 中紧跟数字的 "两" 是量词，不是 2
        if after_conversion && profile.is_leading_only(token) {
            out.push_str(token);
            scanner.advance();
            last_was_numeral = false;
            after_conversion = false;
            continue;
        }

        if profile.starts_signed(token) {
            let saved = scanner.save_position();
            match Parser::new(&mut scanner).parse() {
                Ok(value) => {
                    let out_start = out.len();
                    // 连续的单个数字（电话号码、年份）不加空格
                    if last_was_numeral && value >= 10 {
                        out.push(' ');
                    }
                    out.push_str(&value.to_string());

                    let original_span = saved.offset()..scanner.offset();
                    changes.push(NumeralChange {
                        original_text: text[original_span.clone()].to_string(),
                        original_span,
                        normalized_text: out[out_start..].to_string(),
                        normalized_span: out_start..out.len(),
                    });
                    last_was_numeral = true;
                    after_conversion = true;
                }
                Err(err) => {
                    tracing::trace!("数字解析失败，按原文输出: {}", err);
                    scanner.restore_position(saved);
                    out.push_str(token);
                    scanner.advance();
                    last_was_numeral = false;
                    after_conversion = false;
                }
            }
            continue;
        }

        if last_was_numeral && profile.is_decimal_point(token) {
            let start = scanner.offset();
            let out_start = out.len();
            out.push('.');
            scanner.advance();
            let fraction_digits = push_fraction(&mut scanner, &mut out);

            changes.push(NumeralChange {
                original_span: start..scanner.offset(),
                original_text: text[start..scanner.offset()].to_string(),
                normalized_span: out_start..out.len(),
                normalized_text: out[out_start..].to_string(),
            });
            last_was_numeral = fraction_digits > 0;
            after_conversion = true;
            continue;
        }

        out.push_str(token);
        scanner.advance();
        last_was_numeral = false;
        after_conversion = false;
    }

    ConversionResult { text: out, changes }
}

/// 小数部分：逐个输出紧随其后的数字，不接受单位与只能作数首的数字
fn push_fraction(scanner: &mut Scanner<'_>, out: &mut String) -> usize {
    let profile = scanner.profile();
    let mut count = 0;
    while let Some(value) = scanner
        .lookahead()
        .filter(|t| !profile.is_leading_only(t))
        .and_then(|t| profile.digit_value(t))
    {
        out.push(char::from(b'0' + value));
        scanner.advance();
        count += 1;
    }
    count
}

/// 回滚转换结果，还原原始文本
pub fn rollback(result: &ConversionResult) -> String {
    let mut text = String::with_capacity(result.text.len());
    let mut cursor = 0;

    for change in &result.changes {
        text.push_str(&result.text[cursor..change.normalized_span.start]);
        text.push_str(&change.original_text);
        cursor = change.normalized_span.end;
    }
    text.push_str(&result.text[cursor..]);

    text
}

//! Scanner - 数字表达扫描器
//!
//! 每次产出一个词元：通常是一个字符，若词表声明了多字符词条
//! （如 "ゼロ"、"マイナス"）且后续字符完整匹配，则整体作为一个词元。

use crate::itn::LocaleProfile;

/// 扫描位置快照
///
/// 记录前瞻词元的起始字节偏移；恢复时按同样的最长匹配规则重新组合词元。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanPosition(usize);

impl ScanPosition {
    /// 前瞻词元在源文本中的起始字节偏移
    pub fn offset(self) -> usize {
        self.0
    }
}

/// 词元扫描器
pub struct Scanner<'a> {
    source: &'a str,
    profile: &'a LocaleProfile,
    /// 当前前瞻词元的字节范围，`start == end` 表示没有词元（未开始或 EOF）
    start: usize,
    end: usize,
    /// 上一个前瞻词元（用于 retract）
    previous: Option<(usize, usize)>,
}

impl<'a> Scanner<'a> {
    /// 创建扫描器，需要先调用 `advance()` 取得第一个词元
    pub fn new(source: &'a str, profile: &'a LocaleProfile) -> Self {
        Self {
            source,
            profile,
            start: 0,
            end: 0,
            previous: None,
        }
    }

    pub fn profile(&self) -> &'a LocaleProfile {
        self.profile
    }

    /// 当前前瞻词元，EOF 时为 None
    pub fn lookahead(&self) -> Option<&'a str> {
        if self.start < self.end {
            Some(&self.source[self.start..self.end])
        } else {
            None
        }
    }

    /// 前瞻词元的起始字节偏移（EOF 时为源文本长度）
    pub fn offset(&self) -> usize {
        self.start
    }

    pub fn is_eof(&self) -> bool {
        self.start >= self.source.len()
    }

    /// 消费当前词元并读取下一个
    pub fn advance(&mut self) -> Option<&'a str> {
        self.previous = Some((self.start, self.end));
        let (start, end) = self.compose(self.end);
        self.start = start;
        self.end = end;
        self.lookahead()
    }

    /// 撤销最近一次 `advance`
    pub fn retract(&mut self) -> Option<&'a str> {
        debug_assert!(self.previous.is_some(), "retract without a preceding advance");
        if let Some((start, end)) = self.previous.take() {
            self.start = start;
            self.end = end;
        }
        self.lookahead()
    }

    pub fn save_position(&self) -> ScanPosition {
        ScanPosition(self.start)
    }

    /// 回到保存的位置，重新组合该位置上的词元
    pub fn restore_position(&mut self, position: ScanPosition) {
        let (start, end) = self.compose(position.0);
        self.start = start;
        self.end = end;
        self.previous = None;
    }

    /// 从字节偏移 `at` 开始组合一个词元
    fn compose(&self, at: usize) -> (usize, usize) {
        let rest = match self.source.get(at..) {
            Some(rest) if !rest.is_empty() => rest,
            _ => return (self.source.len(), self.source.len()),
        };

        let width = self
            .profile
            .compound_width(rest)
            .or_else(|| rest.chars().next().map(char::len_utf8))
            .unwrap_or(rest.len());
        (at, at + width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str, profile: &LocaleProfile) -> Vec<String> {
        let mut scanner = Scanner::new(text, profile);
        let mut out = Vec::new();
        while let Some(token) = scanner.advance() {
            out.push(token.to_string());
        }
        out
    }

    #[test]
    fn test_single_character_tokens() {
        let zh = LocaleProfile::chinese();
        assert_eq!(tokens("三百a", &zh), vec!["三", "百", "a"]);
        assert!(tokens("", &zh).is_empty());
    }

    #[test]
    fn test_compound_tokens() {
        let ja = LocaleProfile::japanese();
        assert_eq!(tokens("マイナス百", &ja), vec!["マイナス", "百"]);
        assert_eq!(tokens("ゼーロ円", &ja), vec!["ゼーロ", "円"]);
        assert_eq!(tokens("ゼロ", &ja), vec!["ゼロ"]);
    }

    #[test]
    fn test_partial_compound_at_end_falls_back() {
        let ja = LocaleProfile::japanese();
        assert_eq!(tokens("マイナ", &ja), vec!["マ", "イ", "ナ"]);
        assert_eq!(tokens("ゼー", &ja), vec!["ゼ", "ー"]);
    }

    #[test]
    fn test_compound_not_recognized_in_other_locale() {
        let zh = LocaleProfile::chinese();
        assert_eq!(tokens("ゼロ", &zh), vec!["ゼ", "ロ"]);
    }

    #[test]
    fn test_retract_compound_token() {
        let ja = LocaleProfile::japanese();
        let mut scanner = Scanner::new("マイナス五", &ja);
        assert_eq!(scanner.advance(), Some("マイナス"));
        assert_eq!(scanner.advance(), Some("五"));
        assert_eq!(scanner.retract(), Some("マイナス"));
        assert_eq!(scanner.advance(), Some("五"));
        assert_eq!(scanner.advance(), None);
        assert_eq!(scanner.retract(), Some("五"));
    }

    #[test]
    fn test_save_and_restore_position() {
        let ja = LocaleProfile::japanese();
        let mut scanner = Scanner::new("一ゼロ二", &ja);
        scanner.advance();
        scanner.advance();
        let saved = scanner.save_position();
        assert_eq!(scanner.lookahead(), Some("ゼロ"));

        scanner.advance();
        scanner.advance();
        assert!(scanner.is_eof());

        scanner.restore_position(saved);
        assert_eq!(scanner.lookahead(), Some("ゼロ"));
        assert_eq!(scanner.offset(), "一".len());
        assert_eq!(scanner.advance(), Some("二"));
    }

    #[test]
    fn test_eof_is_sticky() {
        let zh = LocaleProfile::chinese();
        let mut scanner = Scanner::new("一", &zh);
        assert_eq!(scanner.advance(), Some("一"));
        assert_eq!(scanner.advance(), None);
        assert_eq!(scanner.advance(), None);
        assert_eq!(scanner.offset(), "一".len());
    }
}

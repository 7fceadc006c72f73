//! 数字表达语法分析模块
//!
//! 递归下降求值，文法（从高到低）：
//!
//! ```text
//! Signed         -> 负? Magnitude
//! Magnitude      -> TenThousandGrp (亿 零? TenThousandGrp)?
//! TenThousandGrp -> ThousandGrp (万 零? ThousandGrp)?
//! ThousandGrp    -> Digit 千 (零 TenGrp | HundredGrp) | HundredGrp
//! HundredGrp     -> Digit 百 (零 Digit | TenGrp) | TenGrp
//! TenGrp         -> Digit 十 Digit | 十 Digit | Digit
//! ```
//!
//! 具体的字符由 LocaleProfile 决定，这里只依赖词表查询与能力开关。

use crate::error::{NumConvError, NumConvResult};
use crate::itn::{LocaleProfile, Scanner, Unit};

/// 单次解析的可变状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseState {
    /// 最近一次消费的单位数值（口语省略还原使用）
    pub scale_reached: i64,
}

impl Default for ParseState {
    fn default() -> Self {
        Self { scale_reached: 1 }
    }
}

/// 数字表达解析器
///
/// 从扫描器当前位置开始消费一个最长的带符号数字表达。
pub struct Parser<'s, 'a> {
    scanner: &'s mut Scanner<'a>,
    profile: &'a LocaleProfile,
    state: ParseState,
}

impl<'s, 'a> Parser<'s, 'a> {
    pub fn new(scanner: &'s mut Scanner<'a>) -> Self {
        let profile = scanner.profile();
        Self {
            scanner,
            profile,
            state: ParseState::default(),
        }
    }

    /// 解析一个带符号数，返回经过省略还原的数值
    ///
    /// 失败时扫描器位置不做恢复，由调用方负责回滚。
    pub fn parse(&mut self) -> NumConvResult<i64> {
        self.state = ParseState::default();
        let value = self.signed()?;
        Ok(self.correct_elision(value))
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    fn signed(&mut self) -> NumConvResult<i64> {
        let mut sign = 1;
        if self.lookahead_is(|p, t| p.is_negative(t)) {
            self.scanner.advance();
            sign = -1;
        }

        if !self.lookahead_is(|p, t| p.starts_magnitude(t)) {
            return Err(self.syntax_error());
        }

        let begin = self.scanner.offset();
        let value = self.magnitude();
        if self.scanner.offset() == begin {
            // 例如单独的 "万"：没有可用的前导数字
            return Err(self.syntax_error());
        }
        Ok(sign * value)
    }

    fn magnitude(&mut self) -> i64 {
        self.grouped(Unit::HundredMillion, Self::ten_thousand_group)
    }

    fn ten_thousand_group(&mut self) -> i64 {
        self.grouped(Unit::TenThousand, Self::thousand_group)
    }

    /// 万/亿 两级共用：`low (unit 零? low)?`
    ///
    /// 低一级的结果无论单位是否出现都成立，因此这里不回退。
    fn grouped(&mut self, unit: Unit, lower: fn(&mut Self) -> i64) -> i64 {
        let begin = self.scanner.offset();
        let high = lower(self);
        if self.scanner.offset() == begin || !self.lookahead_is(|p, t| p.is_unit(t, unit)) {
            return high;
        }

        self.scanner.advance();
        self.state.scale_reached = unit.scale();
        // 万/亿 后的零在所有语言中都只是分隔，不计入数值
        if self.lookahead_is(|p, t| p.is_zero(t)) {
            self.scanner.advance();
            if self.profile.zero_gap_after_unit() {
                self.state.scale_reached = 10;
            }
        }

        let low = lower(self);
        high * unit.scale() + low
    }

    fn thousand_group(&mut self) -> i64 {
        let n = self.digit();
        if self.lookahead_is(|p, t| p.is_unit(t, Unit::Thousand)) {
            self.scanner.advance();
            self.state.scale_reached = 1_000;
            let rest = if self.take_zero_gap() {
                self.ten_group()
            } else {
                self.hundred_group()
            };
            return leading(n) * 1_000 + rest;
        }

        if n.is_some() {
            self.scanner.retract();
        }
        self.hundred_group()
    }

    fn hundred_group(&mut self) -> i64 {
        let n = self.digit();
        if self.lookahead_is(|p, t| p.is_unit(t, Unit::Hundred)) {
            self.scanner.advance();
            self.state.scale_reached = 100;
            let rest = if self.take_zero_gap() {
                self.trailing_digit().unwrap_or(0)
            } else {
                self.ten_group()
            };
            return leading(n) * 100 + rest;
        }

        if n.is_some() {
            self.scanner.retract();
        }
        self.ten_group()
    }

    fn ten_group(&mut self) -> i64 {
        let n = self.digit();
        if self.lookahead_is(|p, t| p.is_unit(t, Unit::Ten)) {
            self.scanner.advance();
            self.state.scale_reached = 10;
            let m = self.trailing_digit().unwrap_or(0);
            return leading(n) * 10 + m;
        }
        n.unwrap_or(0)
    }

    /// 单位后紧跟零：消费它并标记跳过了一个数位
    fn take_zero_gap(&mut self) -> bool {
        if self.profile.zero_gap_after_unit() && self.lookahead_is(|p, t| p.is_zero(t)) {
            self.scanner.advance();
            self.state.scale_reached = 10;
            return true;
        }
        false
    }

    fn digit(&mut self) -> Option<i64> {
        let value = self
            .scanner
            .lookahead()
            .and_then(|token| self.profile.digit_value(token))?;
        self.scanner.advance();
        Some(i64::from(value))
    }

    /// 单位之后的数字，不接受只能作数首的词条（"十两" 的 "两" 不是 2）
    fn trailing_digit(&mut self) -> Option<i64> {
        if self.lookahead_is(|p, t| p.is_leading_only(t)) {
            return None;
        }
        self.digit()
    }

    fn lookahead_is(&self, pred: impl Fn(&LocaleProfile, &str) -> bool) -> bool {
        self.scanner
            .lookahead()
            .is_some_and(|token| pred(self.profile, token))
    }

    /// 口语省略末位单位："一万五" 按 15000 计，"三百五" 按 350 计
    fn correct_elision(&self, value: i64) -> i64 {
        if !self.profile.elision_correction() {
            return value;
        }

        let scale = self.state.scale_reached;
        if scale > 10 && scale <= 10_000 {
            let tail = value % 10;
            return value - tail + tail * (scale / 10);
        }
        value
    }

    fn syntax_error(&self) -> NumConvError {
        NumConvError::Syntax {
            offset: self.scanner.offset(),
            found: self.scanner.lookahead().unwrap_or("EOF").to_string(),
        }
    }
}

/// 单位前的数字缺省为 1（"十五"、"百一"）
fn leading(n: Option<i64>) -> i64 {
    n.map_or(1, |n| n.max(1))
}

/// 将整段文本作为一个数字表达解析
///
/// # 示例
/// ```
/// # use numconv_core::itn::{parse_numeral, LocaleProfile};
/// let value = parse_numeral("一千二百三十四", &LocaleProfile::chinese()).unwrap();
/// assert_eq!(value, 1234);
/// ```
pub fn parse_numeral(text: &str, profile: &LocaleProfile) -> NumConvResult<i64> {
    let mut scanner = Scanner::new(text, profile);
    scanner.advance();
    let value = Parser::new(&mut scanner).parse()?;

    if let Some(rest) = scanner.lookahead() {
        return Err(NumConvError::Syntax {
            offset: scanner.offset(),
            found: rest.to_string(),
        });
    }
    Ok(value)
}

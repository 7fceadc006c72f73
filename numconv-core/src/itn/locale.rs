//! 语言词表模块
//!
//! LocaleProfile 描述一种语言的数字词汇：数字、零、各级单位、负号与小数点。
//! 语法分析代码只通过这里的查询与能力开关区分语言，不直接判断语言标签。

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{NumConvError, NumConvResult};

/// 日常数字（按位置取值 0-9）
const EVERYDAY_DIGITS: &str = "零一二三四五六七八九";
/// 大写（财务）数字
const FINANCIAL_DIGITS: &str = "零壹贰叁肆伍陆柒捌玖";
/// 只能出现在数首的同义数字（"两万" 可以，"十两" 不行）
const LEADING_ONLY_DIGITS: &[&str] = &["两"];

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// 中文
    #[default]
    Chinese,
    /// 日文
    Japanese,
}

/// 数位单位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Unit {
    /// 十
    Ten,
    /// 百
    Hundred,
    /// 千
    Thousand,
    /// 万
    TenThousand,
    /// 亿 / 億
    HundredMillion,
}

impl Unit {
    /// 全部单位，从低到高
    pub const ALL: [Unit; 5] = [
        Unit::Ten,
        Unit::Hundred,
        Unit::Thousand,
        Unit::TenThousand,
        Unit::HundredMillion,
    ];

    /// 单位对应的数值
    pub fn scale(self) -> i64 {
        match self {
            Unit::Ten => 10,
            Unit::Hundred => 100,
            Unit::Thousand => 1_000,
            Unit::TenThousand => 10_000,
            Unit::HundredMillion => 100_000_000,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Ten => "ten",
            Unit::Hundred => "hundred",
            Unit::Thousand => "thousand",
            Unit::TenThousand => "ten-thousand",
            Unit::HundredMillion => "hundred-million",
        };
        f.write_str(name)
    }
}

/// 语言词表（只读，构造后可在多次转换间共享）
#[derive(Debug, Clone)]
pub struct LocaleProfile {
    language: Language,
    digits: HashMap<String, u8>,
    zeros: HashSet<String>,
    leading_only: HashSet<String>,
    units: [HashSet<String>; 5],
    negatives: HashSet<String>,
    decimal_point: String,
    /// 多字符词条，按长度降序（最长匹配）
    compounds: Vec<String>,
    elision_correction: bool,
    zero_gap_after_unit: bool,
    units_lead: bool,
}

impl LocaleProfile {
    /// 内置中文词表
    pub fn chinese() -> Self {
        ProfileBuilder::new(Language::Chinese).assemble()
    }

    /// 内置日文词表
    pub fn japanese() -> Self {
        ProfileBuilder::new(Language::Japanese).assemble()
    }

    /// 进程内共享的内置词表（每种语言只构造一次）
    pub fn shared(language: Language) -> &'static LocaleProfile {
        static CHINESE: OnceLock<LocaleProfile> = OnceLock::new();
        static JAPANESE: OnceLock<LocaleProfile> = OnceLock::new();

        match language {
            Language::Chinese => CHINESE.get_or_init(Self::chinese),
            Language::Japanese => JAPANESE.get_or_init(Self::japanese),
        }
    }

    /// 以内置词表为起点自定义词表
    pub fn builder(language: Language) -> ProfileBuilder {
        ProfileBuilder::new(language)
    }

    /// 以当前词表为起点继续覆盖
    pub fn to_builder(&self) -> ProfileBuilder {
        let mut units: [Vec<String>; 5] = Default::default();
        for unit in Unit::ALL {
            units[unit.index()] = self.units[unit.index()].iter().cloned().collect();
        }

        ProfileBuilder {
            language: self.language,
            digits: self.digits.clone(),
            leading_only: self.leading_only.iter().cloned().collect(),
            units,
            negatives: self.negatives.iter().cloned().collect(),
            decimal_point: self.decimal_point.clone(),
            elision_correction: self.elision_correction,
            zero_gap_after_unit: self.zero_gap_after_unit,
            units_lead: self.units_lead,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// 数字词条的取值
    pub fn digit_value(&self, token: &str) -> Option<u8> {
        self.digits.get(token).copied()
    }

    /// 只能作数首的数字，不能跟在单位或小数点之后
    pub fn is_leading_only(&self, token: &str) -> bool {
        self.leading_only.contains(token)
    }

    /// 是否为零（由数字表中取值为 0 的词条生成）
    pub fn is_zero(&self, token: &str) -> bool {
        self.zeros.contains(token)
    }

    /// 单位词条所属的数位
    pub fn unit_of(&self, token: &str) -> Option<Unit> {
        Unit::ALL
            .into_iter()
            .find(|unit| self.units[unit.index()].contains(token))
    }

    pub fn is_unit(&self, token: &str, unit: Unit) -> bool {
        self.units[unit.index()].contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negatives.contains(token)
    }

    pub fn is_decimal_point(&self, token: &str) -> bool {
        self.decimal_point == token
    }

    /// 口语省略末位单位的还原（"一万五" = 15000）
    pub fn elision_correction(&self) -> bool {
        self.elision_correction
    }

    /// 百/千 后紧跟的"零"表示跳过的数位（"三百零五"）
    pub fn zero_gap_after_unit(&self) -> bool {
        self.zero_gap_after_unit
    }

    /// 百/千/万/亿 可以直接开始一个数（"百一" = 101）
    pub fn units_lead(&self) -> bool {
        self.units_lead
    }

    /// 是否属于数值（无符号部分）的首符集
    pub fn starts_magnitude(&self, token: &str) -> bool {
        if self.digits.contains_key(token) {
            return true;
        }
        match self.unit_of(token) {
            Some(Unit::Ten) => true,
            Some(_) => self.units_lead,
            None => false,
        }
    }

    /// 是否属于带符号数的首符集
    pub fn starts_signed(&self, token: &str) -> bool {
        self.starts_magnitude(token) || self.is_negative(token)
    }

    /// 在 `rest` 开头匹配最长的多字符词条，返回其字节长度
    pub fn compound_width(&self, rest: &str) -> Option<usize> {
        self.compounds
            .iter()
            .find(|compound| rest.starts_with(compound.as_str()))
            .map(String::len)
    }

    /// 全部数字词条
    pub fn digit_tokens(&self) -> impl Iterator<Item = &str> {
        self.digits.keys().map(String::as_str)
    }

    /// 词表中是否有词条包含该字符
    pub fn mentions_char(&self, ch: char) -> bool {
        self.digits.keys().any(|t| t.contains(ch))
            || self.units.iter().flatten().any(|t| t.contains(ch))
            || self.negatives.iter().any(|t| t.contains(ch))
            || self.decimal_point.contains(ch)
    }
}

/// LocaleProfile 构造器
///
/// 覆盖数字表时零词条会随之重新生成；`build()` 校验词表的一致性。
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    language: Language,
    digits: HashMap<String, u8>,
    leading_only: Vec<String>,
    units: [Vec<String>; 5],
    negatives: Vec<String>,
    decimal_point: String,
    elision_correction: bool,
    zero_gap_after_unit: bool,
    units_lead: bool,
}

impl ProfileBuilder {
    /// 以内置词表为起点
    pub fn new(language: Language) -> Self {
        let mut digits = HashMap::new();
        for table in [EVERYDAY_DIGITS, FINANCIAL_DIGITS] {
            for (value, ch) in table.chars().enumerate() {
                digits.insert(ch.to_string(), value as u8);
            }
        }
        digits.insert("两".to_string(), 2);

        let owned = |tokens: &[&str]| tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        let leading_only = owned(LEADING_ONLY_DIGITS);
        let mut units: [Vec<String>; 5] = [
            owned(&["十", "拾"]),
            owned(&["百", "佰"]),
            owned(&["千", "仟"]),
            owned(&["万"]),
            Vec::new(),
        ];

        match language {
            Language::Chinese => {
                units[Unit::HundredMillion.index()] = owned(&["亿"]);
                Self {
                    language,
                    digits,
                    leading_only,
                    units,
                    negatives: owned(&["负"]),
                    decimal_point: "点".to_string(),
                    elision_correction: true,
                    zero_gap_after_unit: true,
                    units_lead: false,
                }
            }
            Language::Japanese => {
                units[Unit::HundredMillion.index()] = owned(&["億"]);
                digits.insert("ゼロ".to_string(), 0);
                digits.insert("ゼーロ".to_string(), 0);
                Self {
                    language,
                    digits,
                    leading_only,
                    units,
                    negatives: owned(&["負", "マイナス"]),
                    decimal_point: "点".to_string(),
                    elision_correction: false,
                    zero_gap_after_unit: false,
                    units_lead: true,
                }
            }
        }
    }

    /// 替换数字表
    pub fn digits<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u8)>,
        S: Into<String>,
    {
        self.digits = entries.into_iter().map(|(t, v)| (t.into(), v)).collect();
        self
    }

    /// 替换只能作数首的数字（须同时出现在数字表中）
    pub fn leading_only_digits<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_only = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// 替换某一数位的单位词条
    pub fn units<I, S>(mut self, unit: Unit, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units[unit.index()] = tokens.into_iter().map(Into::into).collect();
        self
    }

    /// 替换负号词条
    pub fn negatives<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.negatives = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn decimal_point(mut self, token: impl Into<String>) -> Self {
        self.decimal_point = token.into();
        self
    }

    pub fn elision_correction(mut self, enabled: bool) -> Self {
        self.elision_correction = enabled;
        self
    }

    pub fn zero_gap_after_unit(mut self, enabled: bool) -> Self {
        self.zero_gap_after_unit = enabled;
        self
    }

    pub fn units_lead(mut self, enabled: bool) -> Self {
        self.units_lead = enabled;
        self
    }

    /// 校验并生成词表
    pub fn build(self) -> NumConvResult<LocaleProfile> {
        self.validate()?;
        let profile = self.assemble();
        tracing::debug!(
            "词表构造完成: language={:?}, digits={}, compounds={:?}",
            profile.language,
            profile.digits.len(),
            profile.compounds
        );
        Ok(profile)
    }

    fn validate(&self) -> NumConvResult<()> {
        // 数字表：取值 0-9 且每个值都有词条
        for (token, &value) in &self.digits {
            if token.is_empty() {
                return Err(NumConvError::EmptyToken { table: "digit" });
            }
            if value > 9 {
                return Err(NumConvError::DigitOutOfRange {
                    token: token.clone(),
                    value,
                });
            }
        }
        for value in 0..=9u8 {
            if !self.digits.values().any(|&v| v == value) {
                return Err(NumConvError::MissingDigit(value));
            }
        }

        // 单位表：非空且各级互不相交
        let mut unit_owner: HashMap<&str, Unit> = HashMap::new();
        for unit in Unit::ALL {
            let tokens = &self.units[unit.index()];
            if tokens.is_empty() {
                return Err(NumConvError::EmptyUnitTable(unit));
            }
            for token in tokens {
                if token.is_empty() {
                    return Err(NumConvError::EmptyToken { table: "unit" });
                }
                match unit_owner.get(token.as_str()) {
                    Some(&first) if first != unit => {
                        return Err(NumConvError::OverlappingUnits {
                            token: token.clone(),
                            first,
                            second: unit,
                        });
                    }
                    _ => {
                        unit_owner.insert(token, unit);
                    }
                }
            }
        }

        if self.negatives.iter().any(String::is_empty) {
            return Err(NumConvError::EmptyToken { table: "negative" });
        }

        if self.decimal_point.chars().count() != 1 {
            return Err(NumConvError::InvalidDecimalPoint(self.decimal_point.clone()));
        }

        // 跨表不能出现同一词条
        let mut owner: HashMap<&str, &'static str> = HashMap::new();
        let tables = [
            ("digit", self.digits.keys().collect::<Vec<_>>()),
            ("unit", self.units.iter().flatten().collect()),
            ("negative", self.negatives.iter().collect()),
            ("decimal point", vec![&self.decimal_point]),
        ];
        for (table, tokens) in tables {
            for token in tokens {
                match owner.get(token.as_str()) {
                    Some(&first) if first != table => {
                        return Err(NumConvError::AmbiguousToken {
                            token: token.clone(),
                            first,
                            second: table,
                        });
                    }
                    _ => {
                        owner.insert(token, table);
                    }
                }
            }
        }

        Ok(())
    }

    /// 生成词表（不校验，内置词表直接走这里）
    pub(crate) fn assemble(self) -> LocaleProfile {
        let zeros: HashSet<String> = self
            .digits
            .iter()
            .filter(|(_, &value)| value == 0)
            .map(|(token, _)| token.clone())
            .collect();

        // 数字表被替换后，不在表中的数首限定词条随之失效
        let leading_only: HashSet<String> = self
            .leading_only
            .iter()
            .filter(|token| self.digits.contains_key(token.as_str()))
            .cloned()
            .collect();

        let mut units: [HashSet<String>; 5] = Default::default();
        for unit in Unit::ALL {
            units[unit.index()] = self.units[unit.index()].iter().cloned().collect();
        }

        let mut compounds: Vec<String> = self
            .digits
            .keys()
            .chain(self.units.iter().flatten())
            .chain(self.negatives.iter())
            .filter(|token| token.chars().count() > 1)
            .cloned()
            .collect();
        compounds.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        compounds.dedup();

        LocaleProfile {
            language: self.language,
            digits: self.digits,
            zeros,
            leading_only,
            units,
            negatives: self.negatives.into_iter().collect(),
            decimal_point: self.decimal_point,
            compounds,
            elision_correction: self.elision_correction,
            zero_gap_after_unit: self.zero_gap_after_unit,
            units_lead: self.units_lead,
        }
    }
}

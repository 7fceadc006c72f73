//! ITN Engine - 数字规范化入口
//!
//! 组合词表、量词守卫与转换器

use crate::config::NumConvConfig;
use crate::error::NumConvResult;
use crate::itn::converter::{self, ConversionResult};
use crate::itn::{Language, LocaleProfile, QuantifierGuard};

/// 数字规范化引擎
#[derive(Debug, Clone)]
pub struct NumeralNormalizer {
    profile: LocaleProfile,
    guard: Option<QuantifierGuard>,
}

impl NumeralNormalizer {
    /// 创建不带量词保护的引擎
    pub fn new(profile: LocaleProfile) -> Self {
        Self {
            profile,
            guard: None,
        }
    }

    /// 创建带量词保护的引擎
    pub fn with_quantifiers<I, S>(profile: LocaleProfile, quantifiers: I) -> NumConvResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let guard = QuantifierGuard::new(quantifiers, &profile)?;
        Ok(Self {
            profile,
            guard: Some(guard),
        })
    }

    /// 按配置创建
    pub fn from_config(config: &NumConvConfig) -> NumConvResult<Self> {
        let profile = config.profile.build_profile()?;
        if config.quantifiers.enabled {
            return Self::with_quantifiers(profile, &config.quantifiers.graphemes);
        }
        Ok(Self::new(profile))
    }

    pub fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    pub fn protects_quantifiers(&self) -> bool {
        self.guard.is_some()
    }

    /// 处理文本，返回结果与变更记录
    pub fn process(&self, text: &str) -> ConversionResult {
        match &self.guard {
            Some(guard) => guard.convert_with_changes(text),
            None => converter::convert_with_changes(text, &self.profile),
        }
    }

    /// 处理文本，仅返回结果
    pub fn normalize(&self, text: &str) -> String {
        match &self.guard {
            Some(guard) => guard.convert(text),
            None => converter::convert(text, &self.profile),
        }
    }

    /// 回滚处理结果
    pub fn rollback(result: &ConversionResult) -> String {
        converter::rollback(result)
    }
}

impl Default for NumeralNormalizer {
    fn default() -> Self {
        Self::new(LocaleProfile::shared(Language::Chinese).clone())
    }
}

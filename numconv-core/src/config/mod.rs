//! 配置模块
//!
//! 统一的配置管理，从 ~/.config/numconv/config.toml 加载

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NumConvError, NumConvResult};
use crate::itn::{Language, LocaleProfile, Unit, DEFAULT_QUANTIFIERS};

/// 完整配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NumConvConfig {
    /// 转换结果缓存条数（0 表示不缓存）
    pub cache_capacity: usize,
    /// 词表配置
    pub profile: ProfileConfig,
    /// 量词保护配置
    pub quantifiers: QuantifierConfig,
}

impl Default for NumConvConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 256,
            profile: ProfileConfig::default(),
            quantifiers: QuantifierConfig::default(),
        }
    }
}

/// 词表配置：选择语言，可选覆盖单张词表
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negatives: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimal_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elision_correction: Option<bool>,
    /// 只能作数首的数字（默认 "两"）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_only_digits: Option<Vec<String>>,
    /// 数字表（替换内置表，零词条随之重新生成）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digits: Option<BTreeMap<String, u8>>,
    /// 单位表（按数位分别替换）
    pub units: UnitOverrides,
}

/// 单位表覆盖
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ten: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hundred: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thousand: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ten_thousand: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hundred_million: Option<Vec<String>>,
}

impl UnitOverrides {
    fn entries(&self) -> [(Unit, Option<&Vec<String>>); 5] {
        [
            (Unit::Ten, self.ten.as_ref()),
            (Unit::Hundred, self.hundred.as_ref()),
            (Unit::Thousand, self.thousand.as_ref()),
            (Unit::TenThousand, self.ten_thousand.as_ref()),
            (Unit::HundredMillion, self.hundred_million.as_ref()),
        ]
    }
}

/// 量词保护配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantifierConfig {
    /// 是否启用
    pub enabled: bool,
    /// 量词列表
    pub graphemes: Vec<String>,
}

impl Default for QuantifierConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            graphemes: DEFAULT_QUANTIFIERS.iter().map(|q| q.to_string()).collect(),
        }
    }
}

impl ProfileConfig {
    /// 按配置生成词表
    pub fn build_profile(&self) -> NumConvResult<LocaleProfile> {
        let mut builder = LocaleProfile::builder(self.language);

        if let Some(digits) = &self.digits {
            builder = builder.digits(digits.iter().map(|(t, &v)| (t.clone(), v)));
        }
        for (unit, tokens) in self.units.entries() {
            if let Some(tokens) = tokens {
                builder = builder.units(unit, tokens.iter().cloned());
            }
        }
        if let Some(negatives) = &self.negatives {
            builder = builder.negatives(negatives.iter().cloned());
        }
        if let Some(decimal_point) = &self.decimal_point {
            builder = builder.decimal_point(decimal_point.clone());
        }
        if let Some(enabled) = self.elision_correction {
            builder = builder.elision_correction(enabled);
        }
        if let Some(tokens) = &self.leading_only_digits {
            builder = builder.leading_only_digits(tokens.iter().cloned());
        }

        builder.build()
    }
}

impl NumConvConfig {
    /// 加载配置文件，不存在时使用默认配置
    pub fn load() -> NumConvResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::info!("配置文件不存在，使用默认配置: {:?}", config_path);
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// 从指定路径加载
    pub fn load_from(path: &Path) -> NumConvResult<Self> {
        if !path.exists() {
            return Err(NumConvError::ConfigNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content).map_err(|reason| NumConvError::ConfigParse {
            path: path.display().to_string(),
            reason,
        })?;

        tracing::info!(
            "加载配置成功: {:?} (language={:?}, quantifiers={})",
            path,
            config.profile.language,
            config.quantifiers.enabled
        );
        Ok(config)
    }

    /// 解析 TOML 文本
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// 保存到默认路径
    pub fn save(&self) -> NumConvResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// 保存到指定路径
    pub fn save_to(&self, path: &Path) -> NumConvResult<()> {
        // 确保目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| NumConvError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, content)?;

        tracing::info!("保存配置成功: {:?}", path);
        Ok(())
    }

    /// 获取配置文件路径
    pub fn config_path() -> NumConvResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| NumConvError::ConfigNotFound("无法获取配置目录".to_string()))?;

        Ok(config_dir.join("numconv").join("config.toml"))
    }
}

use thiserror::Error;

use crate::itn::Unit;

#[derive(Error, Debug)]
pub enum NumConvError {
    // 语法错误（由转换器就地恢复，不会传给调用方）
    #[error("Syntax violation at byte {offset}: unexpected {found:?}")]
    Syntax { offset: usize, found: String },

    // 词表配置错误
    #[error("Unit tables overlap: {token:?} is listed under both {first} and {second}")]
    OverlappingUnits {
        token: String,
        first: Unit,
        second: Unit,
    },

    #[error("Token {token:?} appears in both the {first} and {second} tables")]
    AmbiguousToken {
        token: String,
        first: &'static str,
        second: &'static str,
    },

    #[error("Digit table has no entry for value {0}")]
    MissingDigit(u8),

    #[error("Digit value out of range for {token:?}: {value}")]
    DigitOutOfRange { token: String, value: u8 },

    #[error("Unit table for {0} is empty")]
    EmptyUnitTable(Unit),

    #[error("Empty token in the {table} table")]
    EmptyToken { table: &'static str },

    #[error("Decimal point must be exactly one character, got {0:?}")]
    InvalidDecimalPoint(String),

    // 量词保护错误
    #[error("Quantifier pattern error: {0}")]
    QuantifierPattern(String),

    // 配置文件错误
    #[error("Config parse error: {path} - {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl NumConvError {
    /// 是否为词表配置错误（构造 LocaleProfile 时的编程错误）
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            NumConvError::OverlappingUnits { .. }
                | NumConvError::AmbiguousToken { .. }
                | NumConvError::MissingDigit(_)
                | NumConvError::DigitOutOfRange { .. }
                | NumConvError::EmptyUnitTable(_)
                | NumConvError::EmptyToken { .. }
                | NumConvError::InvalidDecimalPoint(_)
        )
    }
}

pub type NumConvResult<T> = Result<T, NumConvError>;

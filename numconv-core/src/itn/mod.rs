//! ITN (Inverse Text Normalization) 模块
//!
//! 将文本中的中文/日文数字表达转换为阿拉伯数字，其余文字保持不变

pub mod locale;
pub mod scanner;
pub mod parser;
pub mod converter;
pub mod guards;
pub mod engine;
pub mod cache;

// 导出核心类型
pub use locale::{Language, LocaleProfile, ProfileBuilder, Unit};
pub use scanner::{ScanPosition, Scanner};
pub use parser::{parse_numeral, ParseState, Parser};
pub use converter::{convert, convert_with_changes, rollback, ConversionResult, NumeralChange};
pub use guards::{convert_ignoring_quantifiers, ProtectedText, QuantifierGuard, DEFAULT_QUANTIFIERS};
pub use engine::NumeralNormalizer;
pub use cache::ConversionCache;

//! NumConv Core
//!
//! 中文（及日文）数字表达转阿拉伯数字的文本规范化引擎
//!
//! ```
//! use numconv_core::{convert, LocaleProfile};
//!
//! let zh = LocaleProfile::chinese();
//! assert_eq!(convert("中国有十四亿一千七十七万八千七百二十四人", &zh), "中国有1410778724人");
//! ```

#![warn(rust_2018_idioms)]

pub mod itn;
pub mod config;
pub mod error;

// Re-export key types
pub use error::{NumConvError, NumConvResult};
pub use config::NumConvConfig;
pub use itn::{
    convert, convert_ignoring_quantifiers, convert_with_changes, ConversionCache,
    ConversionResult, Language, LocaleProfile, NumeralNormalizer, QuantifierGuard,
};

/// 初始化日志系统
///
/// 调试模式 (--features debug-logs): 按 NUMCONV_LOG 过滤输出
/// 默认模式: 不安装 subscriber，由宿主程序决定
///
/// 注意: 此函数可以安全地多次调用
pub fn init_logging() {
    #[cfg(feature = "debug-logs")]
    {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = EnvFilter::try_from_env("NUMCONV_LOG")
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // 使用 try_init() 代替 init()，避免重复初始化时 panic
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .try_init();
    }
}

//! 配置文件读写测试

use numconv_core::config::NumConvConfig;
use numconv_core::itn::{ConversionCache, Language, NumeralNormalizer};
use numconv_core::NumConvError;

/// 初始化日志（忽略重复初始化错误）
fn init_log() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("NUMCONV_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

#[test]
fn test_save_and_load_round_trip() {
    init_log();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("numconv").join("config.toml");

    let mut config = NumConvConfig::default();
    config.cache_capacity = 16;
    config.profile.language = Language::Japanese;
    config.quantifiers.graphemes = vec!["個".to_string(), "本".to_string()];
    config.save_to(&path).unwrap();

    let loaded = NumConvConfig::load_from(&path).unwrap();
    assert_eq!(loaded.cache_capacity, 16);
    assert_eq!(loaded.profile.language, Language::Japanese);
    assert_eq!(loaded.quantifiers.graphemes, vec!["個", "本"]);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = NumConvConfig::load_from(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, NumConvError::ConfigNotFound(_)));
}

#[test]
fn test_malformed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "cache_capacity = \"many\"").unwrap();

    let err = NumConvConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, NumConvError::ConfigParse { .. }));
    assert!(!err.is_configuration_error());
}

#[test]
fn test_engine_from_file() {
    init_log();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        cache_capacity = 4

        [profile]
        language = "chinese"

        [quantifiers]
        enabled = true
        graphemes = ["个"]
        "#,
    )
    .unwrap();

    let config = NumConvConfig::load_from(&path).unwrap();
    let engine = NumeralNormalizer::from_config(&config).unwrap();
    let mut cache = ConversionCache::new(engine, config.cache_capacity);

    assert_eq!(cache.normalize("两三个人花了一万五"), "两三个人花了15000");
    assert_eq!(cache.normalize("两三个人花了一万五"), "两三个人花了15000");
    assert_eq!(cache.hits(), 1);
}

#[test]
fn test_quantifiers_disabled() {
    let config = NumConvConfig::from_toml(
        r#"
        [quantifiers]
        enabled = false
        "#,
    )
    .unwrap();

    let engine = NumeralNormalizer::from_config(&config).unwrap();
    assert!(!engine.protects_quantifiers());
    assert_eq!(engine.normalize("两三个"), "23个");
}

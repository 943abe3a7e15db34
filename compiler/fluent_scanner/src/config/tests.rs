use super::*;

#[test]
fn default_is_full() {
    assert_eq!(ScannerConfig::default(), ScannerConfig::full());
}

#[test]
fn full_supports_every_kind() {
    let config = ScannerConfig::full();
    assert_eq!(config.max_nested_patterns(), MAX_NESTED_PATTERNS);
    assert_eq!(config.supported_tokens(), ValidTokens::all());
    assert_eq!(config.state_width(), 2);
    assert!(!config.has(Features::ANCHORED_BLANK_LINES));
}

#[test]
fn minimal_supports_five_kinds() {
    let config = ScannerConfig::minimal();
    assert_eq!(
        config.supported_tokens(),
        ValidTokens::VALUE_START
            | ValidTokens::PURE_TEXT
            | ValidTokens::VALUE_END
            | ValidTokens::SKIP
            | ValidTokens::BLANK_LINES
    );
    // Skip tokens are emitted but the flag is not persisted.
    assert!(!config.has(Features::SKIP_FLAG));
    assert_eq!(config.state_width(), 1);
    assert_eq!(config.max_nested_patterns(), 1);
}

#[test]
fn zero_ceiling_is_raised_to_one() {
    let config = ScannerConfig::full().with_max_nested_patterns(0);
    assert_eq!(config.max_nested_patterns(), 1);
}

#[test]
fn with_features_replaces_set() {
    let config = ScannerConfig::full().with_features(Features::SKIP);
    assert!(config.has(Features::SKIP));
    assert!(!config.has(Features::COMMENT_BLOCKS));
    assert_eq!(
        config.supported_tokens(),
        ValidTokens::VALUE_START
            | ValidTokens::PURE_TEXT
            | ValidTokens::VALUE_END
            | ValidTokens::BLANK_LINES
            | ValidTokens::SKIP
    );
}

/*!
 * Tests for language utility functions
 */

use bipdf::language_utils::{
    get_language_name, language_codes_match, normalize_to_part2t, validate_language_code, LanguageCodeType,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnCorrectType() {
    assert_eq!(validate_language_code("en").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("ar").unwrap(), LanguageCodeType::Part1);
    assert_eq!(validate_language_code("ara").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("fra").unwrap(), LanguageCodeType::Part2T);
    assert_eq!(validate_language_code("ger").unwrap(), LanguageCodeType::Part2B);

    // Whitespace and case
    assert_eq!(validate_language_code(" EN ").unwrap(), LanguageCodeType::Part1);

    // Invalid codes
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization of language codes to ISO 639-2/T format
#[test]
fn test_normalize_to_part2t_withValidCodes_shouldNormalizeCorrectly() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ar").unwrap(), "ara");
    assert_eq!(normalize_to_part2t("FRE").unwrap(), "fra");
    assert_eq!(normalize_to_part2t(" de ").unwrap(), "deu");
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("ar", "ara"));
    assert!(language_codes_match("EN", "eng"));
    assert!(!language_codes_match("en", "ar"));
}

/// Test language names used in the translation prompt
#[test]
fn test_get_language_name_withCommonCodes_shouldReturnEnglishNames() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fr").unwrap(), "French");
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert!(get_language_name("zz").is_err());
}

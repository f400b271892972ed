//! JMA telop (weather condition) code table.

/// Known telop codes and their Japanese descriptions, sorted by code.
const TELOP_CODES: &[(i64, &str)] = &[
    (100, "晴れ"),
    (101, "晴れ時々くもり"),
    (102, "晴れ一時雨"),
    (103, "晴れ時々雨"),
    (104, "晴れ一時雪"),
    (110, "晴れのち時々くもり"),
    (111, "晴れのちくもり"),
    (112, "晴れのち一時雨"),
    (113, "晴れのち時々雨"),
    (114, "晴れのち雨"),
    (115, "晴れのち一時雪"),
    (116, "晴れのち雪"),
    (200, "くもり"),
    (201, "くもり時々晴れ"),
    (202, "くもり一時雨"),
    (203, "くもり時々雨"),
    (204, "くもり一時雪"),
    (210, "くもりのち時々晴れ"),
    (211, "くもりのち晴れ"),
    (212, "くもりのち一時雨"),
    (213, "くもりのち時々雨"),
    (214, "くもりのち雨"),
    (215, "くもりのち一時雪"),
    (216, "くもりのち雪"),
    (300, "雨"),
    (301, "雨時々晴れ"),
    (302, "雨時々止む"),
    (303, "雨時々雪"),
    (304, "雨か雪"),
    (311, "雨のち晴れ"),
    (313, "雨のちくもり"),
    (314, "雨のち時々雪"),
    (315, "雨のち雪"),
    (400, "雪"),
    (401, "雪時々晴れ"),
    (402, "雪時々止む"),
    (403, "雪時々雨"),
    (411, "雪のち晴れ"),
    (413, "雪のちくもり"),
    (414, "雪のち雨"),
];

/// Look up the description for a known telop code.
pub fn describe(code: i64) -> Option<&'static str> {
    TELOP_CODES
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|idx| TELOP_CODES[idx].1)
}

/// Decode a telop code into display text. Total: unknown codes get a placeholder.
pub fn decode(code: i64) -> String {
    match describe(code) {
        Some(text) => text.to_string(),
        None => format!("不明な天気コード: {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_for_binary_search() {
        assert!(TELOP_CODES.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn decodes_known_codes() {
        assert_eq!(decode(100), "晴れ");
        assert_eq!(decode(214), "くもりのち雨");
        assert_eq!(decode(414), "雪のち雨");
    }

    #[test]
    fn unknown_code_gets_placeholder() {
        assert_eq!(decode(999), "不明な天気コード: 999");
        assert_eq!(decode(0), "不明な天気コード: 0");
        assert_eq!(decode(105), "不明な天気コード: 105");
        assert_eq!(decode(-1), "不明な天気コード: -1");
    }

    #[test]
    fn every_code_decodes_to_non_empty_text() {
        for code in (-10..1_000).chain([i64::MIN, i64::MAX]) {
            assert!(!decode(code).is_empty());
        }
    }
}

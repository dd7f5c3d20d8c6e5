//! Text normalization helpers shared by the extractor.

/// Collapse raw extracted text into clean lines.
///
/// Every line is trimmed and blank lines are dropped entirely, so the result
/// never contains leading/trailing whitespace lines or blank-only lines.
#[must_use]
pub fn normalize_lines(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse internal runs of whitespace in a single cell/segment to one space.
#[must_use]
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_drops_blank_lines_and_trims() {
        let raw = "  alpha  \n\n\t\n beta\ngamma  \n";
        assert_eq!(normalize_lines(raw), "alpha\nbeta\ngamma");
    }

    #[test]
    fn collapse_whitespace_flattens_runs() {
        assert_eq!(collapse_whitespace(" a \n b\t\tc "), "a b c");
    }

    proptest! {
        #[test]
        fn normalized_text_never_has_blank_or_padded_lines(raw in "[a-z \\t\\n]{0,200}") {
            let normalized = normalize_lines(&raw);
            for line in normalized.lines() {
                prop_assert!(!line.is_empty());
                prop_assert_eq!(line, line.trim());
            }
            prop_assert_eq!(normalize_lines(&normalized), normalized.clone());
        }
    }
}

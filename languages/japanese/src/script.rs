/// Japanese script filter for raw detector output.
///
/// The detector reads everything on screen; only strings that are mostly
/// Japanese should reach the translator. A string passes when it contains at
/// least `min_chars` Japanese characters and those make up at least
/// `min_ratio` of all its characters. Both thresholds are precision/recall
/// tuning points, exposed through `DetectionConfig`.
#[derive(Debug, Clone, Copy)]
pub struct ScriptFilter {
    pub min_chars: usize,
    pub min_ratio: f32,
}

impl Default for ScriptFilter {
    fn default() -> Self {
        Self {
            min_chars: 2,
            min_ratio: 0.5,
        }
    }
}

impl ScriptFilter {
    pub fn new(min_chars: usize, min_ratio: f32) -> Self {
        Self {
            min_chars,
            min_ratio,
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        let total = text.chars().count();
        if total == 0 {
            return false;
        }

        let japanese = text.chars().filter(|&c| is_japanese_char(c)).count();
        japanese >= self.min_chars && japanese as f32 / total as f32 >= self.min_ratio
    }
}

/// Hiragana/katakana, CJK extension A, and the unified CJK ideograph block
fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}' | '\u{3400}'..='\u{4DBF}' | '\u{4E00}'..='\u{9FFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_japanese_passes() {
        let filter = ScriptFilter::default();
        assert!(filter.matches("こんにちは"));
        assert!(filter.matches("日本語"));
        assert!(filter.matches("カタカナ"));
    }

    #[test]
    fn latin_text_is_dropped() {
        let filter = ScriptFilter::default();
        assert!(!filter.matches("hello world"));
        assert!(!filter.matches(""));
    }

    #[test]
    fn single_japanese_char_fails_min_chars() {
        let filter = ScriptFilter::default();
        assert!(!filter.matches("日"));
    }

    #[test]
    fn mostly_latin_fails_ratio() {
        // Two Japanese chars but ratio well under 50%
        let filter = ScriptFilter::default();
        assert!(!filter.matches("abcdefgh日本"));
    }

    #[test]
    fn mixed_text_at_threshold_passes() {
        // 2 of 4 chars Japanese: exactly 50%
        let filter = ScriptFilter::default();
        assert!(filter.matches("ab日本"));
    }

    #[test]
    fn thresholds_are_configurable() {
        let lenient = ScriptFilter::new(1, 0.1);
        assert!(lenient.matches("abcdefgh日"));

        let strict = ScriptFilter::new(3, 0.9);
        assert!(!strict.matches("ab日本"));
        assert!(strict.matches("日本語"));
    }
}

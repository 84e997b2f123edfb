use rand::{Rng, SeedableRng};
use rand_regex::Regex;
use rand_xorshift::XorShiftRng;
use tracing::debug;

/// Samples drawn per pattern before giving up on finding XML-safe text
const MAX_ATTEMPTS: usize = 16;

const NAME_START: &str = "_:A-Za-z";
const NAME_CHAR: &str = r"\-.0-9:A-Z_a-z";

/// Rewrite an XSD pattern into the `regex-syntax` dialect used by `rand_regex`.
///
/// XSD patterns are always anchored and treat `^` and `$` as ordinary
/// characters. `\i` and `\c` are the XML name classes, and class subtraction
/// is spelled `[a-z-[aeiou]]` instead of `[a-z--[aeiou]]`. `\d` is narrowed to
/// ASCII digits so samples stay readable.
pub fn translate_pattern(pattern: &str) -> String {
    let mut output = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();
    let mut class_depth = 0usize;
    let mut after_dash = false;

    while let Some(c) = chars.next() {
        let in_class = class_depth > 0;
        let mut dash = false;

        match c {
            '\\' => match chars.next() {
                Some('i') if in_class => output.push_str(NAME_START),
                Some('i') => output.push_str(&format!("[{NAME_START}]")),
                Some('I') if !in_class => output.push_str(&format!("[^{NAME_START}]")),
                Some('c') if in_class => output.push_str(NAME_CHAR),
                Some('c') => output.push_str(&format!("[{NAME_CHAR}]")),
                Some('C') if !in_class => output.push_str(&format!("[^{NAME_CHAR}]")),
                Some('d') if in_class => output.push_str("0-9"),
                Some('d') => output.push_str("[0-9]"),
                Some(escaped) => {
                    output.push('\\');
                    output.push(escaped);
                }
                None => output.push('\\'),
            },
            '[' => {
                if in_class && after_dash {
                    output.push('-');
                }
                class_depth += 1;
                output.push('[');
            }
            ']' if in_class => {
                class_depth -= 1;
                output.push(']');
            }
            '-' if in_class => {
                dash = true;
                output.push('-');
            }
            '^' if !in_class => output.push_str(r"\^"),
            '$' if !in_class => output.push_str(r"\$"),
            '.' if !in_class => output.push_str(r"[^\n\r]"),
            other => output.push(other),
        }

        after_dash = dash;
    }

    output
}

/// Characters allowed in XML 1.0 text
pub fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

/// Produces strings matching XSD patterns.
///
/// Best effort: a pattern that cannot be compiled or sampled comes back
/// verbatim.
pub struct RegexGenerator {
    rng: XorShiftRng,
    max_repeat: u32,
}

impl RegexGenerator {
    pub fn new(seed: u64, max_repeat: u32) -> Self {
        RegexGenerator {
            rng: XorShiftRng::seed_from_u64(seed),
            max_repeat,
        }
    }

    pub fn generate(&mut self, pattern: &str) -> String {
        match self.try_generate(pattern) {
            Some(value) => value,
            None => pattern.to_string(),
        }
    }

    fn try_generate(&mut self, pattern: &str) -> Option<String> {
        let translated = translate_pattern(pattern);
        let regex = match Regex::compile(&translated, self.max_repeat) {
            Ok(regex) => regex,
            Err(err) => {
                debug!("Cannot generate from pattern '{}': {}", pattern, err);
                return None;
            }
        };

        let value = (0..MAX_ATTEMPTS)
            .map(|_| self.rng.sample::<String, _>(&regex))
            .find(|candidate| candidate.chars().all(is_xml_char));

        if value.is_none() {
            debug!("No XML-safe sample for pattern '{}'", pattern);
        }

        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_full_match(pattern: &str, value: &str) {
        let anchored = regex::Regex::new(&format!("^(?:{})$", pattern)).unwrap();
        assert!(
            anchored.is_match(value),
            "'{}' does not match '{}'",
            value,
            pattern
        );
    }

    #[test]
    fn test_fixed_width_pattern() {
        let mut generator = RegexGenerator::new(7, 4);
        let value = generator.generate("[a-z]{5}");
        assert_full_match("[a-z]{5}", &value);
    }

    #[test]
    fn test_same_seed_same_value() {
        let pattern = "[A-Z]{2}[0-9]{6}";
        let first = RegexGenerator::new(42, 4).generate(pattern);
        let second = RegexGenerator::new(42, 4).generate(pattern);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_pattern_falls_back_to_literal() {
        let mut generator = RegexGenerator::new(1, 4);
        assert_eq!(generator.generate("[a-z"), "[a-z");
        assert_eq!(generator.generate(r"\p{IsNotABlock}+"), r"\p{IsNotABlock}+");
    }

    #[test]
    fn test_digits_are_ascii() {
        let mut generator = RegexGenerator::new(3, 4);
        let value = generator.generate(r"\d{3}-\d{4}");
        assert_full_match("[0-9]{3}-[0-9]{4}", &value);
    }

    #[test]
    fn test_name_classes() {
        let mut generator = RegexGenerator::new(9, 6);
        let value = generator.generate(r"\i\c*");
        assert_full_match("[_:A-Za-z][-.0-9:A-Z_a-z]*", &value);
    }

    #[test]
    fn test_class_subtraction() {
        let mut generator = RegexGenerator::new(11, 4);
        let value = generator.generate("[a-z-[aeiou]]{12}");
        assert_eq!(value.chars().count(), 12);
        assert!(value.chars().all(|c| c.is_ascii_lowercase() && !"aeiou".contains(c)));
    }

    #[test]
    fn test_caret_and_dollar_are_literals() {
        let mut generator = RegexGenerator::new(5, 4);
        assert_eq!(generator.generate("a^b$"), "a^b$");
    }

    #[test]
    fn test_unbounded_repeat_is_capped() {
        let mut generator = RegexGenerator::new(13, 3);
        let value = generator.generate("x+");
        assert!(!value.is_empty() && value.len() <= 4);
        assert!(value.chars().all(|c| c == 'x'));
    }

    #[test]
    fn test_translate_pattern() {
        assert_eq!(translate_pattern("[a-z-[aeiou]]"), "[a-z--[aeiou]]");
        assert_eq!(translate_pattern(r"[\i-]"), "[_:A-Za-z-]");
        assert_eq!(translate_pattern(r"[\-a]"), r"[\-a]");
        assert_eq!(translate_pattern("^a.$"), r"\^a[^\n\r]\$");
        assert_eq!(translate_pattern("[^a]"), "[^a]");
    }

    #[test]
    fn test_xml_chars() {
        assert!(is_xml_char('a'));
        assert!(is_xml_char('\n'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{1B}'));
        assert!(!is_xml_char('\u{FFFE}'));
    }
}

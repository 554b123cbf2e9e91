use std::sync::LazyLock;

use regex::Regex;

/// One textual cleanup applied to generated output.
pub struct SanitationRule {
    pub pattern: Regex,
    pub replacement: &'static str,
}

impl SanitationRule {
    fn new(pattern: &str, replacement: &'static str) -> Self {
        Self {
            // Patterns are fixed literals below; a bad one is a programming error.
            pattern: Regex::new(pattern).expect("invalid sanitation pattern"),
            replacement,
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern.replace_all(text, self.replacement).into_owned()
    }
}

/// Ordered cleanup rules for known artifacts the model emits verbatim:
/// literal echoes of the prompt instruction, markdown emphasis, code fences,
/// and section-divider lines. The echo rule runs first since removing it can
/// surface markup remnants for the later rules.
static RULES: LazyLock<Vec<SanitationRule>> = LazyLock::new(|| {
    vec![
        SanitationRule::new(r"맛있는 요리 레시피 1개를 추천해줘\.?", ""),
        SanitationRule::new(r"\*\*", ""),
        SanitationRule::new(r"```(?:json)?", ""),
        SanitationRule::new(r"(?m)^[-=_]{3,}[ \t]*$", ""),
    ]
});

/// Strips known artifact patterns from generated text.
///
/// This is a defensive post-filter, not a validation step: it removes what it
/// knows about and leaves the rest untouched. The rule list is reapplied
/// until the text stops changing, so a removal that uncovers another artifact
/// still gets cleaned and applying the filter twice equals applying it once.
pub fn sanitize(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = RULES
            .iter()
            .fold(current.clone(), |acc, rule| rule.apply(&acc))
            .trim()
            .to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

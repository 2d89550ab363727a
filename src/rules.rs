//! Literal entity replacement rules.
//!
//! Every rule is an exact substring substitution applied to all occurrences.
//! Rules run in sequence over the same buffer, so the double-encoded forms
//! must come first: once `&amp;` has been reduced to `&`, a `&amp;gt;` would
//! only be half decoded.

/// A single literal substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplacementRule {
    /// Exact text to search for
    pub pattern: &'static str,
    /// Text substituted for every occurrence of `pattern`
    pub replacement: &'static str,
}

impl ReplacementRule {
    pub const fn new(pattern: &'static str, replacement: &'static str) -> Self {
        Self {
            pattern,
            replacement,
        }
    }

    /// Replace every occurrence of the pattern, returning the new text and
    /// the number of occurrences replaced.
    pub fn apply(&self, input: &str) -> (String, usize) {
        let count = input.matches(self.pattern).count();
        if count == 0 {
            return (input.to_string(), 0);
        }
        (input.replace(self.pattern, self.replacement), count)
    }
}

/// The six rules in application order. Decodes up to two layers of
/// `&amp;` escaping for `>`, `<` and `&`.
pub const DEFAULT_RULES: [ReplacementRule; 6] = [
    ReplacementRule::new("&amp;gt;", ">"),
    ReplacementRule::new("&amp;lt;", "<"),
    ReplacementRule::new("&amp;amp;", "&"),
    ReplacementRule::new("&gt;", ">"),
    ReplacementRule::new("&lt;", "<"),
    ReplacementRule::new("&amp;", "&"),
];

/// Output of running a rule sequence over a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// Total occurrences replaced, summed over every rule
    pub replacements: usize,
}

/// Apply `rules` in order, each rule consuming the previous rule's output.
pub fn decode(input: &str, rules: &[ReplacementRule]) -> Decoded {
    let mut text = input.to_string();
    let mut replacements = 0;

    for rule in rules {
        let (next, count) = rule.apply(&text);
        text = next;
        replacements += count;
    }

    Decoded { text, replacements }
}

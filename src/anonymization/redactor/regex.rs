//! Regex-based redactor

use super::{patterns::PatternRegistry, Redactor};
use crate::anonymization::models::RedactionSpan;
use crate::domain::Result;
use std::sync::Arc;

/// Regex-based PII redactor
///
/// Replaces every recognised span with its category placeholder, e.g.
/// `"call 555-123-4567"` becomes `"call {{PHONE}}"`. Output is a pure function
/// of the input text and the pattern library.
#[derive(Debug, Clone)]
pub struct RegexRedactor {
    pattern_registry: Arc<PatternRegistry>,
}

impl RegexRedactor {
    /// Create a new redactor with the built-in patterns
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a new redactor with a custom pattern registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    /// Find non-overlapping PII spans, ordered by position
    pub fn detect(&self, text: &str) -> Vec<RedactionSpan> {
        // (span, library order)
        let mut candidates: Vec<(RedactionSpan, usize)> = Vec::new();

        for (order, pattern) in self.pattern_registry.all_patterns().iter().enumerate() {
            for matched in pattern.regex.find_iter(text) {
                if matched.start() == matched.end() {
                    continue;
                }
                candidates.push((
                    RedactionSpan::new(pattern.category, matched.start(), matched.end()),
                    order,
                ));
            }
        }

        candidates.sort_by(|(a, a_order), (b, b_order)| {
            a.start
                .cmp(&b.start)
                .then(b.len().cmp(&a.len()))
                .then(a_order.cmp(b_order))
        });

        let mut accepted: Vec<RedactionSpan> = Vec::with_capacity(candidates.len());
        for (span, _) in candidates {
            if accepted.last().map_or(true, |last| !last.overlaps(&span)) {
                accepted.push(span);
            }
        }
        accepted
    }
}

impl Redactor for RegexRedactor {
    fn redact(&self, text: &str) -> String {
        let spans = self.detect(text);
        if spans.is_empty() {
            return text.to_string();
        }

        let mut output = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in &spans {
            output.push_str(&text[cursor..span.start]);
            output.push_str(&span.category.placeholder());
            cursor = span.end;
        }
        output.push_str(&text[cursor..]);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::RedactionCategory;

    fn redactor() -> RegexRedactor {
        RegexRedactor::new().unwrap()
    }

    #[test]
    fn test_redact_email() {
        let out = redactor().redact("Contact: john.doe@example.com today");
        assert_eq!(out, "Contact: {{EMAIL}} today");
    }

    #[test]
    fn test_redact_phone() {
        let out = redactor().redact("Call (555) 123-4567");
        assert_eq!(out, "Call {{PHONE}}");
    }

    #[test]
    fn test_well_formed_ssn() {
        assert_eq!(redactor().redact("123-45-6789"), "{{SSN}}");
    }

    #[test]
    fn test_malformed_ssn_reads_as_phone() {
        assert_eq!(redactor().redact("123-456-789"), "{{PHONE}}");
    }

    #[test]
    fn test_multiple_categories() {
        let out = redactor().redact("Dr. Jane Smith, jane@clinic.org, 10.0.0.12");
        assert_eq!(out, "{{NAME}}, {{EMAIL}}, {{IP_ADDRESS}}");
    }

    #[test]
    fn test_twitter_handle_not_email() {
        let out = redactor().redact("ping @jdoe or jdoe@example.com");
        assert_eq!(out, "ping {{TWITTER}} or {{EMAIL}}");
    }

    #[test]
    fn test_no_pii_is_unchanged() {
        assert_eq!(redactor().redact("blood pressure normal"), "blood pressure normal");
    }

    #[test]
    fn test_detect_spans_are_ordered_and_disjoint() {
        let spans = redactor().detect("a@b.io then 4111 1111 1111 1111");
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].category, RedactionCategory::Email);
        assert_eq!(spans[1].category, RedactionCategory::CreditCard);
        assert!(spans[0].end <= spans[1].start);
    }

    #[test]
    fn test_deterministic() {
        let r = redactor();
        let text = "Mr. Smith at 555-123-4567, SSN 123-45-6789";
        assert_eq!(r.redact(text), r.redact(text));
    }
}

//! Categories command implementation

use crate::anonymization::models::RedactionCategory;
use crate::anonymization::request::TransformKind;
use crate::anonymization::synth::SynthCategory;
use crate::domain::ColumnType;
use clap::Args;

/// Arguments for the categories command
#[derive(Args, Debug)]
pub struct CategoriesArgs {}

impl CategoriesArgs {
    /// Print transform kinds, column types, synthesize categories and redaction
    /// placeholders
    pub fn execute(&self) -> anyhow::Result<i32> {
        print!("{}", Self::render());
        Ok(0)
    }

    fn render() -> String {
        let mut output = String::new();

        output.push_str("Transform kinds:\n");
        for kind in [
            TransformKind::Encrypt,
            TransformKind::Decrypt,
            TransformKind::Synthesize,
            TransformKind::Truncate,
            TransformKind::Redact,
        ] {
            if kind.is_reversible() {
                output.push_str(&format!("  {kind} (keyed, reversible)\n"));
            } else {
                output.push_str(&format!("  {kind}\n"));
            }
        }

        output.push_str("\nColumn types:\n");
        for ty in ColumnType::ALL {
            output.push_str(&format!("  {ty}\n"));
        }

        output.push_str("\nSynthesize categories:\n");
        for category in SynthCategory::all() {
            output.push_str(&format!(
                "  {:16} -> {}\n",
                category.name(),
                category.output_type()
            ));
        }

        output.push_str("\nRedaction placeholders:\n");
        for category in RedactionCategory::all() {
            output.push_str(&format!("  {}\n", category.placeholder()));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_catalog() {
        let out = CategoriesArgs::render();
        assert!(out.contains("synthesize"));
        assert!(out.contains("encrypt (keyed, reversible)"));
        assert!(!out.contains("redact (keyed"));
        assert!(out.contains("  datetime\n"));
        assert!(out.contains("phone_number"));
        assert!(out.contains("date_time        -> datetime"));
        assert!(out.contains("{{SSN}}"));
    }
}

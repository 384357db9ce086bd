//! Models command - list the registered annotation models.

use std::io::Write;

use crate::cli::OutputFormat;
use crate::scoring::registry::AVAILABLE_MODELS;

/// Execute the models command
///
/// # Errors
///
/// Returns an error if the listing cannot be written.
pub fn run(format: OutputFormat) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_models(&mut stdout.lock(), format)
}

fn write_models<W: Write>(out: &mut W, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for (name, summary) in AVAILABLE_MODELS {
                writeln!(out, "{name:<16}{summary}")?;
            }
        }
        OutputFormat::Json => {
            let models: Vec<_> = AVAILABLE_MODELS
                .iter()
                .map(|(name, summary)| serde_json::json!({ "name": name, "description": summary }))
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&models)?)?;
        }
        OutputFormat::Tsv => {
            writeln!(out, "name\tdescription")?;
            for (name, summary) in AVAILABLE_MODELS {
                writeln!(out, "{name}\t{summary}")?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::bed::BED_ANNOTATOR_NAME;

    #[test]
    fn test_models_tsv() {
        let mut out = Vec::new();
        write_models(&mut out, OutputFormat::Tsv).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("name\tdescription\n"));
        assert!(text.contains(BED_ANNOTATOR_NAME));
    }

    #[test]
    fn test_models_json() {
        let mut out = Vec::new();
        write_models(&mut out, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["name"], BED_ANNOTATOR_NAME);
    }
}

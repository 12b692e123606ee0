//! Output formatting utilities for CLI commands

use std::io::{self, Write};

use crate::{Bucket, EntityList};

/// Format error message for display
pub fn format_error(operation: &str, details: &str) -> String {
    format!("ERROR: {} - {}", operation, details)
}

/// Log info message (respects quiet flag)
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", msg);
    }
}

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write to {}: {}", path, e))?;
    } else {
        print!("{}", content);
        io::stdout().flush().map_err(|e| format!("Failed to flush stdout: {}", e))?;
    }
    Ok(())
}

/// Human-readable rendering of a classification result
pub fn format_list(list: &EntityList) -> String {
    let mut out = format!("text:        {}\n", list.text());
    for bucket in [
        Bucket::BareProperNoun,
        Bucket::Address,
        Bucket::DeterminedProperNoun,
        Bucket::PossessiveProperNoun,
        Bucket::UnplacedProperNoun,
    ] {
        let names = list.bucket(bucket);
        if names.is_empty() {
            continue;
        }
        out.push_str(&format!("{:<12} {}\n", format!("{}:", bucket), names.join(", ")));
    }
    if list.is_empty() {
        out.push_str("No entities placed.\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Classifier, Entity, EntityType, Mention, MentionType};

    #[test]
    fn test_format_list() {
        let text = "Alice saw the Eiffel Tower";
        let entities = vec![
            Entity::new("Alice", EntityType::Person)
                .with_mention(Mention::new("Alice", 0, MentionType::Proper)),
            Entity::new("Eiffel Tower", EntityType::Location)
                .with_mention(Mention::new("Eiffel Tower", 14, MentionType::Proper)),
        ];
        let list = Classifier::default().classify(text, &entities).unwrap();
        let out = format_list(&list);
        assert!(out.contains("text:        Alice saw the Eiffel_Tower"));
        assert!(out.contains("bare:        Alice"));
        assert!(out.contains("determined:  Eiffel_Tower"));
        assert!(!out.contains("address:"));
    }

    #[test]
    fn test_format_empty_list() {
        let list = Classifier::default().classify("nothing here", &[]).unwrap();
        assert!(format_list(&list).contains("No entities placed."));
    }
}

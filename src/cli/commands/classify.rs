//! Classify command - annotate text and bucket its entities

use clap::Parser;
use std::time::Instant;

use super::super::output::{format_list, log_info, write_output};
use super::super::parser::{OutputFormat, PolicyArg, StrategyArg};
use super::super::utils::{get_input_text, read_input_file};

use crate::annotate::{Annotator, RecordedAnnotator};
use crate::{analyze, Classifier, Config};

/// Annotate and classify text
#[derive(Parser, Debug, Default)]
pub struct ClassifyArgs {
    /// Input text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read input from file
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<String>,

    /// Use a saved analyzeEntities response instead of calling the service
    #[arg(long, value_name = "PATH")]
    pub response: Option<String>,

    /// Output format
    #[arg(long, default_value = "human")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Mention selection rule (overrides config)
    #[arg(long, value_name = "POLICY")]
    pub policy: Option<PolicyArg>,

    /// Overlap resolution (overrides config)
    #[arg(long, value_name = "STRATEGY")]
    pub strategy: Option<StrategyArg>,

    /// Place names seen only as "<name>'s"
    #[arg(long)]
    pub possessives: bool,

    /// Also match sentence-initial "The <name>"
    #[arg(long)]
    pub capitalized: bool,

    /// Suppress timing information
    #[arg(short, long)]
    pub quiet: bool,

    /// Positional text argument
    #[arg(trailing_var_arg = true)]
    pub positional: Vec<String>,
}

impl ClassifyArgs {
    /// Classifier from config, with command-line overrides applied.
    pub fn classifier(&self, config: &Config) -> Classifier {
        let mut classifier = config.classifier();
        if let Some(policy) = self.policy {
            classifier = classifier.with_mention_policy(policy.into());
        }
        if let Some(strategy) = self.strategy {
            classifier = classifier.with_conflict_strategy(strategy.into());
        }
        if self.possessives {
            classifier = classifier.with_possessives(true);
        }
        if self.capitalized {
            classifier = classifier.with_capitalized_article(true);
        }
        classifier
    }

    fn annotator(&self, config: &Config) -> Result<Box<dyn Annotator>, String> {
        match &self.response {
            Some(path) => {
                let body = read_input_file(path)?;
                let recorded = RecordedAnnotator::from_json(&body)
                    .map_err(|e| format!("Failed to load response {}: {}", path, e))?;
                Ok(Box::new(recorded))
            }
            None => {
                let client = config
                    .annotator
                    .build()
                    .map_err(|e| format!("Failed to set up annotator: {}", e))?;
                Ok(Box::new(client))
            }
        }
    }
}

/// Run the classify command.
pub fn run(args: ClassifyArgs, config: &Config) -> Result<(), String> {
    let raw = get_input_text(&args.text, args.file.as_deref(), &args.positional)?;
    let text = raw.trim_end_matches(['\n', '\r']);

    let classifier = args.classifier(config);
    let annotator = args.annotator(config)?;

    let start = Instant::now();
    let list = analyze(annotator.as_ref(), &classifier, text)
        .map_err(|e| format!("Classification failed: {}", e))?;
    let elapsed = start.elapsed();

    let output = match args.format {
        OutputFormat::Human => format_list(&list),
        OutputFormat::Json => {
            serde_json::to_string_pretty(&list)
                .map_err(|e| format!("Failed to serialize result: {}", e))?
                + "\n"
        }
        OutputFormat::Text => format!("{}\n", list.text()),
    };

    write_output(&output, args.output.as_deref())?;

    log_info(
        &format!(
            "Classified with {} in {:.2}ms",
            annotator.name(),
            elapsed.as_secs_f64() * 1000.0
        ),
        args.quiet || args.format != OutputFormat::Human,
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConflictStrategy, MentionPolicy};

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        config.classifier.possessives = false;

        let args = ClassifyArgs {
            policy: Some(PolicyArg::Primary),
            strategy: Some(StrategyArg::Priority),
            possessives: true,
            ..ClassifyArgs::default()
        };
        let classifier = args.classifier(&config);
        assert_eq!(
            classifier.config().mention_policy,
            MentionPolicy::PrimaryMention
        );
        assert_eq!(
            classifier.config().conflict_strategy,
            ConflictStrategy::Priority
        );
        assert!(classifier.config().possessives);
        assert!(!classifier.config().match_capitalized_article);
    }

    #[test]
    fn test_missing_credentials_reported() {
        let args = ClassifyArgs::default();
        match args.annotator(&Config::default()) {
            Ok(a) => panic!("expected a credentials error, got {}", a.name()),
            Err(err) => assert!(err.contains("Failed to set up annotator")),
        }
    }
}

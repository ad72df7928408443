//! Aggregator - folds per-document insights into one report

use crate::client::InsightClient;
use crate::config::{AggregationMode, SynthesisKind};
use crate::prompt::synthesis_messages;
use crate::sections::parse_sections;
use gleaner_domain::traits::TextService;
use gleaner_domain::{
    ConsolidatedReport, Credential, Diagnostic, DiagnosticKind, FileInsights, Scope,
};
use gleaner_llm::ServiceError;
use tracing::{info, warn};

/// Title of the verbatim report section
pub const VERBATIM_TITLE: &str = "Consolidated insights";

/// Report plus any diagnostics raised while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    /// The consolidated report
    pub report: ConsolidatedReport,
    /// Truncation warnings and synthesis failures
    pub diagnostics: Vec<Diagnostic>,
}

/// Every non-empty insight, in insertion order, joined by one space
///
/// Documents that produced no text are skipped so the separator stays a
/// single space.
pub fn verbatim_corpus(insights: &FileInsights) -> String {
    insights
        .values()
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds the consolidated report
///
/// Stateless apart from the one synthesis call made in
/// [`AggregationMode::Synthesized`]. A failed synthesis call never fails the
/// run: the verbatim report is returned with an
/// [`DiagnosticKind::Aggregation`] diagnostic.
pub struct Aggregator<'a, S> {
    client: &'a InsightClient<S>,
    synthesis: SynthesisKind,
}

impl<'a, S> Aggregator<'a, S>
where
    S: TextService<Error = ServiceError>,
{
    /// Create an aggregator
    pub fn new(client: &'a InsightClient<S>, synthesis: SynthesisKind) -> Self {
        Self { client, synthesis }
    }

    /// Fold `insights` into a report
    pub fn aggregate(
        &self,
        insights: &FileInsights,
        credential: &Credential,
        mode: AggregationMode,
        guiding_questions: Option<&str>,
    ) -> Aggregation {
        let corpus = verbatim_corpus(insights);

        if corpus.is_empty() {
            return Aggregation {
                report: ConsolidatedReport::empty(),
                diagnostics: Vec::new(),
            };
        }

        match mode {
            AggregationMode::Verbatim => Aggregation {
                report: ConsolidatedReport::single(VERBATIM_TITLE, corpus, false),
                diagnostics: Vec::new(),
            },
            AggregationMode::Synthesized => self.synthesize(corpus, credential, guiding_questions),
        }
    }

    fn synthesize(
        &self,
        corpus: String,
        credential: &Credential,
        guiding_questions: Option<&str>,
    ) -> Aggregation {
        info!(kind = ?self.synthesis, chars = corpus.chars().count(), "Requesting synthesis");

        let messages = synthesis_messages(self.synthesis, &corpus, guiding_questions);
        let mut diagnostics = Vec::new();

        match self.client.request(&messages, credential) {
            Ok(reply) => {
                if let Some(cut) = reply.truncation {
                    diagnostics.push(Diagnostic::new(
                        Scope::Run,
                        DiagnosticKind::Truncation,
                        format!(
                            "synthesis corpus truncated from {} to {} characters",
                            cut.original_chars, cut.truncated_chars
                        ),
                    ));
                }
                Aggregation {
                    report: self.report_from(reply.text.trim()),
                    diagnostics,
                }
            }
            Err(error) => {
                warn!(error = %error, "Synthesis failed, falling back to verbatim report");
                diagnostics.push(Diagnostic::new(
                    Scope::Run,
                    DiagnosticKind::Aggregation,
                    format!("synthesis failed ({}); verbatim report used", error),
                ));
                Aggregation {
                    report: ConsolidatedReport::single(VERBATIM_TITLE, corpus, false),
                    diagnostics,
                }
            }
        }
    }

    fn report_from(&self, reply: &str) -> ConsolidatedReport {
        match self.synthesis {
            SynthesisKind::Themes => ConsolidatedReport::single("Common themes", reply, true),
            SynthesisKind::Summary => ConsolidatedReport::single("Summary", reply, true),
            SynthesisKind::Sections => ConsolidatedReport {
                sections: parse_sections(reply),
                synthesized: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_domain::Role;
    use gleaner_llm::MockProvider;

    fn key() -> Credential {
        Credential::new("test-key")
    }

    fn two_files() -> FileInsights {
        [("a.txt", "X"), ("b.txt", "Y")].into_iter().collect()
    }

    #[test]
    fn test_verbatim_joins_in_order_without_calls() {
        let provider = MockProvider::default();
        let client = InsightClient::new(provider.clone(), 4000);
        let aggregation = Aggregator::new(&client, SynthesisKind::Themes).aggregate(
            &two_files(),
            &key(),
            AggregationMode::Verbatim,
            None,
        );

        assert_eq!(aggregation.report.text(), "X Y");
        assert!(!aggregation.report.synthesized);
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_synthesized_makes_exactly_one_call() {
        let provider = MockProvider::new("shared theme: speed");
        let client = InsightClient::new(provider.clone(), 4000);
        let aggregation = Aggregator::new(&client, SynthesisKind::Themes).aggregate(
            &two_files(),
            &key(),
            AggregationMode::Synthesized,
            None,
        );

        assert_eq!(aggregation.report.text(), "shared theme: speed");
        assert!(aggregation.report.synthesized);
        assert_eq!(provider.call_count(), 1);

        let call = &provider.calls()[0];
        let user = call.iter().find(|m| m.role == Role::User).unwrap();
        assert!(user.content.contains("X Y"));
    }

    #[test]
    fn test_synthesis_failure_falls_back_to_verbatim() {
        let mut provider = MockProvider::default();
        provider.add_error("X Y", ServiceError::Timeout);
        let client = InsightClient::new(provider, 4000);
        let aggregation = Aggregator::new(&client, SynthesisKind::Summary).aggregate(
            &two_files(),
            &key(),
            AggregationMode::Synthesized,
            None,
        );

        assert_eq!(aggregation.report.text(), "X Y");
        assert!(!aggregation.report.synthesized);
        assert_eq!(aggregation.diagnostics.len(), 1);
        assert_eq!(aggregation.diagnostics[0].kind, DiagnosticKind::Aggregation);
        assert_eq!(aggregation.diagnostics[0].scope, Scope::Run);
    }

    #[test]
    fn test_empty_insights_skip_the_call() {
        let provider = MockProvider::default();
        let client = InsightClient::new(provider.clone(), 4000);
        let insights: FileInsights = [("a.txt", ""), ("b.txt", "")].into_iter().collect();

        let aggregation = Aggregator::new(&client, SynthesisKind::Themes).aggregate(
            &insights,
            &key(),
            AggregationMode::Synthesized,
            None,
        );

        assert!(aggregation.report.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_empty_insight_does_not_double_separator() {
        let insights: FileInsights = [("a.txt", "X"), ("b.txt", ""), ("c.txt", "Z")]
            .into_iter()
            .collect();
        assert_eq!(verbatim_corpus(&insights), "X Z");
    }

    #[test]
    fn test_sections_synthesis_is_parsed_by_label() {
        let provider = MockProvider::new("Pain Points: exports\nSummary: fine");
        let client = InsightClient::new(provider, 4000);
        let aggregation = Aggregator::new(&client, SynthesisKind::Sections).aggregate(
            &two_files(),
            &key(),
            AggregationMode::Synthesized,
            Some("exports"),
        );

        assert_eq!(aggregation.report.section("summary"), Some("fine"));
        assert_eq!(aggregation.report.section("pain points"), Some("exports"));
    }

    #[test]
    fn test_truncated_corpus_is_reported() {
        let provider = MockProvider::new("themes");
        let client = InsightClient::new(provider, 50);
        let insights: FileInsights = [("a.txt", "word ".repeat(40))].into_iter().collect();

        let aggregation = Aggregator::new(&client, SynthesisKind::Themes).aggregate(
            &insights,
            &key(),
            AggregationMode::Synthesized,
            None,
        );

        assert_eq!(aggregation.report.text(), "themes");
        assert_eq!(aggregation.diagnostics[0].kind, DiagnosticKind::Truncation);
    }
}

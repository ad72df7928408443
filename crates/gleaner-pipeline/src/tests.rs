//! Integration tests for the pipeline

#[cfg(test)]
mod tests {
    use crate::{
        AggregationMode, AnalysisConfig, CancelToken, Pipeline, PipelineError, SynthesisKind,
    };
    use gleaner_domain::{Credential, DiagnosticKind, Document, Role, Scope, SourceKind};
    use gleaner_llm::{MockProvider, ServiceError};

    fn key() -> Credential {
        Credential::new("test-key")
    }

    fn doc(name: &str, text: &str) -> Document {
        Document::new(name, text, SourceKind::PlainText)
    }

    fn small_segments() -> AnalysisConfig {
        AnalysisConfig {
            target_segment_chars: 1,
            max_payload_chars: 4_000,
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn test_full_verbatim_run() {
        let mut provider = MockProvider::default();
        provider.add_response("alpha", "A");
        provider.add_response("beta", "B");
        provider.add_response("gamma", "G");

        let pipeline = Pipeline::new(provider.clone(), small_segments()).unwrap();
        let docs = vec![doc("one.txt", "alpha. beta"), doc("two.txt", "gamma")];

        let outcome = pipeline
            .run_analysis(&docs, &key(), None, AggregationMode::Verbatim, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome.insights.get("one.txt"), Some("A B"));
        assert_eq!(outcome.insights.get("two.txt"), Some("G"));
        assert_eq!(outcome.report.text(), "A B G");
        assert!(outcome.diagnostics.is_empty());
        assert_eq!(provider.call_count(), 3);
    }

    #[test]
    fn test_synthesized_run_costs_one_extra_call() {
        let mut provider = MockProvider::default();
        provider.add_response("Provide insights", "per-segment");
        provider.add_response("common themes", "theme");

        let pipeline = Pipeline::new(provider.clone(), small_segments()).unwrap();
        let docs = vec![doc("a.txt", "x. y"), doc("b.txt", "z")];

        let outcome = pipeline
            .run_analysis(&docs, &key(), None, AggregationMode::Synthesized, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome.report.text(), "theme");
        assert!(outcome.report.synthesized);
        assert_eq!(provider.call_count(), 4);

        let last = provider.calls().pop().unwrap();
        let user = last.iter().find(|m| m.role == Role::User).unwrap();
        assert!(user.content.contains("per-segment per-segment per-segment"));
    }

    #[test]
    fn test_empty_run_is_not_an_error() {
        let provider = MockProvider::default();
        let pipeline = Pipeline::new(provider.clone(), AnalysisConfig::default()).unwrap();

        let outcome = pipeline
            .run_analysis(&[], &key(), None, AggregationMode::Synthesized, &CancelToken::new())
            .unwrap();

        assert!(outcome.insights.is_empty());
        assert!(outcome.report.is_empty());
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_blank_credential_prevents_run() {
        let provider = MockProvider::default();
        let pipeline = Pipeline::new(provider.clone(), AnalysisConfig::default()).unwrap();

        let result = pipeline.run_analysis(
            &[doc("a.txt", "text")],
            &Credential::new("  "),
            None,
            AggregationMode::Verbatim,
            &CancelToken::new(),
        );

        assert_eq!(result, Err(PipelineError::MissingCredential));
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AnalysisConfig {
            max_concurrency: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            Pipeline::new(MockProvider::default(), config),
            Err(PipelineError::Config(_))
        ));
    }

    #[test]
    fn test_failures_become_diagnostics() {
        let mut provider = MockProvider::default();
        provider.add_error("broken", ServiceError::Auth("bad key".to_string()));
        provider.add_response("fine", "ok");

        let pipeline = Pipeline::new(provider, small_segments()).unwrap();
        let docs = vec![doc("a.txt", "fine. broken. fine"), doc("b.txt", "broken")];

        let outcome = pipeline
            .run_analysis(&docs, &key(), None, AggregationMode::Verbatim, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome.insights.get("a.txt"), Some("ok ok"));
        assert_eq!(outcome.insights.get("b.txt"), Some(""));
        assert_eq!(outcome.report.text(), "ok ok");
        assert_eq!(outcome.count(DiagnosticKind::Service), 2);
        assert_eq!(
            outcome.diagnostics[1].scope,
            Scope::Segment("b.txt".to_string(), 0)
        );
        assert_eq!(outcome.failures().count(), 2);
    }

    #[test]
    fn test_parallel_run_matches_sequential_run() {
        let text = (0..30)
            .map(|i| format!("point {:02}", i))
            .collect::<Vec<_>>()
            .join(". ");
        let docs = vec![doc("long.txt", &text)];

        let sequential = Pipeline::new(MockProvider::echo(), small_segments())
            .unwrap()
            .run(&docs, &key(), None, &CancelToken::new())
            .unwrap();
        let parallel = Pipeline::new(
            MockProvider::echo(),
            AnalysisConfig {
                max_concurrency: 4,
                ..small_segments()
            },
        )
        .unwrap()
        .run(&docs, &key(), None, &CancelToken::new())
        .unwrap();

        assert_eq!(parallel.insights, sequential.insights);
        assert_eq!(parallel.report, sequential.report);
    }

    #[test]
    fn test_cache_reuses_identical_uploads() {
        let provider = MockProvider::new("same");
        let pipeline = Pipeline::new(provider.clone(), small_segments()).unwrap();
        let docs = vec![doc("a.txt", "repeat. repeat"), doc("b.txt", "repeat")];

        pipeline
            .run_analysis(&docs, &key(), None, AggregationMode::Verbatim, &CancelToken::new())
            .unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(pipeline.client().cache().map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_cancelled_run_returns_error() {
        let pipeline = Pipeline::new(MockProvider::default(), AnalysisConfig::default()).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();

        let result = pipeline.run_analysis(
            &[doc("a.txt", "text")],
            &key(),
            None,
            AggregationMode::Verbatim,
            &cancel,
        );
        assert_eq!(result, Err(PipelineError::Cancelled));
    }

    #[test]
    fn test_guiding_questions_reach_synthesis_and_scan() {
        let provider = MockProvider::echo();
        let config = AnalysisConfig {
            synthesis: SynthesisKind::Summary,
            ..AnalysisConfig::default()
        };
        let pipeline = Pipeline::new(provider.clone(), config).unwrap();
        let docs = vec![doc("a.txt", "Pricing was discussed. Pricing again")];

        let outcome = pipeline
            .run_analysis(
                &docs,
                &key(),
                Some("pricing, onboarding"),
                AggregationMode::Synthesized,
                &CancelToken::new(),
            )
            .unwrap();

        assert_eq!(outcome.keyword_hits.len(), 1);
        assert_eq!(outcome.keyword_hits[0].count, 2);

        let last = provider.calls().pop().unwrap();
        assert!(last[1].content.contains("pricing, onboarding"));
    }

    #[test]
    fn test_duplicate_names_keep_upload_position() {
        let mut provider = MockProvider::default();
        provider.add_response("first", "1");
        provider.add_response("second", "2");
        provider.add_response("other", "O");

        let pipeline = Pipeline::new(provider, AnalysisConfig::default()).unwrap();
        let docs = vec![
            doc("same.txt", "first"),
            doc("other.txt", "other"),
            doc("same.txt", "second"),
        ];

        let outcome = pipeline
            .run_analysis(&docs, &key(), None, AggregationMode::Verbatim, &CancelToken::new())
            .unwrap();

        assert_eq!(outcome.insights.len(), 2);
        assert_eq!(outcome.report.text(), "2 O");
    }
}

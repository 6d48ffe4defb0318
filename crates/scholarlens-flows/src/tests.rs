//! Integration tests for the flow engine

#[cfg(test)]
mod tests {
    use crate::dimensions::BUILTIN;
    use crate::{FlowConfig, FlowEngine, FlowError};
    use proptest::prelude::*;
    use scholarlens_domain::{Cardinality, Citation, ClassificationValue, DocumentId, PageCorpus};
    use scholarlens_gatekeeper::ValidationConfig;
    use scholarlens_llm::MockProvider;
    use std::time::Duration;

    fn corpus(pages: &[&str]) -> PageCorpus {
        PageCorpus::from_texts(DocumentId::new(), pages.iter().map(|p| p.to_string()))
    }

    fn needle(field: &str) -> String {
        format!("\"{}\"", field)
    }

    fn paper() -> PageCorpus {
        corpus(&[
            "Abstract. This study examines ChatGPT as a writing tutor for EFL learners in Vietnam.",
            "Method. Participants were 120 undergraduate students. Data came from a survey and interviews.",
            "Results. Writing scores improved after the intervention.",
        ])
    }

    #[tokio::test]
    async fn test_empty_corpus_never_calls_model() {
        let engine = FlowEngine::new(MockProvider::new("{}"), FlowConfig::default());
        let empty = corpus(&[]);

        for schema in BUILTIN {
            let result = engine.classify(schema.field, &empty).await;
            assert_eq!(result.unwrap_err(), FlowError::EmptyCorpus, "{}", schema.field);
        }
        let result = engine.answer("What was measured?", &empty).await;
        assert_eq!(result.unwrap_err(), FlowError::EmptyCorpus);

        assert_eq!(engine.llm().call_count(), 0);
    }

    #[tokio::test]
    async fn test_full_classification_flow() {
        let llm = MockProvider::new(
            r#"{"measures": "survey, Interview", "sources": [
                {"page": 2, "text": "Data came from a survey and interviews."}
            ]}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.classify("measures", &paper()).await.unwrap();
        assert_eq!(
            result.value,
            ClassificationValue::Labels(vec!["Survey".into(), "Interview".into()])
        );
        assert_eq!(result.sources, vec![Citation::new(2, "Data came from a survey and interviews.")]);
        assert!(result.ungrounded.is_empty());
        assert_eq!(result.dimension, "measures");
    }

    #[tokio::test]
    async fn test_out_of_vocabulary_is_violation() {
        let llm = MockProvider::new(r#"{"aiTechType": "GenAI, Robots", "sources": []}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let err = engine.classify("aiTechType", &paper()).await.unwrap_err();
        match err {
            FlowError::SchemaViolation { dimension, reason } => {
                assert_eq!(dimension, "aiTechType");
                assert!(reason.contains("Robots"));
            }
            other => panic!("expected schema violation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_single_label_rejects_list() {
        let llm = MockProvider::new(r#"{"participantsGroup": "Students, Teacher", "sources": []}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());
        let result = engine.classify("participantsGroup", &paper()).await;
        assert!(matches!(result, Err(FlowError::SchemaViolation { .. })));
    }

    #[tokio::test]
    async fn test_not_reported_has_no_citations_when_contract_honoured() {
        let llm = MockProvider::new(r#"{"teacherSupport": "NR", "sources": []}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.classify("teacherSupport", &paper()).await.unwrap();
        assert!(result.value.is_not_reported());
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_not_reported_with_citations_is_permitted() {
        let llm = MockProvider::new(
            r#"{"countryOrRegion": "not reported", "sources": [{"page": 1, "text": "This study examines ChatGPT"}]}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.classify("countryOrRegion", &paper()).await.unwrap();
        assert_eq!(result.value, ClassificationValue::NotReported);
        assert_eq!(result.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_citation_page_out_of_range_is_violation() {
        let llm = MockProvider::new(r#"{"designType": "Quasi", "sources": [{"page": 7, "text": "quasi"}]}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let err = engine.classify("designType", &paper()).await.unwrap_err();
        assert!(err.to_string().contains("page 7"));
    }

    #[tokio::test]
    async fn test_placeholder_citations_dropped() {
        let llm = MockProvider::new(
            r#"{"emiContext": "EFL", "sources": [{"page": null, "text": ""}, {"page": 1, "text": "EFL learners in Vietnam"}]}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.classify("emiContext", &paper()).await.unwrap();
        assert_eq!(result.sources, vec![Citation::new(1, "EFL learners in Vietnam")]);
    }

    #[tokio::test]
    async fn test_ungrounded_citation_flagged_by_default() {
        let llm = MockProvider::new(
            r#"{"evidenceStrength": "A", "sources": [
                {"page": 3, "text": "Writing scores improved after the intervention."},
                {"page": 3, "text": "A randomized controlled trial with 4000 pupils."}
            ]}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.classify("evidenceStrength", &paper()).await.unwrap();
        assert_eq!(result.sources.len(), 2);
        assert_eq!(result.ungrounded, vec![1]);
    }

    #[tokio::test]
    async fn test_ungrounded_citation_rejected_when_strict() {
        let llm = MockProvider::new(
            r#"{"evidenceStrength": "A", "sources": [{"page": 3, "text": "A randomized controlled trial with 4000 pupils."}]}"#,
        );
        let config = FlowConfig {
            validation: ValidationConfig::strict(),
            ..FlowConfig::default()
        };
        let engine = FlowEngine::new(llm, config);

        let result = engine.classify("evidenceStrength", &paper()).await;
        assert!(matches!(result, Err(FlowError::SchemaViolation { .. })));
    }

    #[tokio::test]
    async fn test_classify_all_isolates_failures() {
        let mut llm = MockProvider::new(r#"{"unexpected": true}"#);
        llm.add_response(needle("discipline"), r#"{"discipline": "Social Science", "sources": []}"#);
        llm.add_response(needle("sampleSize"), r#"{"sampleSize": "120", "sources": [{"page": 2, "text": "120 undergraduate students"}]}"#);
        llm.add_error(needle("measures"));
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let outcomes = engine.classify_all(&paper()).await;
        assert_eq!(outcomes.len(), BUILTIN.len());

        // Results come back in registration order
        let names: Vec<&str> = outcomes.iter().map(|(name, _)| name.as_str()).collect();
        let expected: Vec<&str> = BUILTIN.iter().map(|s| s.field).collect();
        assert_eq!(names, expected);

        for (name, outcome) in &outcomes {
            match name.as_str() {
                "discipline" => assert_eq!(
                    outcome.as_ref().unwrap().value,
                    ClassificationValue::Label("Social Science".into())
                ),
                "sampleSize" => assert_eq!(outcome.as_ref().unwrap().value, ClassificationValue::Count(120)),
                "measures" => assert!(matches!(outcome, Err(FlowError::ModelInvocationFailed(_)))),
                _ => assert!(matches!(outcome, Err(FlowError::SchemaViolation { .. })), "{}", name),
            }
        }
        assert_eq!(engine.llm().call_count(), BUILTIN.len());
    }

    #[tokio::test]
    async fn test_classify_many_with_unknown_dimension() {
        let llm = MockProvider::new(r#"{"designType": "Case", "sources": []}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let outcomes = engine.classify_many(["design-type", "nonsense"], &paper()).await;
        assert_eq!(outcomes[0].1.as_ref().unwrap().value, ClassificationValue::Label("Case".into()));
        assert_eq!(outcomes[1].1, Err(FlowError::UnknownDimension("nonsense".into())));
    }

    #[tokio::test]
    async fn test_concurrent_classification_is_order_independent() {
        let mut llm = MockProvider::default().with_delay(Duration::from_millis(20));
        llm.add_response(needle("participantsGroup"), r#"{"participantsGroup": "Students", "sources": [{"page": 2, "text": "Participants were 120 undergraduate students."}]}"#);
        llm.add_response(needle("emiContext"), r#"{"emiContext": "EFL", "sources": [{"page": 1, "text": "EFL learners"}]}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());
        let corpus = paper();

        let (a1, b1) = tokio::join!(
            engine.classify("participantsGroup", &corpus),
            engine.classify("emiContext", &corpus)
        );
        let (b2, a2) = tokio::join!(
            engine.classify("emiContext", &corpus),
            engine.classify("participantsGroup", &corpus)
        );

        let (a1, a2, b1, b2) = (a1.unwrap(), a2.unwrap(), b1.unwrap(), b2.unwrap());
        assert_eq!((&a1.value, &a1.sources), (&a2.value, &a2.sources));
        assert_eq!((&b1.value, &b1.sources), (&b2.value, &b2.sources));
        assert_eq!(a1.value, ClassificationValue::Label("Students".into()));
        assert_eq!(b1.value, ClassificationValue::Label("EFL".into()));
    }

    #[tokio::test]
    async fn test_timeout() {
        let llm = MockProvider::new(r#"{"designType": "Case", "sources": []}"#)
            .with_delay(Duration::from_secs(3));
        let config = FlowConfig {
            timeout_secs: Some(1),
            ..FlowConfig::default()
        };
        let engine = FlowEngine::new(llm, config);

        let result = engine.classify("designType", &paper()).await;
        assert_eq!(result.unwrap_err(), FlowError::Timeout(1));
    }

    #[tokio::test]
    async fn test_answer_with_sources() {
        let llm = MockProvider::new(
            r#"{"answer": "A survey and interviews.", "answerable": true, "sources": [{"page": 2, "text": "Data came from a survey and interviews."}]}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.answer("How was data collected?", &paper()).await.unwrap();
        assert!(result.answerable);
        assert_eq!(result.answer, "A survey and interviews.");
        assert_eq!(result.sources[0].page, Some(2));
    }

    #[tokio::test]
    async fn test_unanswerable_answer_drops_sources() {
        let llm = MockProvider::new(
            r#"{"answer": "Not stated.", "answerable": false, "sources": [{"page": 1, "text": "Abstract."}]}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());

        let result = engine.answer("Who funded the study?", &paper()).await.unwrap();
        assert!(!result.answerable);
        assert_eq!(result.answer, scholarlens_domain::NOT_FOUND_MESSAGE);
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_answerable_with_empty_answer_is_violation() {
        let llm = MockProvider::new(r#"{"answer": "  ", "answerable": true, "sources": []}"#);
        let engine = FlowEngine::new(llm, FlowConfig::default());
        let result = engine.answer("How was data collected?", &paper()).await;
        assert!(matches!(result, Err(FlowError::SchemaViolation { ref dimension, .. }) if dimension == "query"));
    }

    #[tokio::test]
    async fn test_legacy_answer_shape() {
        let llm = MockProvider::new(
            r#"{"extractedInformation": "120 undergraduate students", "sourcePage": 2, "sourceText": "Participants were 120 undergraduate students."}"#,
        );
        let engine = FlowEngine::new(llm, FlowConfig::default());
        let result = engine.answer("How many participants?", &paper()).await.unwrap();
        assert_eq!(result.sources, vec![Citation::new(2, "Participants were 120 undergraduate students.")]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_single_label_results_are_legal_tokens(
            schema_idx in 0usize..BUILTIN.len(),
            raw in "[A-Za-z_ ]{0,16}",
        ) {
            let schema = BUILTIN[schema_idx];
            prop_assume!(schema.cardinality == Cardinality::Single);

            let response = serde_json::json!({ (schema.field): raw, "sources": [] }).to_string();
            let engine = FlowEngine::new(MockProvider::new(response), FlowConfig::default());
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let outcome = runtime.block_on(engine.classify(schema.field, &paper()));

            match outcome {
                Ok(result) => {
                    let rendered = result.value.render(&schema);
                    prop_assert!(schema.legal_tokens().contains(&rendered.as_str()));
                }
                Err(err) => {
                    let is_schema_violation = matches!(err, FlowError::SchemaViolation { .. });
                    prop_assert!(is_schema_violation);
                }
            }
        }

        #[test]
        fn prop_citation_pages_in_range(page in 0u32..8) {
            let response = format!(
                r#"{{"designType": "Case", "sources": [{{"page": {}, "text": "Results."}}]}}"#,
                page
            );
            let engine = FlowEngine::new(MockProvider::new(response), FlowConfig::default());
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
            let corpus = paper();

            match runtime.block_on(engine.classify("designType", &corpus)) {
                Ok(result) => {
                    for citation in result.sources {
                        let p = citation.page.unwrap();
                        prop_assert!(p >= 1 && p as usize <= corpus.len());
                    }
                }
                Err(err) => {
                    prop_assert!(page == 0 || page as usize > corpus.len());
                    prop_assert!(matches!(err, FlowError::SchemaViolation { .. }), "{:?}", err);
                }
            }
        }
    }
}

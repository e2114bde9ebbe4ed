//! End-to-end pipeline runs over scripted collaborators.
//!
//! Everything is deterministic: the analyst, searcher, fetcher, and
//! reader are all mocks, so identical inputs must produce identical
//! decisions.

use std::sync::Arc;

use screening::testing::{bundle_with_claims, candidate, memo_for, MockAnalyst, MockFetcher, MockReader, MockSearcher};
use screening::{
    ClaimCategory, Confidence, Decision, Pipeline, PipelineState, SourceTier, Stage, Verdict,
    EXTRACTION_KEY, SCREENING_KEY, VERIFICATION_KEY,
};

/// Create real (empty) files so the existence check passes; content is
/// scripted through the reader.
fn touch_docs(tag: &str, names: &[&str]) -> Vec<String> {
    let dir = std::env::temp_dir().join(format!("screening-e2e-{tag}"));
    std::fs::create_dir_all(&dir).unwrap();
    names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            std::fs::write(&path, b"%PDF-stub").unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect()
}

fn scripted_bundle_json() -> String {
    serde_json::to_string(&bundle_with_claims()).unwrap()
}

fn reader() -> Arc<MockReader> {
    Arc::new(
        MockReader::new()
            .with_document("deck.pdf", "Company: Voltwise\nFounder: Ada Hart\nFounded 2021")
            .with_document("metrics.pdf", "Series A closed March 2023"),
    )
}

#[tokio::test]
async fn supported_official_filing_proceeds() {
    let paths = touch_docs("supported", &["deck.pdf", "metrics.pdf"]);

    let analyst = MockAnalyst::new()
        .with_raw_bundle(scripted_bundle_json())
        .with_claims(vec![candidate(
            "Voltwise was founded in 2021",
            ClaimCategory::FoundingYear,
            "voltwise incorporation 2021",
        )])
        .with_judgement(
            "https://registry.example/voltwise",
            Verdict::Supported,
            SourceTier::Regulatory,
            Confidence::High,
        )
        .with_memo(memo_for(1));
    let searcher = MockSearcher::new().with_urls(
        "voltwise incorporation 2021",
        &["https://registry.example/voltwise"],
    );
    let fetcher =
        MockFetcher::new().with_page("https://registry.example/voltwise", "Registered 2021");

    let pipeline = Pipeline::new(Arc::new(analyst), Arc::new(searcher), Arc::new(fetcher), reader());
    let report = pipeline.run(&paths).await.unwrap();

    assert_eq!(report.state, PipelineState::Done);
    let finding = &report.context.verification.findings[0];
    assert_eq!(finding.verdict, Verdict::Supported);
    assert_eq!(finding.source_tier, SourceTier::Regulatory);
    assert_eq!(finding.confidence, Confidence::High);
    assert_eq!(report.context.screening.decision, Decision::Proceed);
    assert_eq!(
        report.context.verification.citations,
        vec!["https://registry.example/voltwise"]
    );
}

#[tokio::test]
async fn press_contradiction_on_funding_discards() {
    let paths = touch_docs("contradicted", &["deck.pdf", "metrics.pdf"]);

    let analyst = MockAnalyst::new()
        .with_raw_bundle(scripted_bundle_json())
        .with_claims(vec![
            candidate(
                "Voltwise was founded in 2021",
                ClaimCategory::FoundingYear,
                "voltwise incorporation 2021",
            ),
            candidate(
                "Series A closed March 2023",
                ClaimCategory::FundingRound,
                "voltwise series a march 2023",
            ),
        ])
        .with_judgement(
            "https://registry.example/voltwise",
            Verdict::Supported,
            SourceTier::Regulatory,
            Confidence::High,
        )
        .with_judgement(
            "https://press.example/voltwise-round",
            Verdict::Contradicted,
            SourceTier::MajorPress,
            Confidence::High,
        )
        .with_memo(memo_for(2));
    let searcher = MockSearcher::new()
        .with_urls("voltwise incorporation 2021", &["https://registry.example/voltwise"])
        .with_urls(
            "voltwise series a march 2023",
            &["https://press.example/voltwise-round"],
        );
    let fetcher = MockFetcher::new()
        .with_page("https://registry.example/voltwise", "Registered 2021")
        .with_page(
            "https://press.example/voltwise-round",
            "The round closed in April 2023, not March",
        );

    let searcher = Arc::new(searcher);
    let fetcher = Arc::new(fetcher);
    let pipeline = Pipeline::new(Arc::new(analyst), searcher.clone(), fetcher.clone(), reader());
    let report = pipeline.run(&paths).await.unwrap();

    // the funding claim used exactly search + fetch
    assert_eq!(searcher.calls().len(), 2);
    assert_eq!(fetcher.calls().len(), 2);

    assert_eq!(report.context.screening.decision, Decision::Discard);
    assert_eq!(report.context.verification.contradictions.len(), 1);
    let red_flags = &report.context.screening.red_flags;
    assert_eq!(red_flags.len(), 1);
    assert!(red_flags[0].contains("[1]"));
    assert!(red_flags[0].contains("major_press"));
    assert!(report.context.screening.founder_reject_email_draft.is_some());
    assert!(report.context.screening.questions.is_empty());
}

#[tokio::test]
async fn timeouts_force_unsupported_and_become_questions() {
    let paths = touch_docs("timeouts", &["deck.pdf"]);

    let analyst = MockAnalyst::new()
        .with_raw_bundle(scripted_bundle_json())
        .with_claims(vec![candidate(
            "Series A closed March 2023",
            ClaimCategory::FundingRound,
            "voltwise series a",
        )])
        .with_memo(memo_for(1));
    let searcher = MockSearcher::new().with_urls(
        "voltwise series a",
        &[
            "https://slow.example/1",
            "https://slow.example/2",
            "https://slow.example/3",
        ],
    );
    let fetcher = MockFetcher::new()
        .timeout_url("https://slow.example/1")
        .timeout_url("https://slow.example/2")
        .timeout_url("https://slow.example/3");

    let fetcher = Arc::new(fetcher);
    let pipeline = Pipeline::new(Arc::new(analyst), Arc::new(searcher), fetcher.clone(), reader());
    let report = pipeline.run(&paths).await.unwrap();

    // per-claim cap: one fetch attempt only, no third call
    assert_eq!(fetcher.calls().len(), 1);
    let finding = &report.context.verification.findings[0];
    assert_eq!(finding.verdict, Verdict::Unsupported);

    // unresolved high-impact claims become diligence questions
    assert_eq!(report.context.screening.decision, Decision::Proceed);
    assert!(report
        .context
        .screening
        .questions
        .iter()
        .any(|q| q.contains("Series A closed March 2023")));
    assert!(report.context.screening.questions.len() >= 6);
}

#[tokio::test]
async fn identical_inputs_yield_identical_decisions() {
    let paths = touch_docs("idempotent", &["deck.pdf"]);

    let build = || {
        let analyst = MockAnalyst::new()
            .with_raw_bundle(scripted_bundle_json())
            .with_claims(vec![candidate(
                "Voltwise was founded in 2021",
                ClaimCategory::FoundingYear,
                "voltwise incorporation 2021",
            )])
            .with_judgement(
                "https://registry.example/voltwise",
                Verdict::Supported,
                SourceTier::Regulatory,
                Confidence::High,
            )
            .with_memo(memo_for(1));
        let searcher = MockSearcher::new().with_urls(
            "voltwise incorporation 2021",
            &["https://registry.example/voltwise"],
        );
        let fetcher =
            MockFetcher::new().with_page("https://registry.example/voltwise", "Registered 2021");
        Pipeline::new(Arc::new(analyst), Arc::new(searcher), Arc::new(fetcher), reader())
    };

    let first = build().run(&paths).await.unwrap();
    let second = build().run(&paths).await.unwrap();
    assert_eq!(first.context, second.context);
}

#[tokio::test]
async fn missing_document_fails_in_extraction_stage() {
    let analyst = MockAnalyst::new();
    let pipeline = Pipeline::new(
        Arc::new(analyst),
        Arc::new(MockSearcher::new()),
        Arc::new(MockFetcher::new()),
        reader(),
    );
    let err = pipeline
        .run(&["/definitely/not/here.pdf".to_string()])
        .await
        .unwrap_err();
    assert_eq!(err.stage, Stage::Extraction);
    assert!(err.to_string().contains("not found"));
}

#[tokio::test]
async fn malformed_extraction_output_fails_the_run() {
    let paths = touch_docs("malformed", &["deck.pdf"]);

    let analyst = MockAnalyst::new().with_raw_bundle("not json at all");
    let pipeline = Pipeline::new(
        Arc::new(analyst),
        Arc::new(MockSearcher::new()),
        Arc::new(MockFetcher::new()),
        reader(),
    );
    let err = pipeline.run(&paths).await.unwrap_err();
    assert_eq!(err.stage, Stage::Extraction);
}

#[tokio::test]
async fn results_are_stored_under_namespaced_keys() {
    let paths = touch_docs("keys", &["deck.pdf"]);

    let analyst = MockAnalyst::new()
        .with_raw_bundle(scripted_bundle_json())
        .with_claims(vec![candidate(
            "Voltwise was founded in 2021",
            ClaimCategory::FoundingYear,
            "voltwise incorporation 2021",
        )])
        .with_judgement(
            "https://registry.example/voltwise",
            Verdict::Supported,
            SourceTier::Regulatory,
            Confidence::High,
        )
        .with_memo(memo_for(1));
    let searcher = MockSearcher::new().with_urls(
        "voltwise incorporation 2021",
        &["https://registry.example/voltwise"],
    );
    let fetcher =
        MockFetcher::new().with_page("https://registry.example/voltwise", "Registered 2021");

    let pipeline = Pipeline::new(Arc::new(analyst), Arc::new(searcher), Arc::new(fetcher), reader());
    let report = pipeline.run(&paths).await.unwrap();

    let keyed = report.context.keyed_results();
    assert!(keyed.contains_key(EXTRACTION_KEY));
    assert!(keyed.contains_key(VERIFICATION_KEY));
    assert!(keyed.contains_key(SCREENING_KEY));
    assert_eq!(
        keyed[SCREENING_KEY]["decision"],
        serde_json::json!("proceed")
    );
}

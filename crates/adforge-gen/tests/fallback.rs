use std::sync::Mutex;
use std::time::Duration;

use adforge_core::{
    Ad, AdGroupSpec, AdKind, BuiltinCatalog, CampaignDraft, Keyword, MatchType, Strategy,
};
use adforge_gen::{
    generate_for_draft, generate_for_groups, AdCopyProducer, AdCopyRequest, FallbackProducer,
    GenError, GenerationContext, LocalTemplateProducer, Result,
};
use async_trait::async_trait;

struct SlowProducer;

#[async_trait]
impl AdCopyProducer for SlowProducer {
    fn name(&self) -> &str {
        "slow"
    }

    async fn generate(&self, _request: &AdCopyRequest) -> Result<Vec<Ad>> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(vec![Ad::new("never", AdKind::Rsa)])
    }
}

struct FailingProducer;

#[async_trait]
impl AdCopyProducer for FailingProducer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _request: &AdCopyRequest) -> Result<Vec<Ad>> {
        Err(GenError::Status { status: 503 })
    }
}

/// Records the order of calls and answers with one ad per call.
#[derive(Default)]
struct RecordingProducer {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl AdCopyProducer for RecordingProducer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn generate(&self, request: &AdCopyRequest) -> Result<Vec<Ad>> {
        let label = format!(
            "{}/{}",
            request.ad_group.as_deref().unwrap_or(""),
            request.kind.label()
        );
        self.calls.lock().unwrap().push(label.clone());
        Ok(vec![Ad::new(label, request.kind)
            .with_headlines(["Remote Headline"])
            .with_descriptions(["Remote description."])])
    }
}

fn request() -> AdCopyRequest {
    AdCopyRequest::new(vec!["emergency plumber".to_string()], AdKind::Rsa)
        .with_ad_group("Ad Group 1")
        .with_base_url("https://plumb.example")
}

#[tokio::test(start_paused = true)]
async fn timeout_substitutes_local_templates() {
    let producer = FallbackProducer::new(SlowProducer, Duration::from_millis(500));
    let ads = producer.generate(&request()).await.expect("fallback never fails");
    assert_eq!(ads, LocalTemplateProducer.produce(&request()));
    assert_eq!(ads[0].headline(1), Some("24/7 Emergency emergency pl..."));
}

#[tokio::test]
async fn errors_substitute_local_templates() {
    let producer = FallbackProducer::new(FailingProducer, Duration::from_secs(5));
    let ads = producer.generate(&request()).await.expect("fallback never fails");
    assert_eq!(ads.len(), 1);
    assert!(ads[0].id.starts_with("local-"));
    assert_eq!(ads[0].final_url, "https://plumb.example");
}

#[tokio::test]
async fn successful_primary_passes_through() {
    let producer = FallbackProducer::new(RecordingProducer::default(), Duration::from_secs(5));
    let ads = producer.generate(&request()).await.unwrap();
    assert_eq!(ads[0].id, "Ad Group 1/RSA");
}

#[tokio::test]
async fn groups_are_generated_sequentially_in_order() {
    let producer = RecordingProducer::default();
    let groups = vec![
        AdGroupSpec::new("A", vec![Keyword::new("plumber", MatchType::Broad)]),
        AdGroupSpec::new("B", vec![Keyword::new("drain", MatchType::Exact)]),
    ];
    let ads = generate_for_groups(
        &producer,
        &groups,
        &[AdKind::Rsa, AdKind::CallOnly],
        &GenerationContext::default(),
    )
    .await
    .unwrap();

    assert_eq!(
        *producer.calls.lock().unwrap(),
        vec!["A/RSA", "A/Call Only", "B/RSA", "B/Call Only"]
    );
    let refs: Vec<_> = ads.iter().map(|a| a.ad_group_ref.as_deref().unwrap()).collect();
    assert_eq!(refs, vec!["A", "A", "B", "B"]);
}

#[tokio::test]
async fn draft_gets_ads_for_every_group() {
    let draft = CampaignDraft::new("Plumbing")
        .with_keywords(["plumber", "drain cleaning", "water heater", "leak repair"])
        .with_strategy(Strategy::Stag)
        .with_landing_url("https://plumb.example");
    let updated = generate_for_draft(
        &LocalTemplateProducer,
        &draft,
        &BuiltinCatalog,
        &[AdKind::Rsa],
        &GenerationContext::default(),
    )
    .await
    .unwrap();

    assert_eq!(updated.ads.len(), 2);
    assert!(updated.ads.iter().all(|a| a.final_url == "https://plumb.example"));
    assert_eq!(updated.selected_keywords, draft.selected_keywords);
}

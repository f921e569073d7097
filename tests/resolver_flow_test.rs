//! Resolution loop scenarios driven by scripted adapters.
//!
//! Coverage:
//! - Accepting, refusing, and overriding suggestions
//! - Rejection memory (re-offered URLs, unreachable URLs, user context)
//! - Service failures and retry prompts
//! - Automatic re-query cap
//! - Browser and input-validation commands

mod common;

use std::sync::Arc;

use common::{candidate, is_settled, reply, resolver};
use linkfill::adapters::{ScriptedInteraction, ScriptedQueryService, StaticVerifier};
use linkfill::domain::errors::DomainError;
use linkfill::domain::models::{ChatRole, ResolutionState, ResolverConfig};
use linkfill::domain::ports::ResolverEvent;
use linkfill::services::prompt::REJECTED_CLAUSE_MARKER;

const TEXT: &str = "Read [the book](rust programming book) first!";

fn rejected(link: &linkfill::LinkCandidate) -> Vec<String> {
    link.rejected_urls().iter().map(str::to_string).collect()
}

#[tokio::test]
async fn test_confident_suggestion_is_accepted() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://doc.rust-lang.org/book/",
        0.92,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.resolved_url(), Some("https://doc.rust-lang.org/book/"));
    assert!((link.confidence() - 0.92).abs() < 1e-9);
    assert_eq!(service.call_count().await, 1);
    assert_eq!(ui.candidates_seen, vec!["the book"]);
    assert_eq!(
        ui.events.last(),
        Some(&ResolverEvent::Settled {
            url: "https://doc.rust-lang.org/book/".to_string(),
            user_supplied: false,
        })
    );

    // Seed plus the assistant reply
    let transcript = link.transcript();
    assert_eq!(transcript.len(), 2);
    let seed = transcript.current_seed().unwrap();
    assert!(seed.content.contains("rust programming book"));
    assert!(seed.content.contains("Read [the book](rust programming book) first!"));
    assert!(!seed.content.contains(REJECTED_CLAUSE_MARKER));
    assert_eq!(transcript.last_reply().unwrap().role, ChatRole::Assistant);
}

#[tokio::test]
async fn test_already_settled_candidate_is_untouched() {
    let service = Arc::new(ScriptedQueryService::new());
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate("Docs at [site](https://a.com/b).");
    let mut ui = ScriptedInteraction::new(Vec::<String>::new());

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.resolved_url(), Some("https://a.com/b"));
    assert_eq!(service.call_count().await, 0);
    assert!(ui.events.is_empty());
    assert!(ui.candidates_seen.is_empty());
}

#[tokio::test]
async fn test_low_confidence_accept_is_refused_until_user_overrides() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://maybe.example/book",
        0.5,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["y", "y1", "https://mine.example/book"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(
        ui.count_events(|e| matches!(e, ResolverEvent::ConfidenceTooLow { .. })),
        2
    );
    assert_eq!(
        link.state(),
        &ResolutionState::Settled {
            url: "https://mine.example/book".to_string(),
            confidence: 1.0,
        }
    );
    assert!(ui.events.contains(&ResolverEvent::Settled {
        url: "https://mine.example/book".to_string(),
        user_supplied: true,
    }));
    assert_eq!(service.call_count().await, 1);
    assert!(link.rejected_urls().is_empty());
}

#[tokio::test]
async fn test_lowered_floor_accepts_modest_confidence() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://maybe.example/book",
        0.5,
    )]));
    let config = ResolverConfig {
        confidence_floor: 0.5,
        ..ResolverConfig::default()
    };
    let resolver = resolver(&service, None, config);
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["Y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.resolved_url(), Some("https://maybe.example/book"));
}

#[tokio::test]
async fn test_reoffered_rejected_url_is_never_presented() {
    let service = Arc::new(ScriptedQueryService::with_replies([
        reply("https://x.example", 0.9),
        reply("https://x.example", 0.9),
        reply("https://y.example", 0.9),
    ]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["the 2023 edition please", "y"]);

    resolver.resolve(&mut link, &mut ui).await;

    let presented: Vec<&str> = ui
        .presented
        .iter()
        .flatten()
        .map(|s| s.url.as_str())
        .collect();
    assert_eq!(presented, vec!["https://x.example", "https://y.example"]);
    assert!(ui.events.contains(&ResolverEvent::PreviouslyRejected {
        url: "https://x.example".to_string(),
    }));
    assert_eq!(link.resolved_url(), Some("https://y.example"));
    assert_eq!(rejected(&link), vec!["https://x.example"]);
    assert_eq!(service.call_count().await, 3);

    // Second request carries the user's context with the rejection note
    let conversations = service.conversations().await;
    let context_turn = conversations[1].last().unwrap();
    assert_eq!(context_turn.role, ChatRole::User);
    assert!(context_turn.content.starts_with("the 2023 edition please"));
    assert!(context_turn.content.contains("https://x.example"));

    // Third request tells the service the URL was already rejected
    let third = &conversations[2];
    assert!(third.last().unwrap().content.contains("already suggested https://x.example"));
    assert!(third[0].content.contains(REJECTED_CLAUSE_MARKER));
}

#[tokio::test]
async fn test_unreachable_suggestion_is_rejected_and_requeried() {
    let service = Arc::new(ScriptedQueryService::with_replies([
        reply("https://x.example", 0.9),
        reply("https://y.example", 0.9),
    ]));
    let verifier = Arc::new(StaticVerifier::new().with_status("https://x.example", 404));
    let resolver = resolver(&service, Some(verifier.clone()), ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(ui.presented.len(), 1);
    assert_eq!(ui.presented[0][0].url, "https://y.example");
    assert!(ui.events.contains(&ResolverEvent::Unreachable {
        url: "https://x.example".to_string(),
        status: 404,
    }));
    assert_eq!(
        verifier.probed().await,
        vec!["https://x.example", "https://y.example"]
    );
    assert_eq!(rejected(&link), vec!["https://x.example"]);
    assert_eq!(link.resolved_url(), Some("https://y.example"));

    // The seed was revised, not rewritten, and carries one clause
    let transcript = link.transcript();
    assert_eq!(transcript.seed_revisions(), 2);
    let seed = &transcript.current_seed().unwrap().content;
    assert_eq!(seed.matches(REJECTED_CLAUSE_MARKER).count(), 1);
    assert!(seed.contains("https://x.example"));

    // The follow-up request leads with the revised seed and cites the status
    let conversations = service.conversations().await;
    assert_eq!(&conversations[1][0].content, seed);
    assert!(conversations[1].last().unwrap().content.contains("HTTP 404"));
}

#[tokio::test]
async fn test_repeated_rejections_keep_a_single_clause() {
    let service = Arc::new(ScriptedQueryService::with_replies([
        reply("https://x.example", 0.9),
        reply("https://y.example", 0.9),
        reply("https://z.example", 0.9),
    ]));
    let verifier = Arc::new(
        StaticVerifier::new()
            .with_status("https://x.example", 404)
            .with_status("https://y.example", 0),
    );
    let resolver = resolver(&service, Some(verifier), ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.resolved_url(), Some("https://z.example"));
    assert_eq!(rejected(&link), vec!["https://x.example", "https://y.example"]);

    let conversations = service.conversations().await;
    let third = &conversations[2];
    assert_eq!(third[0].content.matches(REJECTED_CLAUSE_MARKER).count(), 1);
    assert!(third[0]
        .content
        .contains(&format!("{REJECTED_CLAUSE_MARKER} https://x.example, https://y.example")));
    assert!(third.last().unwrap().content.contains("could not be reached"));
}

#[tokio::test]
async fn test_rejections_only_grow() {
    let service = Arc::new(ScriptedQueryService::with_replies([
        reply("https://x.example", 0.9),
        reply("https://x.example", 0.9),
        reply("https://y.example", 0.9),
        reply("https://z.example", 0.9),
    ]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["newer edition", "the free online one", "y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.resolved_url(), Some("https://z.example"));
    assert_eq!(rejected(&link), vec!["https://x.example", "https://y.example"]);
    // Initial seed plus one revision per newly rejected URL
    assert_eq!(link.transcript().seed_revisions(), 3);

    let conversations = service.conversations().await;
    let mut previous = 0;
    for conversation in &conversations {
        let clauses = conversation[0].content.matches("https://").count();
        assert!(clauses >= previous);
        previous = clauses;
    }
}

#[tokio::test]
async fn test_service_failure_offers_retry() {
    let service = Arc::new(ScriptedQueryService::new());
    service
        .push_failure(DomainError::ServiceCall("connection reset".to_string()))
        .await;
    service.push_reply(reply("https://x.example", 0.9)).await;
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["y"]).with_confirmations([true]);

    resolver.resolve(&mut link, &mut ui).await;

    assert!(ui.events.contains(&ResolverEvent::ServiceFailed(
        DomainError::ServiceCall("connection reset".to_string())
    )));
    assert_eq!(ui.questions.len(), 1);
    assert!(ui.questions[0].contains("retry"));
    assert_eq!(link.resolved_url(), Some("https://x.example"));
    assert_eq!(service.call_count().await, 2);
}

#[tokio::test]
async fn test_declining_retry_skips_candidate() {
    let service = Arc::new(ScriptedQueryService::new());
    service
        .push_failure(DomainError::ServiceCall("HTTP 503".to_string()))
        .await;
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(Vec::<String>::new());

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.state(), &ResolutionState::Skipped);
    assert_eq!(ui.events.last(), Some(&ResolverEvent::Skipped));
    assert!(ui.presented.is_empty());
}

#[tokio::test]
async fn test_unparseable_reply_is_handled_like_a_service_failure() {
    let service = Arc::new(ScriptedQueryService::with_replies([
        "I could not find anything suitable.",
    ]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(Vec::<String>::new()).with_confirmations([false]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(
        ui.count_events(|e| matches!(e, ResolverEvent::ServiceFailed(DomainError::Parse(_)))),
        1
    );
    assert_eq!(ui.questions.len(), 1);
    assert_eq!(link.state(), &ResolutionState::Skipped);
    // The unusable reply is still part of the history
    assert_eq!(
        link.transcript().last_reply().unwrap().content,
        "I could not find anything suitable."
    );
}

#[tokio::test]
async fn test_auto_round_cap_asks_before_continuing() {
    let urls = ["https://a.example", "https://b.example", "https://c.example", "https://d.example"];
    let service = Arc::new(ScriptedQueryService::with_replies(
        urls.iter().map(|url| reply(url, 0.9)),
    ));
    let verifier = urls
        .iter()
        .fold(StaticVerifier::new(), |v, url| v.with_status(*url, 404));
    let config = ResolverConfig {
        max_auto_rounds: 2,
        ..ResolverConfig::default()
    };
    let resolver = resolver(&service, Some(Arc::new(verifier)), config);
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(Vec::<String>::new()).with_confirmations([true, false]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(
        ui.count_events(|e| matches!(e, ResolverEvent::AutoRoundLimit { rounds: 2 })),
        2
    );
    assert_eq!(ui.questions.len(), 2);
    assert_eq!(service.call_count().await, 4);
    assert_eq!(link.state(), &ResolutionState::Skipped);
    assert_eq!(link.rejected_urls().len(), 4);
    assert!(ui.presented.is_empty());
}

#[tokio::test]
async fn test_view_opens_browser_and_keeps_prompting() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://x.example",
        0.85,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["v", "v2", "y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(ui.opened, vec!["https://x.example"]);
    assert!(ui.events.contains(&ResolverEvent::BrowserOpened {
        url: "https://x.example".to_string(),
    }));
    assert!(ui.events.contains(&ResolverEvent::InvalidSelection {
        index: 2,
        available: 1,
    }));
    assert_eq!(link.resolved_url(), Some("https://x.example"));
}

#[tokio::test]
async fn test_browser_failure_is_reported() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://x.example",
        0.85,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["v", "y"]).with_browser_error("no display");

    resolver.resolve(&mut link, &mut ui).await;

    assert!(ui.events.contains(&ResolverEvent::BrowserFailed(DomainError::Browser(
        "no display".to_string()
    ))));
    assert_eq!(link.resolved_url(), Some("https://x.example"));
}

#[tokio::test]
async fn test_invalid_input_reprompts_without_state_change() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://x.example",
        0.9,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["www.example.com", "", "   ", "y0", "y"]);

    resolver.resolve(&mut link, &mut ui).await;

    assert!(ui.events.contains(&ResolverEvent::InvalidUrl(DomainError::InvalidUserUrl(
        "www.example.com".to_string()
    ))));
    assert!(ui.events.contains(&ResolverEvent::InvalidSelection {
        index: 0,
        available: 1,
    }));
    assert!(link.rejected_urls().is_empty());
    assert_eq!(service.call_count().await, 1);
    assert_eq!(link.resolved_url(), Some("https://x.example"));
    assert_eq!(ui.count_events(is_settled), 1);
}

#[tokio::test]
async fn test_closed_input_skips_candidate() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://x.example",
        0.9,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(Vec::<String>::new());

    resolver.resolve(&mut link, &mut ui).await;

    assert_eq!(link.state(), &ResolutionState::Skipped);
    assert_eq!(ui.presented.len(), 1);
    assert!(link.rejected_urls().is_empty());
}

#[tokio::test]
async fn test_oversized_selection_is_invalid_not_feedback() {
    let service = Arc::new(ScriptedQueryService::with_replies([reply(
        "https://x.example",
        0.9,
    )]));
    let resolver = resolver(&service, None, ResolverConfig::default());
    let mut link = candidate(TEXT);
    let mut ui = ScriptedInteraction::new(["y99999999999999999999999", "v99999999999999999999999", "y"]);

    resolver.resolve(&mut link, &mut ui).await;

    let invalid = ResolverEvent::InvalidSelection {
        index: usize::MAX,
        available: 1,
    };
    assert_eq!(ui.count_events(|e| *e == invalid), 2);
    assert!(ui.opened.is_empty());
    assert!(link.rejected_urls().is_empty());
    assert_eq!(service.call_count().await, 1);
    assert_eq!(link.resolved_url(), Some("https://x.example"));
}

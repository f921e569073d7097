//! Conversational resolution loop for a single link candidate.
//!
//! Each round asks the query service for a suggestion, screens it against
//! the candidate's rejected URLs, optionally probes it for reachability,
//! and finally lets the user accept it, override it, or feed back context
//! for the next round.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{ChatMessage, LinkCandidate, ResolverConfig, Suggestion};
use crate::domain::ports::{Interaction, QueryService, ResolverEvent, UrlVerifier};
use crate::services::command::UserCommand;
use crate::services::prompt;
use crate::services::response_parser::parse_reply;

const RETRY_QUESTION: &str = "Would you like to retry?";
const CONTINUE_QUESTION: &str = "Keep asking for a different URL?";

pub struct ConversationalResolver {
    query: Arc<dyn QueryService>,
    verifier: Option<Arc<dyn UrlVerifier>>,
    config: ResolverConfig,
}

impl ConversationalResolver {
    pub fn new(query: Arc<dyn QueryService>, config: ResolverConfig) -> Self {
        Self {
            query,
            verifier: None,
            config,
        }
    }

    /// Probe every suggestion before it reaches the user.
    pub fn with_verifier(mut self, verifier: Arc<dyn UrlVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Drive `candidate` until it is settled or skipped.
    ///
    /// Candidates that are already terminal are returned untouched.
    #[instrument(skip_all, fields(label = %candidate.label(), description = %candidate.description()))]
    pub async fn resolve(&self, candidate: &mut LinkCandidate, ui: &mut dyn Interaction) {
        if candidate.is_terminal() {
            return;
        }
        ui.begin_candidate(candidate).await;

        // Re-queries issued without the user in the loop since the last
        // presented suggestion.
        let mut auto_rounds = 0u32;

        while !candidate.is_terminal() {
            let round = candidate.begin_round();
            ui.report(ResolverEvent::RequestingSuggestion { round }).await;

            let suggestion = match self.request_suggestion(candidate).await {
                Ok(suggestion) => suggestion,
                Err(err) => {
                    warn!(round, error = %err, "suggestion request failed");
                    ui.report(ResolverEvent::ServiceFailed(err)).await;
                    if !ui.confirm(RETRY_QUESTION).await {
                        Self::skip(candidate, ui).await;
                    }
                    continue;
                }
            };
            debug!(round, url = %suggestion.url, confidence = suggestion.confidence, "received suggestion");

            if candidate.rejected_urls().contains(&suggestion.url) {
                debug!(url = %suggestion.url, "service re-offered a rejected URL");
                ui.report(ResolverEvent::PreviouslyRejected {
                    url: suggestion.url.clone(),
                })
                .await;
                candidate
                    .transcript_mut()
                    .push_turn(ChatMessage::user(prompt::already_rejected(&suggestion.url)));
                self.count_auto_round(&mut auto_rounds, candidate, ui).await;
                continue;
            }

            if let Some(verifier) = &self.verifier {
                ui.report(ResolverEvent::Verifying {
                    url: suggestion.url.clone(),
                })
                .await;
                let verification = verifier.verify(&suggestion.url).await;
                if !verification.reachable {
                    info!(url = %suggestion.url, status = verification.status, "suggested URL is unreachable");
                    ui.report(ResolverEvent::Unreachable {
                        url: suggestion.url.clone(),
                        status: verification.status,
                    })
                    .await;
                    Self::reject(candidate, &suggestion.url);
                    let feedback = prompt::unreachable(
                        &suggestion.url,
                        verification.status,
                        candidate.rejected_urls(),
                    );
                    candidate
                        .transcript_mut()
                        .push_turn(ChatMessage::user(feedback));
                    self.count_auto_round(&mut auto_rounds, candidate, ui).await;
                    continue;
                }
                ui.report(ResolverEvent::Reachable {
                    url: suggestion.url.clone(),
                })
                .await;
            }

            auto_rounds = 0;
            self.decide(candidate, suggestion, ui).await;
        }

        info!(
            state = candidate.state().label(),
            url = candidate.resolved_url().unwrap_or_default(),
            rejected = candidate.rejected_urls().len(),
            "candidate resolved"
        );
    }

    /// Seed the transcript if needed, ask the service, record the reply,
    /// and parse it.
    async fn request_suggestion(&self, candidate: &mut LinkCandidate) -> DomainResult<Suggestion> {
        if candidate.transcript().is_empty() {
            let seed = prompt::seed_prompt(
                candidate.sentence_context(),
                candidate.description(),
                candidate.rejected_urls(),
            );
            candidate.transcript_mut().push_seed(seed);
        }

        let conversation = candidate.transcript().conversation();
        let reply = self.query.complete(&conversation).await?;
        candidate
            .transcript_mut()
            .push_turn(ChatMessage::assistant(reply.clone()));

        parse_reply(&reply)
    }

    /// Present the suggestion and act on user commands until the candidate
    /// settles or a new round is needed.
    async fn decide(
        &self,
        candidate: &mut LinkCandidate,
        suggestion: Suggestion,
        ui: &mut dyn Interaction,
    ) {
        let suggestions = [suggestion];
        ui.present(candidate, &suggestions).await;

        loop {
            let Some(raw) = ui.read_command().await else {
                debug!("input closed; skipping candidate");
                Self::skip(candidate, ui).await;
                return;
            };
            match UserCommand::parse(&raw) {
                UserCommand::Empty => {}
                UserCommand::Accept(index) => {
                    let Some(chosen) = Self::select(&suggestions, index, ui).await else {
                        continue;
                    };
                    if chosen.confidence >= self.config.confidence_floor {
                        let url = chosen.url.clone();
                        candidate.settle(url.clone(), chosen.confidence);
                        ui.report(ResolverEvent::Settled {
                            url,
                            user_supplied: false,
                        })
                        .await;
                        return;
                    }
                    ui.report(ResolverEvent::ConfidenceTooLow {
                        confidence: chosen.confidence,
                        floor: self.config.confidence_floor,
                    })
                    .await;
                }
                UserCommand::View(index) => {
                    let Some(chosen) = Self::select(&suggestions, index, ui).await else {
                        continue;
                    };
                    let url = chosen.url.clone();
                    let event = match ui.open_in_browser(&url).await {
                        Ok(()) => ResolverEvent::BrowserOpened { url },
                        Err(err) => ResolverEvent::BrowserFailed(err),
                    };
                    ui.report(event).await;
                }
                UserCommand::Url(url) => {
                    candidate.settle(url.clone(), 1.0);
                    ui.report(ResolverEvent::Settled {
                        url,
                        user_supplied: true,
                    })
                    .await;
                    return;
                }
                UserCommand::InvalidUrl(err) => {
                    ui.report(ResolverEvent::InvalidUrl(err)).await;
                }
                UserCommand::Context(context) => {
                    for presented in &suggestions {
                        Self::reject(candidate, &presented.url);
                    }
                    let feedback = prompt::with_context(&context, candidate.rejected_urls());
                    candidate
                        .transcript_mut()
                        .push_turn(ChatMessage::user(feedback));
                    ui.report(ResolverEvent::ContextAdded { context }).await;
                    return;
                }
            }
        }
    }

    /// Resolve a 1-based `index` (default: first) into the presented list.
    async fn select<'a>(
        suggestions: &'a [Suggestion],
        index: Option<usize>,
        ui: &mut dyn Interaction,
    ) -> Option<&'a Suggestion> {
        let chosen = match index {
            None => suggestions.first(),
            Some(n) => n.checked_sub(1).and_then(|i| suggestions.get(i)),
        };
        if chosen.is_none() {
            ui.report(ResolverEvent::InvalidSelection {
                index: index.unwrap_or(1),
                available: suggestions.len(),
            })
            .await;
        }
        chosen
    }

    /// Add `url` to the rejected set and, when that changes the set, append
    /// a rebuilt seed so the service sees a single current clause.
    fn reject(candidate: &mut LinkCandidate, url: &str) {
        if !candidate.reject(url) {
            return;
        }
        let seed = prompt::seed_prompt(
            candidate.sentence_context(),
            candidate.description(),
            candidate.rejected_urls(),
        );
        candidate.transcript_mut().push_seed(seed);
    }

    /// Count an automatic re-query; past the cap the user decides whether
    /// to keep going.
    async fn count_auto_round(
        &self,
        auto_rounds: &mut u32,
        candidate: &mut LinkCandidate,
        ui: &mut dyn Interaction,
    ) {
        *auto_rounds += 1;
        if *auto_rounds < self.config.max_auto_rounds {
            return;
        }

        warn!(rounds = *auto_rounds, "automatic re-query limit reached");
        ui.report(ResolverEvent::AutoRoundLimit {
            rounds: *auto_rounds,
        })
        .await;
        if ui.confirm(CONTINUE_QUESTION).await {
            *auto_rounds = 0;
        } else {
            Self::skip(candidate, ui).await;
        }
    }

    async fn skip(candidate: &mut LinkCandidate, ui: &mut dyn Interaction) {
        candidate.skip();
        ui.report(ResolverEvent::Skipped).await;
    }
}

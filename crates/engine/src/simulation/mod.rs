//! The simulation tick loop.
//!
//! Composes movement, the zone gate, proximity selection and the progress
//! tracker behind one synchronous [`Simulation::tick`]. The only async
//! boundary is the dialogue oracle: requests run as spawned tasks and report
//! back over an unbounded channel that `tick` drains before doing anything
//! else. Completion handlers re-read current state; a task carries only ids
//! and the oracle's answer.

mod completion;
#[cfg(test)]
mod tests;

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use civicsim_domain::{
    ActorId, ConversationLog, ConversationTurn, DomainError, GroundPoint, IssueKey,
    OrdinanceOutcome, Speaker,
};
use civicsim_shared::{
    FrameSnapshot, InteractionTargetView, MapPoint, MarkerView, Notification, OrdinanceFormView,
    OrdinanceResultView, QuestListView, TranscriptLine, TranscriptView, ZonePromptView,
};
use tokio::sync::mpsc;

use crate::infrastructure::ports::{DialogueOraclePort, StateStore};
use crate::use_cases::conversation::{build_chat_request, RequestReply, FALLBACK_REPLY};
use crate::use_cases::interaction::{ProximityScan, ProximitySelector};
use crate::use_cases::movement::{GateDecision, HeldKeys, MoveKey, MovementResolver, ZoneGate};
use crate::use_cases::ordinance::{build_issue_context, JudgeOrdinance, JUDGE_UNAVAILABLE_FEEDBACK};
use crate::use_cases::progress::{InteractionRoute, ProgressTracker};
use crate::use_cases::{ConversationUseCases, OrdinanceUseCases};
use crate::world::CityWorld;

use completion::OracleCompletion;

/// The modal surface currently in front of the player. Movement is locked
/// while any panel is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Conversation {
        actor_id: ActorId,
    },
    OrdinanceForm {
        issue_key: IssueKey,
    },
    /// `outcome` is `None` while the judge is still deliberating.
    OrdinanceResult {
        issue_key: IssueKey,
        outcome: Option<OrdinanceOutcome>,
    },
}

pub struct Simulation {
    world: CityWorld,
    movement: MovementResolver,
    gate: ZoneGate,
    keys: HeldKeys,
    selector: ProximitySelector,
    scan: ProximityScan,
    tracker: ProgressTracker,
    conversation: ConversationUseCases,
    ordinance: OrdinanceUseCases,
    started: bool,
    panel: Option<Panel>,
    chats_in_flight: HashSet<ActorId>,
    judges_in_flight: HashSet<IssueKey>,
    /// Actor whose last reply failed; the fallback line is shown, not stored.
    chat_failure: Option<ActorId>,
    completions_tx: mpsc::UnboundedSender<OracleCompletion>,
    completions_rx: mpsc::UnboundedReceiver<OracleCompletion>,
    notifications: VecDeque<Notification>,
    /// Bumped on reset so replies to forgotten requests are dropped.
    generation: u64,
    tick: u64,
}

impl Simulation {
    /// Build the simulation and restore saved progress before anything else.
    pub fn new(
        world: CityWorld,
        store: Arc<dyn StateStore>,
        oracle: Arc<dyn DialogueOraclePort>,
    ) -> Self {
        let tracker = ProgressTracker::load(world.registry.clone(), store);
        let movement = MovementResolver::new(world.geometry.clone(), world.player_start);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            movement,
            gate: ZoneGate::new(),
            keys: HeldKeys::default(),
            selector: ProximitySelector::default(),
            scan: ProximityScan::default(),
            tracker,
            conversation: ConversationUseCases::new(Arc::new(RequestReply::new(oracle.clone()))),
            ordinance: OrdinanceUseCases::new(Arc::new(JudgeOrdinance::new(oracle))),
            world,
            started: false,
            panel: None,
            chats_in_flight: HashSet::new(),
            judges_in_flight: HashSet::new(),
            chat_failure: None,
            completions_tx,
            completions_rx,
            notifications: VecDeque::new(),
            generation: 0,
            tick: 0,
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance one frame of `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        self.drain_completions();
        self.tick += 1;

        if self.started {
            self.step_movement(dt);
            self.scan = self.selector.scan(&self.world.registry, self.movement.position());
        }

        self.snapshot()
    }

    fn step_movement(&mut self, dt: f32) {
        if self.panel.is_some() {
            return;
        }
        let direction = self.keys.direction();
        if direction.is_zero() {
            return;
        }
        let proposed = self.movement.propose(direction, dt);
        match self.gate.evaluate(self.movement.position(), proposed) {
            GateDecision::Proceed => {
                self.movement.resolve(proposed);
            }
            GateDecision::Opened(_) | GateDecision::Suppressed => {}
        }
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.handle_completion(completion);
        }
    }

    /// Wait for the next oracle reply and apply it. Returns `false` at once
    /// when nothing is outstanding.
    pub async fn await_completion(&mut self) -> bool {
        if self.chats_in_flight.is_empty() && self.judges_in_flight.is_empty() {
            return false;
        }
        match self.completions_rx.recv().await {
            Some(completion) => {
                self.handle_completion(completion);
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Player input
    // =========================================================================

    pub fn start(&mut self) {
        if !self.started {
            tracing::info!("Simulation started");
        }
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn ui_locked(&self) -> bool {
        self.panel.is_some() || self.gate.is_pending()
    }

    /// Presses are ignored while a panel or the zone prompt is open.
    pub fn set_key(&mut self, key: MoveKey, pressed: bool) {
        if pressed && self.ui_locked() {
            return;
        }
        self.keys.set(key, pressed);
    }

    /// Interact with the currently selected actor, if any.
    pub fn interact(&mut self) -> Result<Option<InteractionRoute>, DomainError> {
        if !self.started || self.ui_locked() {
            return Ok(None);
        }
        let Some(target) = self.scan.selected.clone() else {
            return Ok(None);
        };

        let route = self.tracker.handle_interaction(&target.actor_id)?;
        match &route {
            InteractionRoute::Conversation {
                issue_key,
                actor_id,
                newly_completed,
            } => {
                if *newly_completed && self.tracker.is_issue_ready(issue_key) {
                    self.notifications.push_back(Notification::QuestReady {
                        issue_key: issue_key.to_string(),
                    });
                }
                self.tracker.open_conversation(actor_id)?;
                self.chat_failure = None;
                self.panel = Some(Panel::Conversation {
                    actor_id: actor_id.clone(),
                });
            }
            InteractionRoute::OrdinanceSubmission { issue_key, .. } => {
                self.panel = Some(Panel::OrdinanceForm {
                    issue_key: issue_key.clone(),
                });
            }
        }
        self.keys.clear();
        Ok(Some(route))
    }

    pub fn confirm_zone(&mut self) -> bool {
        match self.gate.confirm() {
            Some(request) => {
                self.movement.commit_unchecked(request.proposed);
                self.keys.clear();
                tracing::info!(zone = %request.target_zone, "Entered zone");
                true
            }
            None => false,
        }
    }

    pub fn cancel_zone(&mut self) -> bool {
        match self.gate.cancel() {
            Some(_) => {
                self.movement.rollback();
                self.keys.clear();
                true
            }
            None => false,
        }
    }

    pub fn close_panel(&mut self) {
        self.panel = None;
        self.chat_failure = None;
    }

    // =========================================================================
    // Oracle requests
    // =========================================================================

    /// Send a player line to the open conversation. Returns `false` when the
    /// line was dropped (no conversation, blank text, reply outstanding).
    pub fn send_chat(&mut self, text: &str) -> bool {
        let Some(Panel::Conversation { actor_id }) = &self.panel else {
            return false;
        };
        let actor_id = actor_id.clone();
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        if self.chats_in_flight.contains(&actor_id) {
            tracing::debug!(actor_id = %actor_id, "Reply outstanding, dropping chat send");
            return false;
        }
        let Some((_, actor)) = self.world.registry.find_actor(&actor_id) else {
            return false;
        };

        self.chat_failure = None;
        self.tracker
            .append_turn(&actor_id, ConversationTurn::player(text));

        let empty = ConversationLog::new();
        let progress = self.tracker.progress();
        let log = progress.conversation(&actor_id).unwrap_or(&empty);
        let request = build_chat_request(actor, progress.happiness(&actor_id), log);

        self.chats_in_flight.insert(actor_id.clone());
        let use_case = self.conversation.request_reply.clone();
        let tx = self.completions_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = use_case.execute(&actor_id, request).await;
            if tx
                .send(OracleCompletion::Chat {
                    generation,
                    actor_id,
                    result,
                })
                .is_err()
            {
                tracing::debug!("Simulation gone before chat reply arrived");
            }
        });
        true
    }

    /// Submit the ordinance form. Returns `false` when the submission was
    /// dropped (no form open, blank text, judgment outstanding).
    pub fn submit_ordinance(&mut self, text: &str) -> bool {
        let Some(Panel::OrdinanceForm { issue_key }) = &self.panel else {
            return false;
        };
        let issue_key = issue_key.clone();
        let proposal = text.trim().to_string();
        if proposal.is_empty() {
            return false;
        }
        if self.judges_in_flight.contains(&issue_key) {
            tracing::debug!(issue = %issue_key, "Judgment outstanding, dropping submission");
            return false;
        }
        let Some(issue) = self.world.registry.get(&issue_key) else {
            return false;
        };
        let context = build_issue_context(issue, &proposal);

        self.judges_in_flight.insert(issue_key.clone());
        self.panel = Some(Panel::OrdinanceResult {
            issue_key: issue_key.clone(),
            outcome: None,
        });

        let use_case = self.ordinance.judge.clone();
        let tx = self.completions_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = use_case.execute(&issue_key, context).await;
            if tx
                .send(OracleCompletion::Judge {
                    generation,
                    issue_key,
                    proposal,
                    result,
                })
                .is_err()
            {
                tracing::debug!("Simulation gone before judgment arrived");
            }
        });
        true
    }

    fn handle_completion(&mut self, completion: OracleCompletion) {
        if completion.generation() != self.generation {
            tracing::debug!("Dropping oracle reply from before the last reset");
            return;
        }
        match completion {
            OracleCompletion::Chat {
                actor_id, result, ..
            } => {
                self.chats_in_flight.remove(&actor_id);
                match result {
                    Ok(text) => {
                        self.tracker.append_turn(&actor_id, ConversationTurn::npc(text));
                        self.notifications.push_back(Notification::ChatReplied {
                            actor_id: actor_id.to_string(),
                        });
                    }
                    Err(_) => {
                        self.notifications.push_back(Notification::ChatFailed {
                            actor_id: actor_id.to_string(),
                            message: FALLBACK_REPLY.to_string(),
                        });
                        self.chat_failure = Some(actor_id);
                    }
                }
            }
            OracleCompletion::Judge {
                issue_key,
                proposal,
                result,
                ..
            } => {
                self.judges_in_flight.remove(&issue_key);
                let outcome = match result {
                    Ok(outcome) => {
                        self.tracker.save_draft(&issue_key, &proposal);
                        let applied = self.tracker.apply_outcome(&outcome);
                        if let Some(actor_id) = applied.badge_awarded {
                            self.notify_badge(&actor_id);
                        }
                        outcome
                    }
                    Err(_) => OrdinanceOutcome::error(JUDGE_UNAVAILABLE_FEEDBACK),
                };
                self.notifications.push_back(Notification::OrdinanceJudged {
                    issue_key: issue_key.to_string(),
                    status: outcome.status,
                });
                if let Some(Panel::OrdinanceResult {
                    issue_key: open,
                    outcome: slot,
                }) = &mut self.panel
                {
                    if *open == issue_key {
                        *slot = Some(outcome);
                    }
                }
            }
        }
    }

    fn notify_badge(&mut self, actor_id: &ActorId) {
        let name = self
            .world
            .registry
            .find_actor(actor_id)
            .map(|(_, actor)| actor.profile().display_name.clone())
            .unwrap_or_else(|| actor_id.to_string());
        tracing::info!(actor_id = %actor_id, "Badge awarded");
        self.notifications.push_back(Notification::BadgeAwarded {
            actor_id: actor_id.to_string(),
            message: format!("Badge earned! {} is happy with your ordinance.", name),
        });
    }

    // =========================================================================
    // Bulk actions
    // =========================================================================

    /// Empty every transcript. An open conversation is greeted again.
    pub fn clear_conversations(&mut self) {
        self.tracker.clear_conversations();
        self.chat_failure = None;
        if let Some(Panel::Conversation { actor_id }) = &self.panel {
            if let Err(e) = self.tracker.open_conversation(actor_id) {
                tracing::warn!(error = %e, "Failed to greet after clearing conversations");
            }
        }
        self.notifications.push_back(Notification::ConversationsCleared);
    }

    /// Forget all progress, delete the saved record and stop the simulation.
    pub fn reset_progress(&mut self) {
        self.tracker.reset();
        self.generation += 1;
        self.chats_in_flight.clear();
        self.judges_in_flight.clear();
        self.chat_failure = None;
        self.panel = None;
        self.gate.cancel();
        self.keys.clear();
        self.movement.reset(self.world.player_start);
        self.scan = ProximityScan::default();
        self.started = false;
        self.notifications.push_back(Notification::ProgressReset);
    }

    // =========================================================================
    // Read models
    // =========================================================================

    pub fn world(&self) -> &CityWorld {
        &self.world
    }

    pub fn position(&self) -> GroundPoint {
        self.movement.position()
    }

    pub fn panel(&self) -> Option<&Panel> {
        self.panel.as_ref()
    }

    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let position = self.movement.position();
        let registry = &self.world.registry;

        let interactable = self.scan.selected.as_ref().and_then(|target| {
            registry
                .find_actor(&target.actor_id)
                .map(|(_, actor)| InteractionTargetView {
                    issue_key: target.issue_key.to_string(),
                    actor_id: target.actor_id.to_string(),
                    display_name: actor.profile().display_name.clone(),
                    role: actor.profile().role.clone(),
                })
        });

        let zone_prompt = self.gate.pending().map(|request| {
            ZonePromptView::new(
                request.target_zone,
                registry.by_zone(request.target_zone).map(|i| i.title()),
            )
        });

        FrameSnapshot {
            tick: self.tick,
            player: MapPoint::project(position.x, position.z, self.world.geometry.bounds().size()),
            interaction_prompt_visible: self.scan.prompt_visible(),
            interactable,
            markers: self
                .scan
                .markers
                .iter()
                .map(|m| MarkerView {
                    actor_id: m.actor_id.to_string(),
                    visible: m.eligible,
                })
                .collect(),
            zone_prompt,
        }
    }

    pub fn quest_list(&self) -> QuestListView {
        self.tracker.quest_list()
    }

    /// Transcript of the open conversation, including the unsaved fallback
    /// line after a failed reply.
    pub fn transcript(&self) -> Option<TranscriptView> {
        let Some(Panel::Conversation { actor_id }) = &self.panel else {
            return None;
        };
        let mut view = self
            .tracker
            .transcript(actor_id, self.chats_in_flight.contains(actor_id))?;
        if self.chat_failure.as_ref() == Some(actor_id) {
            view.lines.push(TranscriptLine {
                speaker: Speaker::Npc,
                text: FALLBACK_REPLY.to_string(),
            });
        }
        Some(view)
    }

    pub fn ordinance_form(&self) -> Option<OrdinanceFormView> {
        match &self.panel {
            Some(Panel::OrdinanceForm { issue_key }) => self.tracker.ordinance_form(issue_key),
            _ => None,
        }
    }

    pub fn ordinance_result(&self) -> Option<OrdinanceResultView> {
        match &self.panel {
            Some(Panel::OrdinanceResult {
                issue_key,
                outcome: Some(outcome),
            }) => Some(OrdinanceResultView::from_outcome(issue_key.to_string(), outcome)),
            _ => None,
        }
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    #[cfg(test)]
    pub(crate) fn place_player(&mut self, point: GroundPoint) {
        self.movement.reset(point);
    }
}

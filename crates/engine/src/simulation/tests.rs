use std::sync::Arc;

use civicsim_domain::{
    ActorId, CitizenOutcome, GroundPoint, HappinessState, IssueKey, OrdinanceOutcome,
    OrdinanceStatus, OutcomeState, Speaker, Zone,
};
use civicsim_shared::Notification;

use super::{Panel, Simulation};
use crate::infrastructure::ports::{MockDialogueOraclePort, OracleError, StateStore};
use crate::infrastructure::state_store::InMemoryStateStore;
use crate::use_cases::conversation::FALLBACK_REPLY;
use crate::use_cases::movement::MoveKey;
use crate::use_cases::ordinance::JUDGE_UNAVAILABLE_FEEDBACK;
use crate::use_cases::progress::InteractionRoute;
use crate::world::CityWorld;

const DT: f32 = 1.0 / 30.0;

fn simulation_with(oracle: MockDialogueOraclePort) -> (Simulation, Arc<InMemoryStateStore>) {
    let store = Arc::new(InMemoryStateStore::new());
    let mut sim = Simulation::new(CityWorld::standard().unwrap(), store.clone(), Arc::new(oracle));
    sim.start();
    (sim, store)
}

fn simulation() -> Simulation {
    simulation_with(MockDialogueOraclePort::new()).0
}

fn actor_position(sim: &Simulation, id: &str) -> GroundPoint {
    sim.world()
        .registry
        .find_actor(&ActorId::new(id))
        .map(|(_, actor)| actor.position())
        .unwrap()
}

/// Stand on the actor, let the selector run, interact.
fn interact_with(sim: &mut Simulation, id: &str) -> InteractionRoute {
    let position = actor_position(sim, id);
    sim.place_player(position);
    sim.tick(DT);
    sim.interact().unwrap().unwrap()
}

fn hear_citizens(sim: &mut Simulation, ids: &[&str]) {
    for id in ids {
        interact_with(sim, id);
        sim.close_panel();
    }
}

// =============================================================================
// Movement and the zone gate
// =============================================================================

#[test]
fn nothing_moves_before_start() {
    let store = Arc::new(InMemoryStateStore::new());
    let mut sim = Simulation::new(
        CityWorld::standard().unwrap(),
        store,
        Arc::new(MockDialogueOraclePort::new()),
    );
    let start = sim.position();
    sim.set_key(MoveKey::Back, true);
    let frame = sim.tick(DT);
    assert_eq!(sim.position(), start);
    assert!(frame.markers.is_empty());
    assert!(sim.interact().unwrap().is_none());
}

#[test]
fn long_session_never_commits_into_an_obstacle() {
    let mut sim = simulation();
    let geometry = sim.world().geometry.clone();
    let keys = [MoveKey::Forward, MoveKey::Back, MoveKey::Left, MoveKey::Right];
    let mut seed: u32 = 7;

    for step in 0..6000 {
        if step % 45 == 0 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
            for (i, key) in keys.iter().enumerate() {
                sim.set_key(*key, (seed >> (16 + i)) & 1 == 1);
            }
        }
        sim.tick(DT);
        // Confirmed transitions commit their raw point; keep this walk on
        // resolved moves only.
        if sim.snapshot().zone_prompt.is_some() {
            sim.cancel_zone();
        }
        assert!(!geometry.is_blocked(sim.position()), "step {}", step);
    }
}

#[test]
fn leaving_a_zone_for_the_plaza_needs_no_confirmation() {
    let mut sim = simulation();
    assert_eq!(Zone::classify(sim.position()), Some(Zone::South));
    sim.set_key(MoveKey::Forward, true);
    for _ in 0..30 {
        let frame = sim.tick(DT);
        assert!(frame.zone_prompt.is_none());
    }
    assert_eq!(Zone::classify(sim.position()), None);
}

#[test]
fn pending_transition_freezes_the_player() {
    let mut sim = simulation();
    sim.place_player(GroundPoint::new(0.0, 9.95));
    sim.set_key(MoveKey::Back, true);

    let frame = sim.tick(DT);
    let prompt = frame.zone_prompt.expect("zone prompt");
    assert_eq!(prompt.zone, Zone::South);
    assert!(prompt.title.contains("Youth"));

    let frozen = sim.position();
    assert_eq!(frozen, GroundPoint::new(0.0, 9.95));
    sim.set_key(MoveKey::Left, true);
    for _ in 0..10 {
        sim.tick(DT);
        assert_eq!(sim.position(), frozen);
    }
}

#[test]
fn cancel_restores_position_before_trigger() {
    let mut sim = simulation();
    let before = GroundPoint::new(9.95, 8.0);
    sim.place_player(before);
    sim.set_key(MoveKey::Right, true);
    sim.tick(DT);
    assert!(sim.snapshot().zone_prompt.is_some());

    assert!(sim.cancel_zone());
    assert_eq!(sim.position(), before);
    // Held keys were cleared.
    sim.tick(DT);
    assert_eq!(sim.position(), before);
    assert!(!sim.cancel_zone());
}

#[test]
fn confirm_commits_recorded_point() {
    let mut sim = simulation();
    sim.place_player(GroundPoint::new(0.0, -9.95));
    sim.set_key(MoveKey::Forward, true);
    sim.tick(DT);

    assert!(sim.confirm_zone());
    let position = sim.position();
    assert_eq!(Zone::classify(position), Some(Zone::North));
    assert!((position.z - (-9.95 - 7.0 * DT)).abs() < 1e-4);
    assert!(!sim.confirm_zone());
}

// =============================================================================
// Interaction and progress
// =============================================================================

#[test]
fn frame_reports_selected_actor_and_markers() {
    let mut sim = simulation();
    sim.place_player(actor_position(&sim, "vet"));
    let frame = sim.tick(DT);

    assert!(frame.interaction_prompt_visible);
    assert_eq!(frame.interactable.as_ref().map(|t| t.actor_id.as_str()), Some("vet"));
    assert_eq!(frame.markers.len(), 20);
    assert_eq!(frame.markers.iter().filter(|m| m.visible).count(), 1);
}

#[test]
fn talking_to_a_citizen_greets_and_records_completion() {
    let mut sim = simulation();
    let route = interact_with(&mut sim, "parent");
    assert!(matches!(route, InteractionRoute::Conversation { newly_completed: true, .. }));

    let transcript = sim.transcript().unwrap();
    assert_eq!(transcript.lines.len(), 1);
    assert_eq!(transcript.lines[0].speaker, Speaker::Npc);
    assert!(sim
        .tracker()
        .progress()
        .is_completed(&IssueKey::new("scooter"), &ActorId::new("parent")));
}

#[test]
fn movement_is_locked_while_a_panel_is_open() {
    let mut sim = simulation();
    interact_with(&mut sim, "teenager");
    let position = sim.position();
    sim.set_key(MoveKey::Right, true);
    sim.tick(DT);
    assert_eq!(sim.position(), position);
}

#[test]
fn councilor_needs_all_four_citizens() {
    let mut sim = simulation();
    hear_citizens(&mut sim, &["pet_owner", "resident", "non_pet_owner"]);

    let route = interact_with(&mut sim, "councilor_pet");
    assert!(matches!(route, InteractionRoute::Conversation { .. }));
    let greeting = &sim.transcript().unwrap().lines[0].text;
    assert!(greeting.ends_with("Please submit an ordinance that can solve the problem."));
    sim.close_panel();

    hear_citizens(&mut sim, &["vet"]);
    assert!(sim
        .drain_notifications()
        .contains(&Notification::QuestReady {
            issue_key: "pet".into()
        }));

    let route = interact_with(&mut sim, "councilor_pet");
    assert!(matches!(route, InteractionRoute::OrdinanceSubmission { .. }));
    assert_eq!(sim.ordinance_form().unwrap().draft, "");
}

#[test]
fn quest_list_tracks_readiness() {
    let mut sim = simulation();
    hear_citizens(&mut sim, &["cleaner", "villa_resident", "restaurant_owner", "office_worker"]);
    let quests = sim.quest_list();
    let trash = quests.issues.iter().find(|i| i.issue_key == "trash").unwrap();
    assert!(trash.ready_for_ordinance);
    assert!(trash.citizens.iter().all(|c| c.done));
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn duplicate_send_while_outstanding_calls_oracle_once() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle
        .expect_chat()
        .times(1)
        .returning(|_| Ok("Safety first, always.".into()));
    let (mut sim, store) = simulation_with(oracle);

    interact_with(&mut sim, "parent");
    assert!(sim.send_chat("What worries you?"));
    assert!(!sim.send_chat("Hello?"));
    assert!(sim.transcript().unwrap().awaiting_reply);

    assert!(sim.await_completion().await);
    let transcript = sim.transcript().unwrap();
    let texts: Vec<_> = transcript.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts[1..], ["What worries you?", "Safety first, always."]);
    assert!(!transcript.awaiting_reply);

    let saved = store.load().unwrap().unwrap();
    assert_eq!(saved.conversation(&ActorId::new("parent")).unwrap().len(), 3);
    assert!(!sim.await_completion().await);
}

#[tokio::test]
async fn failed_reply_shows_fallback_without_saving_it() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle
        .expect_chat()
        .returning(|_| Err(OracleError::Upstream { status: 500 }));
    let (mut sim, store) = simulation_with(oracle);

    interact_with(&mut sim, "student");
    sim.send_chat("Hi");
    sim.await_completion().await;

    let transcript = sim.transcript().unwrap();
    assert_eq!(transcript.lines.last().unwrap().text, FALLBACK_REPLY);
    let saved = store.load().unwrap().unwrap();
    let log = saved.conversation(&ActorId::new("student")).unwrap();
    assert_eq!(log.len(), 2);
    assert!(sim
        .drain_notifications()
        .iter()
        .any(|n| matches!(n, Notification::ChatFailed { .. })));
}

#[tokio::test]
async fn chat_history_maps_turns_to_roles() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle
        .expect_chat()
        .withf(|req| {
            req.history.len() == 2
                && req.history[0].role == civicsim_shared::ChatRole::Model
                && req.history[1].text == "Tell me more"
                && !req.system_text.is_empty()
        })
        .times(1)
        .returning(|_| Ok("Sure.".into()));
    let (mut sim, _) = simulation_with(oracle);

    interact_with(&mut sim, "elder");
    sim.send_chat("  Tell me more ");
    assert!(sim.await_completion().await);
}

#[test]
fn clear_conversations_regreets_open_chat() {
    let mut sim = simulation();
    interact_with(&mut sim, "police");
    sim.clear_conversations();
    let transcript = sim.transcript().unwrap();
    assert_eq!(transcript.lines.len(), 1);
    assert_eq!(
        sim.tracker().progress().completed_count(&IssueKey::new("youth")),
        1
    );
}

// =============================================================================
// Ordinances
// =============================================================================

fn open_ordinance_form(sim: &mut Simulation) {
    hear_citizens(sim, &["parent", "student", "owner", "disabled"]);
    let route = interact_with(sim, "councilor_scooter");
    assert!(matches!(route, InteractionRoute::OrdinanceSubmission { .. }));
}

#[tokio::test]
async fn judged_ordinance_applies_outcomes_and_awards_one_badge() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle
        .expect_judge()
        .withf(|ctx| ctx.contains("Student's proposal: Parking zones near schools"))
        .times(1)
        .returning(|_| {
            Ok(OrdinanceOutcome {
                status: OrdinanceStatus::PartialSuccess,
                score: Some(75),
                feedback: "Good start.".into(),
                mission: Some("Consider riders too.".into()),
                citizen_outcomes: Some(vec![
                    CitizenOutcome {
                        id: ActorId::new("student"),
                        state: OutcomeState::Sad,
                    },
                    CitizenOutcome {
                        id: ActorId::new("parent"),
                        state: OutcomeState::Happy,
                    },
                    CitizenOutcome {
                        id: ActorId::new("disabled"),
                        state: OutcomeState::Happy,
                    },
                ]),
            })
        });
    let (mut sim, store) = simulation_with(oracle);
    open_ordinance_form(&mut sim);
    sim.drain_notifications();

    assert!(sim.submit_ordinance("Parking zones near schools"));
    assert!(!sim.submit_ordinance("again"));
    assert!(sim.ordinance_result().is_none());
    assert!(sim.await_completion().await);

    let result = sim.ordinance_result().unwrap();
    assert_eq!(result.status, OrdinanceStatus::PartialSuccess);
    assert_eq!(result.score, Some(75));

    let progress = sim.tracker().progress();
    assert_eq!(progress.happiness(&ActorId::new("student")), HappinessState::Sad);
    assert_eq!(progress.happiness(&ActorId::new("parent")), HappinessState::Happy);
    assert_eq!(progress.happiness(&ActorId::new("disabled")), HappinessState::Happy);
    assert_eq!(progress.badges().iter().collect::<Vec<_>>(), vec![&ActorId::new("parent")]);
    assert_eq!(progress.draft(&IssueKey::new("scooter")), Some("Parking zones near schools"));

    let notifications = sim.drain_notifications();
    assert_eq!(
        notifications
            .iter()
            .filter(|n| matches!(n, Notification::BadgeAwarded { .. }))
            .count(),
        1
    );
    let saved = store.load().unwrap().unwrap();
    assert_eq!(saved.badges().len(), 1);
}

#[tokio::test]
async fn unreadable_verdict_is_shown_as_error_and_keeps_draft() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle
        .expect_judge()
        .returning(|_| Ok(civicsim_shared::judgment_or_error("The council adjourned.")));
    let (mut sim, _) = simulation_with(oracle);
    open_ordinance_form(&mut sim);

    sim.submit_ordinance("Ban scooters");
    sim.await_completion().await;

    let result = sim.ordinance_result().unwrap();
    assert_eq!(result.status, OrdinanceStatus::Error);
    assert!(!result.feedback.is_empty());
    assert_eq!(
        sim.tracker().progress().draft(&IssueKey::new("scooter")),
        Some("Ban scooters")
    );
    assert!(sim.tracker().progress().badges().is_empty());
}

#[tokio::test]
async fn judge_outage_does_not_save_draft() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle
        .expect_judge()
        .returning(|_| Err(OracleError::RequestFailed("connection refused".into())));
    let (mut sim, _) = simulation_with(oracle);
    open_ordinance_form(&mut sim);

    sim.submit_ordinance("Helmet rules");
    sim.await_completion().await;

    let result = sim.ordinance_result().unwrap();
    assert_eq!(result.status, OrdinanceStatus::Error);
    assert_eq!(result.feedback, JUDGE_UNAVAILABLE_FEEDBACK);
    assert_eq!(sim.tracker().progress().draft(&IssueKey::new("scooter")), None);
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn reset_removes_record_and_drops_stale_replies() {
    let mut oracle = MockDialogueOraclePort::new();
    oracle.expect_chat().returning(|_| Ok("Late reply".into()));
    let (mut sim, store) = simulation_with(oracle);

    interact_with(&mut sim, "vet");
    sim.send_chat("Hello");
    sim.reset_progress();

    assert!(store.load().unwrap().is_none());
    assert!(!sim.is_started());
    assert_eq!(sim.panel(), None::<&Panel>);
    assert_eq!(sim.position(), sim.world().player_start);

    // Give the spawned task a chance to deliver, then drain it.
    tokio::task::yield_now().await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    sim.tick(DT);
    assert!(!sim.tracker().progress().has_conversation(&ActorId::new("vet")));
    assert!(store.load().unwrap().is_none());
}

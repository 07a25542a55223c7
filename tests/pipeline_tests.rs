mod common;

use carevoice::config::{PipelineConfig, Persona};
use carevoice::error::PipelineError;
use carevoice::kernel::dispatcher::Rejection;
use carevoice::kernel::event::Transcript;
use carevoice::kernel::intent::View;
use carevoice::kernel::session::SessionPhase;
use carevoice::kernel::state::{ConversationTask, SlotKey};
use common::{grandma, Call, Feedback, Harness};

#[test]
fn test_go_to_dashboard() {
    let mut h = Harness::new();
    let result = h.say("go to dashboard");
    assert!(result.accepted);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert_eq!(h.caps.calls(), vec![Call::Navigate(View::Dashboard)]);
    assert_eq!(h.sink.toasts(), vec!["Opening the dashboard.".to_string()]);
}

#[test]
fn test_add_two_paracetamol_for_selected_member() {
    let mut h = Harness::with(PipelineConfig::default(), Some(grandma()));
    let result = h.say("add two paracetamol to cart");
    assert!(result.accepted);
    assert_eq!(
        h.caps.calls(),
        vec![Call::AddToCart { item: "paracetamol".into(), quantity: 2, member: grandma() }]
    );
}

#[test]
fn test_compound_headache_and_pharmacy() {
    let mut h = Harness::new();
    h.caps.resources(&["City Pharmacy"]);
    let result = h.say("I have a headache, find me a pharmacy nearby");
    assert!(result.accepted);
    assert_eq!(
        h.caps.calls(),
        vec![Call::CheckSymptoms("headache".into()), Call::FindResource("pharmacy".into())]
    );
    assert_eq!(h.pipeline.state().task(), ConversationTask::BookingFlow);
    assert_eq!(h.pipeline.state().slot(SlotKey::Facility), Some("City Pharmacy"));
}

#[test]
fn test_yes_with_nothing_pending() {
    let mut h = Harness::new();
    let result = h.say("yes");
    assert!(!result.accepted);
    assert_eq!(result.rejection, Some(Rejection::NothingToConfirm));
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert_eq!(h.sink.toasts().len(), 1);
}

#[test]
fn test_booking_by_voice() {
    let mut h = Harness::new();
    h.caps.resources(&["City Pharmacy", "Apollo Pharmacy"]);
    h.say("find a pharmacy near me");
    h.say("the second one");
    assert_eq!(h.pipeline.state().slot(SlotKey::Facility), Some("Apollo Pharmacy"));
    let result = h.say("yes please");
    assert!(result.accepted);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert_eq!(h.caps.count(|c| *c == Call::Navigate(View::Telemedicine)), 1);
}

#[test]
fn test_anaphoric_yes_after_open_prompt() {
    let mut h = Harness::new();
    h.say("check my symptoms");
    assert_eq!(h.pipeline.state().task(), ConversationTask::ConfirmNavigation);
    h.say("yeah");
    assert_eq!(h.caps.calls(), vec![Call::Navigate(View::SymptomChecker)]);
}

#[test]
fn test_emergency_during_booking() {
    let mut h = Harness::new();
    h.caps.resources(&["City Pharmacy", "Apollo Pharmacy"]);
    h.say("find a pharmacy near me");
    assert_eq!(h.pipeline.state().task(), ConversationTask::BookingFlow);

    let result = h.pipeline.trigger_emergency();
    assert!(result.accepted);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert!(h.pipeline.state().slots().is_empty());
    assert_eq!(h.caps.count(|c| *c == Call::TriggerEmergency), 1);
    assert_eq!(h.caps.count(|c| *c == Call::Navigate(View::EmergencyMode)), 1);
}

#[test]
fn test_emergency_resets_even_on_failure() {
    let mut h = Harness::new();
    h.say("describe my surroundings");
    h.caps.fail("trigger_emergency");

    let result = h.pipeline.trigger_emergency();
    assert!(!result.accepted);
    assert_eq!(result.rejection, Some(Rejection::CapabilityFailed));
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
}

#[test]
fn test_emergency_while_stopped() {
    let mut h = Harness::new();
    h.pipeline.stop_session();
    let result = h.pipeline.trigger_emergency();
    assert!(result.accepted);
    assert_eq!(h.caps.count(|c| *c == Call::TriggerEmergency), 1);
}

#[test]
fn test_capability_failure_leaves_state() {
    let mut h = Harness::new();
    h.say("describe my surroundings");
    let before = h.pipeline.state().clone();

    h.caps.fail("navigate");
    let result = h.say("open my profile");
    assert_eq!(result.rejection, Some(Rejection::CapabilityFailed));
    assert_eq!(*h.pipeline.state(), before);
    assert_eq!(h.pipeline.state().version(), before.version());
}

#[test]
fn test_failed_capability_keeps_last_command() {
    let mut h = Harness::new();
    h.say("go to dashboard");
    let before = h.pipeline.state().clone();

    h.caps.fail("navigate");
    h.say("open my profile");
    assert_eq!(h.pipeline.state().last_command(), before.last_command());
}

#[test]
fn test_spoken_cancel_resets() {
    let mut h = Harness::new();
    h.say("describe my surroundings");
    let result = h.say("never mind");
    assert!(result.accepted);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert_eq!(h.sink.toasts().last().map(String::as_str), Some("Okay, cancelled."));
    // Cancellation is not a dispatched turn.
    assert_eq!(h.pipeline.turn().index, 1);
}

#[test]
fn test_cancel_during_dispatch_is_deferred() {
    let mut h = Harness::new();
    h.caps.cancel_during_dispatch(h.pipeline.control());

    let result = h.say("describe my surroundings");
    // The dispatch itself completed...
    assert!(result.accepted);
    assert_eq!(result.next_task, ConversationTask::SpatialNavigation);
    // ...and the cancel was applied once it finished.
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert!(!h.pipeline.control().cancel_pending());
}

#[test]
fn test_stopped_session_rejects_transcripts() {
    let mut h = Harness::new();
    h.say("describe my surroundings");
    h.pipeline.stop_session();

    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert_eq!(h.pipeline.control().phase(), SessionPhase::Idle);
    let err = h.pipeline.handle_transcript(&Transcript::new("go to dashboard")).unwrap_err();
    assert_eq!(err, PipelineError::SessionInactive);
    assert_eq!(h.caps.count(|c| matches!(c, Call::Navigate(_))), 0);

    h.pipeline.start_session();
    assert!(h.pipeline.handle_transcript(&Transcript::new("go to dashboard")).is_ok());
}

#[test]
fn test_stop_through_shared_handle_ends_session() {
    let mut h = Harness::new();
    let first = h.pipeline.session().unwrap();
    h.say("describe my surroundings");

    h.pipeline.control().stop();
    let err = h.pipeline.handle_transcript(&Transcript::new("yes")).unwrap_err();
    assert_eq!(err, PipelineError::SessionInactive);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert!(h.pipeline.session().is_none());

    let second = h.pipeline.start_session();
    assert_ne!(first, second);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
}

#[test]
fn test_restart_after_handle_stop_opens_new_session() {
    let mut h = Harness::new();
    let first = h.pipeline.session().unwrap();
    h.say("describe my surroundings");

    h.pipeline.control().stop();
    let second = h.pipeline.start_session();
    assert_ne!(first, second);
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert!(h.pipeline.state().slots().is_empty());
}

#[test]
fn test_idle_cancel_through_handle_resets_before_next_command() {
    let mut h = Harness::new();
    h.say("describe my surroundings");

    h.pipeline.control().request_cancel();
    // Without the reset, "yes" would describe the surroundings again.
    let result = h.say("yes");
    assert_eq!(result.rejection, Some(Rejection::NothingToConfirm));
    assert_eq!(h.caps.count(|c| matches!(c, Call::DescribeSurroundings)), 1);
    assert!(h.sink.toasts().iter().any(|t| t == "Okay, cancelled."));
    assert!(!h.pipeline.control().cancel_pending());
}

#[test]
fn test_sync_control_applies_idle_cancel() {
    let mut h = Harness::new();
    h.say("describe my surroundings");

    h.pipeline.control().request_cancel();
    h.pipeline.sync_control();
    assert_eq!(h.pipeline.state().task(), ConversationTask::None);
    assert_eq!(h.pipeline.telemetry().snapshot().cancel_stats.immediate, 1);
    assert!(h.pipeline.session().is_some());
}

#[test]
fn test_empty_transcript_rejected() {
    let mut h = Harness::new();
    let err = h.pipeline.handle_transcript(&Transcript::new("   ")).unwrap_err();
    assert_eq!(err, PipelineError::EmptyTranscript);
    assert!(h.sink.log().is_empty());
}

#[test]
fn test_blind_persona_hears_feedback() {
    let config = PipelineConfig { persona: Persona::Blind, ..PipelineConfig::default() };
    let mut h = Harness::with(config, None);
    h.say("go to dashboard");
    assert_eq!(
        h.sink.log(),
        vec![
            Feedback::Toast("Opening the dashboard.".into()),
            Feedback::Spoken { message: "Opening the dashboard.".into(), language: "en-IN".into() },
        ]
    );
}

#[test]
fn test_deaf_persona_is_never_spoken_to() {
    let config = PipelineConfig { persona: Persona::Deaf, speak_feedback: true, ..PipelineConfig::default() };
    let mut h = Harness::with(config, None);
    h.say("go to dashboard");
    h.say("blah blah");
    assert!(h.sink.spoken().is_empty());
    assert_eq!(h.sink.toasts().len(), 2);
}

mod common;

use common::*;
use feedback_core::*;

#[test]
fn toggle_flips_and_persists() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    for channel in Channel::ALL {
        assert!(fb.is_enabled(channel));
        assert!(!fb.toggle(channel));
        assert!(!fb.is_enabled(channel));
        assert!(fb.toggle(channel));
    }
    fb.disable(Channel::Haptics);
    assert_eq!(
        rig.store
            .values
            .borrow()
            .get("feedback_haptics")
            .map(String::as_str),
        Some("false")
    );
}

#[test]
fn custom_namespace_is_used_for_storage() {
    let rig = Rig::new();
    let fb: Feedback<FakeElement> =
        Feedback::new(FeedbackConfig::default().with_namespace("safari"), rig.bare());
    fb.disable(Channel::Music);
    assert!(rig.store.values.borrow().contains_key("safari_music"));
}

#[test]
fn unavailable_storage_never_surfaces() {
    let rig = Rig::new();
    rig.store.fail_reads.set(true);
    rig.store.fail_writes.set(true);
    let fb = rig.feedback(rig.full());
    assert!(fb.is_enabled(Channel::Sound));
    assert!(!fb.toggle(Channel::Sound));
    assert!(!fb.is_enabled(Channel::Sound));
    let report = trigger(&rig, &fb, Pattern::Single);
    assert_eq!(report.outcome, DeliveryOutcome::Delivered(Mechanism::Vibration));
}

#[test]
fn click_cue_plays_alongside_the_cascade() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.full());
    let cue = FakeElement::new(0.4, false);
    fb.set_click_cue(cue.clone());

    let report = trigger(&rig, &fb, Pattern::Single);
    assert!(report.cue_played);
    assert_eq!(report.outcome, DeliveryOutcome::Delivered(Mechanism::Vibration));
    assert_eq!(cue.0.rewinds.get(), 1);
    assert_eq!(cue.0.plays.get(), 1);
}

#[test]
fn click_cue_runs_even_with_haptics_disabled() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.full());
    let cue = FakeElement::new(0.4, false);
    fb.set_click_cue(cue.clone());
    fb.disable(Channel::Haptics);

    let report = trigger(&rig, &fb, Pattern::Double);
    assert!(report.cue_played);
    assert_eq!(report.outcome, DeliveryOutcome::Disabled);
}

#[test]
fn click_cue_is_silent_when_sound_is_off_or_muted() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.full());
    let cue = FakeElement::new(0.4, false);
    fb.set_click_cue(cue.clone());

    fb.disable(Channel::Sound);
    assert!(!trigger(&rig, &fb, Pattern::Single).cue_played);

    fb.enable(Channel::Sound);
    fb.manager(MediaKind::Sound).mute_all();
    assert!(!trigger(&rig, &fb, Pattern::Single).cue_played);
    assert_eq!(cue.0.plays.get(), 0);
}

#[test]
fn diagnostics_reflect_state() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.full());
    fb.record_interaction(InteractionKind::TouchStart);
    fb.register_playable(FakeElement::new(1.0, true), Channel::Music);
    fb.disable(Channel::Sound);

    let d = fb.diagnostics();
    assert_eq!(d.credits, 2);
    assert!(d.recent_gesture);
    assert_eq!(d.free_handles, 20);
    assert_eq!(d.pool_capacity, 20);
    assert_eq!(d.last_outcome, None);
    assert!(d.haptics_enabled);
    assert!(!d.sound_enabled);
    assert!(d.music_enabled);
    assert_eq!(d.music_elements, 1);
    assert_eq!(d.sound_elements, 0);

    trigger(&rig, &fb, Pattern::Single);
    let d = fb.diagnostics();
    assert_eq!(d.credits, 1);
    assert_eq!(d.free_handles, 19);
    assert_eq!(
        d.last_outcome,
        Some(DeliveryOutcome::Delivered(Mechanism::GestureProxy))
    );
}

mod common;

use common::*;
use feedback_core::*;
use std::rc::Rc;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn disabling_sound_silences_and_enabling_restores() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let click = FakeElement::new(0.5, false);
    assert!(fb.register_playable(click.clone(), Channel::Sound));

    fb.manager(MediaKind::Sound).set_enabled(false);
    assert!(!fb.is_enabled(Channel::Sound));
    assert_eq!(click.volume_now(), 0.0);

    fb.manager(MediaKind::Sound).set_enabled(true);
    assert!(fb.is_enabled(Channel::Sound));
    assert!(approx(click.volume_now(), 0.5));
}

#[test]
fn every_registered_element_follows_the_preference() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let elements: Vec<FakeElement> = [0.2, 0.6, 1.0]
        .iter()
        .map(|v| FakeElement::new(*v, false))
        .collect();
    for e in &elements {
        fb.register_playable(e.clone(), Channel::Sound);
    }
    fb.disable(Channel::Sound);
    assert!(elements.iter().all(|e| e.volume_now() == 0.0));
    fb.enable(Channel::Sound);
    for (e, v) in elements.iter().zip([0.2, 0.6, 1.0]) {
        assert!(approx(e.volume_now(), v));
    }
}

#[test]
fn preference_api_and_manager_stay_in_sync() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let el = FakeElement::new(0.8, false);
    fb.register_playable(el.clone(), Channel::Sound);

    // Written straight through the store, seen by the manager
    fb.preferences().save(Channel::Sound, false);
    assert!(!fb.manager(MediaKind::Sound).is_enabled());
    assert_eq!(el.volume_now(), 0.0);

    // Written through the manager, seen by the store
    fb.manager(MediaKind::Sound).set_enabled(true);
    assert!(fb.preferences().load(Channel::Sound, false));
    assert!(approx(el.volume_now(), 0.8));
}

#[test]
fn toggling_keeps_working_when_storage_rejects_writes() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let el = FakeElement::new(0.5, false);
    fb.register_playable(el.clone(), Channel::Sound);
    fb.enable(Channel::Sound);

    rig.store.fail_writes.set(true);
    fb.disable(Channel::Sound);
    assert!(!fb.is_enabled(Channel::Sound));
    assert_eq!(el.volume_now(), 0.0);

    assert!(fb.toggle(Channel::Sound));
    assert!(approx(el.volume_now(), 0.5));
    assert!(!fb.toggle(Channel::Sound));
    assert_eq!(el.volume_now(), 0.0);
}

#[test]
fn master_volume_scales_and_clamps() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let sound = fb.manager(MediaKind::Sound);
    let el = FakeElement::new(0.8, false);
    sound.register(el.clone());

    sound.set_master_volume(0.5);
    assert!(approx(el.volume_now(), 0.4));
    assert_eq!(sound.effective_volume_of(&el), Some(el.volume_now()));

    sound.set_master_volume(3.0);
    assert_eq!(sound.master_volume(), 1.0);
    assert!(approx(el.volume_now(), 0.8));

    sound.set_master_volume(f32::NAN);
    assert_eq!(sound.master_volume(), 1.0);
}

#[test]
fn session_mute_does_not_touch_preference() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let music = fb.manager(MediaKind::Music);
    let track = FakeElement::new(0.7, true);
    music.register(track.clone());

    music.mute_all();
    assert!(music.is_muted());
    assert!(music.is_enabled());
    assert_eq!(track.volume_now(), 0.0);
    assert!(rig.store.values.borrow().get("feedback_music").is_none());

    // Disabled while muted: unmuting alone is not enough
    music.set_enabled(false);
    music.unmute_all();
    assert_eq!(track.volume_now(), 0.0);
    music.set_enabled(true);
    assert!(approx(track.volume_now(), 0.7));
}

#[test]
fn music_disable_pauses_and_enable_resumes_only_those() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let playing = FakeElement::new(0.6, true);
    let already_paused = FakeElement::new(0.6, false);
    fb.register_playable(playing.clone(), Channel::Music);
    fb.register_playable(already_paused.clone(), Channel::Music);

    fb.disable(Channel::Music);
    assert!(!playing.playing());
    assert!(!already_paused.playing());

    fb.enable(Channel::Music);
    assert!(playing.playing());
    assert!(!already_paused.playing());
    assert_eq!(already_paused.0.plays.get(), 0);
}

#[test]
fn music_played_and_paused_by_the_page_while_disabled_stays_paused() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let music = fb.manager(MediaKind::Music);
    let track = FakeElement::new(0.6, true);
    let untouched = FakeElement::new(0.6, true);
    music.register(track.clone());
    music.register(untouched.clone());

    fb.disable(Channel::Music);
    assert!(!track.playing());

    // The page plays the track itself, then pauses it again
    track.play().unwrap();
    music.note_playback(&track);
    track.pause();

    fb.enable(Channel::Music);
    assert!(!track.playing());
    assert!(untouched.playing());
}

#[test]
fn music_resume_ignores_autoplay_rejection() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let track = FakeElement::new(1.0, true);
    fb.register_playable(track.clone(), Channel::Music);
    fb.disable(Channel::Music);
    track.0.reject_play.set(true);

    fb.enable(Channel::Music);
    assert!(!track.playing());
    assert!(fb.is_enabled(Channel::Music));
    assert_eq!(track.volume_now(), 1.0);

    // The pause mark is cleared even though playback was refused
    track.0.reject_play.set(false);
    fb.disable(Channel::Music);
    fb.enable(Channel::Music);
    assert_eq!(track.0.plays.get(), 0);
}

#[test]
fn sound_disable_does_not_pause() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let el = FakeElement::new(0.5, true);
    fb.register_playable(el.clone(), Channel::Sound);
    fb.disable(Channel::Sound);
    assert!(el.playing());
    assert_eq!(el.volume_now(), 0.0);
}

#[test]
fn registering_while_disabled_applies_current_state() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    fb.disable(Channel::Music);
    let track = FakeElement::new(0.9, true);
    fb.register_playable(track.clone(), Channel::Music);
    assert_eq!(track.volume_now(), 0.0);
    assert!(!track.playing());

    fb.enable(Channel::Music);
    assert!(approx(track.volume_now(), 0.9));
    assert!(track.playing());
}

#[test]
fn register_is_idempotent_and_unregister_leaves_element_alone() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let el = FakeElement::new(0.5, false);
    assert!(fb.register_playable(el.clone(), Channel::Sound));
    assert!(!fb.register_playable(el.clone(), Channel::Sound));
    assert_eq!(fb.manager(MediaKind::Sound).len(), 1);

    assert!(fb.unregister_playable(&el, Channel::Sound));
    assert!(!fb.unregister_playable(&el, Channel::Sound));
    assert!(fb.manager(MediaKind::Sound).is_empty());

    fb.disable(Channel::Sound);
    assert!(approx(el.volume_now(), 0.5));
}

#[test]
fn haptics_channel_has_no_registry() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.bare());
    let el = FakeElement::new(0.5, false);
    assert!(!fb.register_playable(el.clone(), Channel::Haptics));
    assert!(!fb.unregister_playable(&el, Channel::Haptics));
}

#[test]
fn persisted_state_applies_to_a_fresh_instance() {
    let rig = Rig::new();
    {
        let fb = rig.feedback(rig.bare());
        fb.disable(Channel::Sound);
    }
    let fb = rig.feedback(rig.bare());
    assert!(!fb.is_enabled(Channel::Sound));
    let el = FakeElement::new(0.5, false);
    fb.register_playable(el.clone(), Channel::Sound);
    assert_eq!(el.volume_now(), 0.0);
}

#[test]
fn dropping_a_manager_unsubscribes_it() {
    let rig = Rig::new();
    let prefs = Rc::new(PreferenceStore::new(rig.store.clone(), "feedback"));
    let manager: Rc<MediaManager<FakeElement>> =
        MediaManager::new(MediaKind::Music, prefs.clone(), 1.0);
    assert_eq!(prefs.subscriber_count(), 1);
    drop(manager);
    assert_eq!(prefs.subscriber_count(), 0);
    prefs.save(Channel::Music, false);
}

#[test]
fn end_to_end_volume_round_trip() {
    let rig = Rig::new();
    let fb = rig.feedback(rig.full());
    let el = FakeElement::new(0.5, false);
    fb.register_playable(el.clone(), Channel::Sound);
    fb.disable(Channel::Sound);
    assert_eq!(el.volume_now(), 0.0);
    fb.enable(Channel::Sound);
    assert!(approx(el.volume_now(), 0.5));
}

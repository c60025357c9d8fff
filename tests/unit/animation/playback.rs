use super::*;

fn run_ticks(pb: &mut Playback, view: &mut ViewState, timers: &mut TimerQueue, until: TimeMs) {
    for f in timers.advance(until) {
        pb.on_timer(f.id, view);
    }
}

#[test]
fn initial_state_is_paused() {
    let pb = Playback::new(1_000);
    assert_eq!(pb.state(), PlaybackState::Paused);
}

#[test]
fn n_ticks_advance_modulo_range() {
    let (min, max) = (2012, 2024);
    let span = max - min + 1;
    for n in [0, 1, 5, 12, 13, 14, 40] {
        let mut view = ViewState::new((min, max));
        let mut timers = TimerQueue::new();
        let mut pb = Playback::new(1_000);
        pb.play(&mut view, &mut timers, TimeMs(0));
        run_ticks(&mut pb, &mut view, &mut timers, TimeMs(1_000 * n as u64));
        assert_eq!(view.selected_year, (n % span) + min, "after {n} ticks");
    }
}

#[test]
fn toggle_switches_states() {
    let mut view = ViewState::new((2012, 2014));
    let mut timers = TimerQueue::new();
    let mut pb = Playback::new(1_000);
    assert_eq!(
        pb.toggle(&mut view, &mut timers, TimeMs(0)),
        PlaybackState::Playing
    );
    assert!(view.is_playing);
    assert_eq!(timers.active_count(), 1);
    assert_eq!(
        pb.toggle(&mut view, &mut timers, TimeMs(10)),
        PlaybackState::Paused
    );
    assert!(!view.is_playing);
    assert_eq!(timers.active_count(), 0);
}

#[test]
fn pause_stops_year_advancement() {
    let mut view = ViewState::new((2012, 2024));
    let mut timers = TimerQueue::new();
    let mut pb = Playback::new(1_000);
    pb.play(&mut view, &mut timers, TimeMs(0));
    run_ticks(&mut pb, &mut view, &mut timers, TimeMs(2_000));
    assert_eq!(view.selected_year, 2014);
    pb.pause(&mut view);
    run_ticks(&mut pb, &mut view, &mut timers, TimeMs(10_000));
    assert_eq!(view.selected_year, 2014);
}

#[test]
fn dropping_controller_cancels_its_timer() {
    let mut view = ViewState::new((2012, 2024));
    let mut timers = TimerQueue::new();
    {
        let mut pb = Playback::new(1_000);
        pb.play(&mut view, &mut timers, TimeMs(0));
        assert_eq!(timers.active_count(), 1);
    }
    assert_eq!(timers.active_count(), 0);
    assert!(timers.advance(TimeMs(5_000)).is_empty());
}

#[test]
fn play_twice_keeps_a_single_timer() {
    let mut view = ViewState::new((2012, 2024));
    let mut timers = TimerQueue::new();
    let mut pb = Playback::new(1_000);
    pb.play(&mut view, &mut timers, TimeMs(0));
    pb.play(&mut view, &mut timers, TimeMs(500));
    assert_eq!(timers.active_count(), 1);
}

#[test]
fn foreign_timers_are_ignored() {
    let mut view = ViewState::new((2012, 2024));
    let mut timers = TimerQueue::new();
    let mut pb = Playback::new(1_000);
    pb.play(&mut view, &mut timers, TimeMs(0));
    let other = timers.schedule_once(TimeMs(0), 10);
    assert!(!pb.on_timer(other.id(), &mut view));
    assert_eq!(view.selected_year, 2012);
}

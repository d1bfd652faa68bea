use std::time::Duration;

use tokio::time::{sleep, Instant};

use visafeed::controllers::FeedScreen;
use visafeed::models::post::builtin_seed;
use visafeed::models::{RevealEvent, RevealScheduler, RevealState, RevealTiming};
use visafeed::{Action, FeedState, PostStore};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[tokio::test(start_paused = true)]
async fn events_fire_at_planned_offsets() {
    let start = Instant::now();
    let (_handle, mut rx) = RevealScheduler::mount(RevealTiming::default(), vec![1, 2, 3]);

    let mut fired = Vec::new();
    while let Some(event) = rx.recv().await {
        fired.push((start.elapsed(), event));
    }

    assert_eq!(
        fired,
        vec![
            (ms(1000), RevealEvent::Loaded),
            (ms(1000), RevealEvent::Revealed(1)),
            (ms(1200), RevealEvent::Revealed(2)),
            (ms(1400), RevealEvent::Revealed(3)),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn visible_set_only_grows_until_complete() {
    let timing = RevealTiming::default();
    let ids = vec![1, 2, 3];
    let start = Instant::now();
    let (_handle, mut rx) = RevealScheduler::mount(timing, ids.clone());

    let mut state = RevealState::new();
    let mut previous = state.visible().clone();
    while let Some(event) = rx.recv().await {
        state.apply(event);
        assert!(previous.is_subset(state.visible()));
        previous = state.visible().clone();
    }

    assert!(state.is_complete(&ids));
    assert_eq!(start.elapsed(), timing.completes_after(ids.len()));
}

#[tokio::test(start_paused = true)]
async fn cancel_drops_pending_timers() {
    let (mut handle, mut rx) = RevealScheduler::mount(RevealTiming::default(), vec![1, 2, 3]);

    sleep(ms(1100)).await;
    handle.cancel();
    handle.cancel();

    let mut fired = Vec::new();
    while let Some(event) = rx.recv().await {
        fired.push(event);
    }
    assert_eq!(fired, vec![RevealEvent::Loaded, RevealEvent::Revealed(1)]);
    assert!(!handle.is_active());
}

#[tokio::test(start_paused = true)]
async fn cancel_after_completion_is_a_no_op() {
    let (mut handle, mut rx) = RevealScheduler::mount(RevealTiming::default(), vec![1]);
    while rx.recv().await.is_some() {}

    handle.cancel();
    handle.cancel();
    assert!(!handle.is_active());
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels() {
    let (handle, mut rx) = RevealScheduler::mount(RevealTiming::default(), vec![1, 2]);
    drop(handle);
    assert_eq!(rx.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn screen_posts_become_interactive_in_order() {
    let feed = FeedState::new(PostStore::seeded(builtin_seed()).unwrap());
    let mut screen = FeedScreen::mount(feed, RevealTiming::default());

    sleep(ms(999)).await;
    screen.pump_reveal();
    assert!(screen.reveal().is_loading());
    assert_eq!(screen.react(Action::ToggleLike(1)), Ok(false));

    sleep(ms(101)).await;
    screen.pump_reveal();
    assert!(!screen.reveal().is_loading());
    assert!(screen.reveal().is_visible(1));
    assert!(!screen.reveal().is_visible(2));
    assert_eq!(screen.react(Action::ToggleLike(1)), Ok(true));
    assert_eq!(screen.react(Action::ToggleLike(2)), Ok(false));

    while screen.next_reveal().await.is_some() {}
    assert!(screen.reveal().is_complete(&[1, 2, 3]));
    assert_eq!(screen.list.items, vec![1, 2, 3]);
    assert_eq!(screen.feed().store().get(1).unwrap().like_count, 46);
}

#[tokio::test(start_paused = true)]
async fn unmounted_screen_receives_nothing_more() {
    let feed = FeedState::new(PostStore::seeded(builtin_seed()).unwrap());
    let mut screen = FeedScreen::mount(feed, RevealTiming::default());

    screen.unmount();
    sleep(ms(5000)).await;
    screen.pump_reveal();

    assert!(screen.reveal().is_loading());
    assert!(screen.reveal().visible().is_empty());
    assert!(!screen.reveal_pending());
}

use std::time::{Duration, Instant};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;

use crate::controllers::post_controller::load_feed;
use crate::controllers::screen::{FeedScreen, Flow};
use crate::error::FeedError;
use crate::models::Config;
use crate::views::tui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn start_app(config: Config) -> Result<(), FeedError> {
    let feed = load_feed(&config)?;

    // Setup terminal
    let mut terminal = tui::setup_terminal()?;

    let mut screen = FeedScreen::mount(feed, config.timing());

    // Run the app
    let res = run_app(&mut terminal, &mut screen).await;

    // Tear down the screen before giving the terminal back
    screen.unmount();
    tui::restore_terminal(&mut terminal)?;

    if let Err(err) = &res {
        log::error!("feed exited with error: {}", err);
    }
    res
}

pub async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut FeedScreen,
) -> Result<(), FeedError> {
    loop {
        screen.pump_reveal();
        screen.tick(Instant::now());
        terminal.draw(|f| tui::render_ui(f, screen))?;

        // Short poll so reveal events and the signup timer get folded in promptly
        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if screen.handle_key(key.code, Instant::now()) == Flow::Quit {
                log::info!("feed closed by viewer");
                return Ok(());
            }
        }
    }
}

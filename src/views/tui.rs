use std::io;
use ratatui::{
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    layout::{Layout, Constraint, Direction, Rect},
    style::{Style, Color, Modifier},
    Terminal, Frame,
    text::Line,
    prelude::Span,
};
use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    execute,
    event::{DisableMouseCapture, EnableMouseCapture},
};

use crate::controllers::{FeedScreen, SignupModal};
use crate::models::{AiVote, Post, ViewerReactions};
use crate::views::widgets::wrap_text;

pub fn setup_terminal() -> io::Result<Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

pub fn restore_terminal(terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()
}

pub fn like_label(post: &Post, liked: bool) -> String {
    let mark = if liked { "♥" } else { "♡" };
    format!("{} {}", mark, post.like_count)
}

pub fn vote_labels(post: &Post, vote: AiVote) -> (String, String) {
    let helpful = if vote == AiVote::Helpful { "[+]" } else { " + " };
    let unhelpful = if vote == AiVote::Unhelpful { "[-]" } else { " - " };
    (
        format!("{} {}", helpful, post.ai_helpful_count),
        format!("{} {}", unhelpful, post.ai_unhelpful_count),
    )
}

fn post_item(post: &Post, viewer: &ViewerReactions, width: usize) -> ListItem<'static> {
    let header = Line::from(vec![
        Span::styled(
            post.author.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {} · {}", post.datetime(), post.views),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);

    let mut lines = vec![header, Line::from("")];
    lines.extend(wrap_text(&post.question, width).into_iter().map(Line::from));
    lines.push(Line::from(""));

    let liked = viewer.is_liked(post.id);
    let like_style = if liked {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    lines.push(Line::from(vec![
        Span::styled(like_label(post, liked), like_style),
        Span::raw(format!("   💬 {}   ↗ {}", post.comment_count, post.share_count)),
    ]));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        "AI answer",
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
    )));
    let answer_width = width.saturating_sub(2);
    lines.extend(
        wrap_text(&post.ai_response, answer_width)
            .into_iter()
            .map(|l| Line::from(Span::styled(format!("│ {}", l), Style::default().fg(Color::Gray)))),
    );

    let vote = viewer.vote_for(post.id);
    let (helpful, unhelpful) = vote_labels(post, vote);
    let picked = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    lines.push(Line::from(vec![
        Span::raw("Helpful? "),
        Span::styled(helpful, if vote == AiVote::Helpful { picked } else { Style::default() }),
        Span::raw("  "),
        Span::styled(
            unhelpful,
            if vote == AiVote::Unhelpful { picked.fg(Color::Yellow) } else { Style::default() },
        ),
    ]));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn skeleton_items() -> Vec<ListItem<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    (0..3)
        .map(|_| {
            ListItem::new(vec![
                Line::from(Span::styled("●  ▒▒▒▒▒▒▒▒▒▒▒▒  ▒▒▒▒▒", dim)),
                Line::from(""),
                Line::from(Span::styled("▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒", dim)),
                Line::from(Span::styled("▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒", dim)),
                Line::from(""),
                Line::from(Span::styled("░░░░░░░░░░░░░░░░░░░░░░░░░░░░░░", dim)),
                Line::from(""),
            ])
        })
        .collect()
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_signup(f: &mut Frame, modal: &SignupModal) {
    let area = centered_rect(44, 11, f.size());

    let lines = if modal.is_submitted() {
        vec![
            Line::from(Span::styled("You're on the list!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("We'll notify you via email once the feature is available."),
        ]
    } else {
        vec![
            Line::from(format!("{} is still being tested.", modal.feature.label())),
            Line::from(""),
            Line::from("Be the first to know when it's ready:"),
            Line::from(""),
            Line::from(Span::styled(
                format!("> {}_", modal.email),
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(Span::styled("enter: notify me   esc: close", Style::default().add_modifier(Modifier::DIM))),
        ]
    };

    let popup = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Coming Soon!").borders(Borders::ALL));

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

pub fn render_ui(
    f: &mut Frame,
    screen: &mut FeedScreen,
) {
    // Create the layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.size());

    let width = chunks[0].width.saturating_sub(4) as usize;

    let (items, title) = if screen.reveal().is_loading() {
        (skeleton_items(), "Loading...")
    } else {
        let items: Vec<ListItem> = screen.list.items
            .iter()
            .filter_map(|id| screen.feed().store().get(*id).ok())
            .map(|post| post_item(post, screen.feed().viewer(), width))
            .collect();
        (items, "Immigration Q&A")
    };

    // Create a List from the items and highlight the currently selected one
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::Rgb(30, 30, 46)));

    if screen.reveal().is_loading() {
        f.render_widget(list, chunks[0]);
    } else {
        f.render_stateful_widget(list, chunks[0], &mut screen.list.state);
    }

    let help = Paragraph::new(Line::from(Span::styled(
        "j/k move  l like  y helpful  n unhelpful  / search  c ask  q quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(help, chunks[1]);

    if let Some(modal) = &screen.modal {
        render_signup(f, modal);
    }
}

//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::catalog::TrackDescriptor;
use crate::config::UiSettings;
use crate::controller::{PlaybackController, PlaybackOutput, PlaybackStatus};

const CONTROLS: [(&str, &str); 7] = [
    ("j/k", "up/down"),
    ("gg/G", "top/bottom"),
    ("enter/space", "play or stop selected"),
    ("1-9", "play sound N"),
    ("r", "random sound"),
    ("s", "stop"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{}] {}", k, v))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// One-line summary of what is playing.
pub fn status_text<O: PlaybackOutput>(controller: &PlaybackController<O>) -> String {
    let Some(track) = controller.active_track() else {
        return "Stopped".to_string();
    };
    match controller.status() {
        PlaybackStatus::Starting => format!("Starting {}…", track.label),
        PlaybackStatus::Failed(reason) => format!("Playback failed: {reason}"),
        PlaybackStatus::Playing | PlaybackStatus::Stopped => {
            format!("Now playing: {} (For {})", track.label, track.category)
        }
    }
}

/// Text of one list row.
pub fn row_text(track: &TrackDescriptor, active: bool, show_categories: bool) -> String {
    let marker = if active { "♪ " } else { "  " };
    if show_categories && !track.category.trim().is_empty() {
        format!("{}{}  ·  For {}", marker, track.label, track.category)
    } else {
        format!("{}{}", marker, track.label)
    }
}

/// Render the entire UI into the provided `frame`.
pub fn draw<O: PlaybackOutput>(
    frame: &mut Frame,
    app: &App,
    controller: &PlaybackController<O>,
    ui_settings: &UiSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" hush ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut status = Paragraph::new(status_text(controller)).block(
        Block::bordered()
            .padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            })
            .title(" status "),
    );
    if matches!(controller.status(), PlaybackStatus::Failed(_)) {
        status = status.style(Style::default().fg(Color::Red));
    }
    frame.render_widget(status, chunks[1]);

    // Sound list, one row per catalog entry in catalog order.
    {
        let tracks = controller.catalog().tracks();
        let items: Vec<ListItem> = tracks
            .iter()
            .map(|t| {
                let active = controller.is_active(&t.id);
                let item = ListItem::new(row_text(t, active, ui_settings.show_categories));
                if active {
                    item.style(
                        Style::default()
                            .fg(Color::Magenta)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    item
                }
            })
            .collect();

        let title = if controller.catalog().is_empty() {
            " sounds (none configured) "
        } else {
            " sounds "
        };
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if app.has_rows() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}

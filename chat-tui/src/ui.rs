//! Screen rendering.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use statuette_core::Mode;

use crate::app::{App, DisplayMessage, QUICK_ACTIONS};

const AGENT_LABEL: &str = "AgentStatuette";

pub fn render(frame: &mut Frame, app: &App) {
    let banner_height = if app.mode.is_auto() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(6),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app.mode);
    if app.mode.is_auto() {
        render_banner(frame, chunks[1]);
    }
    if app.show_quick_actions() {
        render_quick_actions(frame, chunks[2]);
    } else {
        render_conversation(frame, chunks[2], app);
    }
    render_input(frame, chunks[3], app);
    render_footer(frame, chunks[4], app);
}

fn render_header(frame: &mut Frame, area: Rect, mode: Mode) {
    let badge = match mode {
        Mode::Auto => Span::styled(
            " 🤖 Autonomous Mode ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Mode::Manual => Span::styled(
            " 👤 Manual Mode ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
    };

    let line = Line::from(vec![
        Span::styled(
            AGENT_LABEL,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "  Onchain life easier with AgentKit   ",
            Style::default().fg(Color::DarkGray),
        ),
        badge,
    ]);

    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(header, area);
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(Span::styled(
            "🤖 Running in Autonomous Mode",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "The agent is performing actions automatically. Type \"stop\" to exit.",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let banner = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(banner, area);
}

fn render_quick_actions(frame: &mut Frame, area: Rect) {
    let mut lines = vec![Line::from("")];
    for (i, action) in QUICK_ACTIONS.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!("  [F{}] ", i + 1), Style::default().fg(Color::Cyan)),
            Span::styled(
                action.title,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("        {}", action.hint),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Span::styled(" Quick actions ", Style::default().fg(Color::White))),
    );
    frame.render_widget(panel, area);
}

fn message_lines(message: &DisplayMessage, width: usize) -> Vec<Line<'static>> {
    let time = message.received_at.format("%H:%M").to_string();
    let mut lines = Vec::new();

    if message.response.is_user() {
        lines.push(
            Line::from(vec![
                Span::styled(time, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    "  You",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
            .alignment(Alignment::Right),
        );
        // User bubbles take at most half the width
        for text in wrap(&message.response.content, (width / 2).max(10)) {
            lines.push(
                Line::from(Span::styled(text, Style::default().fg(Color::White)))
                    .alignment(Alignment::Right),
            );
        }
    } else {
        lines.push(Line::from(vec![
            Span::styled(
                AGENT_LABEL,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", time), Style::default().fg(Color::DarkGray)),
        ]));
        for text in wrap(&message.response.content, (width * 4 / 5).max(10)) {
            lines.push(Line::from(vec![
                Span::styled("│ ", Style::default().fg(Color::DarkGray)),
                Span::styled(text, Style::default().fg(Color::White)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines
}

fn render_conversation(frame: &mut Frame, area: Rect, app: &App) {
    let width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = app
        .messages
        .iter()
        .flat_map(|m| message_lines(m, width))
        .collect();

    if app.busy {
        lines.push(Line::from(vec![
            Span::styled("◐ ", Style::default().fg(Color::Magenta)),
            Span::styled(
                format!("{} is thinking...", AGENT_LABEL),
                Style::default().fg(Color::Magenta),
            ),
        ]));
    }

    let content_height = line_height(lines.len());
    let view_height = area.height.saturating_sub(2);
    let top = scroll_top(content_height, view_height, app.scroll_offset);

    let title = if content_height > view_height {
        " Conversation [↑/↓ scroll] "
    } else {
        " Conversation "
    };

    let content = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(title, Style::default().fg(Color::White))),
        )
        .scroll((top, 0));
    frame.render_widget(content, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = if app.input.is_empty() {
        let placeholder = if app.mode.is_auto() {
            "Type \"stop\" to exit autonomous mode..."
        } else {
            "Type your message..."
        };
        (placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (format!("{}▏", app.input), Style::default().fg(Color::White))
    };

    let border = if app.busy { Color::DarkGray } else { Color::Blue };
    let input = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(Span::styled(" Message ", Style::default().fg(Color::White))),
    );
    frame.render_widget(input, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut hints = vec![
        Span::styled(" Enter", Style::default().fg(Color::Cyan)),
        Span::raw(" send  "),
        Span::styled("↑/↓", Style::default().fg(Color::Cyan)),
        Span::raw(" scroll  "),
    ];
    if app.show_quick_actions() {
        hints.push(Span::styled("F1-F4", Style::default().fg(Color::Cyan)));
        hints.push(Span::raw(" quick actions  "));
    }
    hints.push(Span::styled("Esc", Style::default().fg(Color::Cyan)));
    hints.push(Span::raw(" quit"));

    frame.render_widget(
        Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn line_height(count: usize) -> u16 {
    u16::try_from(count).unwrap_or(u16::MAX)
}

/// First visible line; the scroll offset counts from the bottom
fn scroll_top(content_height: u16, view_height: u16, offset: u16) -> u16 {
    let max_scroll = content_height.saturating_sub(view_height);
    max_scroll.saturating_sub(offset.min(max_scroll))
}

/// Greedy word wrap; words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    out.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                out.push(word.into_iter().collect());
                word = rest;
            }

            let current_len = current.chars().count();
            if current_len > 0 && current_len + 1 + word.len() > width {
                out.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }
        out.push(current);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words() {
        assert_eq!(
            wrap("send token to the address", 10),
            vec!["send token", "to the", "address"]
        );
    }

    #[test]
    fn wrap_splits_long_words_and_keeps_newlines() {
        assert_eq!(
            wrap("0x1234567890abcdef\nok", 8),
            vec!["0x123456", "7890abcd", "ef", "ok"]
        );
    }

    #[test]
    fn wrap_empty_text() {
        assert_eq!(wrap("", 10), vec![String::new()]);
    }

    #[test]
    fn scroll_top_follows_bottom() {
        assert_eq!(scroll_top(50, 20, 0), 30);
        assert_eq!(scroll_top(50, 20, 5), 25);
        assert_eq!(scroll_top(50, 20, 100), 0);
        assert_eq!(scroll_top(10, 20, 0), 0);
    }

    #[test]
    fn scroll_top_saturates_for_huge_conversations() {
        let content_height = line_height(70_000);

        assert_eq!(content_height, u16::MAX);
        assert_eq!(scroll_top(content_height, 20, 0), u16::MAX - 20);
    }
}

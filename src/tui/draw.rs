use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{App, Focus};
use crate::manager::LoadState;
use crate::model::{ChangeAction, CommandMode};
use crate::pending::ApplyChange;
use crate::source::ChannelSource;

pub(super) fn draw<A>(frame: &mut ratatui::Frame, app: &App<A>)
where
    A: ChannelSource + ApplyChange,
{
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Line::from(vec![
        Span::styled("botdash", Style::default().fg(Color::Magenta)),
        Span::raw("  "),
        Span::styled(app.operator.clone(), Style::default().fg(Color::Gray)),
    ]);
    frame.render_widget(Paragraph::new(header), rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[1]);

    draw_channels(frame, app, cols[0]);
    draw_commands(frame, app, cols[1]);
    draw_footer(frame, app, rows[2]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, style))
}

fn draw_channels<A>(frame: &mut ratatui::Frame, app: &App<A>, area: ratatui::layout::Rect)
where
    A: ChannelSource + ApplyChange,
{
    let changes = app.manager.changes();
    let channels = app.channels();

    let mut items = Vec::new();
    for ch in &channels {
        let pending = changes.pending_for(&ch.id).count();
        let mut spans = vec![Span::raw(format!("#{}", ch.name))];
        if ch.command_mode != CommandMode::Restricted {
            spans.push(Span::styled(
                format!(" {}", ch.command_mode.label()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if pending > 0 {
            spans.push(Span::styled(
                format!(" ({} pending)", pending),
                Style::default().fg(Color::Yellow),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }
    if items.is_empty() {
        let empty = match app.manager.load_state() {
            LoadState::Failed(_) => "(failed to load channels)",
            LoadState::NotLoaded => "(loading)",
            LoadState::Loaded => "(no channels configured)",
        };
        items.push(ListItem::new(empty));
    }

    let mut state = ListState::default();
    if !channels.is_empty() {
        state.select(Some(app.channel_idx.min(channels.len() - 1)));
    }

    let list = List::new(items)
        .block(pane_block(
            "Channels".to_string(),
            app.focus == Focus::Channels,
        ))
        .highlight_style(Style::default().bg(Color::DarkGray));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_commands<A>(frame: &mut ratatui::Frame, app: &App<A>, area: ratatui::layout::Rect)
where
    A: ChannelSource + ApplyChange,
{
    let changes = app.manager.changes();
    let selected = changes.selected();
    let allowed = changes.selected_allow_list().unwrap_or_default();
    let commands = app.visible_commands();

    let title = match &selected {
        Some(ch) => format!(
            "#{} [{}] category={} (c: next category)",
            ch.name,
            ch.command_mode.label(),
            app.category_name()
        ),
        None => format!("Commands category={}", app.category_name()),
    };

    let mut items = Vec::new();
    for cmd in &commands {
        let mark = match &selected {
            Some(ch) if ch.command_mode == CommandMode::All => "[*]",
            Some(ch) if ch.command_mode == CommandMode::Exclude => {
                if ch.allows(&cmd.name) { "[*]" } else { "[-]" }
            }
            Some(_) if allowed.iter().any(|c| c == &cmd.name) => "[x]",
            _ => "[ ]",
        };
        let last_edit = selected.as_ref().and_then(|ch| {
            changes
                .pending_for(&ch.id)
                .filter(|p| p.command == cmd.name)
                .last()
                .map(|p| p.action)
        });

        let mut spans = vec![Span::raw(format!("{} {}", mark, cmd.name))];
        match last_edit {
            Some(ChangeAction::Add) => {
                spans.push(Span::styled(" +", Style::default().fg(Color::Green)))
            }
            Some(ChangeAction::Remove) => {
                spans.push(Span::styled(" -", Style::default().fg(Color::Red)))
            }
            None => {}
        }
        if !cmd.enabled {
            spans.push(Span::styled(
                " disabled",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if !cmd.description.is_empty() {
            spans.push(Span::styled(
                format!("  {}", cmd.description),
                Style::default().fg(Color::Gray),
            ));
        }
        items.push(ListItem::new(Line::from(spans)));
    }
    if items.is_empty() {
        items.push(ListItem::new("(no commands)"));
    }

    let mut state = ListState::default();
    if !commands.is_empty() {
        state.select(Some(app.command_idx.min(commands.len() - 1)));
    }

    let list = List::new(items)
        .block(pane_block(title, app.focus == Focus::Commands))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_footer<A>(frame: &mut ratatui::Frame, app: &App<A>, area: ratatui::layout::Rect)
where
    A: ChannelSource + ApplyChange,
{
    let changes = app.manager.changes();
    let mut lines = Vec::new();

    if app.saving {
        lines.push(Line::from(Span::styled(
            format!("saving {} change(s)...", changes.pending_count()),
            Style::default().fg(Color::Yellow),
        )));
    } else if changes.is_dirty() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Unsaved changes ({})", changes.pending_count()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  s: save  d: discard"),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Tab: switch pane  Space: toggle  r: reload  q: quit",
            Style::default().fg(Color::Gray),
        )));
    }

    if let Some(status) = &app.status {
        lines.push(Line::from(status.clone()));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true }),
        area,
    );
}

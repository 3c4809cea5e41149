//! Drawing of the main window, overlays, and the install dialog.

use super::app::{AppState, Focus, Overlay};
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

const SELECTOR_WIDTH: u16 = 14;
const RUN_WIDTH: u16 = 14;

pub fn draw(frame: &mut Frame, app: &AppState) {
    let [command_area, presets_area, log_area, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_command_bar(frame, app, command_area);
    frame.render_widget(preset_row(app), presets_area);
    draw_log(frame, app, log_area);
    frame.render_widget(
        Paragraph::new(app.status.as_str()).style(Style::new().add_modifier(Modifier::REVERSED)),
        status_area,
    );

    match &app.overlay {
        Some(Overlay::Help(text)) => draw_modal(frame, "Command help", text, Color::Cyan),
        Some(Overlay::Alert(alert)) => draw_modal(frame, &alert.title, &alert.message, Color::Red),
        None => {}
    }
}

fn draw_command_bar(frame: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Command ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [selector_area, params_area, run_area] = Layout::horizontal([
        Constraint::Length(SELECTOR_WIDTH),
        Constraint::Min(10),
        Constraint::Length(RUN_WIDTH),
    ])
    .areas(inner);

    let focused = Style::new().fg(Color::Black).bg(Color::Cyan);
    let selector_style = if app.focus == Focus::Selector {
        focused
    } else {
        Style::new()
    };
    frame.render_widget(
        Paragraph::new(format!("< {:<9}>", app.command.as_str())).style(selector_style),
        selector_area,
    );

    let label = " Params: ";
    let params_line = Line::from(vec![
        Span::raw(label).dim(),
        Span::raw(app.params.as_str()),
    ]);
    frame.render_widget(Paragraph::new(params_line), params_area);
    if app.focus == Focus::Params && app.overlay.is_none() {
        let offset = u16::try_from(label.len() + app.params.chars().count()).unwrap_or(u16::MAX);
        let x = params_area
            .x
            .saturating_add(offset)
            .min(params_area.right().saturating_sub(1));
        frame.set_cursor_position((x, params_area.y));
    }

    let run = if app.submit_enabled() {
        Span::styled("[ Run  Enter ]", Style::new().fg(Color::Green).bold())
    } else {
        Span::styled("[ Running... ]", Style::new().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(Line::from(run)), run_area);
}

fn preset_row(app: &AppState) -> Paragraph<'_> {
    let mut spans = vec![Span::raw(" F1 ").bold(), Span::raw("Help  ")];
    for (i, preset) in app.presets.iter().enumerate() {
        spans.push(Span::raw(format!("F{} ", i + 2)).bold());
        spans.push(Span::raw(format!("{}  ", preset.label)));
    }
    Paragraph::new(Line::from(spans))
}

fn draw_log(frame: &mut Frame, app: &AppState, area: Rect) {
    let title = if app.log.is_following() {
        " Output ".to_string()
    } else {
        " Output (scrolled, End to follow) ".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let height = block.inner(area).height as usize;
    let lines: Vec<Line> = app
        .log
        .visible(height)
        .iter()
        .map(|l| Line::raw(l.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_modal(frame: &mut Frame, title: &str, body: &str, accent: Color) {
    let width = body
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.len())
        + 4;
    let height = body.lines().count() + 4;
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let height = u16::try_from(height).unwrap_or(u16::MAX);
    let area = centered(frame.area(), width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(accent))
        .title(format!(" {} ", title))
        .title_bottom(Line::from(" Enter/Esc to close ").right_aligned());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Blocking dialog shown when the tool is not installed.
pub fn draw_install_dialog(frame: &mut Frame, tool: &str, instructions: &str) {
    let title = format!("{} not found", tool);
    draw_modal(frame, &title, instructions, Color::Red);
}

fn centered(outer: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(outer);
    let [area] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(area);
    area
}

use crate::color_utils::{event_color, is_dark};
use crate::render::label;
use crate::tui::state::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

const HOURS_COLUMN_WIDTH: u16 = 7;

pub fn draw(f: &mut Frame, state: &AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(HOURS_COLUMN_WIDTH), Constraint::Min(0)])
        .split(v_chunks[0]);

    let calendar_block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Day ({}) ", state.source));
    let calendar_area = calendar_block.inner(h_chunks[1]);
    f.render_widget(calendar_block, h_chunks[1]);

    // --- Hours Column ---
    // Labels line up with the calendar's inner rows, not the border.
    let hours_area = Rect {
        y: calendar_area.y,
        height: calendar_area.height,
        ..h_chunks[0]
    };
    let total = f64::from(state.window.total_minutes().max(1));
    let mut rows: Vec<Line> = vec![Line::from(""); hours_area.height as usize];
    for (i, text) in state.window.slot_labels().into_iter().enumerate() {
        let minutes = (i as u32 * state.window.slot_minutes) as f64;
        let row = (minutes / total * f64::from(hours_area.height)).round() as usize;
        if let Some(slot) = rows.get_mut(row) {
            *slot = Line::from(text);
        }
    }
    let hours = Paragraph::new(rows).style(Style::default().fg(Color::DarkGray));
    f.render_widget(hours, hours_area);

    // --- Events ---
    for event in &state.events {
        let Some(cells) = state
            .window
            .event_box(event)
            .to_cells(calendar_area.width, calendar_area.height)
        else {
            continue;
        };
        let area = Rect {
            x: calendar_area.x + cells.x,
            y: calendar_area.y + cells.y,
            width: cells.width,
            height: cells.height,
        };
        let (r, g, b) = event_color(event.id);
        let fg = if is_dark(r, g, b) {
            Color::White
        } else {
            Color::Black
        };
        let body = Paragraph::new(vec![
            Line::from(label(event)),
            Line::from(format!(
                "{}-{}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M")
            )),
        ])
        .style(Style::default().bg(Color::Rgb(r, g, b)).fg(fg));
        f.render_widget(body, area);
    }

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[1]);
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(format!(" Status: {} ", state.stage_label())),
        );
    let help = Paragraph::new(format!("r:Reload | q:Quit | recomputes: {}", state.recomputes))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

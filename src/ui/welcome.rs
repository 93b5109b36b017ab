use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

const TITLE: &str = "DISA QUIZ";

pub fn render_welcome(frame: &mut Frame, area: Rect, bank_size: usize) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions available", bank_size),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "ENTER",
            Style::default().fg(Color::Green).bold(),
        )),
        Line::from("to start  ·  q to quit".fg(Color::DarkGray)),
    ];

    render_centered(frame, area, content);
}

pub fn render_name_entry(frame: &mut Frame, area: Rect, input: &str, error: Option<&str>) {
    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(TITLE, Style::default().fg(Color::Cyan).bold())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter your name: ", Style::default().fg(Color::White)),
            Span::styled(input, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
    ];

    content.push(match error {
        Some(err) => Line::from(Span::styled(err, Style::default().fg(Color::Red))),
        None => Line::from(""),
    });
    content.push(Line::from(Span::styled(
        "[Enter] continue  ·  [Esc] quit",
        Style::default().fg(Color::DarkGray),
    )));

    render_centered(frame, area, content);
}

pub fn render_count_entry(frame: &mut Frame, area: Rect, value: usize, min: usize, max: usize) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "How many questions?",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("◀ {} ▶", value),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::from(Span::styled(
            format!("{} – {}", min, max),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "j/k ±1  ·  PgUp/PgDn ±10  ·  [Enter] start  ·  [Esc] quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    render_centered(frame, area, content);
}

fn render_centered(frame: &mut Frame, area: Rect, content: Vec<Line>) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(content.len() as u16 + 2),
        Constraint::Fill(1),
    ])
    .split(area);

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}

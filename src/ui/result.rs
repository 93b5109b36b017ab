use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::leaderboard::LeaderboardEntry;

use super::Summary;

const LEADERBOARD_ROWS: usize = 10;

pub fn render(frame: &mut Frame, area: Rect, summary: &Summary) {
    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Min(6),
        Constraint::Length(LEADERBOARD_ROWS as u16 + 2),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], summary);
    render_wrong_answers(frame, chunks[1], summary);
    render_leaderboard(frame, chunks[2], &summary.leaderboard);
    render_controls(frame, chunks[3], summary);
}

fn calculate_percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}

fn get_grade_color(percentage: f64) -> Color {
    match percentage as u32 {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, summary: &Summary) {
    let percentage = calculate_percentage(summary.score, summary.total);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({:.0}%)  in {:.2}s",
                summary.score, summary.total, percentage, summary.elapsed_seconds
            ),
            Style::default().fg(get_grade_color(percentage)).bold(),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_wrong_answers(frame: &mut Frame, area: Rect, summary: &Summary) {
    let lines: Vec<Line> = if summary.wrong_answers.is_empty() {
        vec![Line::from(Span::styled(
            "No wrong answers.",
            Style::default().fg(Color::Green),
        ))]
    } else {
        summary
            .wrong_answers
            .iter()
            .flat_map(|question| {
                [
                    Line::from(Span::styled(
                        format!("Q: {}", question.prompt()),
                        Style::default().fg(Color::White),
                    )),
                    Line::from(Span::styled(
                        format!(
                            "Correct: {}. {}",
                            question.correct_key(),
                            question.correct_text()
                        ),
                        Style::default().fg(Color::Green),
                    )),
                    Line::from(Span::styled(
                        format!("Explanation: {}", question.explanation()),
                        Style::default().fg(Color::DarkGray),
                    )),
                    Line::from(""),
                ]
            })
            .collect()
    };

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Review Wrong Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll((summary.scroll as u16, 0));
    frame.render_widget(widget, area);
}

fn render_leaderboard(frame: &mut Frame, area: Rect, leaderboard: &[LeaderboardEntry]) {
    let lines: Vec<Line> = leaderboard
        .iter()
        .take(LEADERBOARD_ROWS)
        .enumerate()
        .map(|(i, entry)| {
            let rank_style = match i {
                0 => Style::default().fg(Color::Yellow).bold(),
                1 => Style::default().fg(Color::White),
                2 => Style::default().fg(Color::LightRed),
                _ => Style::default().fg(Color::DarkGray),
            };

            Line::from(vec![
                Span::styled(format!("{:>3}. ", i + 1), rank_style),
                Span::styled(
                    format!("{:<20}", entry.name),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{:>4}  {:>8.2}s", entry.score, entry.elapsed_seconds),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Leaderboard ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, summary: &Summary) {
    let mut lines = Vec::with_capacity(2);
    if let Some(error) = &summary.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    let hint = if summary.wrong_answers.is_empty() {
        "j/k scroll  ·  r restart  ·  q quit"
    } else {
        "j/k scroll  ·  w retry wrong answers  ·  r restart  ·  q quit"
    };
    lines.push(Line::from(hint.fg(Color::DarkGray)));

    let widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(widget, area);
}

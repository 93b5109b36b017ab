use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::models::{OptionKey, Question};
use crate::session::AnswerFeedback;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    index: usize,
    total: usize,
    cursor: Option<OptionKey>,
    feedback: Option<&AnswerFeedback>,
) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], index, total);
    render_question_text(frame, chunks[1], index, total, &question.prompt());
    render_options(frame, chunks[2], question, cursor, feedback);
    if let Some(feedback) = feedback {
        render_feedback(frame, chunks[3], feedback);
    }
    render_controls(frame, chunks[4], feedback.is_some());
}

fn render_progress(frame: &mut Frame, area: Rect, index: usize, total: usize) {
    let widget = Paragraph::new(format!("{}/{}", index + 1, total))
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, index: usize, total: usize, text: &str) {
    let widget = Paragraph::new(format!("Q{}/{}: {}", index + 1, total, text))
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: Option<OptionKey>,
    feedback: Option<&AnswerFeedback>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(8);

    for (key, text) in question.keyed_options() {
        let is_selected = cursor == Some(key);
        let style = match feedback {
            Some(fb) if key == fb.correct_key => Style::default().fg(Color::Green).bold(),
            Some(fb) if fb.selected == Some(key) => Style::default().fg(Color::Red).bold(),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if is_selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", key), style),
            Span::styled(text, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, feedback: &AnswerFeedback) {
    let verdict = if feedback.correct {
        Line::from(Span::styled(
            format!("Correct! {}. {}", feedback.correct_key, feedback.correct_text),
            Style::default().fg(Color::Green).bold(),
        ))
    } else {
        Line::from(Span::styled(
            format!(
                "Wrong. The correct answer is: {}. {}",
                feedback.correct_key, feedback.correct_text
            ),
            Style::default().fg(Color::Red).bold(),
        ))
    };

    let lines = vec![
        verdict,
        Line::from(""),
        Line::from(vec![
            Span::styled("Explanation: ", Style::default().fg(Color::Cyan)),
            Span::styled(feedback.explanation.as_str(), Style::default().fg(Color::Gray)),
        ]),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool) {
    let hint = if answered {
        "enter next question  ·  q quit"
    } else {
        "j/k or a-d choose  ·  enter submit  ·  q quit"
    };
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

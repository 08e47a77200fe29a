pub mod charting;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use tecla::{context::FinishReason, typing_policy::match_char, SessionConfig};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

fn settings_line(config: &SessionConfig) -> String {
    format!(
        "{} | {} | case: {} | errors: {}",
        config.language,
        config.difficulty,
        on_off(config.case_sensitive),
        on_off(config.allow_errors)
    )
}

/// Live view while the user types
pub struct TypingView<'a>(pub &'a App);

impl Widget for TypingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let trainer = &app.trainer;
        let state = trainer.state();

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // text name and settings
                Constraint::Length(2), // countdown
                Constraint::Min(1),    // lines
                Constraint::Length(1), // counters
                Constraint::Length(1), // message
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            format!("{} | {}", trainer.text().name, settings_line(trainer.config())),
            italic_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            format!("{}", trainer.seconds_remaining()),
            dim_bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let case_sensitive = trainer.config().case_sensitive;
        let typed: Vec<char> = trainer.typed().chars().collect();
        let mut lines = Vec::new();

        if let Some(current) = trainer.current_line() {
            let spans = current
                .chars()
                .enumerate()
                .map(|(idx, expected)| match typed.get(idx) {
                    Some(&actual) if match_char(Some(expected), Some(actual), case_sensitive) => {
                        Span::styled(expected.to_string(), green_bold_style)
                    }
                    Some(&actual) => Span::styled(
                        match actual {
                            ' ' => "·".to_owned(),
                            c => c.to_string(),
                        },
                        red_bold_style,
                    ),
                    None if idx == typed.len() => {
                        Span::styled(expected.to_string(), underlined_dim_bold_style)
                    }
                    None => Span::styled(expected.to_string(), dim_bold_style),
                })
                .collect::<Vec<Span>>();
            lines.push(Line::from(spans));
        }

        for upcoming in trainer
            .text()
            .lines
            .iter()
            .skip(state.current_line_index + 1)
        {
            lines.push(Line::from(Span::styled(upcoming.clone(), dim_bold_style)));
        }

        // short texts look calmer centered
        let fits = trainer
            .text()
            .lines
            .iter()
            .all(|l| l.width() <= chunks[2].width as usize);

        Paragraph::new(lines)
            .alignment(if fits {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true })
            .render(chunks[2], buf);

        let counters = if trainer.has_started() {
            format!(
                "{} typed   {} errors   line {}/{}",
                state.total_typed,
                state.total_errors,
                state.current_line_index + 1,
                trainer.text().lines.len()
            )
        } else {
            String::from("start typing to begin")
        };
        Paragraph::new(Span::styled(counters, bold_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        if let Some(message) = &app.message {
            Paragraph::new(Span::styled(message.clone(), red_bold_style))
                .alignment(Alignment::Center)
                .render(chunks[4], buf);
        }

        let legend = if trainer.is_running() {
            "(←) retry / (→) new / (esc)ape"
        } else {
            "(tab) language / (←) retry / (→) new / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style)).render(chunks[5], buf);
    }
}

/// Chart and summary of the last finished session
pub struct ResultsView<'a>(pub &'a App);

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let app = self.0;
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let Some(snapshot) = app.trainer.snapshot() else {
            Paragraph::new("No results yet - finish a session first.")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .render(area, buf);
            return;
        };
        let summary = snapshot.summary();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Min(1),    // chart
                Constraint::Length(1), // stats
                Constraint::Length(1), // session details
                Constraint::Length(3), // settings info box
                Constraint::Length(1), // message
                Constraint::Length(1), // legend
            ])
            .split(area);

        let points = snapshot.samples.chart_points();
        let error_points = snapshot.samples.error_points();
        let bounds = charting::compute_chart_params(&points);

        let datasets = vec![
            Dataset::default()
                .name("chars/s")
                .marker(Marker::Braille)
                .style(Style::default().fg(Color::Magenta))
                .graph_type(GraphType::Line)
                .data(&points),
            Dataset::default()
                .name("errors")
                .marker(Marker::Dot)
                .style(Style::default().fg(Color::Red))
                .graph_type(GraphType::Scatter)
                .data(&error_points),
        ];

        Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .title("seconds")
                    .bounds(bounds.x)
                    .labels(vec![
                        Span::styled(charting::format_label(bounds.x[0]), bold_style),
                        Span::styled(charting::format_label(bounds.x[1]), bold_style),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("chars/s")
                    .bounds(bounds.y)
                    .labels(vec![
                        Span::styled("0", bold_style),
                        Span::styled(charting::format_label(bounds.y[1]), bold_style),
                    ]),
            )
            .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            format!(
                "{:.2} chars/s   {} errors   {}/{}/{} correct/typed/length   {:.0}% done   {:.2} sd",
                summary.average_chars_per_second,
                summary.total_errors,
                summary.correct_chars,
                summary.total_typed,
                snapshot.text_length,
                summary.completion_ratio * 100.0,
                summary.consistency
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        let reason = match snapshot.reason {
            FinishReason::Timeout => "time up",
            FinishReason::Completed => "text completed",
        };
        Paragraph::new(Span::styled(
            format!(
                "{}: {} after {}s, {} lines, peak {} chars/s, finished {}",
                snapshot.text_name,
                reason,
                snapshot.elapsed_seconds,
                snapshot.lines_completed,
                summary.peak_chars_per_second,
                snapshot.finished_at.format("%H:%M:%S")
            ),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

        let settings_text = format!(
            "Settings: {}\n(l) Language (d) Difficulty (c) Case (e) Errors",
            settings_line(app.trainer.config())
        );
        Paragraph::new(settings_text)
            .style(
                Style::default()
                    .fg(Color::Gray)
                    .add_modifier(Modifier::ITALIC),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[3], buf);

        if let Some(message) = &app.message {
            Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        }

        Paragraph::new(Span::styled("(r)etry / (n)ew / (esc)ape", italic_style))
            .render(chunks[5], buf);
    }
}

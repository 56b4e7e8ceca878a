pub mod charting;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Chart, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use typeforge::{
    classify::{CharClass, ClassifiedChar, Classification, Segmentation},
    metrics::ResultSummary,
    mode::{TestMode, DURATION_PRESETS, WORD_COUNT_PRESETS},
    session::{Phase, TypingSession},
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const TAB_WIDTH: usize = 4;

struct Styles {
    bold: Style,
    correct: Style,
    wrong: Style,
    dim: Style,
    cursor: Style,
    italic: Style,
    accent: Style,
}

impl Styles {
    fn new() -> Self {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim = Style::default().patch(bold).add_modifier(Modifier::DIM);
        Self {
            bold,
            correct: Style::default().patch(bold).fg(Color::Green),
            wrong: Style::default().patch(bold).fg(Color::Red),
            dim,
            cursor: Style::default().patch(dim).add_modifier(Modifier::UNDERLINED),
            italic: Style::default().add_modifier(Modifier::ITALIC),
            accent: Style::default().fg(Color::Magenta),
        }
    }

    fn for_class(&self, class: CharClass) -> Style {
        match class {
            CharClass::Correct => self.correct,
            CharClass::Incorrect | CharClass::Extra => self.wrong,
            CharClass::Missed => self.wrong.add_modifier(Modifier::DIM | Modifier::CROSSED_OUT),
            CharClass::Untyped => self.dim,
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let styles = Styles::new();
        let session = &self.session;

        match (session.phase(), session.result()) {
            (Phase::Finished, Some(summary)) => render_results(summary, &styles, area, buf),
            _ => render_typing(session, &styles, area, buf),
        }
    }
}

fn render_typing(session: &TypingSession, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let classification = session.classification();
    let prompt = prompt_lines(&classification, styles);
    let width = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);

    let prompt_height = match classification.segmentation {
        // words wrap, so estimate from the target width
        Segmentation::WordDelimited => {
            let chars = session.target().text().width() as u16;
            (chars / width + 1).max(1)
        }
        Segmentation::WholeString => prompt.len().max(1) as u16,
    };
    let spacer = area.height.saturating_sub(prompt_height + 5) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(spacer),
            Constraint::Length(1), // options
            Constraint::Length(1), // stats
            Constraint::Length(1),
            Constraint::Length(prompt_height),
            Constraint::Length(1),
            Constraint::Length(1), // legend
            Constraint::Min(0),
        ])
        .split(area);

    options_bar(session, styles).render(chunks[1], buf);
    stats_bar(session, styles).render(chunks[2], buf);

    let widget = match classification.segmentation {
        Segmentation::WordDelimited => {
            let alignment = if prompt_height == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            };
            Paragraph::new(prompt)
                .alignment(alignment)
                .wrap(Wrap { trim: false })
        }
        // indentation matters, no wrapping
        Segmentation::WholeString => Paragraph::new(prompt),
    };
    widget.render(chunks[4], buf);

    let legend = if session.phase() == Phase::Idle {
        "(←/→) mode / (↑/↓) length / (tab) restart / (esc) quit"
    } else {
        "(tab) restart / (esc) quit"
    };
    Paragraph::new(Span::styled(legend, styles.italic))
        .alignment(Alignment::Center)
        .render(chunks[6], buf);
}

fn options_bar<'a>(session: &TypingSession, styles: &Styles) -> Paragraph<'a> {
    let config = session.config();
    let pick = |selected: bool| if selected { styles.bold.fg(Color::Yellow) } else { styles.dim };

    let mut spans: Vec<Span> = [TestMode::Time, TestMode::Words, TestMode::Code]
        .into_iter()
        .flat_map(|mode| {
            [
                Span::styled(mode.to_string(), pick(mode == config.mode)),
                Span::raw("  "),
            ]
        })
        .collect();

    match config.mode {
        TestMode::Time => {
            spans.push(Span::styled("| ", styles.dim));
            for secs in DURATION_PRESETS {
                spans.push(Span::styled(format!("{secs} "), pick(secs == config.duration_secs)));
            }
        }
        TestMode::Words => {
            spans.push(Span::styled("| ", styles.dim));
            for count in WORD_COUNT_PRESETS {
                spans.push(Span::styled(format!("{count} "), pick(count == config.word_count)));
            }
        }
        TestMode::Code => {}
    }

    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}

fn stats_bar<'a>(session: &TypingSession, styles: &Styles) -> Paragraph<'a> {
    let live = session.live();
    let style = if session.phase() == Phase::Running {
        styles.bold
    } else {
        styles.dim
    };
    Paragraph::new(Span::styled(
        format!(
            "{} {}   {} wpm   {}% acc",
            session.remaining(),
            session.mode().remaining_label(),
            live.wpm,
            live.accuracy
        ),
        style,
    ))
    .alignment(Alignment::Center)
}

/// Styled lines for the prompt, with the cursor on the next position to type
fn prompt_lines<'a>(classification: &Classification, styles: &Styles) -> Vec<Line<'a>> {
    let mut lines: Vec<Line> = Vec::new();
    let mut spans: Vec<Span> = Vec::new();
    let mut cursor_placed = false;

    let last = classification.segments.len().saturating_sub(1);
    for (idx, segment) in classification.segments.iter().enumerate() {
        for c in &segment.chars {
            let at_cursor = !cursor_placed && c.class == CharClass::Untyped;
            cursor_placed |= at_cursor;
            let style = if at_cursor {
                styles.cursor
            } else {
                styles.for_class(c.class)
            };

            if breaks_line(c) {
                // keep a visible mark when the newline itself needs attention
                if at_cursor || !matches!(c.class, CharClass::Correct | CharClass::Untyped) {
                    spans.push(Span::styled("↵", style));
                }
                lines.push(Line::from(std::mem::take(&mut spans)));
                continue;
            }
            spans.push(Span::styled(display_text(c), style));
        }

        if classification.segmentation == Segmentation::WordDelimited && idx < last {
            let at_cursor = !cursor_placed && segment.current;
            cursor_placed |= at_cursor;
            let style = match (at_cursor, segment.finished) {
                (true, _) => styles.cursor,
                (false, true) => styles.correct,
                (false, false) => styles.dim,
            };
            spans.push(Span::styled(" ", style));
        }
    }
    lines.push(Line::from(spans));
    lines
}

fn breaks_line(c: &ClassifiedChar) -> bool {
    match c.class {
        CharClass::Extra => c.typed == Some('\n'),
        _ => c.expected == Some('\n'),
    }
}

fn display_text(c: &ClassifiedChar) -> String {
    match (c.display_char(), c.class) {
        ('\t', _) => " ".repeat(TAB_WIDTH),
        (' ', CharClass::Incorrect | CharClass::Extra) => "·".to_string(),
        (ch, _) => ch.to_string(),
    }
}

fn render_results(summary: &ResultSummary, styles: &Styles, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Min(1),    // chart
            Constraint::Length(1), // headline figures
            Constraint::Length(1), // character breakdown
            Constraint::Length(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let (overall_duration, highest_wpm) =
        charting::compute_chart_params(&summary.samples, summary.elapsed_seconds);

    let tuples = charting::sample_points(&summary.samples);
    let datasets = vec![Dataset::default()
        .marker(ratatui::symbols::Marker::Braille)
        .style(styles.accent)
        .graph_type(GraphType::Line)
        .data(&tuples)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([1.0, overall_duration])
                .labels(vec![
                    Span::styled("1", styles.bold),
                    Span::styled(charting::format_label(overall_duration), styles.bold),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest_wpm])
                .labels(vec![
                    Span::styled("0", styles.bold),
                    Span::styled(charting::format_label(highest_wpm), styles.bold),
                ]),
        );

    chart.render(chunks[0], buf);

    Paragraph::new(Span::styled(
        format!(
            "{} wpm   {} raw   {}% acc   {}% consistency",
            summary.wpm, summary.raw_wpm, summary.accuracy, summary.consistency
        ),
        styles.bold,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let stats = summary.char_stats;
    Paragraph::new(Span::styled(
        format!(
            "{}   {}/{}/{}/{} correct/incorrect/extra/missed   {:.0}s",
            summary.mode,
            stats.correct,
            stats.incorrect,
            stats.extra,
            stats.missed,
            summary.elapsed_seconds
        ),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled("(tab/r) restart / (esc)ape", styles.italic))
        .render(chunks[4], buf);
}

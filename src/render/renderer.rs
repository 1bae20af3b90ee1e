use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Direction, EndReason, Position, RailMap, SessionPhase, Snapshot};
use crate::metrics::{GameMetrics, format_time};

const SNAKE_COLOR: Color = Color::Rgb(76, 175, 80);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        rail_map: &RailMap,
        snapshot: &Snapshot,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.game_over {
            let game_over = self.render_game_over(snapshot, metrics);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(rail_map, snapshot);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(snapshot.phase);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, rail_map: &RailMap, snapshot: &Snapshot) -> Paragraph<'static> {
        let body_style = Style::default().fg(snake_color(snapshot));
        let head = snapshot.snake.first().copied();
        let mut lines = Vec::with_capacity(rail_map.height());

        for y in 0..rail_map.height() {
            let mut spans = Vec::with_capacity(rail_map.width());

            for x in 0..rail_map.width() {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        head_glyph(snapshot.direction),
                        body_style.add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.snake.contains(&pos) {
                    Span::styled("□ ", body_style)
                } else if Some(pos) == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if rail_map.is_rail(pos) {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                } else if is_frame(rail_map, pos) {
                    Span::styled("▒▒", Style::default().fg(Color::DarkGray))
                } else {
                    Span::raw("  ")
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match snapshot.phase {
            SessionPhase::Ready => " Rail Snake - press an arrow key to start ",
            _ => " Rail Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(format_time(snapshot.elapsed_secs), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
        ];

        if snapshot.power_up.active {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                format!("BOOST {}", snapshot.power_up.ticks_remaining),
                Style::default()
                    .fg(snake_color(snapshot))
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'static> {
        let reason = metrics
            .last_end_reason
            .map(end_reason_text)
            .unwrap_or("The run is over");

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("   Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format_time(snapshot.elapsed_secs),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: SessionPhase) -> Paragraph<'static> {
        let mut spans = vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
        ];
        if phase == SessionPhase::Ready {
            spans.push(Span::styled("Enter", Style::default().fg(Color::Green)));
            spans.push(Span::raw(" to start | "));
        }
        spans.push(Span::styled("R", Style::default().fg(Color::Green)));
        spans.push(Span::raw(" to restart | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Green normally; orange fading to red as the boost intensity grows
fn snake_color(snapshot: &Snapshot) -> Color {
    if !snapshot.power_up.active {
        return SNAKE_COLOR;
    }
    let green = 165.0 * (1.0 - snapshot.power_up_intensity.clamp(0.0, 1.0));
    Color::Rgb(255, green as u8, 0)
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::None => "■ ",
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

fn is_frame(rail_map: &RailMap, pos: Position) -> bool {
    pos.x == 0
        || pos.y == 0
        || pos.x == rail_map.width() as i32 - 1
        || pos.y == rail_map.height() as i32 - 1
}

fn end_reason_text(reason: EndReason) -> &'static str {
    match reason {
        EndReason::OutOfBounds => "Ran off the edge of the map",
        EndReason::MissingLink => "Derailed: no track that way",
        EndReason::SelfCollision => "Bit your own tail",
        EndReason::BoardFull => "No room left for food",
    }
}

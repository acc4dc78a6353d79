use std::collections::HashSet;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Position, Snapshot};
use crate::metrics::SessionMetrics;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &SessionMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if snapshot.is_over() {
            frame.render_widget(self.render_game_over(snapshot, metrics), game_area);
        } else {
            frame.render_widget(self.render_grid(snapshot), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let head = snapshot.head();
        let body: HashSet<Position> = snapshot.agent_body.iter().copied().collect();
        let hint: HashSet<Position> = if snapshot.hint_enabled {
            snapshot.hint_path.iter().copied().collect()
        } else {
            HashSet::new()
        };

        let mut lines = Vec::with_capacity(snapshot.grid_height);
        for y in 0..snapshot.grid_height {
            let spans: Vec<Span> = (0..snapshot.grid_width)
                .map(|x| {
                    let pos = Position::new(x as i32, y as i32);
                    if Some(pos) == head {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Blue)
                                .add_modifier(Modifier::BOLD),
                        )
                    } else if body.contains(&pos) {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    } else if pos == snapshot.target_position {
                        Span::styled(
                            "● ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else if hint.contains(&pos) {
                        Span::styled("· ", Style::default().fg(Color::Yellow))
                    } else {
                        Span::styled(". ", Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let (hint_text, hint_color) = match (snapshot.hint_enabled, snapshot.hint_path.is_empty()) {
            (false, _) => ("off", Color::DarkGray),
            (true, false) => ("on", Color::Green),
            (true, true) => ("no path", Color::Red),
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(snapshot.agent_body.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Hint: ", label),
            Span::styled(hint_text, Style::default().fg(hint_color)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot, metrics: &SessionMetrics) -> Paragraph<'static> {
        let (title, color) = if snapshot.grid_full {
            ("GRID FULL - YOU WIN", Color::Green)
        } else {
            ("GAME OVER", Color::Red)
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("H", Style::default().fg(Color::Yellow)),
            Span::raw(" path hint | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Simulation};
    use ratatui::{Terminal, backend::TestBackend};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn draw(snapshot: &Snapshot) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let renderer = Renderer::new();
        let metrics = SessionMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, snapshot, &metrics))
            .unwrap();

        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_grid_shows_snake_food_and_hint() {
        let mut sim = Simulation::with_rng(GameConfig::small(), StdRng::seed_from_u64(3)).unwrap();
        sim.place_food(Position::new(5, 1));
        let screen = draw(&sim.snapshot());

        assert!(screen.contains('■'));
        assert!(screen.contains('●'));
        assert!(screen.contains('·'));
        assert!(screen.contains("Hint: on"));
    }

    #[test]
    fn test_game_over_panel() {
        let mut sim = Simulation::with_rng(GameConfig::small(), StdRng::seed_from_u64(3)).unwrap();
        let mut snapshot = sim.snapshot();
        snapshot.agent_alive = false;
        assert!(draw(&snapshot).contains("GAME OVER"));

        sim.toggle_hint();
        sim.place_food(Position::new(0, 0));
        assert!(draw(&sim.snapshot()).contains("Hint: off"));
    }
}

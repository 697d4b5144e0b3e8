use std::collections::HashSet;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Position, SnakeWorld};

/// Draws a world into a terminal frame. Reads the world, never mutates it.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// `board_full` is set when no cell is left for food
    pub fn render<R>(&self, frame: &mut Frame, world: &SnakeWorld<R>, board_full: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Game area
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let board = if board_full {
            self.board_full_notice()
        } else {
            self.grid_paragraph(world)
        };
        frame.render_widget(board, chunks[0]);
        frame.render_widget(self.controls(), chunks[1]);
    }

    fn grid_paragraph<R>(&self, world: &SnakeWorld<R>) -> Paragraph<'static> {
        let grid = world.grid();
        let head = world.head();
        let food = world.food();
        let body: HashSet<Position> = world.visible_segments().collect();

        let head_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let body_style = Style::default().fg(Color::Green);
        let food_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let empty_style = Style::default().fg(Color::DarkGray);

        let lines: Vec<Line> = (0..grid.height() as i32)
            .map(|y| {
                let spans: Vec<Span> = (0..grid.width() as i32)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            Span::styled("■ ", head_style)
                        } else if body.contains(&pos) {
                            Span::styled("□ ", body_style)
                        } else if food == Some(pos) {
                            Span::styled("● ", food_style)
                        } else {
                            Span::styled(". ", empty_style)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

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

    fn board_full_notice(&self) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "BOARD FULL",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
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
                .border_style(Style::default().fg(Color::Yellow)),
        )
    }

    fn controls(&self) -> Paragraph<'static> {
        Paragraph::new(Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("HJKL", Style::default().fg(Color::Cyan)),
            Span::raw(" to steer | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center)
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
    use crate::game::{Direction, Snake, WorldConfig};
    use rand::{rngs::StdRng, SeedableRng};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text<R>(world: &SnakeWorld<R>, board_full: bool) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, world, board_full))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draws_head_body_and_food() {
        let world = SnakeWorld::from_parts(
            &WorldConfig::small(),
            Snake::with_segments(Position::new(5, 5), Direction::Right, [Position::new(4, 5)]),
            Some(Position::new(8, 2)),
            StdRng::seed_from_u64(0),
        )
        .unwrap();

        let text = screen_text(&world, false);

        assert_eq!(text.matches('■').count(), 1);
        assert_eq!(text.matches('□').count(), 1);
        assert_eq!(text.matches('●').count(), 1);
        assert!(text.contains("Snake"));
    }

    #[test]
    fn test_segment_under_head_is_hidden() {
        let world = SnakeWorld::from_parts(
            &WorldConfig::small(),
            Snake::with_segments(Position::new(5, 5), Direction::Right, [Position::new(5, 5)]),
            None,
            StdRng::seed_from_u64(0),
        )
        .unwrap();

        let text = screen_text(&world, false);

        assert_eq!(text.matches('■').count(), 1);
        assert_eq!(text.matches('□').count(), 0);
        assert_eq!(text.matches('●').count(), 0);
    }

    #[test]
    fn test_board_full_notice() {
        let world = SnakeWorld::seeded(&WorldConfig::new(1, 1), 0).unwrap();
        let text = screen_text(&world, true);
        assert!(text.contains("BOARD FULL"));
    }
}

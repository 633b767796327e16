use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{CubeGrid, GameOutcome, GameState};
use crate::metrics::GameMetrics;

/// What one cell of the drawn face shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellGlyph {
    Head,
    Body,
    Food,
    Empty,
}

/// The face under the head, row by row from the top as seen from outside
pub fn face_glyphs(grid: &CubeGrid, state: &GameState) -> Vec<Vec<CellGlyph>> {
    let normal = state.snake.head.normal;
    (0..grid.size())
        .map(|row| {
            (0..grid.size())
                .map(|col| {
                    let cell = grid.face_cell(normal, col, row);
                    if cell == state.snake.head.cell {
                        CellGlyph::Head
                    } else if state.snake.body.iter().any(|segment| segment.cell == cell) {
                        CellGlyph::Body
                    } else if state.food.is_some_and(|food| food.cell == cell) {
                        CellGlyph::Food
                    } else {
                        CellGlyph::Empty
                    }
                })
                .collect()
        })
        .collect()
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        grid: &CubeGrid,
        state: &GameState,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], grid, state, metrics);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match state.status.outcome() {
            None => {
                let face = self.render_face(game_area, grid, state);
                frame.render_widget(face, game_area);
            }
            Some(outcome) => {
                let panel = self.render_game_over(game_area, state, outcome);
                frame.render_widget(panel, game_area);
            }
        }

        let controls = self.render_controls(chunks[2], state);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_face(&self, _area: Rect, grid: &CubeGrid, state: &GameState) -> Paragraph<'_> {
        let lines: Vec<Line> = face_glyphs(grid, state)
            .into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|glyph| match glyph {
                            CellGlyph::Head => Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            ),
                            CellGlyph::Body => {
                                Span::styled("□ ", Style::default().fg(Color::Green))
                            }
                            CellGlyph::Food => Span::styled(
                                "O ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            ),
                            CellGlyph::Empty => {
                                Span::styled(". ", Style::default().fg(Color::DarkGray))
                            }
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let title = format!(" Face {} ", state.snake.head.normal.label());
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

    fn render_stats(
        &self,
        _area: Rect,
        grid: &CubeGrid,
        state: &GameState,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", state.snake.len(), grid.surface_count()),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Food: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state
                    .food
                    .and_then(|food| grid.surface_normal(food.cell))
                    .map_or("-", |normal| normal.label()),
                Style::default().fg(Color::Red),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        _area: Rect,
        state: &GameState,
        outcome: GameOutcome,
    ) -> Paragraph<'_> {
        let (banner, color) = match outcome {
            GameOutcome::Won => ("CUBE COVERED", Color::Green),
            GameOutcome::Lost => ("GAME OVER", Color::Red),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                banner,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.snake.len().to_string(),
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
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut spans = Vec::new();
        if !state.started {
            spans.push(Span::styled(
                "Press a direction to start | ",
                Style::default().fg(Color::Yellow),
            ));
        }
        spans.extend([
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to turn | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
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
    use crate::game::{
        BodySegment, Direction, FoodCell, GameConfig, GameEngine, GridCell, HeadState, Snake,
    };

    #[test]
    fn test_front_face_layout() {
        let engine = GameEngine::new(GameConfig::new(3)).unwrap();
        let head = HeadState::new(GridCell::new(1, 1, 2), Direction::PosZ, Direction::PosY);
        let snake = Snake::new(
            head,
            [BodySegment {
                cell: GridCell::new(1, 0, 2),
                normal: Direction::PosZ,
            }],
        );
        let state = engine.restore(snake, Some(GridCell::new(0, 2, 2))).unwrap();

        let glyphs = face_glyphs(engine.grid(), &state);
        assert_eq!(glyphs.len(), 3);
        // +Y is up on the front face, so the body sits on the bottom row
        assert_eq!(glyphs[1][1], CellGlyph::Head);
        assert_eq!(glyphs[2][1], CellGlyph::Body);
        assert_eq!(glyphs[0][0], CellGlyph::Food);
        assert_eq!(glyphs[0][2], CellGlyph::Empty);
    }

    #[test]
    fn test_view_follows_head_across_edge() {
        let engine = GameEngine::new(GameConfig::new(3)).unwrap();
        let head = HeadState::new(GridCell::new(1, 2, 1), Direction::PosY, Direction::NegZ);
        let snake = Snake::new(
            head,
            [BodySegment {
                cell: GridCell::new(1, 2, 2),
                normal: Direction::PosY,
            }],
        );
        let mut state = engine.restore(snake, None).unwrap();
        state.food = Some(FoodCell {
            cell: GridCell::new(1, 1, 2),
        });

        let glyphs = face_glyphs(engine.grid(), &state);
        // Top face: -Z is up, so the cell on the front edge is on the bottom row
        assert_eq!(glyphs[1][1], CellGlyph::Head);
        assert_eq!(glyphs[2][1], CellGlyph::Body);
        // Food on the front face is not drawn here
        assert!(glyphs.iter().flatten().all(|&glyph| glyph != CellGlyph::Food));
    }
}

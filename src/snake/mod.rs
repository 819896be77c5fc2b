//! Snake body model and the keyboard plugin that steers it.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::engine::GameEngine;
use crate::game::{Board, Collision, Direction, Position};

/// Plugin for snake-related systems.
pub struct SnakePlugin;

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, snake_movement_input);
    }
}

/// A body cell plus the head color it was laid down with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnakeSegment {
    pub position: Position,
    pub color: Color,
}

/// Ordered segments, head first.
#[derive(Debug, Clone)]
pub struct SnakeBody {
    segments: VecDeque<SnakeSegment>,
    head_color: Color,
    heading: Direction,
    pending_turn: Option<Direction>,
    cell_size: i32,
}

impl SnakeBody {
    pub fn new(start: Position, heading: Direction, head_color: Color, cell_size: i32) -> Self {
        let mut segments = VecDeque::new();
        segments.push_back(SnakeSegment {
            position: start,
            color: head_color,
        });
        SnakeBody {
            segments,
            head_color,
            heading,
            pending_turn: None,
            cell_size,
        }
    }

    /// Builds a snake from explicit cells, head first.
    pub fn from_cells(
        cells: &[Position],
        heading: Direction,
        head_color: Color,
        cell_size: i32,
    ) -> Option<Self> {
        let (&head, rest) = cells.split_first()?;
        let mut snake = SnakeBody::new(head, heading, head_color, cell_size);
        snake
            .segments
            .extend(rest.iter().map(|&position| SnakeSegment {
                position,
                color: head_color,
            }));
        Some(snake)
    }

    pub fn head(&self) -> Position {
        // The body is never empty: construction seeds a head and moves only swap cells.
        self.segments[0].position
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &SnakeSegment> {
        self.segments.iter()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.segments.iter().any(|s| s.position.collides_with(&pos))
    }

    pub fn head_color(&self) -> Color {
        self.head_color
    }

    /// Repaints the head, e.g. when the target category changes.
    pub fn recolor_head(&mut self, color: Color) {
        self.head_color = color;
        if let Some(head) = self.segments.front_mut() {
            head.color = color;
        }
    }

    /// Direction of the last committed move.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Direction the next move will take.
    pub fn next_direction(&self) -> Direction {
        self.pending_turn.unwrap_or(self.heading)
    }

    /// Queues a quarter turn relative to the current heading.
    ///
    /// Reversals and same-direction requests are ignored. A later accepted
    /// request replaces an earlier one within the same tick.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if !self.heading.is_perpendicular_to(direction) {
            return false;
        }
        self.pending_turn = Some(direction);
        true
    }

    pub fn next_head(&self) -> Position {
        self.head().step(self.next_direction(), self.cell_size)
    }

    /// Checks `next` against the board and the body without moving.
    ///
    /// The tail only blocks when the snake grows, otherwise it is vacated this move.
    pub fn check_move(&self, next: Position, grows: bool, board: &Board) -> Result<(), Collision> {
        if !board.contains(next) {
            return Err(Collision::OutOfBounds);
        }
        let blocking = if grows {
            self.segments.len()
        } else {
            self.segments.len() - 1
        };
        if self
            .segments
            .iter()
            .take(blocking)
            .any(|s| s.position.collides_with(&next))
        {
            return Err(Collision::SelfCollision);
        }
        Ok(())
    }

    /// Moves one cell, consuming any pending turn. Returns the new head.
    pub fn advance(&mut self, grows: bool, board: &Board) -> Result<Position, Collision> {
        let direction = self.next_direction();
        let next = self.head().step(direction, self.cell_size);
        self.check_move(next, grows, board)?;

        self.heading = direction;
        self.pending_turn = None;
        self.segments.push_front(SnakeSegment {
            position: next,
            color: self.head_color,
        });
        if !grows {
            self.segments.pop_back();
        }
        Ok(next)
    }
}

/// System to read arrow keys / WASD and forward them to the engine.
fn snake_movement_input(keyboard_input: Res<ButtonInput<KeyCode>>, mut engine: ResMut<GameEngine>) {
    let direction = if keyboard_input.just_pressed(KeyCode::ArrowLeft)
        || keyboard_input.just_pressed(KeyCode::KeyA)
    {
        Some(Direction::Left)
    } else if keyboard_input.just_pressed(KeyCode::ArrowRight)
        || keyboard_input.just_pressed(KeyCode::KeyD)
    {
        Some(Direction::Right)
    } else if keyboard_input.just_pressed(KeyCode::ArrowUp)
        || keyboard_input.just_pressed(KeyCode::KeyW)
    {
        Some(Direction::Up)
    } else if keyboard_input.just_pressed(KeyCode::ArrowDown)
        || keyboard_input.just_pressed(KeyCode::KeyS)
    {
        Some(Direction::Down)
    } else {
        None
    };

    if let Some(direction) = direction {
        engine.process_direction_input(direction);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::EngineConfig;

    fn board() -> Board {
        EngineConfig::default().board().unwrap()
    }

    fn snake(cells: &[(i32, i32)], heading: Direction) -> SnakeBody {
        let cells: Vec<Position> = cells.iter().map(|&(x, y)| Position::new(x, y)).collect();
        SnakeBody::from_cells(&cells, heading, Color::WHITE, 30).unwrap()
    }

    #[test]
    fn moves_without_growing() {
        let mut s = snake(&[(150, 150), (120, 150)], Direction::Right);
        let head = s.advance(false, &board()).unwrap();
        assert_eq!(head, Position::new(180, 150));
        assert_eq!(s.len(), 2);
        assert!(!s.occupies(Position::new(120, 150)));
    }

    #[test]
    fn growing_keeps_the_tail() {
        let mut s = snake(&[(150, 150)], Direction::Right);
        s.advance(true, &board()).unwrap();
        assert_eq!(s.len(), 2);
        assert!(s.occupies(Position::new(150, 150)));
    }

    #[test]
    fn wall_is_out_of_bounds() {
        let mut s = snake(&[(540, 150)], Direction::Right);
        assert_eq!(s.advance(false, &board()), Err(Collision::OutOfBounds));
        assert_eq!(s.head(), Position::new(540, 150));

        let mut s = snake(&[(0, 0)], Direction::Left);
        assert_eq!(s.advance(false, &board()), Err(Collision::OutOfBounds));
    }

    #[test]
    fn chasing_the_vacating_tail_is_allowed() {
        // Square loop: head at (30,0) moving down onto the tail at (30,30).
        let mut s = snake(&[(30, 0), (0, 0), (0, 30), (30, 30)], Direction::Right);
        assert!(s.request_turn(Direction::Down));
        assert!(s.advance(false, &board()).is_ok());
    }

    #[test]
    fn tail_blocks_when_growing() {
        let s = snake(&[(30, 0), (0, 0), (0, 30), (30, 30)], Direction::Down);
        assert_eq!(
            s.check_move(Position::new(30, 30), true, &board()),
            Err(Collision::SelfCollision)
        );
    }

    #[test]
    fn body_collision() {
        let mut s = snake(
            &[(60, 60), (60, 90), (30, 90), (30, 60), (30, 30)],
            Direction::Up,
        );
        assert!(s.request_turn(Direction::Left));
        assert_eq!(s.advance(false, &board()), Err(Collision::SelfCollision));
    }

    #[test]
    fn reversal_is_rejected() {
        let mut s = snake(&[(150, 150)], Direction::Right);
        assert!(!s.request_turn(Direction::Left));
        assert!(!s.request_turn(Direction::Right));
        assert_eq!(s.next_direction(), Direction::Right);
    }

    #[test]
    fn last_accepted_turn_wins_but_never_reverses() {
        let mut s = snake(&[(150, 150)], Direction::Right);
        assert!(s.request_turn(Direction::Up));
        assert!(s.request_turn(Direction::Down));
        // Left is judged against the committed heading, not the pending turn.
        assert!(!s.request_turn(Direction::Left));
        assert_eq!(s.next_direction(), Direction::Down);

        s.advance(false, &board()).unwrap();
        assert_eq!(s.heading(), Direction::Down);
        assert_eq!(s.head(), Position::new(150, 180));
    }

    #[test]
    fn recolor_updates_head_segment() {
        let mut s = snake(&[(150, 150), (120, 150)], Direction::Right);
        s.recolor_head(Color::BLACK);
        assert_eq!(s.head_color(), Color::BLACK);
        assert_eq!(s.segments().next().unwrap().color, Color::BLACK);
        s.advance(false, &board()).unwrap();
        assert_eq!(s.segments().next().unwrap().color, Color::BLACK);
    }
}

//! Shared game value types and ECS marker components.

use bevy::prelude::*;
use std::fmt;
use std::str::FromStr;

/// A cell on the board in canvas pixels (top-left origin, y grows downward).
///
/// Coordinates are always integer multiples of the cell size.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Check if this position collides with another position.
    pub fn collides_with(&self, other: &Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Returns the position shifted by one step in `direction`.
    pub fn step(&self, direction: Direction, cell_size: i32) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx * cell_size,
            y: self.y + dy * cell_size,
        }
    }

    /// Squared euclidean distance in pixels.
    pub fn distance_squared(&self, other: &Position) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }
}

/// Direction enum for snake movement.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step in cells, screen orientation.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when turning from `self` to `other` is a quarter turn.
    pub fn is_perpendicular_to(&self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

/// Error returned when a directional token is not one of the four arrow keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction key `{0}`")]
pub struct UnknownDirectionKey(pub String);

impl FromStr for Direction {
    type Err = UnknownDirectionKey;

    /// Parses the arrow-key tokens the shell forwards.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArrowUp" => Ok(Direction::Up),
            "ArrowDown" => Ok(Direction::Down),
            "ArrowLeft" => Ok(Direction::Left),
            "ArrowRight" => Ok(Direction::Right),
            other => Err(UnknownDirectionKey(other.to_string())),
        }
    }
}

/// Recyclable-material class of a food item and of the snake's target.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FoodCategory {
    Papel,
    Plastico,
    Vidro,
    Metal,
    Organico,
}

impl FoodCategory {
    pub const COUNT: usize = 5;

    /// Process-wide category table, in display order.
    pub const ALL: [FoodCategory; Self::COUNT] = [
        FoodCategory::Papel,
        FoodCategory::Plastico,
        FoodCategory::Vidro,
        FoodCategory::Metal,
        FoodCategory::Organico,
    ];

    pub fn index(&self) -> usize {
        match self {
            FoodCategory::Papel => 0,
            FoodCategory::Plastico => 1,
            FoodCategory::Vidro => 2,
            FoodCategory::Metal => 3,
            FoodCategory::Organico => 4,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            FoodCategory::Papel => "papel",
            FoodCategory::Plastico => "plastico",
            FoodCategory::Vidro => "vidro",
            FoodCategory::Metal => "metal",
            FoodCategory::Organico => "organico",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FoodCategory::Papel => "Papel (Azul)",
            FoodCategory::Plastico => "Plástico (Vermelho)",
            FoodCategory::Vidro => "Vidro (Verde)",
            FoodCategory::Metal => "Metal (Amarelo)",
            FoodCategory::Organico => "Orgânico (Marrom)",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            FoodCategory::Papel => Color::srgb_u8(0x00, 0x6a, 0xa4),
            FoodCategory::Plastico => Color::srgb_u8(0xcb, 0x27, 0x16),
            FoodCategory::Vidro => Color::srgb_u8(0x29, 0x5a, 0x0f),
            FoodCategory::Metal => Color::srgb_u8(0xd2, 0xac, 0x0f),
            FoodCategory::Organico => Color::srgb_u8(0x8b, 0x61, 0x39),
        }
    }

    /// Sprite path relative to the asset root. Organic waste is drawn as an apple.
    pub fn sprite_path(&self) -> &'static str {
        match self {
            FoodCategory::Papel => "imgs/papel.png",
            FoodCategory::Plastico => "imgs/plastico.png",
            FoodCategory::Vidro => "imgs/vidro.png",
            FoodCategory::Metal => "imgs/metal.png",
            FoodCategory::Organico => "imgs/maca.png",
        }
    }
}

impl fmt::Display for FoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Component to mark the score display UI element.
#[derive(Component)]
pub struct ScoreText;

/// Component to mark the level display UI element.
#[derive(Component)]
pub struct LevelText;

/// Component to mark the game over overlay UI.
#[derive(Component)]
pub struct GameOverUI;

/// Component to mark the level complete overlay UI.
#[derive(Component)]
pub struct LevelCompleteUI;

/// Component to mark the start menu UI.
#[derive(Component)]
pub struct MenuUI;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_tokens_parse() {
        assert_eq!("ArrowUp".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("ArrowLeft".parse::<Direction>(), Ok(Direction::Left));
        assert!("w".parse::<Direction>().is_err());
    }

    #[test]
    fn steps_follow_screen_orientation() {
        let p = Position::new(150, 150);
        assert_eq!(p.step(Direction::Up, 30), Position::new(150, 120));
        assert_eq!(p.step(Direction::Right, 30), Position::new(180, 150));
    }

    #[test]
    fn perpendicular_turns() {
        assert!(Direction::Right.is_perpendicular_to(Direction::Up));
        assert!(!Direction::Right.is_perpendicular_to(Direction::Left));
        assert!(!Direction::Down.is_perpendicular_to(Direction::Down));
    }

    #[test]
    fn category_table_is_indexed_in_order() {
        for (i, category) in FoodCategory::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }
}

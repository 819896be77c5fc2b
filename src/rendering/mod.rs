//! Rendering plugin - the raster surface boundary, frame composition, and the painter that
//! replays frames with `bevy_vector_shapes`.

use std::time::Duration;

use bevy::prelude::*;
use bevy_vector_shapes::prelude::*;

use crate::food::{AssetGate, FoodItem, FoodSet, FoodSprites};
use crate::game::{Board, FoodCategory, Z_FOOD, Z_SNAKE};
use crate::snake::SnakeBody;

/// Plugin for painting the latest engine frame every display frame.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            paint_display_list.after(crate::engine::drive_engine),
        );
    }
}

/// 2-D raster surface in canvas pixels (top-left origin, y down).
pub trait RenderSurface {
    fn clear(&mut self);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_arc(&mut self, center: Vec2, radius: f32, color: Color);
    fn draw_image(&mut self, sprite: FoodCategory, rect: Rect, alpha: f32);

    /// Flat-color stand-in for a food sprite. Layered surfaces keep it under the snake.
    fn draw_food_rect(&mut self, rect: Rect, color: Color) {
        self.draw_rect(rect, color);
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect { rect: Rect, color: Color },
    Arc { center: Vec2, radius: f32, color: Color },
    Image { sprite: FoodCategory, rect: Rect, alpha: f32 },
    FoodRect { rect: Rect, color: Color },
}

impl DrawCommand {
    /// Depth the painter uses: food sits under the snake.
    fn z(&self) -> f32 {
        match self {
            DrawCommand::Rect { .. } | DrawCommand::Arc { .. } => Z_SNAKE,
            DrawCommand::Image { .. } | DrawCommand::FoodRect { .. } => Z_FOOD,
        }
    }
}

/// Retained frame: the engine draws into it on running ticks and the painter replays it
/// every display frame, so frozen screens keep showing the last board.
#[derive(Resource, Debug, Clone, Default)]
pub struct DisplayList {
    size: Vec2,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn for_board(board: &Board) -> Self {
        DisplayList {
            size: Vec2::new(board.width as f32, board.height as f32),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Canvas point to world point, centered on the camera.
    fn to_world(&self, point: Vec2, z: f32) -> Vec3 {
        Vec3::new(point.x - self.size.x / 2.0, self.size.y / 2.0 - point.y, z)
    }
}

impl RenderSurface for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_arc(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Arc {
            center,
            radius,
            color,
        });
    }

    fn draw_image(&mut self, sprite: FoodCategory, rect: Rect, alpha: f32) {
        self.commands.push(DrawCommand::Image {
            sprite,
            rect,
            alpha,
        });
    }

    fn draw_food_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FoodRect { rect, color });
    }
}

/// Board geometry and timing needed to compose a frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameStyle {
    pub cell_size: f32,
    pub food_scale: f32,
    pub appear_duration: Duration,
}

/// Clears the surface and draws snake then food.
pub fn draw_frame(
    surface: &mut dyn RenderSurface,
    style: &FrameStyle,
    snake: &SnakeBody,
    food: &FoodSet,
    assets: &AssetGate,
    now: Duration,
) {
    surface.clear();
    draw_snake(surface, style, snake);
    for item in food.revealed() {
        draw_food_item(surface, style, item, assets, now);
    }
}

/// Joins consecutive segment centers with cell-wide bars, then caps every segment with a disc.
/// The whole body takes the head color.
fn draw_snake(surface: &mut dyn RenderSurface, style: &FrameStyle, snake: &SnakeBody) {
    let color = snake.head_color();
    let cell = style.cell_size;
    let half = cell / 2.0;
    let cells: Vec<Vec2> = snake
        .segments()
        .map(|s| Vec2::new(s.position.x as f32, s.position.y as f32))
        .collect();

    for pair in cells.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a.x == b.x {
            let top = a.y.min(b.y) + half;
            let bottom = a.y.max(b.y) + half;
            surface.draw_rect(Rect::new(a.x, top, a.x + cell, bottom), color);
        } else if a.y == b.y {
            let left = a.x.min(b.x) + half;
            let right = a.x.max(b.x) + half;
            surface.draw_rect(Rect::new(left, a.y, right, a.y + cell), color);
        }
    }
    for corner in &cells {
        surface.draw_arc(*corner + Vec2::splat(half), half, color);
    }
}

/// Scales and fades the item in while its appear animation runs.
fn draw_food_item(
    surface: &mut dyn RenderSurface,
    style: &FrameStyle,
    item: &FoodItem,
    assets: &AssetGate,
    now: Duration,
) {
    let progress = item.appear_progress(now, style.appear_duration);
    let size = style.cell_size * style.food_scale * progress;
    let offset = (size - style.cell_size) / 2.0;
    let x = item.position.x as f32 - offset;
    let y = item.position.y as f32 - offset;
    let rect = Rect::new(x, y, x + size, y + size);

    if assets.has_sprite(item.category) {
        surface.draw_image(item.category, rect, progress);
    } else {
        surface.draw_food_rect(rect, item.category.color().with_alpha(progress));
    }
}

/// System to replay the display list with the immediate-mode shape painter.
fn paint_display_list(
    mut painter: ShapePainter,
    list: Res<DisplayList>,
    sprites: Res<FoodSprites>,
) {
    for command in list.commands() {
        painter.reset();
        let z = command.z();
        match command {
            DrawCommand::Rect { rect, color } | DrawCommand::FoodRect { rect, color } => {
                painter.set_translation(list.to_world(rect.center(), z));
                painter.color = *color;
                painter.rect(rect.size());
            }
            DrawCommand::Arc {
                center,
                radius,
                color,
            } => {
                painter.set_translation(list.to_world(*center, z));
                painter.color = *color;
                painter.circle(*radius);
            }
            DrawCommand::Image {
                sprite,
                rect,
                alpha,
            } => {
                painter.set_translation(list.to_world(rect.center(), z));
                if let Some(handle) = sprites.handle(*sprite) {
                    painter.color = Color::WHITE.with_alpha(*alpha);
                    painter.image(handle.clone(), rect.size());
                } else {
                    painter.color = sprite.color().with_alpha(*alpha);
                    painter.rect(rect.size());
                }
            }
        }
    }
}

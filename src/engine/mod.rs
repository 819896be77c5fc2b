//! Engine plugin - the game engine resource and the system that drives it from `Time`.

mod scheduler;

use std::time::Duration;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub use scheduler::{Scheduler, SpeedRamp};

use crate::audio::{AudioCues, EAT_CUE, GAME_OVER_CUE, LEVEL_UP_CUE};
use crate::food::{AssetGate, FoodSet, Occupancy, SpawnPlanner};
use crate::game::{
    Board, ConfigError, Direction, EngineConfig, FoodCategory, GameEvent, GameOverCause, GamePhase,
};
use crate::level::{LevelProgress, PickupOutcome, compose_layout};
use crate::rendering::{DisplayList, FrameStyle, RenderSurface, draw_frame};
use crate::snake::SnakeBody;

/// Plugin that advances the engine every frame and forwards its events as messages.
pub struct EnginePlugin;

impl Plugin for EnginePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameEvent>()
            .add_systems(Update, drive_engine)
            .add_systems(Last, release_on_exit);
    }
}

/// System to run the engine for this frame and publish what happened.
pub(crate) fn drive_engine(
    time: Res<Time>,
    mut engine: ResMut<GameEngine>,
    mut display: ResMut<DisplayList>,
    mut events: MessageWriter<GameEvent>,
) {
    engine.update(time.delta(), time.elapsed(), &mut *display);
    events.write_batch(engine.drain_events());
}

/// System to silence and release the engine when the app is closing.
fn release_on_exit(mut exits: MessageReader<AppExit>, mut engine: ResMut<GameEngine>) {
    if exits.read().next().is_some() {
        engine.destroy();
    }
}

/// Everything that lives for one run, from `start`/`restart` until `destroy`.
#[derive(Debug, Clone)]
struct GameState {
    snake: SnakeBody,
    food: FoodSet,
    progress: LevelProgress,
    target: FoodCategory,
    tick_interval: Duration,
}

impl GameState {
    fn retarget(&mut self, target: FoodCategory) {
        self.target = target;
        self.snake.recolor_head(target.color());
    }
}

/// The simulation: one instance per game, owned by the app as a resource.
///
/// All control operations are cheap and never panic. Time only moves through
/// [`GameEngine::update`], so tests drive it frame by frame.
#[derive(Resource)]
pub struct GameEngine<R = StdRng> {
    config: EngineConfig,
    board: Board,
    planner: SpawnPlanner,
    style: FrameStyle,
    ramp: SpeedRamp,
    rng: R,
    audio: Box<dyn AudioCues>,
    assets: AssetGate,
    scheduler: Scheduler,
    session: Option<GameState>,
    events: Vec<GameEvent>,
    start_requested: bool,
    released: bool,
}

impl GameEngine<StdRng> {
    pub fn new(config: EngineConfig, audio: Box<dyn AudioCues>) -> Result<Self, ConfigError> {
        Self::with_rng(config, audio, StdRng::from_os_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(
        config: EngineConfig,
        audio: Box<dyn AudioCues>,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let board = config.board()?;
        let planner = SpawnPlanner::new(board, &config);
        let style = FrameStyle {
            cell_size: config.cell_size as f32,
            food_scale: config.food_scale,
            appear_duration: config.appear_duration,
        };
        let ramp = SpeedRamp {
            initial: config.initial_tick_interval,
            floor: config.tick_interval_floor,
            step: config.tick_interval_step,
        };
        Ok(GameEngine {
            config,
            board,
            planner,
            style,
            ramp,
            rng,
            audio,
            assets: AssetGate::default(),
            scheduler: Scheduler::default(),
            session: None,
            events: Vec::new(),
            start_requested: false,
            released: false,
        })
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn assets(&self) -> &AssetGate {
        &self.assets
    }

    /// Reports one sprite as loaded or failed.
    pub fn asset_settled(&mut self, category: FoodCategory, loaded: bool) {
        if self.assets.settle(category, loaded) && self.assets.is_ready() {
            info!("all {} food sprites settled", FoodCategory::COUNT);
        }
    }

    /// Requests the first run. It begins as soon as every sprite has settled.
    pub fn start(&mut self, now: Duration) {
        if self.session.is_some() {
            debug!("start ignored, a run is already in progress");
            return;
        }
        self.start_requested = true;
        self.try_begin(now);
    }

    /// Throws the current run away and begins a fresh one.
    pub fn restart(&mut self, now: Duration) {
        if self.session.is_none() {
            debug!("restart ignored, no run to restart");
            return;
        }
        self.scheduler.cancel();
        self.audio.stop_loop();
        self.begin_session(now);
    }

    /// Leaves the level-complete screen with a fresh layout for the new level.
    pub fn continue_next_level(&mut self, now: Duration) {
        let Some(mut state) = self.session.take() else {
            return;
        };
        if state.progress.continue_level() {
            info!("entering level {}", state.progress.level());
            match self.relayout(&mut state, now) {
                Ok(()) => {
                    self.audio.start_loop();
                    self.scheduler.arm(Duration::ZERO);
                }
                Err(cause) => self.end_run(&mut state, cause),
            }
        } else {
            debug!("continue ignored in phase {:?}", state.progress.phase());
        }
        self.session = Some(state);
    }

    /// Queues a turn for the next move. Returns false when it was rejected.
    pub fn process_direction_input(&mut self, direction: Direction) -> bool {
        match self.session.as_mut() {
            Some(state) if state.progress.is_running() => state.snake.request_turn(direction),
            _ => false,
        }
    }

    /// Same as [`process_direction_input`](Self::process_direction_input) for
    /// `ArrowUp`/`ArrowDown`/`ArrowLeft`/`ArrowRight` key names.
    pub fn process_key(&mut self, key: &str) -> bool {
        match key.parse::<Direction>() {
            Ok(direction) => self.process_direction_input(direction),
            Err(err) => {
                debug!("{}", err);
                false
            }
        }
    }

    /// Cancels the pending tick, silences audio and drops the run. Safe to call twice.
    pub fn destroy(&mut self) {
        if self.released {
            return;
        }
        self.scheduler.cancel();
        self.audio.stop_loop();
        self.audio.release();
        self.session = None;
        self.start_requested = false;
        self.released = true;
        info!("engine destroyed");
    }

    /// Advances the engine by one display frame.
    ///
    /// `now` is the monotonic clock used for reveal and animation timestamps.
    pub fn update(&mut self, delta: Duration, now: Duration, surface: &mut dyn RenderSurface) {
        self.try_begin(now);
        if let Some(state) = self.session.as_mut() {
            state.food.reveal_due(now);
            state.food.settle_animations(now, self.config.appear_duration);
        }
        if self.scheduler.poll(delta) {
            self.tick(now, surface);
            if let Some(state) = &self.session {
                self.scheduler.arm(state.tick_interval);
            }
        }
    }

    /// Events raised since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.session.as_ref().map(|s| s.progress.phase())
    }

    pub fn score(&self) -> u32 {
        self.session.as_ref().map_or(0, |s| s.progress.score())
    }

    pub fn level(&self) -> u32 {
        self.session.as_ref().map_or(1, |s| s.progress.level())
    }

    pub fn points_this_level(&self) -> u32 {
        self.session
            .as_ref()
            .map_or(0, |s| s.progress.points_this_level())
    }

    pub fn tick_interval(&self) -> Duration {
        self.session
            .as_ref()
            .map_or(self.config.initial_tick_interval, |s| s.tick_interval)
    }

    pub fn target(&self) -> Option<FoodCategory> {
        self.session.as_ref().map(|s| s.target)
    }

    pub fn game_over_cause(&self) -> Option<GameOverCause> {
        self.session
            .as_ref()
            .and_then(|s| s.progress.game_over_cause().copied())
    }

    pub fn food(&self) -> Option<&FoodSet> {
        self.session.as_ref().map(|s| &s.food)
    }

    pub fn snake(&self) -> Option<&SnakeBody> {
        self.session.as_ref().map(|s| &s.snake)
    }

    fn try_begin(&mut self, now: Duration) {
        if !self.start_requested || self.session.is_some() || !self.assets.is_ready() {
            return;
        }
        self.start_requested = false;
        self.begin_session(now);
    }

    fn begin_session(&mut self, now: Duration) {
        let target = self.random_category();
        let mut state = GameState {
            snake: SnakeBody::new(
                self.config.start_position,
                Direction::Right,
                target.color(),
                self.config.cell_size,
            ),
            food: FoodSet::default(),
            progress: LevelProgress::new(self.config.points_per_level),
            target,
            tick_interval: self.ramp.initial,
        };
        info!("run started, first target {}", target);
        self.released = false;
        self.events.push(GameEvent::ScoreChanged(0));
        self.events.push(GameEvent::LevelChanged(1));
        self.audio.start_loop();

        if let Err(cause) = self.relayout(&mut state, now) {
            self.end_run(&mut state, cause);
        }
        self.scheduler.arm(Duration::ZERO);
        self.session = Some(state);
    }

    fn random_category(&mut self) -> FoodCategory {
        FoodCategory::ALL[self.rng.random_range(0..FoodCategory::COUNT)]
    }

    /// Replaces all food with a layout for the current level around the current target.
    ///
    /// Items that were on screen keep the new batch at a distance. Only the cleared-board
    /// fallback ignores them.
    fn relayout(&mut self, state: &mut GameState, now: Duration) -> Result<(), GameOverCause> {
        let slots = self.config.food_slots(state.progress.level());
        let occupancy = Occupancy {
            snake: state.snake.segments().map(|s| s.position).collect(),
            revealed: state.food.revealed().map(|item| item.position).collect(),
        };
        state.food.clear();
        let layout = compose_layout(&self.planner, &mut self.rng, slots, state.target, &occupancy)?;
        if layout.target != state.target {
            state.retarget(layout.target);
        }
        state
            .food
            .replace(layout.items, now, self.config.reveal_interval);
        Ok(())
    }

    /// One simulation step. Frozen phases skip both the move and the redraw.
    fn tick(&mut self, now: Duration, surface: &mut dyn RenderSurface) {
        let Some(mut state) = self.session.take() else {
            return;
        };
        if state.progress.is_running() {
            self.step(&mut state, now);
            draw_frame(
                surface,
                &self.style,
                &state.snake,
                &state.food,
                &self.assets,
                now,
            );
        }
        self.session = Some(state);
    }

    fn step(&mut self, state: &mut GameState, now: Duration) {
        let next = state.snake.next_head();
        let eaten = state
            .food
            .revealed_at(next)
            .and_then(|index| state.food.items().get(index).map(|item| (index, item.category)));
        let grows = eaten.is_some();

        if let Err(collision) = state.snake.check_move(next, grows, &self.board) {
            self.end_run(state, collision.into());
            return;
        }
        if let Some((_, category)) = eaten {
            if category != state.target {
                let cause = GameOverCause::WrongCategoryEaten {
                    eaten: category,
                    target: state.target,
                };
                self.end_run(state, cause);
                return;
            }
        }
        if let Err(collision) = state.snake.advance(grows, &self.board) {
            self.end_run(state, collision.into());
            return;
        }
        if let Some((index, category)) = eaten {
            state.food.take(index);
            self.pickup(state, category, now);
        }
    }

    fn pickup(&mut self, state: &mut GameState, category: FoodCategory, now: Duration) {
        let Some(outcome) = state.progress.record_pickup(category) else {
            return;
        };
        self.events
            .push(GameEvent::ScoreChanged(state.progress.score()));
        self.audio.play_tone(EAT_CUE);
        let target = self.random_category();
        state.retarget(target);
        debug!("ate {}, next target {}", category, target);

        match outcome {
            PickupOutcome::LevelComplete { level } => {
                self.events.push(GameEvent::LevelChanged(level));
                self.audio.stop_loop();
                self.audio.play_tone(LEVEL_UP_CUE);
                self.events.push(GameEvent::LevelComplete {
                    stats: state.progress.stats(),
                });
            }
            PickupOutcome::Continue => {
                state.tick_interval = self.ramp.next(state.tick_interval);
                if let Err(cause) = self.relayout(state, now) {
                    self.end_run(state, cause);
                }
            }
        }
    }

    fn end_run(&mut self, state: &mut GameState, cause: GameOverCause) {
        if !state.progress.fail(cause) {
            return;
        }
        self.audio.stop_loop();
        self.audio.play_tone(GAME_OVER_CUE);
        self.events.push(GameEvent::GameOver {
            final_score: state.progress.score(),
            stats: state.progress.stats(),
        });
    }
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::{Direction, Intent},
    config::GameConfig,
    error::{ConfigError, PlacementError},
    food::Food,
    state::{GridSize, MoveOutcome, Position, Snake},
};
use crate::pathfinding;

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInfo {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the snake died this tick
    pub died: bool,
    /// Whether food placement ran out of free cells this tick
    pub grid_full: bool,
    /// Whether a reset was applied
    pub reset: bool,
    /// Whether a quit intent was seen; the driver decides what to do with it
    pub quit_requested: bool,
    /// Whether the hint search found a route, `None` when hints are off
    pub hint_found: Option<bool>,
}

/// Result of a simulation tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the game has reached a terminal condition
    pub terminated: bool,
    pub info: TickInfo,
}

/// Read-only view handed to the presentation layer once per tick
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub agent_body: Vec<Position>,
    pub agent_alive: bool,
    pub score: u32,
    pub target_position: Position,
    pub hint_path: Vec<Position>,
    pub hint_enabled: bool,
    pub grid_width: usize,
    pub grid_height: usize,
    pub steps: u32,
    pub grid_full: bool,
}

impl Snapshot {
    pub fn head(&self) -> Option<Position> {
        self.agent_body.first().copied()
    }

    pub fn is_over(&self) -> bool {
        !self.agent_alive || self.grid_full
    }
}

/// Fixed-tick orchestrator over the snake, the food and the hint search
pub struct Simulation<R: Rng = StdRng> {
    config: GameConfig,
    snake: Snake,
    food: Food,
    hint_enabled: bool,
    grid_full: bool,
    steps: u32,
    rng: R,
}

impl Simulation<StdRng> {
    /// Create a simulation seeded from the config, or from entropy
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = config.grid();
        let snake = Snake::spawn(grid, config.initial_snake_length);
        let food = Food::new(Position::new(0, 0), grid, config.placement_attempts);

        let mut simulation = Self {
            hint_enabled: config.hint_enabled,
            config,
            snake,
            food,
            grid_full: false,
            steps: 0,
            rng,
        };
        simulation.respawn_food();
        simulation.refresh_hint();
        Ok(simulation)
    }

    /// Execute one tick with the intents queued since the previous tick
    pub fn tick<I>(&mut self, intents: I) -> TickResult
    where
        I: IntoIterator<Item = Intent>,
    {
        let mut info = TickInfo::default();
        let mut turn: Option<Direction> = None;
        let mut toggles = 0usize;

        for intent in intents {
            match intent {
                Intent::Turn(direction) => turn = Some(direction),
                Intent::ToggleHint => toggles += 1,
                Intent::Reset => info.reset = true,
                Intent::Quit => info.quit_requested = true,
            }
        }

        if let Some(direction) = turn {
            if !self.snake.turn(direction) {
                debug!(?direction, "ignored reversing turn");
            }
        }

        if toggles % 2 == 1 {
            self.toggle_hint();
        }
        if info.reset {
            self.reset();
        }

        if self.snake.is_alive && !self.grid_full {
            self.advance(&mut info);
        }

        info.hint_found = self.refresh_hint();

        TickResult {
            terminated: !self.snake.is_alive || self.grid_full,
            info,
        }
    }

    fn advance(&mut self, info: &mut TickInfo) {
        match self.snake.advance() {
            MoveOutcome::Collided => {
                info.died = true;
                info!(score = self.snake.score, steps = self.steps, "snake died");
                return;
            }
            MoveOutcome::Inactive => return,
            MoveOutcome::Moved | MoveOutcome::Grew => self.steps += 1,
        }

        if self.snake.head() == self.food.position {
            info.ate_food = true;
            self.snake.consume(self.config.food_reward);
            debug!(score = self.snake.score, length = self.snake.len(), "food eaten");
            if !self.respawn_food() {
                info.grid_full = true;
            }
        }
    }

    /// Restart with a fresh snake and a new food position
    pub fn reset(&mut self) {
        self.snake.reset();
        self.grid_full = false;
        self.steps = 0;
        self.respawn_food();
        info!("game reset");
    }

    pub fn toggle_hint(&mut self) {
        self.hint_enabled = !self.hint_enabled;
        info!(enabled = self.hint_enabled, "hint toggled");
    }

    /// Pin the food to a cell, e.g. for scripted scenarios
    pub fn place_food(&mut self, position: Position) {
        self.food.position = self.config.grid().wrap(position);
        self.refresh_hint();
    }

    /// Returns false when the grid has no free cell left.
    fn respawn_food(&mut self) -> bool {
        let obstacles = self.snake.occupied_cells();
        match self.food.randomize(&obstacles, &mut self.rng) {
            Ok(_) => true,
            Err(PlacementError::GridFull) => {
                warn!(length = self.snake.len(), "grid full, no cell left for food");
                self.grid_full = true;
                false
            }
        }
    }

    /// Recompute the hint for the current head. Returns whether a route was
    /// found, or `None` when hints are disabled.
    fn refresh_hint(&mut self) -> Option<bool> {
        if !self.hint_enabled {
            self.snake.hint_path.clear();
            return None;
        }

        let obstacles = self.snake.occupied_cells();
        self.snake.hint_path = pathfinding::search(
            self.snake.head(),
            self.food.position,
            &obstacles,
            self.config.grid(),
        );
        Some(!self.snake.hint_path.is_empty())
    }

    pub fn snapshot(&self) -> Snapshot {
        let grid = self.grid();
        Snapshot {
            agent_body: self.snake.body.clone(),
            agent_alive: self.snake.is_alive,
            score: self.snake.score,
            target_position: self.food.position,
            hint_path: self.snake.hint_path.clone(),
            hint_enabled: self.hint_enabled,
            grid_width: grid.width,
            grid_height: grid.height,
            steps: self.steps,
            grid_full: self.grid_full,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> GridSize {
        self.config.grid()
    }

    pub fn hint_enabled(&self) -> bool {
        self.hint_enabled
    }

    pub fn is_grid_full(&self) -> bool {
        self.grid_full
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_INPUT: [Intent; 0] = [];

    fn seeded(config: GameConfig) -> Simulation<StdRng> {
        Simulation::with_rng(config, StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_unvalidated_config_is_rejected() {
        let zero = Simulation::with_rng(GameConfig::new(0, 0), StdRng::seed_from_u64(1));
        assert!(matches!(zero, Err(ConfigError::GridTooSmall { .. })));

        let mut crowded = GameConfig::new(3, 3);
        crowded.initial_snake_length = 3;
        assert!(matches!(
            Simulation::new(crowded.clone()),
            Err(ConfigError::InvalidInitialLength { .. })
        ));

        // One cell shorter than the row leaves a gap ahead of the head.
        crowded.initial_snake_length = 2;
        let mut sim = seeded(crowded);
        let result = sim.tick(NO_INPUT);
        assert!(!result.info.died);
        assert!(sim.snake().is_alive);
    }

    #[test]
    fn test_new_simulation() {
        let sim = seeded(GameConfig::default());
        let snapshot = sim.snapshot();

        assert!(snapshot.agent_alive);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.steps, 0);
        assert_eq!(snapshot.agent_body.len(), 3);
        assert!(!snapshot.agent_body.contains(&snapshot.target_position));
        assert!(snapshot.hint_enabled);
        assert!(!snapshot.hint_path.is_empty());
    }

    #[test]
    fn test_basic_movement() {
        let mut sim = seeded(GameConfig::small());
        let initial_head = sim.snake().head();

        let result = sim.tick(NO_INPUT);

        assert!(!result.terminated);
        assert_eq!(sim.steps(), 1);
        assert_eq!(sim.snake().head(), initial_head.moved_by(1, 0));
    }

    #[test]
    fn test_last_turn_wins() {
        let mut sim = seeded(GameConfig::small());
        let head = sim.snake().head();

        sim.tick([
            Intent::Turn(Direction::Up),
            Intent::Turn(Direction::Down),
        ]);

        assert_eq!(sim.snake().direction, Direction::Down);
        assert_eq!(sim.snake().head(), head.moved_by(0, 1));
    }

    #[test]
    fn test_reversing_turn_is_ignored() {
        let mut sim = seeded(GameConfig::small());
        sim.tick([Intent::Turn(Direction::Left)]);
        assert_eq!(sim.snake().direction, Direction::Right);
        assert!(sim.snake().is_alive);
    }

    #[test]
    fn test_food_consumption() {
        let mut sim = seeded(GameConfig::small());
        let ahead = sim.snake().head().moved_by(1, 0);
        sim.place_food(ahead);

        let result = sim.tick(NO_INPUT);

        assert!(result.info.ate_food);
        assert_eq!(sim.snake().score, 10);
        assert_eq!(sim.snake().growth_target, 4);
        assert_eq!(sim.snake().len(), 3);
        assert!(!sim.snake().occupies(sim.food().position));

        // Keep the next meal out of the way.
        sim.place_food(Position::new(2, 9));

        sim.tick(NO_INPUT);
        assert_eq!(sim.snake().len(), 4);
        sim.tick(NO_INPUT);
        assert_eq!(sim.snake().len(), 4);
    }

    #[test]
    fn test_self_collision_terminates() {
        let mut config = GameConfig::small();
        config.initial_snake_length = 5;
        let mut sim = seeded(config);
        sim.place_food(Position::new(0, 0));

        sim.tick([Intent::Turn(Direction::Down)]);
        sim.tick([Intent::Turn(Direction::Left)]);
        let result = sim.tick([Intent::Turn(Direction::Up)]);

        assert!(result.terminated);
        assert!(result.info.died);
        assert!(!sim.snapshot().agent_alive);
    }

    #[test]
    fn test_dead_snake_does_not_advance_but_hint_tracks_head() {
        let mut sim = seeded(GameConfig::small());
        sim.snake.is_alive = false;
        let steps_before = sim.steps();
        let head = sim.snake().head();

        let result = sim.tick(NO_INPUT);

        assert!(result.terminated);
        assert_eq!(sim.steps(), steps_before);
        assert_eq!(sim.snake().head(), head);
        assert_eq!(sim.snake().hint_path.first(), Some(&head));
    }

    #[test]
    fn test_toggle_hint_clears_path() {
        let mut sim = seeded(GameConfig::small());
        assert!(!sim.snake().hint_path.is_empty());

        let result = sim.tick([Intent::ToggleHint]);
        assert!(!sim.hint_enabled());
        assert!(sim.snake().hint_path.is_empty());
        assert_eq!(result.info.hint_found, None);

        let result = sim.tick([Intent::ToggleHint, Intent::ToggleHint]);
        assert!(!sim.hint_enabled());
        assert_eq!(result.info.hint_found, None);

        sim.tick([Intent::ToggleHint]);
        assert!(sim.hint_enabled());
        assert_eq!(sim.snake().hint_path.first(), Some(&sim.snake().head()));
    }

    #[test]
    fn test_reset_restores_alive_state() {
        let mut sim = seeded(GameConfig::small());
        sim.snake.score = 50;
        sim.snake.is_alive = false;

        let result = sim.tick([Intent::Reset]);

        assert!(result.info.reset);
        assert!(!result.terminated);
        assert!(sim.snake().is_alive);
        let expected = if result.info.ate_food { 10 } else { 0 };
        assert_eq!(sim.snake().score, expected);
        // Reset happens before the move of the same tick.
        assert_eq!(sim.steps(), 1);
        assert!(!sim.snake().occupies(sim.food().position));
    }

    #[test]
    fn test_quit_is_reported_not_applied() {
        let mut sim = seeded(GameConfig::small());
        let result = sim.tick([Intent::Quit]);
        assert!(result.info.quit_requested);
        assert!(!result.terminated);
    }

    #[test]
    fn test_grid_full_stops_the_game() {
        // 2x2 grid: a snake growing to 4 cells fills it.
        let mut config = GameConfig::new(2, 2);
        config.initial_snake_length = 1;
        let mut sim = seeded(config);

        // Fill the grid by hand so the next meal leaves no free cell.
        sim.snake.body = vec![Position::new(0, 1), Position::new(1, 1), Position::new(1, 0)];
        sim.snake.growth_target = 4;
        sim.snake.direction = Direction::Up;
        sim.place_food(Position::new(0, 0));

        let result = sim.tick(NO_INPUT);

        assert!(result.info.ate_food);
        assert!(result.info.grid_full);
        assert!(result.terminated);
        assert!(sim.is_grid_full());
        assert!(sim.snapshot().is_over());

        let head = sim.snake().head();
        sim.tick(NO_INPUT);
        assert_eq!(sim.snake().head(), head);
    }
}

//! Nibbler: a snake that never stops, on levels that fill with obstacles.
//!
//! Food is worth `10 * level`. Reaching `100 * level` points advances the
//! level: new obstacles are scattered and the snake speeds up.

use arcade_core::grid::{Body, Heading, Walls};
use arcade_core::types::{Color, Event, GameState, Position, Text};
use arcade_core::{Game, ModuleResult, Renderer, SimpleRng};

pub const GRID_WIDTH: i32 = 30;
pub const GRID_HEIGHT: i32 = 20;
pub const CELL_SIZE: u32 = 20;

const BASE_INTERVAL: f32 = 0.15;
const MIN_INTERVAL: f32 = 0.05;
const INTERVAL_STEP: f32 = 0.01;
const OBSTACLES_PER_LEVEL: u32 = 2;
/// Cells around the head kept clear when obstacles are placed.
const SAFE_RADIUS: i32 = 2;

const WALL_COLOR: Color = Color::GRAY;
const BODY_COLOR: Color = Color::GREEN;
const FOOD_COLOR: Color = Color::RED;

pub struct Nibbler {
    rng: SimpleRng,
    body: Body,
    walls: Walls,
    food: Option<Position>,
    heading: Heading,
    state: GameState,
    score: u32,
    level: u32,
    clock: f32,
    in_round: bool,
}

impl Default for Nibbler {
    fn default() -> Self {
        Self::with_rng(SimpleRng::from_time())
    }
}

impl Nibbler {
    pub fn with_seed(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    fn with_rng(rng: SimpleRng) -> Self {
        Self {
            rng,
            body: Body::new(start()),
            walls: Walls::border(GRID_WIDTH, GRID_HEIGHT),
            food: None,
            heading: Heading::Right,
            state: GameState::Menu,
            score: 0,
            level: 1,
            clock: 0.0,
            in_round: false,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    fn move_interval(&self) -> f32 {
        (BASE_INTERVAL - self.level as f32 * INTERVAL_STEP).max(MIN_INTERVAL)
    }

    fn new_round(&mut self) {
        self.body = Body::new(start());
        self.heading = Heading::Right;
        self.score = 0;
        self.level = 1;
        self.clock = 0.0;
        self.in_round = true;
        self.build_level();
        self.spawn_food();
    }

    /// Border plus `2 * level` random obstacles away from the snake.
    fn build_level(&mut self) {
        let mut walls = Walls::border(GRID_WIDTH, GRID_HEIGHT);
        let head = self.body.head();
        let wanted = self.level * OBSTACLES_PER_LEVEL;
        let mut placed = 0;
        let mut tries = 0;
        while placed < wanted && tries < wanted * 50 {
            tries += 1;
            let pos = Position::new(
                self.rng.next_between(2, GRID_WIDTH - 2),
                self.rng.next_between(2, GRID_HEIGHT - 2),
            );
            let near_head =
                (pos.x - head.x).abs() <= SAFE_RADIUS && (pos.y - head.y).abs() <= SAFE_RADIUS;
            if near_head || self.body.contains(pos) || walls.contains(pos) {
                continue;
            }
            walls.insert(pos);
            placed += 1;
        }
        self.walls = walls;
    }

    fn is_free(&self, pos: Position) -> bool {
        !self.walls.contains(pos) && !self.body.contains(pos)
    }

    /// Food goes in the inner area, two cells from the border.
    fn spawn_food(&mut self) {
        for _ in 0..100 {
            let pos = Position::new(
                self.rng.next_between(2, GRID_WIDTH - 2),
                self.rng.next_between(2, GRID_HEIGHT - 2),
            );
            if self.is_free(pos) {
                self.food = Some(pos);
                return;
            }
        }
        self.food = (2..GRID_HEIGHT - 2)
            .flat_map(|y| (2..GRID_WIDTH - 2).map(move |x| Position::new(x, y)))
            .find(|&p| self.is_free(p));
    }

    fn finish(&mut self, state: GameState) {
        self.state = state;
        self.in_round = false;
    }

    fn tick(&mut self) {
        let ate = self.food == Some(self.heading.step(self.body.head()));
        if ate {
            self.body.grow();
        }
        let head = self.body.advance(self.heading);

        if self.walls.contains(head) || self.body.bites_itself() {
            self.finish(GameState::GameOver);
            return;
        }
        if !ate {
            return;
        }

        self.score += 10 * self.level;
        if self.score >= self.level * 100 {
            self.level += 1;
            self.build_level();
        }
        self.spawn_food();
        if self.food.is_none() {
            self.finish(GameState::Win);
        }
    }
}

fn start() -> Position {
    Position::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
}

impl Game for Nibbler {
    fn init(&mut self) -> ModuleResult<()> {
        if !self.in_round {
            self.new_round();
        }
        self.state = GameState::Playing;
        Ok(())
    }

    fn stop(&mut self) {
        self.state = GameState::Menu;
    }

    fn restart(&mut self) -> ModuleResult<()> {
        self.new_round();
        self.state = GameState::Playing;
        Ok(())
    }

    fn update(&mut self, dt: f32) -> ModuleResult<()> {
        if self.state != GameState::Playing {
            return Ok(());
        }
        self.clock += dt;
        while self.state == GameState::Playing && self.clock >= self.move_interval() {
            self.clock -= self.move_interval();
            self.tick();
        }
        Ok(())
    }

    fn render(&mut self, renderer: &mut dyn Renderer) -> ModuleResult<()> {
        renderer.set_cell_size(CELL_SIZE);
        for wall in self.walls.iter() {
            renderer.draw_cell(wall.x, wall.y, WALL_COLOR);
        }
        for segment in self.body.iter() {
            renderer.draw_cell(segment.x, segment.y, BODY_COLOR);
        }
        if let Some(food) = self.food {
            renderer.draw_cell(food.x, food.y, FOOD_COLOR);
        }
        renderer.draw_text(&Text::new(format!("Level: {}", self.level), Position::new(600, 20)));
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if self.state != GameState::Playing {
            return;
        }
        // Only quarter turns.
        if let Some(next) = Heading::from_event(event) {
            if next.is_horizontal() != self.heading.is_horizontal() {
                self.heading = next;
            }
        }
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn set_state(&mut self, state: GameState) {
        self.state = state;
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn name(&self) -> &str {
        "Nibbler"
    }

    fn description(&self) -> &str {
        "Nibbler: walls, levels and a snake that never stops"
    }
}

arcade_core::export_game!(Nibbler::default());

//! Snake: eat food, grow, avoid the walls and your own tail.
//!
//! The snake waits for the first direction key before moving. Each food is
//! worth 10 points; filling every free cell wins the round.

use arcade_core::grid::{Body, Heading, Walls};
use arcade_core::types::{Color, Event, GameState, Position};
use arcade_core::{Game, ModuleResult, Renderer, SimpleRng};

pub const GRID_WIDTH: i32 = 20;
pub const GRID_HEIGHT: i32 = 20;
pub const CELL_SIZE: u32 = 20;

const MOVE_INTERVAL: f32 = 0.2;
const FOOD_POINTS: u32 = 10;

const WALL_COLOR: Color = Color::GRAY;
const BODY_COLOR: Color = Color::GREEN;
const FOOD_COLOR: Color = Color::RED;

pub struct Snake {
    rng: SimpleRng,
    body: Body,
    walls: Walls,
    food: Option<Position>,
    heading: Option<Heading>,
    state: GameState,
    score: u32,
    clock: f32,
    /// A round exists and has not ended.
    in_round: bool,
}

impl Default for Snake {
    fn default() -> Self {
        Self::with_rng(SimpleRng::from_time())
    }
}

impl Snake {
    pub fn with_seed(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    fn with_rng(rng: SimpleRng) -> Self {
        Self {
            rng,
            body: Body::new(centre()),
            walls: Walls::border(GRID_WIDTH, GRID_HEIGHT),
            food: None,
            heading: None,
            state: GameState::Menu,
            score: 0,
            clock: 0.0,
            in_round: false,
        }
    }

    fn new_round(&mut self) {
        self.body = Body::new(centre());
        self.walls = Walls::border(GRID_WIDTH, GRID_HEIGHT);
        self.heading = None;
        self.score = 0;
        self.clock = 0.0;
        self.in_round = true;
        self.spawn_food();
    }

    fn is_free(&self, pos: Position) -> bool {
        !self.walls.contains(pos) && !self.body.contains(pos)
    }

    /// Place food on a random free cell; with none left the round is won.
    fn spawn_food(&mut self) {
        let interior = ((GRID_WIDTH - 2) * (GRID_HEIGHT - 2)) as usize;
        if self.body.len() >= interior {
            self.food = None;
            return;
        }
        for _ in 0..64 {
            let pos = Position::new(
                self.rng.next_between(1, GRID_WIDTH - 1),
                self.rng.next_between(1, GRID_HEIGHT - 1),
            );
            if self.is_free(pos) {
                self.food = Some(pos);
                return;
            }
        }
        // Crowded board: take the first free cell.
        self.food = (1..GRID_HEIGHT - 1)
            .flat_map(|y| (1..GRID_WIDTH - 1).map(move |x| Position::new(x, y)))
            .find(|&p| self.is_free(p));
    }

    fn finish(&mut self, state: GameState) {
        self.state = state;
        self.in_round = false;
    }

    fn tick(&mut self) {
        let Some(heading) = self.heading else {
            return;
        };
        let ate = self.food == Some(heading.step(self.body.head()));
        if ate {
            self.body.grow();
        }
        let head = self.body.advance(heading);

        if self.walls.contains(head) || self.body.bites_itself() {
            self.finish(GameState::GameOver);
            return;
        }
        if ate {
            self.score += FOOD_POINTS;
            self.spawn_food();
            if self.food.is_none() {
                self.finish(GameState::Win);
            }
        }
    }
}

fn centre() -> Position {
    Position::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
}

impl Game for Snake {
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
        while self.clock >= MOVE_INTERVAL && self.state == GameState::Playing {
            self.clock -= MOVE_INTERVAL;
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
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if self.state != GameState::Playing {
            return;
        }
        if let Some(next) = Heading::from_event(event) {
            // No reversing into the neck.
            if self.body.len() > 1 && self.heading.map(Heading::opposite) == Some(next) {
                return;
            }
            self.heading = Some(next);
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
        "Snake"
    }

    fn description(&self) -> &str {
        "Classic Snake: eat food and grow longer"
    }
}

arcade_core::export_game!(Snake::default());

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> Snake {
        let mut snake = Snake::with_seed(7);
        snake.init().unwrap();
        snake
    }

    #[test]
    fn fresh_instance_waits_in_menu() {
        let snake = Snake::with_seed(1);
        assert_eq!(snake.state(), GameState::Menu);
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn does_not_move_before_first_direction() {
        let mut snake = playing();
        snake.update(1.0).unwrap();
        assert_eq!(snake.body.head(), centre());
        assert_eq!(snake.state(), GameState::Playing);
    }

    #[test]
    fn eating_scores_and_grows() {
        let mut snake = playing();
        snake.food = Some(Position::new(11, 10));
        snake.handle_event(Event::MoveRight);
        snake.update(MOVE_INTERVAL).unwrap();

        assert_eq!(snake.score(), FOOD_POINTS);
        assert_eq!(snake.body.len(), 2);
        assert_ne!(snake.food, Some(Position::new(11, 10)));
    }

    #[test]
    fn hitting_a_wall_ends_the_round() {
        let mut snake = playing();
        snake.food = None;
        snake.handle_event(Event::MoveUp);
        for _ in 0..GRID_HEIGHT {
            snake.update(MOVE_INTERVAL).unwrap();
        }
        assert_eq!(snake.state(), GameState::GameOver);
    }

    #[test]
    fn stop_then_init_keeps_the_round() {
        let mut snake = playing();
        snake.score = 120;
        snake.stop();
        assert_eq!(snake.state(), GameState::Menu);

        snake.init().unwrap();
        assert_eq!(snake.state(), GameState::Playing);
        assert_eq!(snake.score(), 120);

        snake.restart().unwrap();
        assert_eq!(snake.score(), 0);
    }

    #[test]
    fn init_after_game_over_starts_fresh() {
        let mut snake = playing();
        snake.score = 30;
        snake.finish(GameState::GameOver);
        snake.init().unwrap();
        assert_eq!(snake.score(), 0);
        assert_eq!(snake.state(), GameState::Playing);
    }

    #[test]
    fn paused_game_does_not_advance() {
        let mut snake = playing();
        snake.handle_event(Event::MoveRight);
        snake.set_state(GameState::Paused);
        snake.update(1.0).unwrap();
        assert_eq!(snake.body.head(), centre());
    }

    #[test]
    fn cannot_reverse_into_itself() {
        let mut snake = playing();
        snake.body.grow();
        snake.handle_event(Event::MoveRight);
        snake.update(MOVE_INTERVAL).unwrap();
        snake.handle_event(Event::MoveLeft);
        assert_eq!(snake.heading, Some(Heading::Right));
    }

    #[test]
    fn food_never_lands_on_walls_or_body() {
        let mut snake = playing();
        for _ in 0..200 {
            snake.spawn_food();
            let food = snake.food.unwrap();
            assert!(snake.is_free(food));
        }
    }
}

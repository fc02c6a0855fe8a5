//! Grid helpers shared by the snake-style game modules.

use std::collections::{HashSet, VecDeque};

use crate::types::{Event, Position};

/// Direction of travel on the grid. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::MoveUp => Some(Heading::Up),
            Event::MoveDown => Some(Heading::Down),
            Event::MoveLeft => Some(Heading::Left),
            Event::MoveRight => Some(Heading::Right),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Heading::Left | Heading::Right)
    }

    /// The neighbouring cell of `pos` in this direction.
    pub fn step(self, pos: Position) -> Position {
        match self {
            Heading::Up => Position::new(pos.x, pos.y - 1),
            Heading::Down => Position::new(pos.x, pos.y + 1),
            Heading::Left => Position::new(pos.x - 1, pos.y),
            Heading::Right => Position::new(pos.x + 1, pos.y),
        }
    }
}

/// A snake body: head at the front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    segments: VecDeque<Position>,
    pending_growth: u32,
}

impl Body {
    pub fn new(head: Position) -> Self {
        Self {
            segments: VecDeque::from([head]),
            pending_growth: 0,
        }
    }

    pub fn head(&self) -> Position {
        // Never empty: constructed with a head and only `advance` pops.
        self.segments.front().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.segments.iter()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Extend by one segment on the next `advance`.
    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    /// Move one cell. Returns the new head.
    pub fn advance(&mut self, heading: Heading) -> Position {
        let head = heading.step(self.head());
        self.segments.push_front(head);
        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.segments.pop_back();
        }
        head
    }

    /// Whether the head overlaps another segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|&p| p == head)
    }
}

/// Solid cells of a level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walls {
    cells: HashSet<Position>,
}

impl Walls {
    /// A one-cell border around a `width` x `height` grid.
    pub fn border(width: i32, height: i32) -> Self {
        let mut walls = Self::default();
        for x in 0..width {
            walls.insert(Position::new(x, 0));
            walls.insert(Position::new(x, height - 1));
        }
        for y in 0..height {
            walls.insert(Position::new(0, y));
            walls.insert(Position::new(width - 1, y));
        }
        walls
    }

    pub fn insert(&mut self, pos: Position) {
        self.cells.insert(pos);
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_moves_and_grows() {
        let mut body = Body::new(Position::new(5, 5));
        body.advance(Heading::Right);
        assert_eq!(body.head(), Position::new(6, 5));
        assert_eq!(body.len(), 1);

        body.grow();
        body.advance(Heading::Down);
        assert_eq!(body.len(), 2);
        assert!(body.contains(Position::new(6, 5)));
        assert!(!body.bites_itself());
    }

    #[test]
    fn body_detects_self_bite() {
        let mut body = Body::new(Position::new(5, 5));
        for _ in 0..4 {
            body.grow();
        }
        for heading in [Heading::Right, Heading::Down, Heading::Left, Heading::Up] {
            body.advance(heading);
        }
        assert_eq!(body.head(), Position::new(5, 5));
        assert!(body.bites_itself());
    }

    #[test]
    fn border_walls_enclose_grid() {
        let walls = Walls::border(4, 3);
        assert_eq!(walls.len(), 10);
        assert!(walls.contains(Position::new(0, 0)));
        assert!(walls.contains(Position::new(3, 2)));
        assert!(!walls.contains(Position::new(1, 1)));
    }

    #[test]
    fn headings_map_from_events() {
        assert_eq!(Heading::from_event(Event::MoveUp), Some(Heading::Up));
        assert_eq!(Heading::from_event(Event::Action), None);
        assert_eq!(Heading::Left.opposite(), Heading::Right);
        assert!(Heading::Left.is_horizontal());
    }
}

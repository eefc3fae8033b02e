use crate::{config::Config, runtime::data_structures::value::Direction};
use log::debug;
use std::fmt::{self, Display, Formatter};

/// Where the robot is and which way it is facing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub facing: Direction,
}

/// Formatted the way REPORT prints it, `X,Y,DIRECTION`.
impl Display for Position {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.facing)
    }
}

/// The robot and the table it sits on.  The table's origin (0, 0) is the south west corner.
///
/// Nothing the robot is asked to do is an error.  Commands that would drop it off the table, or
/// that arrive before it has been placed, are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Robot {
    width: i64,
    height: i64,
    position: Option<Position>,
}

impl Default for Robot {
    fn default() -> Self {
        Robot::new(&Config::default())
    }
}

impl Robot {
    /// An unplaced robot on a table sized by the configuration.
    pub fn new(config: &Config) -> Robot {
        Robot { width: config.table_width, height: config.table_height, position: None }
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    fn on_table(&self, x: i64, y: i64) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// Put the robot on the table, replacing any previous position.  Returns false if the position
    /// is off the table.
    pub fn place(&mut self, x: i64, y: i64, facing: Direction) -> bool {
        if !self.on_table(x, y) {
            debug!(
                "Ignoring PLACE at {},{} outside the {}x{} table.",
                x, y, self.width, self.height
            );
            return false;
        }

        self.position = Some(Position { x, y, facing });
        true
    }

    /// Move one square forward.  Returns false if the move was ignored.
    pub fn move_forward(&mut self) -> bool {
        let Some(current) = self.position else {
            debug!("Ignoring MOVE, the robot has not been placed.");
            return false;
        };

        let (dx, dy) = current.facing.offset();
        let (x, y) = (current.x + dx, current.y + dy);

        if !self.on_table(x, y) {
            debug!("Ignoring MOVE from {}, it would leave the table.", current);
            return false;
        }

        self.position = Some(Position { x, y, ..current });
        true
    }

    pub fn turn_left(&mut self) -> bool {
        self.turn(Direction::left)
    }

    pub fn turn_right(&mut self) -> bool {
        self.turn(Direction::right)
    }

    fn turn(&mut self, rotate: fn(Direction) -> Direction) -> bool {
        match self.position.as_mut() {
            Some(current) => {
                current.facing = rotate(current.facing);
                true
            }

            None => {
                debug!("Ignoring turn, the robot has not been placed.");
                false
            }
        }
    }
}

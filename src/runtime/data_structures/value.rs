use crate::runtime::error::{self, RuntimeError};
use std::fmt::{self, Display, Formatter};

/// The four ways the robot can face.  The discriminant is the byte used to encode the direction in
/// byte-code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Direction {
    /// Decode a direction from its byte-code payload.
    pub fn from_byte(byte: u8) -> Option<Direction> {
        match byte {
            0 => Some(Direction::North),
            1 => Some(Direction::East),
            2 => Some(Direction::South),
            3 => Some(Direction::West),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// The keyword used for this direction in source code and in robot reports.
    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "NORTH",
            Direction::East => "EAST",
            Direction::South => "SOUTH",
            Direction::West => "WEST",
        }
    }

    /// Quarter turn anti-clockwise.
    pub fn left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// Quarter turn clockwise.
    pub fn right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// The (x, y) step taken when moving one square in this direction.  North is +y.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }
}

/// The type of a RobotValue without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Direction,
    Bool,
    String,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "INT",
            ValueKind::Direction => "DIRECTION",
            ValueKind::Bool => "BOOL",
            ValueKind::String => "STRING",
        };

        write!(f, "{}", name)
    }
}

/// A tagged value living on the interpreter's data stack for the length of one run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RobotValue {
    Int(i64),
    Direction(Direction),
    Bool(bool),
    String(String),
}

/// Values print the way they would be written in source, minus the quotes around strings.
impl Display for RobotValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RobotValue::Int(value) => write!(f, "{}", value),
            RobotValue::Direction(direction) => write!(f, "{}", direction),
            RobotValue::Bool(true) => write!(f, "TRUE"),
            RobotValue::Bool(false) => write!(f, "FALSE"),
            RobotValue::String(text) => write!(f, "{}", text),
        }
    }
}

impl RobotValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            RobotValue::Int(_) => ValueKind::Int,
            RobotValue::Direction(_) => ValueKind::Direction,
            RobotValue::Bool(_) => ValueKind::Bool,
            RobotValue::String(_) => ValueKind::String,
        }
    }
}

/// Convert an arbitrary data type to a RobotValue.
pub trait ToValue {
    fn to_value(&self) -> RobotValue;
}

/// Define conversions between RobotValues and the raw data types they carry.  The `into_` method
/// consumes the value and reports a type mismatch instead of panicking.
macro_rules! value_conversion {
    ($data_type:ty , $variant:ident , $into_ident:ident) => {
        impl RobotValue {
            #[doc = concat!("Unwrap the value as a ", stringify!($data_type), ".")]
            pub fn $into_ident(self) -> error::Result<$data_type> {
                match self {
                    RobotValue::$variant(value) => Ok(value),
                    found => Err(RuntimeError::TypeMismatch {
                        expected: ValueKind::$variant,
                        found,
                    }
                    .into()),
                }
            }
        }

        impl ToValue for $data_type {
            fn to_value(&self) -> RobotValue {
                RobotValue::$variant(self.clone())
            }
        }

        impl From<$data_type> for RobotValue {
            fn from(original: $data_type) -> RobotValue {
                RobotValue::$variant(original)
            }
        }
    };
}

value_conversion!(i64, Int, into_int);
value_conversion!(Direction, Direction, into_direction);
value_conversion!(bool, Bool, into_bool);
value_conversion!(String, String, into_string);

impl From<&str> for RobotValue {
    fn from(original: &str) -> RobotValue {
        RobotValue::String(original.to_string())
    }
}

/// Stack depths and the like are reported as INT values.
impl ToValue for usize {
    fn to_value(&self) -> RobotValue {
        RobotValue::Int(*self as i64)
    }
}

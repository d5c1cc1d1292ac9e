use crate::AnnotateError;
use std::fmt;
use std::str::FromStr;

/// Volleyball actions an annotation can carry. The discriminant is the class
/// index used in YOLO export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionLabel {
    Ball = 0,
    Block = 1,
    Receive = 2,
    Set = 3,
    Spike = 4,
    Serve = 5,
}

impl ActionLabel {
    pub const ALL: [ActionLabel; 6] = [
        ActionLabel::Ball,
        ActionLabel::Block,
        ActionLabel::Receive,
        ActionLabel::Set,
        ActionLabel::Spike,
        ActionLabel::Serve,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Label bound to a number key, `1` through `6`.
    pub fn from_shortcut(digit: u32) -> Option<Self> {
        digit.checked_sub(1).and_then(|i| Self::from_index(i as usize))
    }

    pub fn name(self) -> &'static str {
        match self {
            ActionLabel::Ball => "ball",
            ActionLabel::Block => "block",
            ActionLabel::Receive => "receive",
            ActionLabel::Set => "set",
            ActionLabel::Spike => "spike",
            ActionLabel::Serve => "serve",
        }
    }

    /// Exact, case-sensitive match against the label names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|label| label.name() == name)
    }
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionLabel {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AnnotateError::UnknownLabel(s.to_string()))
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Key bindings from adapter input to player intents.

use homestead_core::{Direction, Tool};

/// Key reported by an adapter, independent of any terminal or windowing crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Printable character.
    Char(char),
}

/// Player intent derived from a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Walk one tile.
    Move(Direction),
    /// Switch to a tool.
    SelectTool(Tool),
    /// Go to bed, subject to the rest rules.
    Sleep,
    /// Leave the session.
    Quit,
}

/// Map a key press to a player intent.
#[must_use]
pub fn map_key(key: Key) -> Option<Intent> {
    match key {
        Key::Up => Some(Intent::Move(Direction::Up)),
        Key::Down => Some(Intent::Move(Direction::Down)),
        Key::Left => Some(Intent::Move(Direction::Left)),
        Key::Right => Some(Intent::Move(Direction::Right)),
        Key::Char(c) => map_char(c.to_ascii_lowercase()),
    }
}

fn map_char(c: char) -> Option<Intent> {
    match c {
        'w' => Some(Intent::Move(Direction::Up)),
        's' => Some(Intent::Move(Direction::Down)),
        'a' => Some(Intent::Move(Direction::Left)),
        'd' => Some(Intent::Move(Direction::Right)),
        '1' => Some(Intent::SelectTool(Tool::Hoe)),
        '2' => Some(Intent::SelectTool(Tool::WateringCan)),
        '3' => Some(Intent::SelectTool(Tool::Seeds)),
        '4' => Some(Intent::SelectTool(Tool::Hand)),
        'n' => Some(Intent::Sleep),
        'q' => Some(Intent::Quit),
        _ => None,
    }
}

/// Key that selects `tool` in the toolbar.
#[must_use]
pub const fn toolbar_key(tool: Tool) -> char {
    match tool {
        Tool::Hoe => '1',
        Tool::WateringCan => '2',
        Tool::Seeds => '3',
        Tool::Hand => '4',
    }
}

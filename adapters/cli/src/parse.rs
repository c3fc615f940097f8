//! Line-oriented input for the text adapter.
//!
//! Each line is either a single key, handled by the controls system, or a
//! word command with arguments:
//!
//! ```text
//! move left        tool seeds       use 3 4
//! click 100 70     hover 40 40      buy tomato
//! sleep            show             quit
//! ```

use glam::Vec2;
use homestead_core::{CropType, Direction, Position, Tool, TILE_SIZE};
use homestead_rendering::{tile_origin, FrameInput};
use homestead_system_controls::{map_key, Intent, Key};
use thiserror::Error;

/// Reasons an input line could not be understood.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("`{0}` is not a number")]
    InvalidNumber(String),
    #[error("unknown direction `{0}`")]
    UnknownDirection(String),
    #[error("unknown tool `{0}`")]
    UnknownTool(String),
    #[error("unknown crop `{0}`")]
    UnknownCrop(String),
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub(crate) fn parse_line(line: &str) -> Result<Option<FrameInput>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "move" => FrameInput {
            movement: Some(parse_direction(required(
                words.next(),
                "move",
                "a direction",
            )?)?),
            ..FrameInput::default()
        },
        "tool" => FrameInput {
            tool: Some(parse_tool(required(words.next(), "tool", "a tool name")?)?),
            ..FrameInput::default()
        },
        "use" => {
            let x = parse_number::<i32>(required(words.next(), "use", "tile x and y")?)?;
            let y = parse_number::<i32>(required(words.next(), "use", "tile x and y")?)?;
            let centre =
                tile_origin(Position::new(x, y)) + Vec2::splat(TILE_SIZE as f32 / 2.0);
            pointer_input(centre, true)
        }
        "click" => pointer_input(parse_pixel(&mut words, "click")?, true),
        "hover" => pointer_input(parse_pixel(&mut words, "hover")?, false),
        "buy" => FrameInput {
            purchase: Some(parse_crop(required(words.next(), "buy", "a crop name")?)?),
            ..FrameInput::default()
        },
        "sleep" => intent_input(Intent::Sleep),
        "quit" | "exit" => intent_input(Intent::Quit),
        "show" => FrameInput::default(),
        "up" => key_input(Key::Up)?,
        "down" => key_input(Key::Down)?,
        "left" => key_input(Key::Left)?,
        "right" => key_input(Key::Right)?,
        _ => {
            let mut chars = command.chars();
            match (chars.next(), chars.next()) {
                (Some(key), None) => key_input(Key::Char(key))?,
                _ => return Err(ParseError::UnknownCommand(command.to_owned())),
            }
        }
    };

    if let Some(extra) = words.next() {
        return Err(ParseError::UnexpectedArgument(extra.to_owned()));
    }

    Ok(Some(input))
}

fn required<'a>(
    word: Option<&'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, ParseError> {
    word.ok_or(ParseError::MissingArgument { command, expected })
}

fn parse_number<T: std::str::FromStr>(word: &str) -> Result<T, ParseError> {
    word.parse()
        .map_err(|_| ParseError::InvalidNumber(word.to_owned()))
}

fn parse_pixel<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<Vec2, ParseError> {
    let x = parse_number::<f32>(required(words.next(), command, "pixel x and y")?)?;
    let y = parse_number::<f32>(required(words.next(), command, "pixel x and y")?)?;
    Ok(Vec2::new(x, y))
}

fn parse_direction(word: &str) -> Result<Direction, ParseError> {
    match word.to_ascii_lowercase().as_str() {
        "up" | "north" => Ok(Direction::Up),
        "down" | "south" => Ok(Direction::Down),
        "left" | "west" => Ok(Direction::Left),
        "right" | "east" => Ok(Direction::Right),
        _ => Err(ParseError::UnknownDirection(word.to_owned())),
    }
}

fn parse_tool(word: &str) -> Result<Tool, ParseError> {
    let name = word.to_ascii_lowercase();
    Tool::ALL
        .into_iter()
        .find(|tool| tool.name() == name || (name == "can" && *tool == Tool::WateringCan))
        .ok_or_else(|| ParseError::UnknownTool(word.to_owned()))
}

fn parse_crop(word: &str) -> Result<CropType, ParseError> {
    let name = word.to_ascii_lowercase();
    CropType::ALL
        .into_iter()
        .find(|crop| crop.name() == name)
        .ok_or_else(|| ParseError::UnknownCrop(word.to_owned()))
}

fn pointer_input(pointer: Vec2, click: bool) -> FrameInput {
    FrameInput {
        pointer: Some(pointer),
        click,
        ..FrameInput::default()
    }
}

fn key_input(key: Key) -> Result<FrameInput, ParseError> {
    map_key(key).map(intent_input).ok_or_else(|| {
        let name = match key {
            Key::Char(c) => c.to_string(),
            other => format!("{other:?}").to_ascii_lowercase(),
        };
        ParseError::UnknownCommand(name)
    })
}

fn intent_input(intent: Intent) -> FrameInput {
    let mut input = FrameInput::default();
    match intent {
        Intent::Move(direction) => input.movement = Some(direction),
        Intent::SelectTool(tool) => input.tool = Some(tool),
        Intent::Sleep => input.sleep_requested = true,
        Intent::Quit => input.quit = true,
    }
    input
}

//! Terminal backend that draws scenes as text frames.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use homestead_core::{CropStage, CropType, Direction};
use homestead_rendering::{
    Color, FrameInput, GroundShade, Presentation, RenderingBackend, Scene, SoilAppearance,
    TilePresentation, HOVER_COLOR,
};
use tracing::warn;

use crate::parse::parse_line;

/// Reads input lines from `input` and prints frames to `output`.
#[derive(Debug)]
pub(crate) struct TextBackend<R, W> {
    input: R,
    output: W,
    quiet: bool,
    colored: bool,
}

impl<R, W> TextBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    /// Creates a backend. A quiet backend only prints the final frame.
    pub(crate) fn new(input: R, output: W, quiet: bool) -> Self {
        Self {
            input,
            output,
            quiet,
            colored: false,
        }
    }

    /// Paints frames with 24-bit ANSI colors.
    pub(crate) fn colored(self, colored: bool) -> Self {
        Self { colored, ..self }
    }
}

impl<R, W> RenderingBackend for TextBackend<R, W>
where
    R: BufRead,
    W: Write,
{
    fn run<F>(mut self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            clear_color,
            mut scene,
        } = presentation;
        let palette = self.colored.then_some(clear_color);

        writeln!(self.output, "{window_title}").context("failed to write title")?;
        if !self.quiet {
            draw(&scene, palette, &mut self.output)?;
        }

        let mut line = String::new();
        let mut number = 0_usize;
        loop {
            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read input line")?;
            if read == 0 {
                break;
            }
            number += 1;

            let input = match parse_line(&line) {
                Ok(Some(input)) => input,
                Ok(None) => continue,
                Err(error) => {
                    warn!(line = number, %error, "skipping input line");
                    continue;
                }
            };

            update_scene(input, &mut scene);
            if input.quit {
                break;
            }
            if !self.quiet {
                draw(&scene, palette, &mut self.output)?;
            }
        }

        if self.quiet {
            draw(&scene, palette, &mut self.output)?;
        }
        self.output.flush().context("failed to flush output")
    }
}

/// Writes one frame: status lines, the farm and the latest feedback.
///
/// With a `palette`, the farm is painted and the border takes its color.
fn draw(scene: &Scene, palette: Option<Color>, out: &mut impl Write) -> Result<()> {
    let hud = &scene.hud;
    let seeds = counts(hud.seeds.iter());
    let harvested = counts(hud.harvested.iter());
    let border = format!("+{}+", "-".repeat(scene.grid.columns as usize));
    let (border, edge) = match palette {
        Some(clear) => (paint(&border, None, clear), paint("|", None, clear)),
        None => (border, "|".to_owned()),
    };

    writeln!(
        out,
        "Day {}  {}  energy {}  water {}  money {}  tool {}",
        hud.day,
        hud.clock(),
        hud.energy,
        hud.water,
        hud.money,
        hud.tool.name()
    )?;
    writeln!(out, "seeds: {seeds}")?;
    writeln!(out, "harvested: {harvested}")?;
    writeln!(out, "{border}")?;
    for row in scene.rows() {
        let cells: String = row
            .iter()
            .map(|tile| {
                let occupied = tile.position == scene.player.position;
                let glyph = if occupied {
                    player_glyph(scene.player.facing)
                } else {
                    tile_glyph(tile)
                };
                if palette.is_none() {
                    return glyph.to_string();
                }

                let hovered = scene.hovered == Some(tile.position);
                let (foreground, background) = cell_colors(tile, hovered, occupied);
                paint(glyph, Some(foreground), background)
            })
            .collect();
        writeln!(out, "{edge}{cells}{edge}")?;
    }
    writeln!(out, "{border}")?;
    if let Some(hovered) = scene.hovered {
        writeln!(out, "pointer at ({}, {})", hovered.x(), hovered.y())?;
    }
    if let Some(feedback) = scene.feedback {
        writeln!(out, "> {feedback}")?;
    }

    Ok(())
}

fn counts(counts: impl Iterator<Item = (CropType, u32)>) -> String {
    counts
        .map(|(crop, count)| format!("{} {count}", crop.name()))
        .collect::<Vec<_>>()
        .join(", ")
}

const fn player_glyph(facing: Direction) -> char {
    match facing {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

fn tile_glyph(tile: &TilePresentation) -> char {
    if let Some(crop) = tile.crop {
        return match crop.stage {
            CropStage::Empty | CropStage::Sprout => ',',
            CropStage::Growing => 'i',
            CropStage::Harvestable => ripe_glyph(crop.crop),
        };
    }

    match tile.soil {
        SoilAppearance::Watered => '~',
        SoilAppearance::Tilled => '=',
        SoilAppearance::Untilled if tile.grass_tuft => '"',
        SoilAppearance::Untilled => match tile.shade {
            GroundShade::Light => '.',
            GroundShade::Dark => ' ',
        },
    }
}

fn cell_colors(tile: &TilePresentation, hovered: bool, occupied: bool) -> (Color, Color) {
    let ground = tile.soil.color().unwrap_or_else(|| tile.shade.color());
    let background = if hovered { HOVER_COLOR } else { ground };
    let foreground = match tile.crop {
        _ if occupied => background.lighten(0.85),
        Some(crop) => crop.produce_color().unwrap_or_else(|| crop.foliage_color()),
        None => background.darken(0.35),
    };
    (foreground, background)
}

fn paint(text: impl std::fmt::Display, foreground: Option<Color>, background: Color) -> String {
    let (red, green, blue) = channels(background);
    let mut painted = format!("\x1b[48;2;{red};{green};{blue}m");
    if let Some(foreground) = foreground {
        let (red, green, blue) = channels(foreground);
        painted.push_str(&format!("\x1b[38;2;{red};{green};{blue}m"));
    }
    format!("{painted}{text}\x1b[0m")
}

fn channels(color: Color) -> (u8, u8, u8) {
    let byte = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
    (byte(color.red), byte(color.green), byte(color.blue))
}

const fn ripe_glyph(crop: CropType) -> char {
    match crop {
        CropType::Wheat => 'W',
        CropType::Carrot => 'C',
        CropType::Tomato => 'T',
        CropType::Corn => 'K',
        CropType::Potato => 'P',
    }
}

//! Brick layouts loaded from tile-code text files
//!
//! One row per line, whitespace-separated codes:
//! `0` empty, `1` solid (indestructible), `2..=5` destructible with a fixed
//! color. Any larger code is destructible and white.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::entity::Body;
use crate::resources::{ResourceRegistry, names};

pub const SOLID_BRICK_COLOR: Vec3 = Vec3::new(0.8, 0.8, 0.7);

/// Tint for a destructible tile code
pub fn tile_color(code: u32) -> Vec3 {
    match code {
        2 => Vec3::new(0.2, 0.6, 1.0),
        3 => Vec3::new(0.0, 0.7, 0.0),
        4 => Vec3::new(0.8, 0.8, 0.4),
        5 => Vec3::new(1.0, 0.5, 0.0),
        _ => Vec3::ONE,
    }
}

/// Why a level file could not be turned into bricks
#[derive(Debug)]
pub enum LevelLoadError {
    Io { path: PathBuf, source: std::io::Error },
    /// 1-based line and column of a token that is not a tile code
    InvalidTile { line: usize, column: usize, token: String },
    RaggedRow { line: usize, expected: usize, found: usize },
    Empty,
}

impl fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed reading level {}: {source}", path.display())
            }
            Self::InvalidTile {
                line,
                column,
                token,
            } => write!(f, "invalid tile code '{token}' at {line}:{column}"),
            Self::RaggedRow {
                line,
                expected,
                found,
            } => write!(
                f,
                "row on line {line} has {found} tiles, expected {expected}"
            ),
            Self::Empty => write!(f, "level contains no rows"),
        }
    }
}

impl std::error::Error for LevelLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A grid of bricks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub bricks: Vec<Body>,
}

impl Level {
    /// Read and parse a level file
    pub fn load(
        path: impl AsRef<Path>,
        level_width: f32,
        level_height: f32,
        resources: &ResourceRegistry,
    ) -> Result<Self, LevelLoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::parse(&source, level_width, level_height, resources)?;
        log::info!(
            "Loaded level {}: {} bricks ({} destructible)",
            path.display(),
            level.bricks.len(),
            level.remaining()
        );
        Ok(level)
    }

    /// Parse tile codes from text
    pub fn parse(
        source: &str,
        level_width: f32,
        level_height: f32,
        resources: &ResourceRegistry,
    ) -> Result<Self, LevelLoadError> {
        let mut tiles: Vec<Vec<u32>> = Vec::new();

        for (index, line) in source.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .enumerate()
                .map(|(column, token)| {
                    token.parse::<u32>().map_err(|_| LevelLoadError::InvalidTile {
                        line: index + 1,
                        column: column + 1,
                        token: token.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = tiles.first() {
                if first.len() != row.len() {
                    return Err(LevelLoadError::RaggedRow {
                        line: index + 1,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            tiles.push(row);
        }

        if tiles.is_empty() {
            return Err(LevelLoadError::Empty);
        }

        Ok(Self::from_tiles(&tiles, level_width, level_height, resources))
    }

    /// Build bricks from a rectangular grid of tile codes
    pub fn from_tiles(
        tiles: &[Vec<u32>],
        level_width: f32,
        level_height: f32,
        resources: &ResourceRegistry,
    ) -> Self {
        let rows = tiles.len();
        let columns = tiles.first().map_or(0, Vec::len);
        if rows == 0 || columns == 0 {
            return Self::default();
        }

        let unit = Vec2::new(level_width / columns as f32, level_height / rows as f32);
        let solid_sprite = resources.texture(names::BLOCK_SOLID);
        let block_sprite = resources.texture(names::BLOCK);

        let mut bricks = Vec::new();
        for (y, row) in tiles.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let position = unit * Vec2::new(x as f32, y as f32);
                match code {
                    0 => {}
                    1 => {
                        let mut brick =
                            Body::new(position, unit, solid_sprite).with_color(SOLID_BRICK_COLOR);
                        brick.solid = true;
                        bricks.push(brick);
                    }
                    _ => bricks
                        .push(Body::new(position, unit, block_sprite).with_color(tile_color(code))),
                }
            }
        }

        Self { bricks }
    }

    /// Every destructible brick is destroyed
    pub fn is_completed(&self) -> bool {
        self.remaining() == 0
    }

    /// Destructible bricks still standing
    pub fn remaining(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| !b.solid && !b.destroyed)
            .count()
    }

    /// Restore every brick. Bricks never move, so this matches a reload.
    pub fn reset(&mut self) {
        for brick in &mut self.bricks {
            brick.destroyed = false;
        }
    }
}

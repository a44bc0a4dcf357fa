//! Level descriptors
//!
//! A level is static data: which enemies exist (pre-placed or left to
//! procedural placement), the decorative layers, and the right-hand
//! movement bound. It is consumed once when a World is built.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::RoamerKind;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::error::{Error, Result, read_file};

/// Horizontal distance between background tiles
pub const TILE_STRIDE: f32 = 719.0;
pub const CLOUD_Y: f32 = 20.0;
pub const CLOUD_WIDTH: f32 = 450.0;
pub const CLOUD_HEIGHT: f32 = 250.0;

/// One enemy entry in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnemySpawn {
    /// `x: None` leaves placement to the level-start band search
    Walker { x: Option<f32> },
    Jumper { x: Option<f32> },
    Boss { x: f32 },
}

/// Level-start placement band and spacing for procedurally placed roamers
pub fn initial_band(kind: RoamerKind) -> ((f32, f32), (f32, f32)) {
    match kind {
        RoamerKind::Walker => ((1000.0, 1500.0), (100.0, 300.0)),
        RoamerKind::Jumper => ((900.0, 1300.0), (80.0, 250.0)),
    }
}

/// Decorative layers, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecorationKind {
    Air,
    ThirdLayer,
    SecondLayer,
    FirstLayer,
    /// Drawn in front of the actors
    Cloud,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub kind: DecorationKind,
    pub x: f32,
    /// Alternate artwork for the same layer
    #[serde(default)]
    pub variant: u8,
}

impl Decoration {
    pub fn rect(&self) -> Rect {
        match self.kind {
            DecorationKind::Cloud => Rect::new(self.x, CLOUD_Y, CLOUD_WIDTH, CLOUD_HEIGHT),
            _ => Rect::new(self.x, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        }
    }

    pub fn is_foreground(&self) -> bool {
        self.kind == DecorationKind::Cloud
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub decorations: Vec<Decoration>,
    /// Right-hand movement bound for the character
    pub level_end_x: f32,
}

impl Level {
    /// The first (and only shipped) level
    pub fn level_one() -> Self {
        let mut enemies = vec![EnemySpawn::Walker { x: None }; 3];
        enemies.extend(vec![EnemySpawn::Jumper { x: None }; 2]);
        enemies.push(EnemySpawn::Boss { x: 3500.0 });

        let mut decorations: Vec<Decoration> = (0..5)
            .map(|i| Decoration {
                kind: DecorationKind::Cloud,
                x: i as f32 * 800.0,
                variant: 0,
            })
            .collect();
        for tile in -2i32..=5 {
            let x = tile as f32 * TILE_STRIDE;
            let variant = tile.rem_euclid(2) as u8;
            for kind in [
                DecorationKind::Air,
                DecorationKind::ThirdLayer,
                DecorationKind::SecondLayer,
                DecorationKind::FirstLayer,
            ] {
                decorations.push(Decoration { kind, x, variant });
            }
        }

        Self {
            enemies,
            decorations,
            level_end_x: 3200.0,
        }
    }

    /// Parse and validate a level descriptor
    pub fn from_json(json: &str) -> Result<Self> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn load(path: &str) -> Result<Self> {
        let level = Self::from_json(&read_file(path)?)?;
        log::info!(
            "Loaded level from {} ({} enemies, end at x={})",
            path,
            level.enemies.len(),
            level.level_end_x
        );
        Ok(level)
    }

    /// Exactly one boss at a finite x, and a positive end bound
    pub fn validate(&self) -> Result<()> {
        if !(self.level_end_x.is_finite() && self.level_end_x > 0.0) {
            return Err(Error::InvalidLevel(format!(
                "level_end_x must be positive, got {}",
                self.level_end_x
            )));
        }
        let bosses: Vec<f32> = self
            .enemies
            .iter()
            .filter_map(|e| match e {
                EnemySpawn::Boss { x } => Some(*x),
                _ => None,
            })
            .collect();
        match bosses.as_slice() {
            [x] if x.is_finite() => Ok(()),
            [x] => Err(Error::InvalidLevel(format!(
                "boss x must be finite, got {}",
                x
            ))),
            other => Err(Error::InvalidLevel(format!(
                "expected exactly one boss, found {}",
                other.len()
            ))),
        }
    }

    pub fn boss_x(&self) -> Option<f32> {
        self.enemies.iter().find_map(|e| match e {
            EnemySpawn::Boss { x } => Some(*x),
            _ => None,
        })
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::level_one()
    }
}

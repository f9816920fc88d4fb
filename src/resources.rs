//! Texture registry
//!
//! Maps sprite names to opaque handles. The simulation only ever stores
//! handles; a rendering backend resolves them (and their source paths) to
//! GPU textures. The registry is owned by whoever builds the game and passed
//! in explicitly.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Opaque handle to a registered texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Returned for names that were never registered
    pub const MISSING: TextureHandle = TextureHandle(0);
}

/// A registered texture
#[derive(Debug, Clone)]
pub struct TextureEntry {
    pub handle: TextureHandle,
    pub path: PathBuf,
    /// Whether the image carries an alpha channel
    pub alpha: bool,
}

/// Sprite names used by the game
pub mod names {
    pub const BACKGROUND: &str = "background";
    pub const BALL: &str = "face";
    pub const BLOCK: &str = "block";
    pub const BLOCK_SOLID: &str = "block_solid";
    pub const PADDLE: &str = "paddle";
    pub const PARTICLE: &str = "particle";
    pub const POWERUP_SPEED: &str = "powerup_speed";
    pub const POWERUP_STICKY: &str = "powerup_sticky";
    pub const POWERUP_PASSTHROUGH: &str = "powerup_passthrough";
    pub const POWERUP_INCREASE: &str = "powerup_increase";
    pub const POWERUP_CONFUSE: &str = "powerup_confuse";
    pub const POWERUP_CHAOS: &str = "powerup_chaos";
}

/// Owned name -> texture registry
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    textures: HashMap<String, TextureEntry>,
    next_handle: u32,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            // 0 is reserved for MISSING
            next_handle: 1,
        }
    }

    /// Registry with every sprite the game draws, rooted at `textures/`
    pub fn with_defaults() -> Self {
        use names::*;

        let mut registry = Self::new();
        let stock = [
            (BACKGROUND, "background.jpg", false),
            (BALL, "awesomeface.png", true),
            (BLOCK, "block.png", false),
            (BLOCK_SOLID, "block_solid.png", false),
            (PADDLE, "paddle.png", true),
            (PARTICLE, "particle.png", true),
            (POWERUP_SPEED, "powerup_speed.png", true),
            (POWERUP_STICKY, "powerup_sticky.png", true),
            (POWERUP_PASSTHROUGH, "powerup_passthrough.png", true),
            (POWERUP_INCREASE, "powerup_increase.png", true),
            (POWERUP_CONFUSE, "powerup_confuse.png", true),
            (POWERUP_CHAOS, "powerup_chaos.png", true),
        ];
        for (name, file, alpha) in stock {
            registry.register(name, Path::new("textures").join(file), alpha);
        }
        registry
    }

    /// Register a texture, returning its handle. Re-registering a name keeps
    /// the existing handle and updates the path.
    pub fn register(&mut self, name: &str, path: impl Into<PathBuf>, alpha: bool) -> TextureHandle {
        let path = path.into();
        if let Some(entry) = self.textures.get_mut(name) {
            entry.path = path;
            entry.alpha = alpha;
            return entry.handle;
        }

        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.textures
            .insert(name.to_string(), TextureEntry { handle, path, alpha });
        handle
    }

    pub fn get(&self, name: &str) -> Option<&TextureEntry> {
        self.textures.get(name)
    }

    /// Handle for `name`, or `TextureHandle::MISSING` if unregistered
    pub fn texture(&self, name: &str) -> TextureHandle {
        match self.get(name) {
            Some(entry) => entry.handle,
            None => {
                log::warn!("Texture '{}' is not registered", name);
                TextureHandle::MISSING
            }
        }
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// All entries, for a backend to upload
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TextureEntry)> {
        self.textures.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

//! In-memory registry of running games

use crate::error::{ApiError, ApiResult};
use crate::game::Game;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Public listing entry of a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub name: String,
    pub boardid: u32,
}

/// Board id to game map
///
/// Ids start at 0 and are never reused, even after a game is deleted.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<u32, Arc<Game>>>,
    next_id: Mutex<u32>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, name: impl Into<String>) -> ApiResult<Arc<Game>> {
        let id = {
            let mut next_id = self.next_id.lock();
            let id = *next_id;
            *next_id = id
                .checked_add(1)
                .ok_or_else(|| ApiError::Internal("Board ids exhausted.".into()))?;
            id
        };

        let game = Arc::new(Game::new(id, name));
        self.games.write().insert(id, Arc::clone(&game));
        info!("[SESSIONS] Created game {} ({:?})", id, game.name);
        Ok(game)
    }

    pub fn get(&self, id: u32) -> ApiResult<Arc<Game>> {
        self.games
            .read()
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Game with index {id} doesn't exist.")))
    }

    /// Remove a game after checking its password
    pub fn delete(&self, id: u32, password: &str) -> ApiResult<()> {
        self.get(id)?.verify_password(password)?;
        self.games.write().remove(&id);
        info!("[SESSIONS] Deleted game {}", id);
        Ok(())
    }

    /// All games, ordered by board id
    pub fn list(&self) -> Vec<GameSummary> {
        let mut games: Vec<GameSummary> = self
            .games
            .read()
            .values()
            .map(|game| GameSummary {
                name: game.name.clone(),
                boardid: game.id,
            })
            .collect();
        games.sort_by_key(|summary| summary.boardid);
        games
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }
}

use std::fmt;

use kohs_engine::GameType;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Available,
    ComingSoon,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Available => "available",
            Self::ComingSoon => "coming soon",
        })
    }
}

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub game_type: GameType,
    pub title: &'static str,
    pub description: &'static str,
    pub status: GameStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("{_0} is coming soon and cannot be played yet")]
pub struct GameUnavailableError(#[error(not(source))] pub GameType);

const GAMES: [GameInfo; 4] = [
    GameInfo {
        game_type: GameType::Kohs,
        title: "Kohs Block Design",
        description: "Spatial reasoning and pattern matching",
        status: GameStatus::Available,
    },
    GameInfo {
        game_type: GameType::Stroop,
        title: "Stroop Test",
        description: "Attention and cognitive flexibility",
        status: GameStatus::ComingSoon,
    },
    GameInfo {
        game_type: GameType::GoNoGo,
        title: "Go/No-Go Task",
        description: "Impulse control and response inhibition",
        status: GameStatus::ComingSoon,
    },
    GameInfo {
        game_type: GameType::TrailMaking,
        title: "Trail Making Test",
        description: "Visual attention and task switching",
        status: GameStatus::ComingSoon,
    },
];

/// The games offered in the menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameCatalog;

impl GameCatalog {
    #[must_use]
    pub fn games(self) -> &'static [GameInfo] {
        &GAMES
    }

    #[must_use]
    pub fn get(self, game_type: GameType) -> &'static GameInfo {
        // Every game type has exactly one entry, in declaration order.
        &GAMES[game_type as usize]
    }

    /// Returns the entry for `game_type` if it can be played.
    pub fn launch(self, game_type: GameType) -> Result<&'static GameInfo, GameUnavailableError> {
        let info = self.get(game_type);
        if info.status.is_coming_soon() {
            return Err(GameUnavailableError(game_type));
        }
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_game_listed_once() {
        for game_type in GameType::ALL {
            assert_eq!(GameCatalog.get(game_type).game_type, game_type);
        }
        assert_eq!(GameCatalog.games().len(), GameType::ALL.len());
    }

    #[test]
    fn test_only_kohs_launches() {
        assert_eq!(
            GameCatalog.launch(GameType::Kohs).unwrap().title,
            "Kohs Block Design"
        );
        for game_type in [GameType::Stroop, GameType::GoNoGo, GameType::TrailMaking] {
            assert_eq!(
                GameCatalog.launch(game_type),
                Err(GameUnavailableError(game_type))
            );
        }
    }
}

use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::SCORE_BOARD_FILE_VERSION;
use crate::error::ScoreBoardError;
use crate::types::ScoreRecord;

#[derive(Clone, Debug, Serialize)]
struct ScoreBoardFile<'a> {
    version: u8,
    #[serde(rename = "savedAt")]
    saved_at: String,
    #[serde(rename = "nextGameId")]
    next_game_id: u32,
    records: &'a [ScoreRecord],
}

#[derive(Clone, Debug, Deserialize)]
struct ScoreBoardFileRaw {
    version: u8,
    #[serde(rename = "nextGameId", alias = "next_game_id", default)]
    next_game_id: u32,
    #[serde(default)]
    records: Vec<serde_json::Value>,
}

/// Append-only history of finished games, in game-id order. Also hands out
/// game ids so a fresh board starts counting at 1.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreBoard {
    records: Vec<ScoreRecord>,
    next_id: u32,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    pub fn next_game_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    pub fn append(&mut self, record: ScoreRecord) {
        self.next_id = self.next_id.max(record.game_id.saturating_add(1));
        self.records.push(record);
    }

    pub fn all_records(&self) -> &[ScoreRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<(), ScoreBoardError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ScoreBoardError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let payload = ScoreBoardFile {
            version: SCORE_BOARD_FILE_VERSION,
            saved_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            next_game_id: self.next_id,
            records: &self.records,
        };
        let text = serde_json::to_string_pretty(&payload)?;
        fs::write(path, text).map_err(|source| ScoreBoardError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A missing file is an empty board. Malformed records are skipped so one
    /// bad entry does not lose the rest of the history.
    pub fn load(path: &Path) -> Result<Self, ScoreBoardError> {
        let text = match fs::read_to_string(path) {
            Ok(value) => value,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(ScoreBoardError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let parsed: ScoreBoardFileRaw = serde_json::from_str(&text)?;
        if parsed.version != SCORE_BOARD_FILE_VERSION {
            warn!(
                path = %path.display(),
                version = parsed.version,
                "unsupported score board version"
            );
            return Err(ScoreBoardError::UnsupportedVersion(parsed.version));
        }

        let mut board = Self::new();
        for (idx, raw) in parsed.records.into_iter().enumerate() {
            match serde_json::from_value::<ScoreRecord>(raw) {
                Ok(record) if record.score.is_finite() => board.append(record),
                Ok(record) => {
                    warn!(
                        index = idx,
                        game_id = record.game_id,
                        "dropping record with non-finite score"
                    );
                }
                Err(error) => {
                    warn!(
                        index = idx,
                        path = %path.display(),
                        %error,
                        "dropping unreadable record"
                    );
                }
            }
        }
        board.next_id = board.next_id.max(parsed.next_game_id);
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn record(game_id: u32, player_name: &str, score: f64) -> ScoreRecord {
        ScoreRecord {
            game_id,
            player_name: player_name.to_string(),
            food_eaten: 2,
            monsters_killed: 1,
            hits: 3,
            moves: 10,
            score,
        }
    }

    fn temp_file(name: &str) -> PathBuf {
        let unique = format!(
            "{}-{}-{}",
            name,
            std::process::id(),
            rand::random::<u32>()
        );
        std::env::temp_dir().join(unique).join("scores.json")
    }

    #[test]
    fn game_ids_start_at_one_and_increase() {
        let mut board = ScoreBoard::new();
        assert_eq!(board.next_game_id(), 1);
        assert_eq!(board.next_game_id(), 2);
        assert_eq!(board.next_game_id(), 3);
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut board = ScoreBoard::default();
        assert!(board.is_empty());
        board.append(record(1, "Alice", 16.0));
        board.append(record(2, "Bob", 3.5));
        board.append(record(3, "Alice", -2.0));

        let names: Vec<&str> = board
            .all_records()
            .iter()
            .map(|entry| entry.player_name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "Bob", "Alice"]);
        assert_eq!(board.len(), 3);
        assert_eq!(board.next_game_id(), 4);
    }

    #[test]
    fn save_then_load_restores_records_and_counter() {
        let path = temp_file("score-board-save");
        let mut board = ScoreBoard::new();
        let id = board.next_game_id();
        board.append(record(id, "Player 1", 16.0));
        board.next_game_id();
        board.save(&path).expect("save board");

        let text = fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(value["version"], 1);
        assert!(value["savedAt"].as_str().is_some_and(|s| s.ends_with('Z')));
        assert_eq!(value["records"][0]["playerName"], "Player 1");

        let mut loaded = ScoreBoard::load(&path).expect("load board");
        assert_eq!(loaded.all_records(), board.all_records());
        assert_eq!(loaded.next_game_id(), 3);

        let _ = fs::remove_file(&path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn missing_file_loads_as_empty_board() {
        let path = temp_file("score-board-missing");
        let mut board = ScoreBoard::load(&path).expect("missing file is fine");
        assert!(board.is_empty());
        assert_eq!(board.next_game_id(), 1);
    }

    #[test]
    fn load_skips_malformed_records() {
        let path = temp_file("score-board-partial");
        let parent = path.parent().expect("parent exists").to_path_buf();
        fs::create_dir_all(&parent).expect("create dir");
        let raw = r#"{
  "version": 1,
  "records": [
    {
      "gameId": 4,
      "playerName": "Alice",
      "foodEaten": 1,
      "monstersKilled": 0,
      "hits": 4,
      "moves": 12,
      "score": 15.0
    },
    {
      "gameId": "broken",
      "playerName": "Bob"
    }
  ]
}"#;
        fs::write(&path, raw).expect("write file");

        let mut board = ScoreBoard::load(&path).expect("load board");
        assert_eq!(board.len(), 1);
        assert_eq!(board.all_records()[0].player_name, "Alice");
        assert_eq!(board.next_game_id(), 5);

        let _ = fs::remove_dir_all(&parent);
    }

    #[test]
    fn load_rejects_unknown_version() {
        let path = temp_file("score-board-version");
        let parent = path.parent().expect("parent exists").to_path_buf();
        fs::create_dir_all(&parent).expect("create dir");
        fs::write(&path, r#"{"version": 9, "records": []}"#).expect("write file");

        assert!(matches!(
            ScoreBoard::load(&path),
            Err(ScoreBoardError::UnsupportedVersion(9))
        ));

        let _ = fs::remove_dir_all(&parent);
    }
}

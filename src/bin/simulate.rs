use clap::Parser;
use pacman_maze_engine::config::SessionConfig;
use pacman_maze_engine::constants::PLAYER_ONE_LABEL;
use pacman_maze_engine::engine::GameSession;
use pacman_maze_engine::error::EngineError;
use pacman_maze_engine::multiplayer::{MatchResult, MultiplayerCoordinator, PlayerSlot};
use pacman_maze_engine::rng::PositionSampler;
use pacman_maze_engine::score_board::ScoreBoard;
use pacman_maze_engine::types::{
    Counters, Direction, FinishReason, GameMode, MazeVariant, SessionEvent, SessionStatus,
};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LENGTH: i32 = 10;
const DEFAULT_WIDTH: i32 = 9;
const DEFAULT_RANDOM_TURNS: usize = 200;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[arg(long)]
    length: Option<i32>,
    #[arg(long)]
    width: Option<i32>,
    #[arg(long)]
    seed: Option<i64>,
    /// 1|2|3 or lower|upper|horizontal
    #[arg(long)]
    variant: Option<String>,
    /// monster|food
    #[arg(long)]
    mode: Option<String>,
    /// Scripted turns as W/A/S/D keys, e.g. "ddssa"
    #[arg(long, conflicts_with = "random_turns")]
    moves: Option<String>,
    #[arg(long)]
    random_turns: Option<usize>,
    #[arg(long)]
    multiplayer: bool,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    scoreboard: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq)]
enum TurnPlan {
    Scripted(Vec<String>),
    RandomWalk(usize),
}

#[derive(Clone, Debug, Serialize)]
struct SessionResultLine {
    #[serde(rename = "gameId")]
    game_id: u32,
    player: String,
    mode: GameMode,
    variant: MazeVariant,
    seed: i64,
    status: SessionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<FinishReason>,
    alive: bool,
    counters: Counters,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    turns: usize,
    #[serde(rename = "rejectedTokens")]
    rejected_tokens: usize,
    grid: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
struct MatchResultLine<'a> {
    #[serde(rename = "gameId")]
    game_id: u32,
    #[serde(flatten)]
    result: &'a MatchResult,
}

#[derive(Clone, Copy, Debug, Default)]
struct TurnStats {
    turns: usize,
    rejected_tokens: usize,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            error!(%message, "invalid arguments");
            std::process::exit(2);
        }
    };
    if let Err(error) = config.validate() {
        error!(%error, "invalid configuration");
        std::process::exit(2);
    }
    let plan = resolve_plan(&cli);

    let mut board = match cli.scoreboard.as_deref() {
        Some(path) => match ScoreBoard::load(path) {
            Ok(board) => board,
            Err(error) => {
                error!(path = %path.display(), %error, "failed to load score board");
                std::process::exit(2);
            }
        },
        None => ScoreBoard::new(),
    };
    let game_id = board.next_game_id();

    info!(
        game_id,
        seed = config.seed,
        variant = ?config.variant,
        mode = ?config.mode,
        multiplayer = cli.multiplayer,
        "simulation started"
    );

    let finished = if cli.multiplayer {
        run_match(config, game_id, &plan, &mut board)
    } else {
        run_single(config, game_id, &plan, &mut board)
    };
    let finished = match finished {
        Ok(finished) => finished,
        Err(error) => {
            error!(%error, "failed to create session");
            std::process::exit(2);
        }
    };

    if let Some(path) = cli.scoreboard.as_deref() {
        if let Err(error) = board.save(path) {
            error!(path = %path.display(), %error, "failed to save score board");
            std::process::exit(2);
        }
    }

    info!(game_id, finished, records = board.len(), "simulation finished");
    if !finished {
        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run_single(
    config: SessionConfig,
    game_id: u32,
    plan: &TurnPlan,
    board: &mut ScoreBoard,
) -> Result<bool, EngineError> {
    let mut session = GameSession::new(config, game_id, PLAYER_ONE_LABEL)?;
    let mut turns = TurnSource::new(plan, session.config().seed, 0);
    let mut stats = TurnStats::default();
    while !session.is_finished() {
        let Some(token) = turns.next_token() else {
            break;
        };
        match session.request_move_token(&token) {
            Ok(_) => stats.turns += 1,
            Err(error) => {
                warn!(%token, %error, "rejected turn");
                stats.rejected_tokens += 1;
            }
        }
        log_events(game_id, session.drain_events());
    }

    print_line(&session_line(&session, stats));
    if let Some(record) = session.score_record() {
        board.append(record.clone());
    }
    Ok(session.is_finished())
}

fn run_match(
    config: SessionConfig,
    game_id: u32,
    plan: &TurnPlan,
    board: &mut ScoreBoard,
) -> Result<bool, EngineError> {
    let seed = config.seed;
    let mut coordinator = MultiplayerCoordinator::new(config, game_id)?;
    let mut stats = [TurnStats::default(); 2];

    while let Some(slot) = coordinator.active_player() {
        let idx = slot_index(slot);
        let mut turns = TurnSource::new(plan, seed, idx as i64);
        while coordinator.active_player() == Some(slot) {
            let Some(token) = turns.next_token() else {
                break;
            };
            match coordinator.request_move_token(&token) {
                Ok(_) => stats[idx].turns += 1,
                Err(error) => {
                    warn!(%token, %error, "rejected turn");
                    stats[idx].rejected_tokens += 1;
                }
            }
        }
        if coordinator.active_player() == Some(slot) {
            warn!(game_id, ?slot, "turns exhausted before the player finished");
            break;
        }
    }

    for slot in [PlayerSlot::One, PlayerSlot::Two] {
        print_line(&session_line(coordinator.session(slot), stats[slot_index(slot)]));
    }
    match coordinator.result() {
        Some(result) => {
            print_line(&MatchResultLine { game_id, result });
            board.append(result.record.clone());
            Ok(true)
        }
        None => Ok(false),
    }
}

fn resolve_config(cli: &Cli) -> Result<SessionConfig, String> {
    let mut config = match cli.config.as_deref() {
        Some(path) => SessionConfig::load(path)
            .map_err(|error| format!("failed to read {}: {error}", path.display()))?,
        None => SessionConfig::new(
            default_seed(),
            MazeVariant::Horizontal,
            DEFAULT_LENGTH,
            DEFAULT_WIDTH,
            GameMode::MonsterMaze,
        ),
    };
    if let Some(length) = cli.length {
        config.length = length;
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(raw) = cli.variant.as_deref() {
        config.variant = MazeVariant::parse(raw).ok_or_else(|| format!("unknown variant {raw:?}"))?;
    }
    if let Some(raw) = cli.mode.as_deref() {
        config.mode = GameMode::parse(raw).ok_or_else(|| format!("unknown mode {raw:?}"))?;
    }
    Ok(config)
}

fn resolve_plan(cli: &Cli) -> TurnPlan {
    match (&cli.moves, cli.random_turns) {
        (Some(script), _) => TurnPlan::Scripted(split_script(script)),
        (None, Some(count)) => TurnPlan::RandomWalk(count),
        (None, None) => TurnPlan::RandomWalk(DEFAULT_RANDOM_TURNS),
    }
}

/// Single keys run together ("wasd"), words need a separator ("up,left").
fn split_script(script: &str) -> Vec<String> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|chunk| !chunk.is_empty())
        .flat_map(|chunk| {
            let whole_word = chunk.chars().count() > 1 && !is_key_run(chunk);
            if Direction::parse_move(chunk).is_some() || whole_word {
                vec![chunk.to_string()]
            } else {
                chunk.chars().map(|c| c.to_string()).collect()
            }
        })
        .collect()
}

fn is_key_run(chunk: &str) -> bool {
    chunk
        .chars()
        .all(|c| matches!(c.to_ascii_lowercase(), 'w' | 'a' | 's' | 'd'))
}

fn default_seed() -> i64 {
    rand::rng().random_range(1..=i64::from(i32::MAX))
}

fn slot_index(slot: PlayerSlot) -> usize {
    match slot {
        PlayerSlot::One => 0,
        PlayerSlot::Two => 1,
    }
}

struct TurnSource<'a> {
    plan: &'a TurnPlan,
    sampler: PositionSampler,
    emitted: usize,
}

impl<'a> TurnSource<'a> {
    fn new(plan: &'a TurnPlan, seed: i64, player_offset: i64) -> Self {
        Self {
            plan,
            sampler: PositionSampler::from_seed(seed.wrapping_add(1 + player_offset)),
            emitted: 0,
        }
    }

    fn next_token(&mut self) -> Option<String> {
        let token = match self.plan {
            TurnPlan::Scripted(tokens) => tokens.get(self.emitted)?.clone(),
            TurnPlan::RandomWalk(limit) => {
                if self.emitted >= *limit {
                    return None;
                }
                let dir = Direction::ALL[self.sampler.pick_index(Direction::ALL.len())];
                direction_key(dir).to_string()
            }
        };
        self.emitted += 1;
        Some(token)
    }
}

fn direction_key(dir: Direction) -> &'static str {
    match dir {
        Direction::Up => "w",
        Direction::Down => "s",
        Direction::Left => "a",
        Direction::Right => "d",
    }
}

fn session_line(session: &GameSession, stats: TurnStats) -> SessionResultLine {
    let config = session.config();
    SessionResultLine {
        game_id: session.game_id(),
        player: session.player_name().to_string(),
        mode: config.mode,
        variant: config.variant,
        seed: config.seed,
        status: session.status(),
        reason: session.finish_reason(),
        alive: session.is_alive(),
        counters: *session.counters(),
        score: session.score().ok(),
        turns: stats.turns,
        rejected_tokens: stats.rejected_tokens,
        grid: session.render_rows(),
    }
}

fn log_events(game_id: u32, events: Vec<SessionEvent>) {
    for event in events {
        match event {
            SessionEvent::MonsterKilled { kind, at } => {
                info!(game_id, ?kind, row = at.row, col = at.col, "monster killed")
            }
            SessionEvent::ActorDied { killed_by, at } => {
                info!(game_id, ?killed_by, row = at.row, col = at.col, "actor died")
            }
            _ => {}
        }
    }
}

fn print_line<T: Serialize>(line: &T) {
    match serde_json::to_string(line) {
        Ok(text) => println!("{text}"),
        Err(error) => error!(%error, "failed to serialize result line"),
    }
}

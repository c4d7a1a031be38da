//! Self-play training and evaluation sessions for tic-tac-toe value learning

use std::{collections::HashMap, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    adapters::{ExternalAgent, MoveSource},
    app::TicTacToeConfig,
    ports::{Agent, Observer},
    referee::Referee,
    td::{SavedValueTable, TdAgent, TdAgentConfig, ValueTable},
    tictactoe::{GameOutcome, Player, StateSpace},
};

/// Outcome tallies of a session, from the seats' point of view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Total games played
    pub games: usize,
    /// Games won by the first seat (X)
    pub first_wins: usize,
    /// Games won by the second seat (O)
    pub second_wins: usize,
    /// Drawn games
    pub draws: usize,
}

impl MatchSummary {
    fn new() -> Self {
        Self {
            games: 0,
            first_wins: 0,
            second_wins: 0,
            draws: 0,
        }
    }

    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.first_wins += 1,
            GameOutcome::Win(Player::O) => self.second_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
        self.games += 1;
    }

    fn rate(&self, count: usize) -> f64 {
        if self.games > 0 {
            count as f64 / self.games as f64
        } else {
            0.0
        }
    }

    pub fn first_win_rate(&self) -> f64 {
        self.rate(self.first_wins)
    }

    pub fn second_win_rate(&self) -> f64 {
        self.rate(self.second_wins)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Save summary to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Owns the state space and the learned tables of both roles
pub struct SelfPlay {
    config: TicTacToeConfig,
    space: StateSpace,
    value_tables: HashMap<Player, ValueTable>,
    observers: Vec<Box<dyn Observer>>,
}

impl SelfPlay {
    /// Validate the configuration and enumerate the state space.
    pub fn new(config: TicTacToeConfig) -> Result<Self> {
        config.validate()?;
        let space = StateSpace::enumerate(config.dimension)?;
        Ok(Self {
            config,
            space,
            value_tables: HashMap::new(),
            observers: Vec::new(),
        })
    }

    /// Add an observer to every subsequent session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn space(&self) -> &StateSpace {
        &self.space
    }

    pub fn value_table(&self, role: Player) -> Option<&ValueTable> {
        self.value_tables.get(&role)
    }

    /// Install a previously trained table for its role.
    pub fn set_value_table(&mut self, table: ValueTable) -> Result<()> {
        if table.len() != self.space.len() {
            return Err(Error::ValueTableMismatch {
                expected: self.space.len(),
                got: table.len(),
            });
        }
        self.value_tables.insert(table.role(), table);
        Ok(())
    }

    fn agent_config(&self, offset: u64, greedy: bool) -> TdAgentConfig {
        let mut config = self.config.agent.clone();
        config.seed = self.config.seed.map(|seed| seed.wrapping_add(offset));
        if greedy {
            config.explore_rate = 0.0;
        }
        config
    }

    fn stored_table(&self, role: Player) -> Result<ValueTable> {
        self.value_tables
            .get(&role)
            .cloned()
            .ok_or(Error::MissingValueTable { role })
    }

    /// Train two fresh learners against each other for `epochs` games.
    ///
    /// Both learned tables are kept, replacing any earlier ones.
    pub fn train(&mut self, epochs: usize) -> Result<MatchSummary> {
        let mut first = TdAgent::new(Player::X, &self.space, &self.agent_config(0, false));
        let mut second = TdAgent::new(Player::O, &self.space, &self.agent_config(1, false));

        let summary = {
            let mut referee = Referee::new(&self.space, &mut first, &mut second, true)?
                .with_draw_rewards(self.config.draw_rewards);
            run_games(&mut self.observers, "train", epochs, &mut referee)?
        };

        self.value_tables.insert(Player::X, first.into_value_table());
        self.value_tables.insert(Player::O, second.into_value_table());
        Ok(summary)
    }

    /// Pit the stored tables against each other greedily, without learning.
    pub fn compete(&mut self, turns: usize) -> Result<MatchSummary> {
        let mut first = TdAgent::new(Player::X, &self.space, &self.agent_config(0, true))
            .with_value_table(self.stored_table(Player::X)?)?;
        let mut second = TdAgent::new(Player::O, &self.space, &self.agent_config(1, true))
            .with_value_table(self.stored_table(Player::O)?)?;

        let mut referee = Referee::new(&self.space, &mut first, &mut second, false)?;
        run_games(&mut self.observers, "compete", turns, &mut referee)
    }

    /// Play one game of an external agent against the greedy table of the
    /// other role. The external agent opens when `external_role` is X.
    pub fn play_external<S: MoveSource>(
        &self,
        source: S,
        external_role: Player,
    ) -> Result<GameOutcome> {
        let ai_role = external_role.opponent();
        let offset = match ai_role {
            Player::X => 0,
            Player::O => 1,
        };
        let mut ai = TdAgent::new(ai_role, &self.space, &self.agent_config(offset, true))
            .with_value_table(self.stored_table(ai_role)?)?;
        let mut external = ExternalAgent::new(external_role, source);

        let mut referee = match external_role {
            Player::X => Referee::new(&self.space, &mut external, &mut ai, false)?,
            Player::O => Referee::new(&self.space, &mut ai, &mut external, false)?,
        };
        referee.play()
    }

    /// Write both stored tables into `dir` as `value_x.msgpack` / `value_o.msgpack`.
    pub fn save_tables<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|source| Error::Io {
            operation: format!("create {}", dir.display()),
            source,
        })?;
        for role in [Player::X, Player::O] {
            let table = self.stored_table(role)?;
            SavedValueTable::new(&table, &self.space).save_to_file(dir.join(table_file(role)))?;
        }
        Ok(())
    }

    /// Load both tables written by [`SelfPlay::save_tables`].
    pub fn load_tables<P: AsRef<Path>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for role in [Player::X, Player::O] {
            let saved = SavedValueTable::load_from_file(dir.join(table_file(role)))?;
            let table = saved.to_table(&self.space)?;
            self.set_value_table(table)?;
        }
        Ok(())
    }
}

fn table_file(role: Player) -> &'static str {
    match role {
        Player::X => "value_x.msgpack",
        Player::O => "value_o.msgpack",
    }
}

fn run_games(
    observers: &mut [Box<dyn Observer>],
    label: &str,
    games: usize,
    referee: &mut Referee<'_>,
) -> Result<MatchSummary> {
    for observer in observers.iter_mut() {
        observer.on_session_start(label, games)?;
    }

    let mut summary = MatchSummary::new();
    for game_num in 0..games {
        let outcome = referee.play()?;
        summary.record(outcome);
        for observer in observers.iter_mut() {
            observer.on_game_end(game_num, outcome)?;
        }
    }

    for observer in observers.iter_mut() {
        observer.on_session_end()?;
    }

    tracing::info!(
        session = label,
        games = summary.games,
        first_win_rate = summary.first_win_rate(),
        second_win_rate = summary.second_win_rate(),
        draw_rate = summary.draw_rate(),
        "session summary"
    );
    Ok(summary)
}

//! Snake drafts: the pick order reverses every round.

use crate::core::roster::Roster;
use crate::domain::model::{Pick, Player};
use crate::utils::error::{FantasyError, Result};
use std::fmt;

#[derive(Debug, Clone)]
pub struct SnakeDraft {
    rosters: Vec<Roster>,
    nrounds: usize,
    /// Number of picks made so far.
    cursor: usize,
    /// `results[round][team]`, both 0-based.
    results: Vec<Vec<Option<Player>>>,
}

fn draft_error(message: impl Into<String>) -> FantasyError {
    FantasyError::DraftError {
        message: message.into(),
    }
}

impl SnakeDraft {
    pub fn new(rosters: Vec<Roster>, nrounds: usize) -> Result<Self> {
        if rosters.is_empty() {
            return Err(draft_error("a draft needs at least one roster"));
        }
        if nrounds == 0 {
            return Err(draft_error("a draft needs at least one round"));
        }

        let nteams = rosters.len();
        Ok(Self {
            rosters,
            nrounds,
            cursor: 0,
            results: vec![vec![None; nteams]; nrounds],
        })
    }

    pub fn rosters(&self) -> &[Roster] {
        &self.rosters
    }

    pub fn into_rosters(self) -> Vec<Roster> {
        self.rosters
    }

    pub fn nrounds(&self) -> usize {
        self.nrounds
    }

    pub fn nteams(&self) -> usize {
        self.rosters.len()
    }

    /// Total number of picks in the draft.
    pub fn volume(&self) -> usize {
        self.nrounds * self.nteams()
    }

    /// Number of picks made so far.
    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_complete(&self) -> bool {
        self.cursor == self.volume()
    }

    pub fn results(&self) -> &[Vec<Option<Player>>] {
        &self.results
    }

    /// Overall pick numbers indexed by `[round][team]`.
    pub fn rounds(&self) -> Vec<Vec<usize>> {
        let n = self.nteams();
        (0..self.nrounds)
            .map(|round| {
                (0..n)
                    .map(|team| {
                        if round % 2 == 0 {
                            round * n + team + 1
                        } else {
                            round * n + (n - team)
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn check_pick(&self, pick: usize) -> Result<()> {
        if pick == 0 || pick > self.volume() {
            return Err(draft_error(format!(
                "pick {} is outside 1..={}",
                pick,
                self.volume()
            )));
        }
        Ok(())
    }

    /// 1-based round containing an overall pick number.
    pub fn round_of(&self, pick: usize) -> Result<usize> {
        self.check_pick(pick)?;
        Ok((pick - 1) / self.nteams() + 1)
    }

    /// Index of the roster selecting at an overall pick number.
    pub fn team_for_pick(&self, pick: usize) -> Result<usize> {
        self.check_pick(pick)?;
        let n = self.nteams();
        let offset = (pick - 1) % n;
        if ((pick - 1) / n) % 2 == 0 {
            Ok(offset)
        } else {
            Ok(n - 1 - offset)
        }
    }

    /// The next pick, without changing the draft.
    pub fn peek(&self) -> Option<Pick> {
        if self.is_complete() {
            return None;
        }
        Some(Pick {
            round: self.cursor / self.nteams() + 1,
            pick: self.cursor + 1,
        })
    }

    pub fn is_drafted(&self, player: &Player) -> bool {
        self.results.iter().flatten().flatten().any(|p| p == player)
    }

    /// Records `player` as the next pick and adds them to the picking roster.
    pub fn push(&mut self, player: Player) -> Result<Pick> {
        let next = self
            .peek()
            .ok_or_else(|| draft_error("the draft is complete"))?;
        if self.is_drafted(&player) {
            return Err(draft_error(format!("{} has already been drafted", player)));
        }

        let team = self.team_for_pick(next.pick)?;
        let added = self.rosters[team].add(std::slice::from_ref(&player))?;
        if added.is_empty() {
            return Err(draft_error(format!(
                "could not add {} to the roster of team {}",
                player,
                team + 1
            )));
        }

        tracing::debug!(
            "Round {} pick {}: team {} selects {}",
            next.round,
            next.pick,
            team + 1,
            player
        );
        self.results[next.round - 1][team] = Some(player);
        self.cursor += 1;

        Ok(next)
    }

    /// Undoes the latest pick, returning the player it selected.
    pub fn pop(&mut self) -> Result<Option<Player>> {
        if self.is_empty() {
            return Ok(None);
        }

        let pick = self.cursor;
        let round = self.round_of(pick)?;
        let team = self.team_for_pick(pick)?;
        let player = self.results[round - 1][team]
            .clone()
            .ok_or_else(|| draft_error(format!("pick {} has no recorded player", pick)))?;

        self.rosters[team].drop(std::slice::from_ref(&player))?;
        self.results[round - 1][team] = None;
        self.cursor -= 1;

        tracing::debug!("Undid pick {}: {}", pick, player);
        Ok(Some(player))
    }

    /// Undoes every pick, returning the rosters to their pre-draft state.
    pub fn reset(&mut self) -> Result<()> {
        while self.pop()?.is_some() {}
        Ok(())
    }

    /// Picks made so far as `(pick, team index, player)`, in draft order.
    pub fn picks(&self) -> Vec<(Pick, usize, &Player)> {
        (1..=self.cursor)
            .filter_map(|pick| {
                let round = (pick - 1) / self.nteams() + 1;
                let team = self.team_for_pick(pick).ok()?;
                self.results[round - 1][team]
                    .as_ref()
                    .map(|player| (Pick { round, pick }, team, player))
            })
            .collect()
    }

    /// Picks as CSV rows of `round,pick,team,name,position`.
    pub fn to_csv(&self, team_names: &[String]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["round", "pick", "team", "name", "position"])?;

        for (pick, team, player) in self.picks() {
            let team_name = team_names
                .get(team)
                .cloned()
                .unwrap_or_else(|| format!("Team {}", team + 1));
            writer.write_record([
                pick.round.to_string(),
                pick.pick.to_string(),
                team_name,
                player.name.clone(),
                player.position.clone(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| FantasyError::IoError(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| draft_error(e.to_string()))
    }

    /// Runs the remaining picks from a ranked player pool.
    ///
    /// Each team takes the highest-ranked undrafted player who fills an open
    /// starting slot, falling back to the highest-ranked one that fits at all.
    pub fn draft_best_available(&mut self, pool: &[Player]) -> Result<Vec<Pick>> {
        let mut made = Vec::new();

        while let Some(next) = self.peek() {
            let team = self.team_for_pick(next.pick)?;
            let roster = &self.rosters[team];

            let available: Vec<&Player> = pool.iter().filter(|p| !self.is_drafted(p)).collect();
            let choice = available
                .iter()
                .find(|p| roster.starts(p))
                .or_else(|| available.iter().find(|p| roster.has_room_for(p)))
                .map(|p| (*p).clone());

            match choice {
                Some(player) => made.push(self.push(player)?),
                None => {
                    tracing::warn!(
                        "No eligible player left for team {} at pick {}; stopping",
                        team + 1,
                        next.pick
                    );
                    break;
                }
            }
        }

        Ok(made)
    }
}

impl fmt::Display for SnakeDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (round, teams) in self.results.iter().enumerate() {
            write!(f, "Round {:>2}:", round + 1)?;
            for player in teams {
                match player {
                    Some(player) => write!(f, " | {}", player.name)?,
                    None => write!(f, " | -")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

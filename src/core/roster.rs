//! Roster position schemata and roster manipulation.
//!
//! Slot eligibility by a player's natural position:
//!
//! | slot  | QB | RB | WR | TE | DEF | K |
//! |-------|----|----|----|----|-----|---|
//! | own   | X  | X  | X  | X  | X   | X |
//! | flex  |    | X  | X  | X  |     |   |
//! | bench | X  | X  | X  | X  | X   | X |
//! | IR    | *  | *  | *  | *  | *   | * |
//!
//! `*` only when the player is flagged as injured-reserve eligible.

use crate::domain::model::{Player, Provider, TradeSummary, Transaction};
use crate::utils::error::{FantasyError, Result};
use std::collections::HashMap;
use std::fmt;

pub const OFFENSE: [&str; 4] = ["QB", "RB", "WR", "TE"];
pub const KICKER: &str = "K";
pub const BENCH: &str = "BN";
pub const INJURED_RESERVE: &str = "IR";

impl Provider {
    pub fn flex(&self) -> &'static str {
        match self {
            Provider::Espn => "FLEX",
            Provider::Yahoo => "W-R-T",
        }
    }

    pub fn dst(&self) -> &'static str {
        match self {
            Provider::Espn => "D/ST",
            Provider::Yahoo => "DEF",
        }
    }

    /// Every roster position code, in display order.
    pub fn positions(&self) -> [&'static str; 9] {
        [
            OFFENSE[0],
            OFFENSE[1],
            OFFENSE[2],
            OFFENSE[3],
            self.flex(),
            self.dst(),
            KICKER,
            BENCH,
            INJURED_RESERVE,
        ]
    }
}

/// Number of roster slots per position code for one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positions {
    provider: Provider,
    schema: Vec<(&'static str, usize)>,
}

impl Positions {
    /// The schema must name every position of `provider` exactly once.
    pub fn new<S, I>(provider: Provider, schema: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, usize)>,
    {
        let mut given: HashMap<String, usize> = HashMap::new();
        for (key, slots) in schema {
            let key: String = key.into();
            if given.contains_key(&key) {
                return Err(FantasyError::InvalidSchema {
                    message: format!("{} schema names {} more than once", provider, key),
                });
            }
            given.insert(key, slots);
        }

        let expected = provider.positions();
        let mut unknown: Vec<&str> = given
            .keys()
            .map(String::as_str)
            .filter(|k| !expected.contains(k))
            .collect();
        unknown.sort_unstable();
        let missing: Vec<&str> = expected
            .iter()
            .copied()
            .filter(|k| !given.contains_key(*k))
            .collect();

        if !unknown.is_empty() || !missing.is_empty() {
            return Err(FantasyError::InvalidSchema {
                message: format!(
                    "{} schema mismatch (missing: [{}], unknown: [{}])",
                    provider,
                    missing.join(", "),
                    unknown.join(", ")
                ),
            });
        }

        let schema = expected.iter().map(|k| (*k, given[*k])).collect();
        Ok(Self { provider, schema })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn flex(&self) -> &'static str {
        self.provider.flex()
    }

    pub fn dst(&self) -> &'static str {
        self.provider.dst()
    }

    pub fn positions(&self) -> [&'static str; 9] {
        self.provider.positions()
    }

    pub fn schema(&self) -> &[(&'static str, usize)] {
        &self.schema
    }

    /// Total number of roster slots.
    pub fn len(&self) -> usize {
        self.schema.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, position: &str) -> bool {
        self.schema.iter().any(|(k, _)| *k == position)
    }

    pub fn slots(&self, position: &str) -> Result<usize> {
        self.schema
            .iter()
            .find(|(k, _)| *k == position)
            .map(|(_, n)| *n)
            .ok_or_else(|| FantasyError::UnknownPosition {
                position: position.to_string(),
            })
    }

    /// Whether a natural position may fill the flex slot.
    pub fn flexable(position: &str) -> bool {
        OFFENSE.contains(&position) && position != "QB"
    }

    /// Natural positions a player may carry: offense, defense and kicker.
    pub fn is_player_position(&self, position: &str) -> bool {
        OFFENSE.contains(&position) || position == self.dst() || position == KICKER
    }

    pub fn validate(&self, players: &[Player]) -> Result<()> {
        match players
            .iter()
            .find(|p| !self.is_player_position(&p.position))
        {
            Some(player) => Err(FantasyError::UnknownPosition {
                position: player.position.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn moveable(&self, player: &Player, destination: &str) -> Result<bool> {
        self.validate(std::slice::from_ref(player))?;
        if !self.contains(destination) {
            return Err(FantasyError::UnknownPosition {
                position: destination.to_string(),
            });
        }

        Ok(destination == BENCH
            || destination == player.position
            || (player.injured_reserve && destination == INJURED_RESERVE)
            || (Self::flexable(&player.position) && destination == self.flex()))
    }
}

impl fmt::Display for Positions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, slots) in &self.schema {
            writeln!(f, "{:<6} {:>3}", position, slots)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotRef {
    position: usize,
    slot: usize,
}

/// Fixed-size slots per roster position, filled with players.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    positions: Positions,
    slots: Vec<Vec<Option<Player>>>,
}

impl Roster {
    pub fn new(positions: Positions, players: &[Player]) -> Result<Self> {
        let slots = positions
            .schema()
            .iter()
            .map(|(_, n)| vec![None; *n])
            .collect();
        let mut roster = Self { positions, slots };

        let added = roster.add(players)?;
        if added.len() < players.len() {
            tracing::warn!(
                "Roster full: {} of {} players placed",
                added.len(),
                players.len()
            );
        }
        Ok(roster)
    }

    pub fn positions(&self) -> &Positions {
        &self.positions
    }

    fn index_of(&self, position: &str) -> Result<usize> {
        self.positions
            .schema()
            .iter()
            .position(|(k, _)| *k == position)
            .ok_or_else(|| FantasyError::UnknownPosition {
                position: position.to_string(),
            })
    }

    fn open_slot(&self, position: &str) -> Result<Option<SlotRef>> {
        let index = self.index_of(position)?;
        Ok(self.slots[index]
            .iter()
            .position(Option::is_none)
            .map(|slot| SlotRef {
                position: index,
                slot,
            }))
    }

    fn locate(&self, player: &Player) -> Option<SlotRef> {
        self.slots.iter().enumerate().find_map(|(position, slots)| {
            slots
                .iter()
                .position(|p| p.as_ref() == Some(player))
                .map(|slot| SlotRef { position, slot })
        })
    }

    fn position_code(&self, at: SlotRef) -> &'static str {
        self.positions.schema()[at.position].0
    }

    pub fn contains(&self, player: &Player) -> bool {
        self.locate(player).is_some()
    }

    /// Roster position code currently holding `player`.
    pub fn position_of(&self, player: &Player) -> Option<&'static str> {
        self.locate(player).map(|at| self.position_code(at))
    }

    fn has_open(&self, position: &str) -> bool {
        matches!(self.open_slot(position), Ok(Some(_)))
    }

    /// Whether `player` would take a starting slot (own position or flex).
    pub fn starts(&self, player: &Player) -> bool {
        self.has_open(&player.position)
            || (Positions::flexable(&player.position) && self.has_open(self.positions.flex()))
    }

    pub fn has_room_for(&self, player: &Player) -> bool {
        self.positions.is_player_position(&player.position)
            && (self.starts(player) || self.has_open(BENCH))
    }

    pub fn players(&self) -> Vec<&Player> {
        self.slots.iter().flatten().flatten().collect()
    }

    /// Every slot as `(position, slot index, occupant)`.
    pub fn slots(&self) -> Vec<(&'static str, usize, Option<&Player>)> {
        self.positions
            .schema()
            .iter()
            .zip(&self.slots)
            .flat_map(|((code, _), slots)| {
                slots
                    .iter()
                    .enumerate()
                    .map(move |(i, p)| (*code, i, p.as_ref()))
            })
            .collect()
    }

    /// Places each player in their own position, then flex, then bench.
    /// Players that fit nowhere are skipped; the placed ones are returned.
    pub fn add(&mut self, players: &[Player]) -> Result<Vec<Player>> {
        self.positions.validate(players)?;

        let mut added = Vec::new();
        for player in players {
            if self.contains(player) {
                tracing::warn!("{} is already on the roster", player);
                continue;
            }

            let mut target = self.open_slot(&player.position)?;
            if target.is_none() && Positions::flexable(&player.position) {
                target = self.open_slot(self.positions.flex())?;
            }
            if target.is_none() {
                target = self.open_slot(BENCH)?;
            }

            match target {
                Some(at) => {
                    tracing::debug!("Adding {} at {}", player, self.position_code(at));
                    self.slots[at.position][at.slot] = Some(player.clone());
                    added.push(player.clone());
                }
                None => tracing::debug!("No open slot for {}", player),
            }
        }

        Ok(added)
    }

    /// Removes every player, or none of them if any is not on the roster.
    pub fn drop(&mut self, players: &[Player]) -> Result<Vec<Player>> {
        self.positions.validate(players)?;

        let mut found = Vec::with_capacity(players.len());
        for player in players {
            let at = self
                .locate(player)
                .ok_or_else(|| FantasyError::PlayerNotOnRoster {
                    player: player.to_string(),
                })?;
            found.push(at);
        }

        let mut dropped = Vec::with_capacity(found.len());
        for at in found {
            if let Some(player) = self.slots[at.position][at.slot].take() {
                tracing::debug!("Dropped {} from {}", player, self.position_code(at));
                dropped.push(player);
            }
        }

        Ok(dropped)
    }

    /// Moves a rostered player to another roster position. When the destination
    /// is full, `replace` names the occupant that takes the vacated slot.
    pub fn move_player(
        &mut self,
        player: &Player,
        destination: &str,
        replace: Option<&Player>,
    ) -> Result<()> {
        if !self.positions.moveable(player, destination)? {
            return Err(FantasyError::IllegalMove {
                player: player.to_string(),
                destination: destination.to_string(),
            });
        }

        let source = self
            .locate(player)
            .ok_or_else(|| FantasyError::PlayerNotOnRoster {
                player: player.to_string(),
            })?;
        let source_code = self.position_code(source);
        if source_code == destination {
            return Ok(());
        }

        match replace {
            Some(other) => {
                let at = self
                    .locate(other)
                    .filter(|at| self.position_code(*at) == destination)
                    .ok_or_else(|| FantasyError::PlayerNotOnRoster {
                        player: other.to_string(),
                    })?;
                if !self.positions.moveable(other, source_code)? {
                    return Err(FantasyError::IllegalMove {
                        player: other.to_string(),
                        destination: source_code.to_string(),
                    });
                }

                self.slots[at.position][at.slot] = Some(player.clone());
                self.slots[source.position][source.slot] = Some(other.clone());
            }
            None => {
                let at = self
                    .open_slot(destination)?
                    .ok_or_else(|| FantasyError::SlotFull {
                        position: destination.to_string(),
                    })?;

                self.slots[at.position][at.slot] = self.slots[source.position][source.slot].take();
            }
        }

        tracing::debug!("Moved {} from {} to {}", player, source_code, destination);
        Ok(())
    }

    /// Drops `drop` then adds `add`, so a full roster can swap players.
    pub fn transaction(&mut self, add: &[Player], drop: &[Player]) -> Result<Transaction> {
        self.positions.validate(add)?;
        let dropped = self.drop(drop)?;
        let added = self.add(add)?;

        Ok(Transaction { added, dropped })
    }

    /// Trades `drop` away to `other` in exchange for `add`.
    pub fn trade(
        &mut self,
        other: &mut Roster,
        add: &[Player],
        drop: &[Player],
    ) -> Result<TradeSummary> {
        self.positions.validate(add)?;
        other.positions.validate(drop)?;

        if let Some(missing) = drop.iter().find(|p| !self.contains(p)) {
            return Err(FantasyError::PlayerNotOnRoster {
                player: missing.to_string(),
            });
        }
        if let Some(missing) = add.iter().find(|p| !other.contains(p)) {
            return Err(FantasyError::PlayerNotOnRoster {
                player: missing.to_string(),
            });
        }

        // Both sides are staged on copies so a player that fits nowhere
        // leaves either roster untouched.
        let mut ours = self.clone();
        let mut theirs = other.clone();
        let ours_dropped = ours.drop(drop)?;
        let theirs_dropped = theirs.drop(add)?;
        let ours_added = ours.add(add)?;
        let theirs_added = theirs.add(drop)?;

        let stranded = add
            .iter()
            .find(|p| !ours.contains(p))
            .or_else(|| drop.iter().find(|p| !theirs.contains(p)));
        if let Some(player) = stranded {
            return Err(FantasyError::SlotFull {
                position: player.position.clone(),
            });
        }

        *self = ours;
        *other = theirs;

        Ok(TradeSummary {
            ours: Transaction {
                added: ours_added,
                dropped: ours_dropped,
            },
            theirs: Transaction {
                added: theirs_added,
                dropped: theirs_dropped,
            },
        })
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, slot, player) in self.slots() {
            match player {
                Some(player) => writeln!(f, "{:<6} {:>2}  {}", position, slot, player)?,
                None => writeln!(f, "{:<6} {:>2}  -", position, slot)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn espn_positions() -> Positions {
        Positions::new(
            Provider::Espn,
            [
                ("QB", 1),
                ("RB", 2),
                ("WR", 2),
                ("TE", 1),
                ("FLEX", 1),
                ("D/ST", 1),
                ("K", 1),
                ("BN", 2),
                ("IR", 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_positions_require_exact_schema() {
        let missing = Positions::new(Provider::Yahoo, [("QB", 1), ("RB", 2)]);
        assert!(matches!(missing, Err(FantasyError::InvalidSchema { .. })));

        let mut schema: Vec<(&str, usize)> = Provider::Yahoo
            .positions()
            .iter()
            .map(|p| (*p, 1))
            .collect();
        schema.push(("FLEX", 1));
        let extra = Positions::new(Provider::Yahoo, schema);
        assert!(matches!(extra, Err(FantasyError::InvalidSchema { .. })));
    }

    #[test]
    fn test_positions_reject_repeated_codes() {
        let mut schema: Vec<(&str, usize)> =
            Provider::Espn.positions().iter().map(|p| (*p, 1)).collect();
        schema.push(("QB", 2));

        let result = Positions::new(Provider::Espn, schema);
        assert!(matches!(result, Err(FantasyError::InvalidSchema { .. })));
    }

    #[test]
    fn test_positions_len_and_codes() {
        let positions = espn_positions();

        assert_eq!(positions.len(), 12);
        assert!(positions.contains("D/ST"));
        assert!(!positions.contains("DEF"));
        assert_eq!(positions.slots("BN").unwrap(), 2);
        assert!(positions.to_string().starts_with("QB       1"));
    }

    #[test]
    fn test_flexable_positions() {
        assert!(Positions::flexable("RB"));
        assert!(Positions::flexable("WR"));
        assert!(Positions::flexable("TE"));
        assert!(!Positions::flexable("QB"));
        assert!(!Positions::flexable("K"));
    }

    #[test]
    fn test_moveable_table() {
        let positions = espn_positions();
        let rb = Player::new("Runner", "RB");
        let qb = Player::new("Passer", "QB");
        let hurt = Player::new("Hurt", "WR").injured();

        assert!(positions.moveable(&rb, "RB").unwrap());
        assert!(positions.moveable(&rb, "FLEX").unwrap());
        assert!(positions.moveable(&rb, "BN").unwrap());
        assert!(!positions.moveable(&rb, "WR").unwrap());
        assert!(!positions.moveable(&rb, "IR").unwrap());
        assert!(!positions.moveable(&qb, "FLEX").unwrap());
        assert!(positions.moveable(&hurt, "IR").unwrap());
        assert!(matches!(
            positions.moveable(&rb, "W-R-T"),
            Err(FantasyError::UnknownPosition { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_slot_only_positions() {
        let positions = espn_positions();
        assert!(positions.validate(&[Player::new("Defense", "D/ST")]).is_ok());
        assert!(positions.validate(&[Player::new("Bench", "BN")]).is_err());
        assert!(positions.validate(&[Player::new("Yahoo D", "DEF")]).is_err());
    }

    #[test]
    fn test_add_fills_own_then_flex_then_bench() {
        let mut roster = Roster::new(espn_positions(), &[]).unwrap();
        let rbs: Vec<Player> = (1..=6)
            .map(|i| Player::new(format!("RB{}", i), "RB"))
            .collect();

        let added = roster.add(&rbs).unwrap();

        assert_eq!(added.len(), 5);
        assert_eq!(roster.position_of(&rbs[0]), Some("RB"));
        assert_eq!(roster.position_of(&rbs[1]), Some("RB"));
        assert_eq!(roster.position_of(&rbs[2]), Some("FLEX"));
        assert_eq!(roster.position_of(&rbs[3]), Some("BN"));
        assert_eq!(roster.position_of(&rbs[4]), Some("BN"));
        assert!(!roster.contains(&rbs[5]));
    }

    #[test]
    fn test_quarterbacks_skip_flex() {
        let mut roster = Roster::new(espn_positions(), &[]).unwrap();
        let qbs = [Player::new("QB1", "QB"), Player::new("QB2", "QB")];

        roster.add(&qbs).unwrap();
        assert_eq!(roster.position_of(&qbs[1]), Some("BN"));
    }

    #[test]
    fn test_drop_is_all_or_nothing() {
        let kicker = Player::new("Kicker", "K");
        let mut roster = Roster::new(espn_positions(), std::slice::from_ref(&kicker)).unwrap();

        let result = roster.drop(&[kicker.clone(), Player::new("Stranger", "WR")]);
        assert!(matches!(
            result,
            Err(FantasyError::PlayerNotOnRoster { .. })
        ));
        assert!(roster.contains(&kicker));

        let dropped = roster.drop(std::slice::from_ref(&kicker)).unwrap();
        assert_eq!(dropped, vec![kicker.clone()]);
        assert!(!roster.contains(&kicker));
    }

    #[test]
    fn test_move_to_open_slot() {
        let wr1 = Player::new("WR1", "WR");
        let wr2 = Player::new("WR2", "WR");
        let wr3 = Player::new("WR3", "WR");
        let mut roster =
            Roster::new(espn_positions(), &[wr1.clone(), wr2.clone(), wr3.clone()]).unwrap();
        assert_eq!(roster.position_of(&wr3), Some("FLEX"));

        roster.move_player(&wr3, "BN", None).unwrap();
        assert_eq!(roster.position_of(&wr3), Some("BN"));
        assert_eq!(roster.slots().iter().filter(|s| s.0 == "FLEX" && s.2.is_none()).count(), 1);
    }

    #[test]
    fn test_move_into_full_slot_requires_replacement() {
        let starter = Player::new("Starter", "QB");
        let backup = Player::new("Backup", "QB");
        let mut roster =
            Roster::new(espn_positions(), &[starter.clone(), backup.clone()]).unwrap();

        assert!(matches!(
            roster.move_player(&backup, "QB", None),
            Err(FantasyError::SlotFull { .. })
        ));

        roster.move_player(&backup, "QB", Some(&starter)).unwrap();
        assert_eq!(roster.position_of(&backup), Some("QB"));
        assert_eq!(roster.position_of(&starter), Some("BN"));
    }

    #[test]
    fn test_replacement_must_hold_destination() {
        let starter = Player::new("Starter", "QB");
        let backup = Player::new("Backup", "QB");
        let runner = Player::new("Runner", "RB");
        let mut roster = Roster::new(
            espn_positions(),
            &[starter.clone(), backup.clone(), runner.clone()],
        )
        .unwrap();

        let result = roster.move_player(&backup, "QB", Some(&runner));
        assert!(matches!(
            result,
            Err(FantasyError::PlayerNotOnRoster { ref player }) if player.starts_with("Runner")
        ));
        assert_eq!(roster.position_of(&starter), Some("QB"));
        assert_eq!(roster.position_of(&backup), Some("BN"));
        assert_eq!(roster.position_of(&runner), Some("RB"));
    }

    #[test]
    fn test_replacement_must_fit_source_slot() {
        let starter = Player::new("Starter", "QB");
        let backup = Player::new("Backup", "QB");
        let third = Player::new("Third", "QB");
        let wrs: Vec<Player> = (1..=3)
            .map(|i| Player::new(format!("WR{}", i), "WR"))
            .collect();
        let mut players = vec![starter.clone(), backup.clone(), third.clone()];
        players.extend(wrs.iter().cloned());
        let mut roster = Roster::new(espn_positions(), &players).unwrap();
        assert_eq!(roster.position_of(&wrs[2]), Some("FLEX"));
        assert_eq!(roster.position_of(&backup), Some("BN"));

        let result = roster.move_player(&wrs[2], "BN", Some(&backup));
        assert!(matches!(
            result,
            Err(FantasyError::IllegalMove { ref destination, .. }) if destination == "FLEX"
        ));
        assert_eq!(roster.position_of(&wrs[2]), Some("FLEX"));
        assert_eq!(roster.position_of(&backup), Some("BN"));
        assert_eq!(roster.position_of(&third), Some("BN"));
    }

    #[test]
    fn test_illegal_moves() {
        let te = Player::new("TE", "TE");
        let mut roster = Roster::new(espn_positions(), std::slice::from_ref(&te)).unwrap();

        assert!(matches!(
            roster.move_player(&te, "IR", None),
            Err(FantasyError::IllegalMove { .. })
        ));
        assert!(matches!(
            roster.move_player(&Player::new("Ghost", "TE"), "BN", None),
            Err(FantasyError::PlayerNotOnRoster { .. })
        ));
    }

    #[test]
    fn test_transaction_drops_before_adding() {
        let k1 = Player::new("K1", "K");
        let k2 = Player::new("K2", "K");
        let positions = Positions::new(
            Provider::Yahoo,
            Provider::Yahoo
                .positions()
                .iter()
                .map(|p| (*p, usize::from(*p == "K"))),
        )
        .unwrap();
        let mut roster = Roster::new(positions, std::slice::from_ref(&k1)).unwrap();

        let summary = roster
            .transaction(std::slice::from_ref(&k2), std::slice::from_ref(&k1))
            .unwrap();

        assert_eq!(summary.added, vec![k2.clone()]);
        assert_eq!(summary.dropped, vec![k1]);
        assert_eq!(roster.position_of(&k2), Some("K"));
    }

    #[test]
    fn test_trade_swaps_players() {
        let ours = Player::new("Our RB", "RB");
        let theirs = Player::new("Their WR", "WR");
        let mut a = Roster::new(espn_positions(), std::slice::from_ref(&ours)).unwrap();
        let mut b = Roster::new(espn_positions(), std::slice::from_ref(&theirs)).unwrap();

        let summary = a
            .trade(
                &mut b,
                std::slice::from_ref(&theirs),
                std::slice::from_ref(&ours),
            )
            .unwrap();

        assert_eq!(summary.ours.added, vec![theirs.clone()]);
        assert_eq!(summary.theirs.added, vec![ours.clone()]);
        assert!(a.contains(&theirs) && !a.contains(&ours));
        assert!(b.contains(&ours) && !b.contains(&theirs));
    }

    #[test]
    fn test_trade_rejects_unowned_players() {
        let ours = Player::new("Our RB", "RB");
        let mut a = Roster::new(espn_positions(), std::slice::from_ref(&ours)).unwrap();
        let mut b = Roster::new(espn_positions(), &[]).unwrap();

        let result = a.trade(
            &mut b,
            &[Player::new("Nobody", "WR")],
            std::slice::from_ref(&ours),
        );
        assert!(result.is_err());
        assert!(a.contains(&ours));
    }

    #[test]
    fn test_trade_without_room_changes_nothing() {
        let only_kicker = |provider: Provider, extra: &'static str| {
            Positions::new(
                provider,
                provider
                    .positions()
                    .iter()
                    .map(move |p| (*p, usize::from(*p == "K" || *p == extra))),
            )
            .unwrap()
        };
        let alpha_k = Player::new("Alpha K", "K");
        let bravo_k = Player::new("Bravo K", "K");
        let bravo_rb = Player::new("Bravo RB", "RB");
        let mut alpha =
            Roster::new(only_kicker(Provider::Espn, "K"), std::slice::from_ref(&alpha_k)).unwrap();
        let mut bravo = Roster::new(
            only_kicker(Provider::Espn, "RB"),
            &[bravo_rb.clone(), bravo_k.clone()],
        )
        .unwrap();
        let (alpha_before, bravo_before) = (alpha.clone(), bravo.clone());

        let result = alpha.trade(
            &mut bravo,
            std::slice::from_ref(&bravo_rb),
            std::slice::from_ref(&alpha_k),
        );

        assert!(matches!(result, Err(FantasyError::SlotFull { .. })));
        assert_eq!(alpha, alpha_before);
        assert_eq!(bravo, bravo_before);
        assert!(alpha.contains(&alpha_k));
        assert!(bravo.contains(&bravo_rb) && bravo.contains(&bravo_k));
    }

    #[test]
    fn test_roster_display_lists_every_slot() {
        let roster = Roster::new(espn_positions(), &[Player::new("Passer", "QB")]).unwrap();
        let rendered = roster.to_string();

        assert_eq!(rendered.lines().count(), 12);
        assert!(rendered.starts_with("QB      0  Passer (QB)"));
    }
}

use anyhow::Result;
use nfl_fantasy::{FantasyError, LeagueConfig, Player, Roster};

const LEAGUE: &str = r#"
[league]
name = "Trade Test"
provider = "espn"
teams = ["Alpha", "Bravo"]

[roster]
QB = 1
RB = 1
WR = 1
TE = 1
FLEX = 1
"D/ST" = 1
K = 1
BN = 1
IR = 1
"#;

fn league() -> Result<LeagueConfig> {
    Ok(LeagueConfig::from_toml_str(LEAGUE)?)
}

#[test]
fn test_waiver_transaction_on_full_roster() -> Result<()> {
    let league = league()?;
    let starters = vec![
        Player::new("QB Alpha", "QB"),
        Player::new("RB Alpha", "RB"),
        Player::new("WR Alpha", "WR"),
        Player::new("TE Alpha", "TE"),
        Player::new("RB Flex", "RB"),
        Player::new("Alpha D/ST", "D/ST"),
        Player::new("K Alpha", "K"),
        Player::new("WR Bench", "WR"),
    ];
    let mut roster = Roster::new(league.positions()?, &starters)?;
    assert_eq!(roster.players().len(), 8);
    assert_eq!(roster.position_of(&starters[4]), Some("FLEX"));
    assert_eq!(roster.position_of(&starters[7]), Some("BN"));

    // Nothing fits until a player is dropped.
    let waiver = Player::new("Waiver TE", "TE");
    assert!(roster.add(std::slice::from_ref(&waiver))?.is_empty());

    let summary = roster.transaction(std::slice::from_ref(&waiver), &starters[7..8])?;
    assert_eq!(summary.added, vec![waiver.clone()]);
    assert_eq!(roster.position_of(&waiver), Some("BN"));
    Ok(())
}

#[test]
fn test_injured_player_moves_to_ir_and_frees_slot() -> Result<()> {
    let league = league()?;
    let hurt = Player::new("Hurt RB", "RB").injured();
    let backup = Player::new("Backup RB", "RB");
    let mut roster = Roster::new(league.positions()?, std::slice::from_ref(&hurt))?;

    roster.move_player(&hurt, "IR", None)?;
    assert_eq!(roster.position_of(&hurt), Some("IR"));

    roster.add(std::slice::from_ref(&backup))?;
    assert_eq!(roster.position_of(&backup), Some("RB"));

    let err = roster.move_player(&backup, "IR", None).unwrap_err();
    assert!(matches!(err, FantasyError::IllegalMove { .. }));
    Ok(())
}

#[test]
fn test_trade_between_league_rosters() -> Result<()> {
    let league = league()?;
    let alpha_wr = Player::new("Alpha WR", "WR");
    let bravo_k = Player::new("Bravo K", "K");
    let bravo_te = Player::new("Bravo TE", "TE");

    let mut alpha = Roster::new(league.positions()?, std::slice::from_ref(&alpha_wr))?;
    let mut bravo = Roster::new(league.positions()?, &[bravo_k.clone(), bravo_te.clone()])?;

    let summary = alpha.trade(
        &mut bravo,
        &[bravo_k.clone(), bravo_te.clone()],
        std::slice::from_ref(&alpha_wr),
    )?;

    assert_eq!(summary.ours.added.len(), 2);
    assert_eq!(summary.theirs.dropped.len(), 2);
    assert_eq!(alpha.position_of(&bravo_k), Some("K"));
    assert_eq!(alpha.position_of(&bravo_te), Some("TE"));
    assert_eq!(bravo.position_of(&alpha_wr), Some("WR"));
    assert!(bravo.players().len() == 1 && alpha.players().len() == 2);
    Ok(())
}

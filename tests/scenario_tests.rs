//! Rule scenarios with scripted strategies.
//!
//! Each scenario seats strategies with fixed behavior, searches seeds for
//! the opening it needs (who starts, what was rolled), and checks the
//! engine's ruling move by move.

use maexchen::core::{GameConfig, GameRng, PlayerId, Throw};
use maexchen::events::{EliminationReason, Event};
use maexchen::rules::{Game, GameStatus, Roster};
use maexchen::strategy::{truth_or_next, Decision, Strategy};

fn t(value: u8) -> Throw {
    Throw::new(value).unwrap()
}

/// Never doubts, always announces exactly what it rolled.
#[derive(Clone, Debug)]
struct Honest;

impl Strategy for Honest {
    fn name(&self) -> &str {
        "Honest"
    }

    fn decide_doubt(&mut self, _: Throw, _: u32, _: &mut GameRng) -> Decision<bool> {
        Decision::Answer(false)
    }

    fn decide_claim(&mut self, actual: Throw, _: Option<Throw>, _: u32, _: &mut GameRng) -> Decision<Throw> {
        Decision::Answer(actual)
    }
}

/// Doubts every claim; announces what it rolled.
#[derive(Clone, Debug)]
struct Doubter;

impl Strategy for Doubter {
    fn name(&self) -> &str {
        "Doubter"
    }

    fn decide_doubt(&mut self, _: Throw, _: u32, _: &mut GameRng) -> Decision<bool> {
        Decision::Answer(true)
    }

    fn decide_claim(&mut self, actual: Throw, _: Option<Throw>, _: u32, _: &mut GameRng) -> Decision<Throw> {
        Decision::Answer(actual)
    }
}

/// Never doubts, always announces the same throw.
#[derive(Clone, Debug)]
struct Fixed(Throw);

impl Strategy for Fixed {
    fn name(&self) -> &str {
        "Fixed"
    }

    fn decide_doubt(&mut self, _: Throw, _: u32, _: &mut GameRng) -> Decision<bool> {
        Decision::Answer(false)
    }

    fn decide_claim(&mut self, _: Throw, _: Option<Throw>, _: u32, _: &mut GameRng) -> Decision<Throw> {
        Decision::Answer(self.0)
    }
}

/// Bids like a dummy but never answers whether it doubts.
#[derive(Clone, Debug)]
struct MuteDoubt;

impl Strategy for MuteDoubt {
    fn name(&self) -> &str {
        "MuteDoubt"
    }

    fn decide_doubt(&mut self, _: Throw, _: u32, _: &mut GameRng) -> Decision<bool> {
        Decision::NoResponse
    }

    fn decide_claim(&mut self, actual: Throw, pending: Option<Throw>, _: u32, _: &mut GameRng) -> Decision<Throw> {
        Decision::Answer(truth_or_next(actual, pending))
    }
}

fn boxed<S: Strategy + 'static>(strategy: S) -> Box<dyn Strategy> {
    Box::new(strategy)
}

fn seated(strategies: Vec<Box<dyn Strategy>>) -> Roster {
    strategies.into_iter().collect()
}

/// Initialized unshuffled games, for every seed in `seeds` where `starter` opens.
fn games_started_by(
    starter: PlayerId,
    seeds: std::ops::Range<u64>,
    roster: impl Fn() -> Roster,
) -> impl Iterator<Item = Game> {
    seeds.filter_map(move |seed| {
        let mut game = Game::new(roster(), GameConfig::new().with_seed(seed).without_shuffle());
        game.init().unwrap();
        (game.current_player() == Some(starter)).then_some(game)
    })
}

fn round(game: &Game, index: usize) -> Vec<Event> {
    game.log().rounds()[index].to_vec()
}

/// A truthful opener is doubted; the doubter is out and the opener wins.
#[test]
fn test_truthful_claim_wins() {
    let mut played = 0;
    for mut game in games_started_by(PlayerId(0), 0..40, || seated(vec![boxed(Honest), boxed(Doubter)])) {
        game.make_move().unwrap();
        assert_eq!(game.make_move(), Ok(GameStatus::Finished));

        assert_eq!(
            round(&game, 1),
            vec![
                Event::Doubt { player: PlayerId(1) },
                Event::Eliminated { player: PlayerId(1), reason: EliminationReason::FalseAccusation },
                Event::Finished { winner: PlayerId(0) },
            ]
        );
        assert_eq!(game.winner(), Some(PlayerId(0)));
        played += 1;
    }
    assert!(played > 0);
}

/// A bluffed Mäxchen is doubted; the liar is out, the bid resets, and the
/// doubter opens the next bid.
#[test]
fn test_caught_lying() {
    let roster = || seated(vec![boxed(Fixed(Throw::MAEXCHEN)), boxed(Doubter), boxed(Honest)]);
    let mut played = 0;
    for mut game in games_started_by(PlayerId(0), 0..60, roster) {
        game.make_move().unwrap();
        if game.log().rounds()[0][0].is_truthful() == Some(true) {
            // Actually rolled Mäxchen; not the scenario.
            continue;
        }

        assert_eq!(game.make_move(), Ok(GameStatus::Running));
        assert_eq!(
            round(&game, 1),
            vec![
                Event::Doubt { player: PlayerId(1) },
                Event::Eliminated { player: PlayerId(0), reason: EliminationReason::Lying },
            ]
        );
        assert_eq!(game.pending_claim(), None);
        assert_eq!(game.current_player(), Some(PlayerId(1)));
        assert!(!game.is_alive(PlayerId(0)));

        // The doubter continues with a free bid: no doubt asked.
        game.make_move().unwrap();
        let next = round(&game, 2);
        assert_eq!(next.len(), 1);
        assert!(matches!(next[0], Event::Throw { player: PlayerId(1), .. }));
        played += 1;
    }
    assert!(played > 0);
}

/// A player who cannot beat 54 and tells the truth is out for failing to
/// beat their predecessor; a player who can beat it is accepted.
#[test]
fn test_failed_to_beat_predecessor() {
    let roster = || seated(vec![boxed(Fixed(t(54))), boxed(Honest), boxed(Honest)]);
    let (mut failed, mut beaten) = (0, 0);
    for mut game in games_started_by(PlayerId(0), 0..200, roster) {
        game.make_move().unwrap();
        assert_eq!(game.pending_claim(), Some(t(54)));

        game.make_move().unwrap();
        let events = round(&game, 1);
        let Event::Throw { player, stated, .. } = &events[0] else {
            panic!("expected a throw, got {:?}", events[0]);
        };
        assert_eq!(*player, PlayerId(1));

        if *stated <= t(54) {
            assert_eq!(
                events[1],
                Event::Eliminated { player: PlayerId(1), reason: EliminationReason::FailedToBeatPredecessor }
            );
            assert_eq!(game.pending_claim(), None);
            // The next alive seat moves.
            assert_eq!(game.current_player(), Some(PlayerId(2)));
            failed += 1;
        } else {
            assert_eq!(events.len(), 1);
            assert_eq!(game.pending_claim(), Some(*stated));
            beaten += 1;
        }
    }
    assert!(failed > 0 && beaten > 0);
}

/// Claiming the same rank as the pending bid does not beat it.
#[test]
fn test_equal_rank_does_not_beat() {
    for seed in 0..10 {
        let roster = seated(vec![boxed(Fixed(t(42))), boxed(Fixed(t(42)))]);
        let mut game = Game::new(roster, GameConfig::new().with_seed(seed));
        assert_eq!(game.run(), Ok(GameStatus::Finished));
        assert_eq!(game.move_count(), 2);

        let second = round(&game, 1);
        let loser = second[0].player().unwrap();
        assert_eq!(
            second[1],
            Event::Eliminated { player: loser, reason: EliminationReason::FailedToBeatPredecessor }
        );
        assert_ne!(game.winner(), Some(loser));
    }
}

/// Nothing beats Mäxchen.
#[test]
fn test_maexchen_cannot_be_beaten() {
    let roster = seated(vec![boxed(Fixed(Throw::MAEXCHEN)), boxed(Fixed(Throw::MAEXCHEN))]);
    let mut game = Game::new(roster, GameConfig::new().with_seed(5));
    game.run().unwrap();

    let eliminations: Vec<_> = game
        .log()
        .events()
        .filter_map(|event| match event {
            Event::Eliminated { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(eliminations, vec![EliminationReason::FailedToBeatPredecessor]);
}

/// The opening claim of a round is never doubted, even by a doubter.
#[test]
fn test_opening_claim_skips_doubt() {
    let roster = || seated(vec![boxed(Doubter), boxed(Doubter)]);
    for mut game in games_started_by(PlayerId(1), 0..20, roster) {
        game.make_move().unwrap();
        let opening = round(&game, 0);
        assert_eq!(opening.len(), 1);
        assert!(matches!(opening[0], Event::Throw { player: PlayerId(1), .. }));
    }
}

/// A player who does not answer the doubt question is out before rolling;
/// the bid resets and the next alive seat moves.
#[test]
fn test_no_answer_to_doubt_eliminates() {
    let roster = || seated(vec![boxed(MuteDoubt), boxed(MuteDoubt), boxed(MuteDoubt)]);
    let mut played = 0;
    for mut game in games_started_by(PlayerId(0), 0..20, roster) {
        game.make_move().unwrap();
        assert!(game.pending_claim().is_some());

        assert_eq!(game.make_move(), Ok(GameStatus::Running));
        assert_eq!(
            round(&game, 1),
            vec![Event::Eliminated { player: PlayerId(1), reason: EliminationReason::NoResponse }]
        );
        assert_eq!(game.pending_claim(), None);
        assert!(!game.is_alive(PlayerId(1)));
        assert_eq!(game.current_player(), Some(PlayerId(2)));
        played += 1;
    }
    assert!(played > 0);
}

//! Full rounds driven through the public API only.

use desmina_core::{
    Board, BoardConfig, Difficulty, Minefield, Phase, RandomMinefield, RevealOutcome, cell_index,
};

#[test]
fn scripted_round_to_a_win() {
    let mut board = Board::new(BoardConfig::new((4, 3), 2));
    let field = Minefield::from_mine_coords((4, 3), &[(0, 0), (3, 2)]).unwrap();
    assert!(board.begin_round_with(field));

    for index in 0..12 {
        let tile = board.tile(index).unwrap();
        if tile.is_mine() || !tile.is_covered() {
            continue;
        }
        let outcome = board.reveal(index);
        assert_ne!(outcome, RevealOutcome::HitMine);
        assert!(outcome.has_update());
    }

    assert_eq!(board.phase(), Phase::Win);
    assert_eq!(board.covered_tiles(), board.mine_count());
    // win handling leaves the mines untouched
    assert!(board.tile_at((0, 0)).unwrap().is_covered());
    assert!(board.tile_at((3, 2)).unwrap().is_covered());
}

#[test]
fn scripted_round_to_a_loss() {
    let mut board = Board::new(BoardConfig::new((4, 3), 2));
    let field = Minefield::from_mine_coords((4, 3), &[(0, 0), (3, 2)]).unwrap();
    assert!(board.begin_round_with(field));

    board.toggle_flag(cell_index((0, 0), 4));
    board.toggle_flag(cell_index((1, 1), 4));
    assert_eq!(board.reveal(cell_index((3, 2), 4)), RevealOutcome::HitMine);

    assert_eq!(board.phase(), Phase::Lose);
    assert_eq!(board.failed_tile().unwrap().position(), (3, 2));
    assert!(board.tile_at((0, 0)).unwrap().is_flagged());
    assert!(board.tile_at((1, 1)).unwrap().is_crossed());
    // the round is over for good
    assert_eq!(board.reveal(cell_index((1, 0), 4)), RevealOutcome::NoChange);
}

#[test]
fn entropy_seeded_round_starts_safely() {
    let mut board = Board::new(BoardConfig::from_difficulty((10, 10), Difficulty::Normal));
    assert_eq!(board.mine_count(), 15);
    assert!(board.begin_round(37));
    assert_eq!(board.phase(), Phase::Playing);
    assert!(!board.tile(37).unwrap().is_mine());
    // the first reveal can never hit a mine, whatever the entropy seed
    let outcome = board.reveal(37);
    assert!(outcome.has_update());
    assert_ne!(outcome, RevealOutcome::HitMine);
}

#[test]
fn board_state_survives_a_serde_round_trip() {
    let mut board = Board::new(BoardConfig::new((5, 5), 4));
    assert!(board.begin_round_with(RandomMinefield::new(9).exclude(12)));
    board.reveal(12);
    board.toggle_flag(0);

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, board);
    assert_eq!(restored.phase(), board.phase());
    assert_eq!(restored.covered_tiles(), board.covered_tiles());
}

use latin_core::{
    CELL_COUNT, Cell, Phase, SIZE, Session, check_solved, create_board, flatten, mask,
};

#[test]
fn generated_boards_satisfy_the_latin_invariant() {
    for _ in 0..5 {
        let grid = create_board();
        for i in 0..SIZE {
            let mut row_seen = [false; SIZE];
            let mut col_seen = [false; SIZE];
            for j in 0..SIZE {
                row_seen[grid[i][j] as usize] = true;
                col_seen[grid[j][i] as usize] = true;
            }
            assert!(row_seen.iter().all(|&s| s), "row {} misses a value", i);
            assert!(col_seen.iter().all(|&s| s), "column {} misses a value", i);
        }
    }
}

#[test]
fn full_game_from_start_to_win() {
    let mut session = Session::new();

    let token = session.start_game();
    let board = create_board();
    assert!(session.generation_complete(token, board));

    let deal = session.begin_deal().expect("board is ready");
    let puzzle = mask(session.solution().unwrap(), 40).unwrap();
    assert!(session.deal_complete(deal, puzzle));
    assert_eq!(session.phase(), Phase::Playing);

    let answers = flatten(&board);
    let hidden: Vec<usize> = (0..CELL_COUNT)
        .filter(|&i| session.puzzle().unwrap()[i].is_empty())
        .collect();
    assert_eq!(hidden.len(), 40);

    // Givens stay locked for the whole game.
    let given_pos = (0..CELL_COUNT)
        .find(|&i| session.puzzle().unwrap()[i].is_given())
        .unwrap();
    assert!(session.submit_guess(given_pos, answers[given_pos]).is_err());

    for (n, &position) in hidden.iter().enumerate() {
        assert!(!session.submit_check(), "solved after only {} guesses", n);
        session.submit_guess(position, answers[position]).unwrap();
    }
    assert!(session.submit_check());
}

#[test]
fn check_solved_matches_row_major_order() {
    // Two boards sharing the same multiset of values but different layouts
    // must not be confused with each other.
    let mut a = [[0u8; SIZE]; SIZE];
    let mut b = [[0u8; SIZE]; SIZE];
    for row in 0..SIZE {
        for col in 0..SIZE {
            a[row][col] = ((row + col) % SIZE) as u8;
            b[row][col] = ((row + col + 1) % SIZE) as u8;
        }
    }

    let solved_a: Vec<Cell> = flatten(&a).iter().map(|&v| Cell::Given(v)).collect();
    let solved_a: [Cell; CELL_COUNT] = solved_a.try_into().unwrap();
    assert!(check_solved(&a, &solved_a));
    assert!(!check_solved(&b, &solved_a));
}

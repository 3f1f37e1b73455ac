use broadside::{BitBoard, BitBoardError, CellSet, BOARD_SIZE};

#[test]
fn test_get_set_clear() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert_eq!(bb.count_ones(), 1);

    bb.clear(1, 1).unwrap();
    assert!(!bb.get(1, 1).unwrap());
    assert!(bb.is_empty());

    // clearing an absent cell is a no-op
    bb.clear(2, 2).unwrap();
    assert!(bb.is_empty());
}

#[test]
fn test_out_of_range() {
    let mut bb = CellSet::new();
    assert_eq!(
        bb.set(BOARD_SIZE, 0),
        Err(BitBoardError::IndexOutOfBounds { row: BOARD_SIZE, col: 0 })
    );
    assert!(bb.get(0, BOARD_SIZE).is_err());
    assert!(bb.clear(BOARD_SIZE, BOARD_SIZE).is_err());
    assert!(!bb.contains(0, BOARD_SIZE));
    assert!(bb.is_empty());
}

#[test]
fn test_full_board_uses_exact_width() {
    // 4x4 fills all 16 bits of a u16
    let full = BitBoard::<u16, 4>::full();
    assert_eq!(full.count_ones(), 16);
    assert!(full.contains(3, 3));

    let mut full = CellSet::full();
    assert_eq!(full.count_ones(), BOARD_SIZE * BOARD_SIZE);
    assert!(full.contains(9, 9));
    full.clear(9, 9).unwrap();
    assert_eq!(full.count_ones(), BOARD_SIZE * BOARD_SIZE - 1);
}

#[test]
fn test_intersection() {
    let mut a = CellSet::new();
    a.set(0, 0).unwrap();
    a.set(1, 1).unwrap();
    let mut b = CellSet::new();
    b.set(1, 1).unwrap();
    b.set(2, 2).unwrap();

    let both = a & b;
    assert_eq!(both.count_ones(), 1);
    assert!(both.contains(1, 1));
    assert!((a & CellSet::new()).is_empty());
}

#[test]
fn test_debug_grid() {
    let mut bb = BitBoard::<u16, 2>::new();
    bb.set(0, 1).unwrap();
    assert_eq!(format!("{:?}", bb), "BitBoard<2x2>:\n.#\n..\n");
}

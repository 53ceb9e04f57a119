use super::*;

#[test]
fn count_rounds_up_and_never_returns_zero() {
    let page = Page::default();
    assert_eq!(page.count(0), 1);
    assert_eq!(page.count(10), 1);
    assert_eq!(page.count(11), 2);
    assert_eq!(Page { index: 0, size: 0 }.count(3), 3);
}

#[test]
fn slice_returns_requested_window() {
    let items = (0..25).collect::<Vec<_>>();
    assert_eq!(Page { index: 1, size: 10 }.slice(&items), &items[10..20]);
    assert_eq!(Page { index: 2, size: 10 }.slice(&items), &items[20..25]);
}

#[test]
fn slice_clamps_past_the_end() {
    let items = (0..5).collect::<Vec<_>>();
    assert_eq!(Page { index: 9, size: 2 }.slice(&items), &[4]);
    let empty: [i32; 0] = [];
    assert!(Page { index: 3, size: 10 }.slice(&empty).is_empty());
}

#[test]
fn clamp_moves_to_last_page() {
    assert_eq!(Page { index: 4, size: 10 }.clamp(15), Page { index: 1, size: 10 });
    assert_eq!(Page { index: 4, size: 10 }.clamp(0), Page { index: 0, size: 10 });
}

#[test]
fn range_label_formats_footer() {
    assert_eq!(Page { index: 1, size: 10 }.range_label(42), "11-20 of 42");
    assert_eq!(Page { index: 4, size: 10 }.range_label(42), "41-42 of 42");
    assert_eq!(Page::default().range_label(0), "0 of 0");
}

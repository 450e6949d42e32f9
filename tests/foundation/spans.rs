//! Integration tests for source spans

use tether_foundation::Span;

#[test]
fn span_covers_text() {
    let source = "select filter:bytag \"light\"";
    assert_eq!(Span::new(7, 19).text(source), "filter:bytag");
    assert_eq!(Span::new(0, 6).len(), 6);
    assert!(Span::at(3).is_empty());
}

#[test]
fn span_join() {
    let joined = Span::new(2, 4).to(Span::new(8, 12));
    assert_eq!(joined, Span::new(2, 12));
}

#[test]
fn out_of_range_text_is_empty() {
    assert_eq!(Span::new(10, 20).text("short"), "");
}

#[test]
fn line_and_column_are_one_based() {
    let source = "range 6 where {\n  mul 2 gt 5\n}";
    assert_eq!(Span::new(0, 5).line_column(source), (1, 1));
    assert_eq!(Span::new(18, 21).line_column(source), (2, 3));
    assert_eq!(Span::at(source.len()).line_column(source), (3, 2));
}

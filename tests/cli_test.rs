use sptoolbox::cli::{ChooseInput, parse_input};
use sptoolbox::selection::{Category, SlotIndex};

#[test]
fn test_parse_query_commands() {
    assert_eq!(
        parse_input("a https://open.spotify.com/playlist/37i9dQZF1"),
        Ok(ChooseInput::Query(
            SlotIndex::A,
            "https://open.spotify.com/playlist/37i9dQZF1".to_string()
        ))
    );
    assert_eq!(
        parse_input("b  lofi beats "),
        Ok(ChooseInput::Query(SlotIndex::B, "lofi beats".to_string()))
    );
    assert_eq!(
        parse_input("B chill"),
        Ok(ChooseInput::Query(SlotIndex::B, "chill".to_string()))
    );
}

#[test]
fn test_parse_bare_side_clears_it() {
    assert_eq!(
        parse_input("a"),
        Ok(ChooseInput::Query(SlotIndex::A, String::new()))
    );
}

#[test]
fn test_parse_tab_and_pick() {
    assert_eq!(parse_input("tab albums"), Ok(ChooseInput::Tab(Category::Albums)));
    assert_eq!(parse_input("tab artist"), Ok(ChooseInput::Tab(Category::Artists)));
    assert_eq!(parse_input("pick 3"), Ok(ChooseInput::Pick(3)));
    assert!(parse_input("tab podcasts").is_err());
    assert!(parse_input("pick 0").is_err());
    assert!(parse_input("pick").is_err());
}

#[test]
fn test_parse_library_commands() {
    assert_eq!(parse_input("lib"), Ok(ChooseInput::Library));
    assert_eq!(
        parse_input("lib 2 b"),
        Ok(ChooseInput::LibraryPick(2, SlotIndex::B))
    );
    assert!(parse_input("lib 2").is_err());
    assert!(parse_input("lib 2 c").is_err());
}

#[test]
fn test_parse_plain_commands() {
    assert_eq!(parse_input("status"), Ok(ChooseInput::Status));
    assert_eq!(parse_input("compare"), Ok(ChooseInput::Compare));
    assert_eq!(parse_input("?"), Ok(ChooseInput::Help));
    assert_eq!(parse_input("quit"), Ok(ChooseInput::Quit));
    assert_eq!(parse_input("  q  "), Ok(ChooseInput::Quit));
    assert!(parse_input("").is_err());
    assert!(parse_input("dance").is_err());
}

#[test]
fn test_parse_open() {
    assert_eq!(parse_input("open 2"), Ok(ChooseInput::Open(2)));
    assert!(parse_input("open").is_err());
    assert!(parse_input("open first").is_err());
}

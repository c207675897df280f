use std::path::Path;

use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    catalog::CatalogGateway,
    config::Settings,
    error, info,
    selection::{Category, Chooser, SlotIndex, Update, classify},
    success,
    types::CatalogEntry,
    utils, warning,
};

use super::{connect, print_slots, print_suggestions, report, write_handoff};

const HELP: &str = "\
  a <text>         type into side A (a link resolves it, anything else searches)
  b <text>         type into side B
  a / b            clear that side
  tab <category>   show playlists, albums or artists
  pick <n>         choose suggestion n for the side that searched
  open <n>         open suggestion n in Spotify
  lib              list the playlists in your library
  lib <n> <a|b>    use library playlist n for a side
  status           show both sides
  compare          hand both collections over and exit
  help             show this help
  quit             leave without comparing";

/// One line typed into the interactive chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChooseInput {
    Query(SlotIndex, String),
    Tab(Category),
    Pick(usize),
    Open(usize),
    Library,
    LibraryPick(usize, SlotIndex),
    Status,
    Compare,
    Help,
    Quit,
}

/// Parses a line of the interactive chooser. Positions are 1-based.
pub fn parse_input(line: &str) -> Result<ChooseInput, String> {
    let line = line.trim_start();
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line.trim_end(), ""),
    };

    match command.to_ascii_lowercase().as_str() {
        "a" | "b" => {
            let slot = command.parse::<SlotIndex>()?;
            Ok(ChooseInput::Query(slot, rest.to_string()))
        }
        "tab" => rest.parse::<Category>().map(ChooseInput::Tab),
        "pick" => parse_position(rest).map(ChooseInput::Pick),
        "open" => parse_position(rest).map(ChooseInput::Open),
        "lib" if rest.is_empty() => Ok(ChooseInput::Library),
        "lib" => {
            let (position, slot) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: lib <n> <a|b>".to_string())?;
            Ok(ChooseInput::LibraryPick(
                parse_position(position)?,
                slot.trim().parse::<SlotIndex>()?,
            ))
        }
        "status" => Ok(ChooseInput::Status),
        "compare" => Ok(ChooseInput::Compare),
        "help" | "?" => Ok(ChooseInput::Help),
        "quit" | "exit" | "q" => Ok(ChooseInput::Quit),
        "" => Err("type `help` for the list of commands".to_string()),
        other => Err(format!("unknown command '{}', type `help`", other)),
    }
}

fn parse_position(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("'{}' is not a position, use 1, 2, 3...", text.trim())),
    }
}

fn print_library(chooser: &Chooser, library: &[CatalogEntry]) {
    let rows = utils::library_rows(library, |entry| {
        chooser
            .sides_holding(entry)
            .iter()
            .map(|slot| slot.to_string())
            .collect()
    });
    println!("{}", Table::new(rows));
}

fn open_in_spotify(url: &str) {
    info!("Opening {}", url);
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}

/// Interactive two-slot chooser.
///
/// Reads commands from stdin while search and resolution results arrive in
/// the background. Ends after `compare` hands a pair over, or on `quit`.
pub async fn choose(settings: &Settings, output: Option<&Path>) {
    let catalog = connect(settings).await;
    let mut chooser = Chooser::with_debounce(catalog.clone(), settings.search_debounce);
    let mut library: Vec<CatalogEntry> = Vec::new();

    info!("Pick two playlists or albums to compare. Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => error!("Cannot read input: {}", e),
                };

                let input = match parse_input(&line) {
                    Ok(input) => input,
                    Err(message) => {
                        warning!("{}", message);
                        continue;
                    }
                };

                match input {
                    ChooseInput::Query(slot, text) => {
                        if let Some(link) = classify(&text) {
                            info!("Side {}: resolving {} {}", slot, link.resource_type, link.resource_id);
                        }
                        chooser.set_query(slot, &text);
                    }
                    ChooseInput::Tab(category) => {
                        if chooser.select_category(category) {
                            if let Some(set) = chooser.suggestions() {
                                print_suggestions(set);
                            }
                        } else {
                            warning!("There are no suggestions yet, type into a side first");
                        }
                    }
                    ChooseInput::Pick(position) => match chooser.pick_suggestion_at(position - 1) {
                        Ok(slot) => info!("Side {}: {}", slot, chooser.slot(slot).query()),
                        Err(e) => warning!("{}", e),
                    },
                    ChooseInput::Open(position) => {
                        let url = chooser
                            .suggestions()
                            .and_then(|set| set.selected_entries().get(position - 1))
                            .and_then(|entry| entry.external_url());
                        match url {
                            Some(url) => open_in_spotify(url),
                            None => warning!("No suggestion at position {}", position),
                        }
                    }
                    ChooseInput::Library => {
                        let pb = utils::spinner("Fetching your playlists...");
                        let result = catalog.user_playlists().await;
                        pb.finish_and_clear();

                        match result {
                            Ok(playlists) => {
                                library = playlists;
                                print_library(&chooser, &library);
                            }
                            Err(e) if e.is_auth() => error!("{}. Please run sptoolbox auth", e),
                            Err(e) => warning!("Failed to load your library: {}", e),
                        }
                    }
                    ChooseInput::LibraryPick(position, slot) => {
                        match library.get(position - 1).and_then(|entry| entry.external_url()) {
                            Some(url) => chooser.pick_from_library(slot, url),
                            None if library.is_empty() => warning!("Run `lib` to load your library first"),
                            None => warning!("No library playlist at position {}", position),
                        }
                    }
                    ChooseInput::Status => print_slots(&chooser),
                    ChooseInput::Compare => {
                        if let Ok(pair) = chooser.request_compare() {
                            write_handoff(&pair, output).await;
                            return;
                        }
                    }
                    ChooseInput::Help => println!("{}", HELP),
                    ChooseInput::Quit => break,
                }
            }
            Some(update) = chooser.settle(), if !chooser.is_idle() => match update {
                Ok(update) => {
                    report(&chooser, &update);
                    if matches!(update, Update::Resolved(_)) && chooser.is_ready_to_compare() {
                        success!("Both sides are ready, type `compare`");
                    }
                }
                Err(e) => error!("{}", e),
            },
        }
    }

    info!("Nothing compared");
}

//! Interactive browse commands typed on stdin.

use std::io::Write;

use anyhow::{Context, Result};
use browser::{BrowseEvent, Completion, SampleBrowser};
use shared::protocol::CATEGORY_PRESETS;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render::render_browser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    First,
    Previous,
    Next,
    Last,
    Goto(i64),
    Category(Option<String>),
    Refresh,
    Help,
    Quit,
}

pub const HELP: &str = "commands: n(ext) p(rev) f(irst) l(ast) g <page> c <category|-> r(efresh) h(elp) q(uit)";

pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map(|(head, rest)| (head, rest.trim()))
        .unwrap_or((line, ""));

    match head {
        "n" | "next" => Ok(BrowseCommand::Next),
        "p" | "prev" => Ok(BrowseCommand::Previous),
        "f" | "first" => Ok(BrowseCommand::First),
        "l" | "last" => Ok(BrowseCommand::Last),
        "r" | "refresh" => Ok(BrowseCommand::Refresh),
        "h" | "help" | "?" => Ok(BrowseCommand::Help),
        "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
        "g" | "goto" => {
            // Pages are shown one-based.
            let page: i64 = rest
                .parse()
                .map_err(|_| format!("expected a page number, got '{rest}'"))?;
            Ok(BrowseCommand::Goto(page - 1))
        }
        "c" | "category" => Ok(BrowseCommand::Category(parse_category(rest))),
        "" => Err(HELP.to_string()),
        other => Err(format!("unknown command '{other}'; {HELP}")),
    }
}

/// `-`, `all` or nothing clears the filter; a number picks from the presets.
fn parse_category(raw: &str) -> Option<String> {
    match raw {
        "" | "-" | "all" => None,
        _ => match raw.parse::<usize>() {
            Ok(index) if (1..=CATEGORY_PRESETS.len()).contains(&index) => {
                Some(CATEGORY_PRESETS[index - 1].to_string())
            }
            _ => Some(raw.to_string()),
        },
    }
}

pub fn category_menu() -> String {
    let presets = CATEGORY_PRESETS
        .iter()
        .enumerate()
        .map(|(index, name)| format!("{}={name}", index + 1))
        .collect::<Vec<_>>()
        .join(" ");
    format!("categories: -=all {presets}")
}

/// Feeds a parsed command to the browser. Returns `false` when nothing was issued.
pub fn apply_command(browser: &mut SampleBrowser, command: BrowseCommand) -> bool {
    let event = match command {
        BrowseCommand::First => BrowseEvent::FirstPage,
        BrowseCommand::Previous => BrowseEvent::PreviousPage,
        BrowseCommand::Next => BrowseEvent::NextPage,
        BrowseCommand::Last => BrowseEvent::LastPage,
        BrowseCommand::Goto(page) => BrowseEvent::PageRequested(page),
        BrowseCommand::Category(category) => BrowseEvent::CategorySelected(category),
        BrowseCommand::Refresh => BrowseEvent::Refresh,
        BrowseCommand::Help | BrowseCommand::Quit => return false,
    };
    browser.dispatch(event).is_some()
}

/// Reads commands from `input` until `q` or end of input, redrawing on `out` whenever
/// the view changes.
///
/// Fetches still running when the input ends are awaited and drawn once more, so piped
/// sessions see the page they asked for.
pub async fn run_browse<R, W>(browser: &mut SampleBrowser, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{HELP}\n{}", category_menu())?;
    write!(out, "{}", render_browser(browser.state()))?;

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read commands")? else {
                    if browser.in_flight() > 0 {
                        browser.settle().await;
                        write!(out, "{}", render_browser(browser.state()))?;
                    }
                    break;
                };
                match parse_command(&line) {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(BrowseCommand::Help) => writeln!(out, "{HELP}\n{}", category_menu())?,
                    Ok(command) => {
                        if apply_command(browser, command) {
                            write!(out, "{}", render_browser(browser.state()))?;
                        } else {
                            writeln!(out, "nothing to do from here")?;
                        }
                    }
                    Err(message) => writeln!(out, "{message}")?,
                }
            }
            Some(Completion::Applied) = browser.next_completion(), if browser.in_flight() > 0 => {
                write!(out, "{}", render_browser(browser.state()))?;
            }
        }
        out.flush()?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;

//! Plain-text rendering of the sample browser view.

use std::{borrow::Cow, fmt::Write as _};

use browser::{BrowseState, BrowseView};
use shared::domain::Sample;

const CAPTION_PREVIEW_CHARS: usize = 48;

pub fn truncate_caption(caption: &str, max_chars: usize) -> Cow<'_, str> {
    let flattened = caption.contains('\n');
    if caption.chars().count() <= max_chars && !flattened {
        return Cow::Borrowed(caption);
    }
    let mut preview: String = caption
        .chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .take(max_chars)
        .collect();
    if caption.chars().count() > max_chars {
        preview.push('…');
    }
    Cow::Owned(preview)
}

fn render_row(out: &mut String, sample: &Sample) {
    let _ = writeln!(
        out,
        "{:<12} {:<6} {:<50} {:<10} {:<9} {}",
        sample.clip_id,
        sample.media_type,
        truncate_caption(&sample.caption, CAPTION_PREVIEW_CHARS),
        sample.resolution,
        sample.length,
        sample.category,
    );
}

pub fn render_browser(state: &BrowseState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "== {} samples ({}) ==",
        state.total(),
        state.category().unwrap_or("all categories")
    );

    match state.view() {
        BrowseView::Loading => out.push_str("loading...\n"),
        BrowseView::Error(message) => {
            let _ = writeln!(out, "error: {message}");
            out.push_str("[r]etry\n");
        }
        BrowseView::Empty => out.push_str("No samples match this filter.\n"),
        BrowseView::Page { samples, .. } => {
            let _ = writeln!(
                out,
                "{:<12} {:<6} {:<50} {:<10} {:<9} {}",
                "clip id", "type", "caption", "resolution", "length", "category"
            );
            for sample in samples {
                render_row(&mut out, sample);
            }
            if let Some(indicator) = state.page_indicator() {
                let _ = writeln!(out, "{indicator}");
            }
            let hints = navigation_hints(state);
            if !hints.is_empty() {
                let _ = writeln!(out, "{hints}");
            }
        }
    }
    out
}

fn navigation_hints(state: &BrowseState) -> String {
    let navigation = state.navigation();
    [
        (navigation.first, "[f]irst"),
        (navigation.previous, "[p]rev"),
        (navigation.next, "[n]ext"),
        (navigation.last, "[l]ast"),
    ]
    .into_iter()
    .filter_map(|(enabled, label)| enabled.then_some(label))
    .collect::<Vec<_>>()
    .join(" ")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;

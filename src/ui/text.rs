//! Plain-text rendering for the terminal build
//!
//! Interactive entries are numbered in the same order as
//! [`Screen::actions`], so typing `2` picks the second one.

use std::fmt::Write;

use super::{ChoiceState, Screen};

const MARKER: char = '●';

pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    let mut n = 0;
    let mut entry = |out: &mut String, label: &str| {
        n += 1;
        let _ = writeln!(out, "  [{}] {}", n, label);
    };

    match screen {
        Screen::Menu(v) => {
            let _ = writeln!(out, "=== {} ===", v.title);
            for button in &v.operations {
                entry(&mut out, &button.label);
            }
            entry(&mut out, &v.settings.label);
        }
        Screen::Settings(v) => {
            for toggle in &v.toggles {
                let mark = if toggle.checked { "x" } else { " " };
                entry(&mut out, &format!("[{}] {}", mark, toggle.label));
            }
            entry(&mut out, &v.back.label);
        }
        Screen::Playing(v) => {
            let Some(problem) = &v.problem else {
                let _ = writeln!(out, "Loading...");
                return out;
            };
            let _ = writeln!(out, "\n    {}\n", problem);
            if let Some(aid) = &v.visual_aid {
                let _ = writeln!(out, "    {}  {}  {}", tally(aid.left), aid.symbol, tally(aid.right));
            }
            if let Some(timer) = &v.timer {
                let _ = writeln!(out, "{}", timer);
            }
            let _ = writeln!(out, "{}   {}", v.tries, v.score);

            for choice in &v.choices {
                let suffix = match choice.state {
                    ChoiceState::Idle => "",
                    ChoiceState::Correct => "  ✓",
                    ChoiceState::Wrong => "  ✗",
                };
                if choice.button.disabled {
                    let _ = writeln!(out, "      {}{}", choice.button.label, suffix);
                } else {
                    entry(&mut out, &choice.button.label);
                }
            }
            if v.speak_action.is_some() {
                entry(&mut out, "Read aloud");
            }
        }
        Screen::GameOver(v) => {
            let _ = writeln!(out, "=== {} ===", v.title);
            let _ = writeln!(out, "{}", v.score);
            entry(&mut out, &v.play_again.label);
        }
    }
    out
}

fn tally(count: usize) -> String {
    std::iter::repeat_n(MARKER, count).collect()
}

//! HTML rendering for the browser build
//!
//! Produces markup for `#app`. Clicks are handled by one delegated listener
//! that reads `data-action`, so no per-button closures are needed.

use std::fmt::Write;

use super::{Button, ChoiceState, PlayingView, Screen, Toggle};
use crate::format::VisualAid;

const BACKGROUND: &str = "safari-bg";
const FOCUS_BACKGROUND: &str = "focus-bg";

/// Render a screen to an HTML fragment
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    match screen {
        Screen::Menu(v) => {
            let _ = write!(out, r#"<div class="screen menu {}">"#, BACKGROUND);
            let _ = write!(out, "<h1>{}</h1>", escape(&v.title));
            out.push_str(r#"<div class="operations">"#);
            for button in &v.operations {
                push_button(&mut out, button, "op-btn");
            }
            out.push_str("</div>");
            push_button(&mut out, &v.settings, "settings-btn");
            out.push_str("</div>");
        }
        Screen::Settings(v) => {
            out.push_str(r#"<div class="screen settings">"#);
            for toggle in &v.toggles {
                push_toggle(&mut out, toggle);
            }
            push_button(&mut out, &v.back, "back-btn");
            out.push_str("</div>");
        }
        Screen::Playing(v) => push_playing(&mut out, v),
        Screen::GameOver(v) => {
            let _ = write!(out, r#"<div class="screen gameover {}">"#, BACKGROUND);
            let _ = write!(out, "<h1>{}</h1>", escape(&v.title));
            let _ = write!(out, r#"<p class="final-score">{}</p>"#, escape(&v.score));
            push_button(&mut out, &v.play_again, "play-again-btn");
            out.push_str("</div>");
        }
    }
    out
}

fn push_playing(out: &mut String, v: &PlayingView) {
    let background = if v.focus_mode { FOCUS_BACKGROUND } else { BACKGROUND };
    let _ = write!(out, r#"<div class="screen playing {}">"#, background);

    let Some(problem) = &v.problem else {
        out.push_str(r#"<div class="problem">Loading...</div></div>"#);
        return;
    };

    match &v.speak_action {
        Some(action) => {
            let _ = write!(
                out,
                r#"<div class="problem speakable" data-action="{}" role="button">{}</div>"#,
                escape(action),
                escape(problem)
            );
        }
        None => {
            let _ = write!(out, r#"<div class="problem">{}</div>"#, escape(problem));
        }
    }

    if let Some(aid) = &v.visual_aid {
        push_visual_aid(out, aid);
    }
    if let Some(timer) = &v.timer {
        let _ = write!(out, r#"<div class="timer">{}</div>"#, escape(timer));
    }
    let _ = write!(out, r#"<div class="tries">{}</div>"#, escape(&v.tries));
    let _ = write!(out, r#"<div class="score">{}</div>"#, escape(&v.score));

    out.push_str(r#"<div class="choices">"#);
    for choice in &v.choices {
        let class = match choice.state {
            ChoiceState::Idle => "choice",
            ChoiceState::Correct => "choice correct",
            ChoiceState::Wrong => "choice wrong",
        };
        push_button(out, &choice.button, class);
    }
    out.push_str("</div></div>");
}

fn push_visual_aid(out: &mut String, aid: &VisualAid) {
    out.push_str(r#"<div class="visual-aid">"#);
    push_tally(out, aid.left);
    let _ = write!(out, r#"<div class="aid-symbol">{}</div>"#, escape(aid.symbol));
    push_tally(out, aid.right);
    out.push_str("</div>");
}

fn push_tally(out: &mut String, count: usize) {
    out.push_str(r#"<div class="tally">"#);
    for _ in 0..count {
        out.push_str(r#"<span class="dot"></span>"#);
    }
    out.push_str("</div>");
}

fn push_button(out: &mut String, button: &Button, class: &str) {
    let _ = write!(
        out,
        r#"<button class="{}" data-action="{}"{}>{}</button>"#,
        class,
        escape(&button.action),
        if button.disabled { " disabled" } else { "" },
        escape(&button.label)
    );
}

fn push_toggle(out: &mut String, toggle: &Toggle) {
    let _ = write!(
        out,
        r#"<label class="toggle"><input type="checkbox" data-action="{}"{}><span>{}</span></label>"#,
        escape(&toggle.action),
        if toggle.checked { " checked" } else { "" },
        escape(&toggle.label)
    );
}

/// Minimal HTML escaping for text and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

//! Presentation layer
//!
//! [`Screen::build`] turns session + settings into display-ready strings
//! (already passed through [`format_text`]). The HTML and terminal renderers
//! only lay them out. Every clickable element carries an action string that
//! [`parse_action`] turns back into an [`Intent`].

pub mod html;
pub mod text;

use crate::format::{VisualAid, format_text, format_value};
use crate::quiz::{GamePhase, GameSession, Intent, Operation};
use crate::settings::{AccessibilitySettings, SettingKey};

pub const TITLE: &str = "Beck's Math Safari";

/// How an answer button should look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceState {
    Idle,
    Correct,
    Wrong,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: String,
    pub disabled: bool,
}

impl Button {
    fn new(label: String, action: impl Into<String>) -> Self {
        Self {
            label,
            action: action.into(),
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceButton {
    pub button: Button,
    pub state: ChoiceState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    pub label: String,
    pub checked: bool,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub title: String,
    pub operations: Vec<Button>,
    pub settings: Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub toggles: Vec<Toggle>,
    pub back: Button,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayingView {
    /// `None` until the first problem is posed
    pub problem: Option<String>,
    /// Action that reads the problem aloud, when speech is on
    pub speak_action: Option<String>,
    pub visual_aid: Option<VisualAid>,
    pub timer: Option<String>,
    pub tries: String,
    pub score: String,
    pub choices: Vec<ChoiceButton>,
    pub focus_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverView {
    pub title: String,
    pub score: String,
    pub play_again: Button,
}

/// Everything a renderer needs for the current phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu(MenuView),
    Settings(SettingsView),
    Playing(PlayingView),
    GameOver(GameOverView),
}

impl Screen {
    pub fn build(session: &GameSession, settings: &AccessibilitySettings) -> Self {
        let fmt = |text: &str| format_text(settings, text);
        match session.phase {
            GamePhase::Menu => Screen::Menu(MenuView {
                title: fmt(TITLE),
                operations: Operation::ALL
                    .iter()
                    .map(|op| Button::new(fmt(op.label()), format!("op:{}", op.as_str())))
                    .collect(),
                settings: Button::new(fmt("Settings"), "open-settings"),
            }),
            GamePhase::Settings => Screen::Settings(SettingsView {
                toggles: SettingKey::ALL
                    .iter()
                    .map(|key| Toggle {
                        label: fmt(key.label()),
                        checked: settings.get(*key),
                        action: format!("toggle:{}", key.as_str()),
                    })
                    .collect(),
                back: Button::new(fmt("Back to Menu"), "close-settings"),
            }),
            GamePhase::Playing => Screen::Playing(playing_view(session, settings)),
            GamePhase::GameOver => Screen::GameOver(GameOverView {
                title: fmt("Game Over"),
                score: fmt(&format!("Your score: {}", session.score)),
                play_again: Button::new(fmt("Play Again"), "play-again"),
            }),
        }
    }

    /// Every action on the screen, in display order
    pub fn actions(&self) -> Vec<&str> {
        match self {
            Screen::Menu(v) => v
                .operations
                .iter()
                .chain(std::iter::once(&v.settings))
                .map(|b| b.action.as_str())
                .collect(),
            Screen::Settings(v) => v
                .toggles
                .iter()
                .map(|t| t.action.as_str())
                .chain(std::iter::once(v.back.action.as_str()))
                .collect(),
            Screen::Playing(v) => v
                .choices
                .iter()
                .filter(|c| !c.button.disabled)
                .map(|c| c.button.action.as_str())
                .chain(v.speak_action.as_deref())
                .collect(),
            Screen::GameOver(v) => vec![v.play_again.action.as_str()],
        }
    }
}

fn playing_view(session: &GameSession, settings: &AccessibilitySettings) -> PlayingView {
    let fmt = |text: &str| format_text(settings, text);
    let feedback_pending = session.feedback_pending();

    let choices = session
        .choices
        .iter()
        .flat_map(|set| set.iter().enumerate())
        .map(|(index, value)| {
            let state = match (session.selected_answer, session.answered_correctly) {
                (Some(selected), Some(true)) if selected == value => ChoiceState::Correct,
                (Some(selected), Some(false)) if selected == value => ChoiceState::Wrong,
                _ => ChoiceState::Idle,
            };
            ChoiceButton {
                button: Button {
                    label: format_value(settings, value),
                    action: format!("choice:{}", index),
                    disabled: feedback_pending,
                },
                state,
            }
        })
        .collect();

    PlayingView {
        problem: session.problem.as_ref().map(|p| fmt(&p.display_text)),
        speak_action: (settings.text_to_speech && session.problem.is_some())
            .then(|| "speak".to_string()),
        visual_aid: settings
            .visual_aids
            .then(|| session.problem.as_ref().map(VisualAid::for_problem))
            .flatten(),
        timer: settings
            .show_timer
            .then(|| fmt(&format!("Time left: {}s", session.time_left))),
        tries: fmt(&format!("Tries left: {}", session.tries_left)),
        score: fmt(&format!("Score: {}", session.score)),
        choices,
        focus_mode: settings.focus_mode,
    }
}

/// Map an action string back to an intent (`None` for unknown actions or a
/// choice index that is not on screen)
pub fn parse_action(action: &str, session: &GameSession) -> Option<Intent> {
    let action = action.trim();
    if let Some(name) = action.strip_prefix("op:") {
        return Operation::from_str(name).map(Intent::SelectOperation);
    }
    if let Some(name) = action.strip_prefix("toggle:") {
        return SettingKey::from_str(name).map(Intent::ToggleSetting);
    }
    if let Some(index) = action.strip_prefix("choice:") {
        let index: usize = index.parse().ok()?;
        let answer = session.choices.as_ref()?.get(index)?;
        return Some(Intent::SubmitAnswer(answer));
    }
    match action {
        "open-settings" => Some(Intent::OpenSettings),
        "close-settings" => Some(Intent::CloseSettings),
        "play-again" => Some(Intent::PlayAgain),
        "speak" => Some(Intent::SpeakProblem),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Answer, generate_with_operands};

    fn playing_session() -> GameSession {
        let mut s = GameSession::new(21);
        s.start(Operation::Addition);
        let (problem, choices) =
            generate_with_operands(Operation::Addition, 3, 4, s.rng_mut()).unwrap();
        s.pose(problem, choices);
        s
    }

    #[test]
    fn test_menu_screen() {
        let s = GameSession::new(1);
        let Screen::Menu(v) = Screen::build(&s, &AccessibilitySettings::default()) else {
            panic!("expected menu");
        };
        assert_eq!(v.title, TITLE);
        let labels: Vec<_> = v.operations.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, ["Addition", "Subtraction", "Multiplication", "Division"]);
    }

    #[test]
    fn test_dyslexic_font_uppercases_everything() {
        let s = GameSession::new(1);
        let settings = AccessibilitySettings {
            dyslexic_font: true,
            ..Default::default()
        };
        let Screen::Menu(v) = Screen::build(&s, &settings) else {
            panic!("expected menu");
        };
        assert_eq!(v.title, "BECK'S MATH SAFARI");
        assert_eq!(v.settings.label, "SETTINGS");
    }

    #[test]
    fn test_playing_screen() {
        let s = playing_session();
        let settings = AccessibilitySettings {
            visual_aids: true,
            ..Default::default()
        };
        let Screen::Playing(v) = Screen::build(&s, &settings) else {
            panic!("expected playing");
        };
        assert_eq!(v.problem.as_deref(), Some("3 + 4"));
        assert_eq!(v.timer.as_deref(), Some("Time left: 30s"));
        assert_eq!(v.tries, "Tries left: 3");
        assert_eq!(v.score, "Score: 0");
        assert_eq!(v.choices.len(), 4);
        assert_eq!(v.visual_aid.map(|a| (a.left, a.right)), Some((3, 4)));
        assert!(v.speak_action.is_none());
    }

    #[test]
    fn test_hidden_timer_not_rendered() {
        let s = playing_session();
        let settings = AccessibilitySettings {
            show_timer: false,
            ..Default::default()
        };
        let Screen::Playing(v) = Screen::build(&s, &settings) else {
            panic!("expected playing");
        };
        assert!(v.timer.is_none());
    }

    #[test]
    fn test_feedback_disables_choices() {
        let mut s = playing_session();
        s.selected_answer = Some(Answer::whole(7));
        s.answered_correctly = Some(true);
        let screen = Screen::build(&s, &AccessibilitySettings::default());
        let Screen::Playing(v) = &screen else {
            panic!("expected playing");
        };
        assert!(v.choices.iter().all(|c| c.button.disabled));
        let correct: Vec<_> = v.choices.iter().filter(|c| c.state == ChoiceState::Correct).collect();
        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].button.label, "7");
        assert!(screen.actions().is_empty());
    }

    #[test]
    fn test_parse_action() {
        let s = playing_session();
        assert_eq!(
            parse_action("op:division", &s),
            Some(Intent::SelectOperation(Operation::Division))
        );
        assert_eq!(
            parse_action("toggle:show_timer", &s),
            Some(Intent::ToggleSetting(SettingKey::ShowTimer))
        );
        let first = s.choices.as_ref().unwrap().get(0).unwrap();
        assert_eq!(parse_action("choice:0", &s), Some(Intent::SubmitAnswer(first)));
        assert_eq!(parse_action("choice:9", &s), None);
        assert_eq!(parse_action("play-again", &s), Some(Intent::PlayAgain));
        assert_eq!(parse_action("dance", &s), None);
    }

    #[test]
    fn test_every_action_parses() {
        let settings = AccessibilitySettings {
            text_to_speech: true,
            ..Default::default()
        };
        let mut s = GameSession::new(2);
        for phase in [GamePhase::Menu, GamePhase::Settings, GamePhase::GameOver] {
            s.phase = phase;
            let screen = Screen::build(&s, &settings);
            for action in screen.actions() {
                assert!(parse_action(action, &s).is_some(), "{} in {:?}", action, phase);
            }
        }
        let s = playing_session();
        let screen = Screen::build(&s, &settings);
        assert_eq!(screen.actions().len(), 5);
        for action in screen.actions() {
            assert!(parse_action(action, &s).is_some(), "{}", action);
        }
    }

    #[test]
    fn test_loading_state() {
        let mut s = GameSession::new(3);
        s.phase = GamePhase::Playing;
        let Screen::Playing(v) = Screen::build(&s, &AccessibilitySettings::default()) else {
            panic!("expected playing");
        };
        assert!(v.problem.is_none());
        assert!(v.choices.is_empty());
    }
}

//! Accessibility settings
//!
//! Kept for the lifetime of the page/process only. They survive phase changes
//! and "Play Again" but are never written to storage.

use serde::{Deserialize, Serialize};

/// Names of the individual toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    DyslexicFont,
    VisualAids,
    FocusMode,
    ShowTimer,
    TextToSpeech,
}

impl SettingKey {
    /// Settings screen order
    pub const ALL: [SettingKey; 5] = [
        SettingKey::DyslexicFont,
        SettingKey::VisualAids,
        SettingKey::FocusMode,
        SettingKey::ShowTimer,
        SettingKey::TextToSpeech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::DyslexicFont => "dyslexic_font",
            SettingKey::VisualAids => "visual_aids",
            SettingKey::FocusMode => "focus_mode",
            SettingKey::ShowTimer => "show_timer",
            SettingKey::TextToSpeech => "text_to_speech",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "dyslexic_font" | "dyslexia" | "dyslexic" => Some(SettingKey::DyslexicFont),
            "visual_aids" | "aids" => Some(SettingKey::VisualAids),
            "focus_mode" | "focus" => Some(SettingKey::FocusMode),
            "show_timer" | "timer" => Some(SettingKey::ShowTimer),
            "text_to_speech" | "tts" | "speech" => Some(SettingKey::TextToSpeech),
            _ => None,
        }
    }

    /// Checkbox label on the settings screen
    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::DyslexicFont => "Use Dyslexia-Friendly Text",
            SettingKey::VisualAids => "Show Visual Aids",
            SettingKey::FocusMode => "Focus Mode",
            SettingKey::ShowTimer => "Show Timer",
            SettingKey::TextToSpeech => "Enable Text-to-Speech",
        }
    }
}

/// Accessibility toggles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    /// Upper-case all displayed text
    pub dyslexic_font: bool,
    /// Draw tally markers next to the operands
    pub visual_aids: bool,
    /// Plain background while playing
    pub focus_mode: bool,
    /// Show the countdown; when off, time never costs a try
    pub show_timer: bool,
    /// Read the problem aloud on request
    pub text_to_speech: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            dyslexic_font: false,
            visual_aids: false,
            focus_mode: false,
            show_timer: true,
            text_to_speech: false,
        }
    }
}

impl AccessibilitySettings {
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::DyslexicFont => self.dyslexic_font,
            SettingKey::VisualAids => self.visual_aids,
            SettingKey::FocusMode => self.focus_mode,
            SettingKey::ShowTimer => self.show_timer,
            SettingKey::TextToSpeech => self.text_to_speech,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        let flag = match key {
            SettingKey::DyslexicFont => &mut self.dyslexic_font,
            SettingKey::VisualAids => &mut self.visual_aids,
            SettingKey::FocusMode => &mut self.focus_mode,
            SettingKey::ShowTimer => &mut self.show_timer,
            SettingKey::TextToSpeech => &mut self.text_to_speech,
        };
        *flag = value;
    }

    /// Flip a toggle, returning the new value
    pub fn toggle(&mut self, key: SettingKey) -> bool {
        let value = !self.get(key);
        self.set(key, value);
        log::info!("Setting {} -> {}", key.as_str(), value);
        value
    }
}

//! Text-to-speech side channel
//!
//! The quiz only ever hands over the literal problem text; voices, rate and
//! queueing are the host's business.

use std::cell::RefCell;
use std::rc::Rc;

/// Anything that can read text aloud
pub trait Speaker {
    fn speak(&mut self, text: &str);

    /// Stop anything still queued (on teardown)
    fn cancel(&mut self) {}
}

/// Native fallback: no synthesizer, just log what would be said
#[derive(Debug, Default)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&mut self, text: &str) {
        log::info!("(speech) {}", text);
    }
}

/// Keeps everything spoken; clones share the same transcript
#[derive(Debug, Clone, Default)]
pub struct RecordingSpeaker {
    spoken: Rc<RefCell<Vec<String>>>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> Vec<String> {
        self.spoken.borrow().clone()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&mut self, text: &str) {
        self.spoken.borrow_mut().push(text.to_string());
    }
}

/// Browser speech synthesis (`window.speechSynthesis`)
#[cfg(target_arch = "wasm32")]
pub struct WebSpeaker {
    synth: Option<web_sys::SpeechSynthesis>,
}

#[cfg(target_arch = "wasm32")]
impl Default for WebSpeaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl WebSpeaker {
    pub fn new() -> Self {
        // Not every browser ships speech synthesis
        let synth = web_sys::window().and_then(|w| w.speech_synthesis().ok());
        if synth.is_none() {
            log::warn!("speechSynthesis unavailable - text-to-speech disabled");
        }
        Self { synth }
    }
}

#[cfg(target_arch = "wasm32")]
impl Speaker for WebSpeaker {
    fn speak(&mut self, text: &str) {
        let Some(synth) = &self.synth else { return };
        match web_sys::SpeechSynthesisUtterance::new_with_text(text) {
            Ok(utterance) => synth.speak(&utterance),
            Err(e) => log::warn!("Failed to create utterance: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_speaker_shares_transcript() {
        let recorder = RecordingSpeaker::new();
        let mut handle: Box<dyn Speaker> = Box::new(recorder.clone());
        handle.speak("3 + 4");
        handle.speak("9 ÷ 3");
        assert_eq!(recorder.transcript(), vec!["3 + 4", "9 ÷ 3"]);
    }
}

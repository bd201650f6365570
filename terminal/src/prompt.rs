//
// Copyright 2026 redclay contributors. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Tracks re-display discipline for the current prompt (C7).

/// Whether the prompt is currently displayed, consumed, or must be
/// re-emitted because of an out-of-band event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// Nothing has been shown yet.
    #[default]
    NoPrompt,
    /// The prompt text is on screen and no input has arrived since.
    AtPrompt,
    /// At least one byte of user input has arrived since the prompt was
    /// shown.
    UserInput,
    /// An interrupt (IP) cleared the display; the prompt must be re-shown.
    Interrupt,
}

/// A short-lived FSM, live only for the duration of one `input`/
/// `input_secret` call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PromptManager {
    state: PromptState,
}

impl PromptManager {
    /// A fresh manager in NO_PROMPT.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text that must be written to bring the display to
    /// AT_PROMPT, advancing the state accordingly. Empty if the prompt is
    /// already showing or input is already in progress.
    pub fn require_has_prompt(&mut self, prompt_text: &str) -> String {
        match self.state {
            PromptState::AtPrompt | PromptState::UserInput => String::new(),
            PromptState::NoPrompt => {
                self.state = PromptState::AtPrompt;
                prompt_text.to_string()
            }
            PromptState::Interrupt => {
                self.state = PromptState::AtPrompt;
                format!("\n{prompt_text}")
            }
        }
    }

    /// Records that user input has started arriving.
    pub fn mark_user_data(&mut self) {
        self.state = PromptState::UserInput;
    }

    /// Records an interrupt, forcing the prompt to be re-emitted next time.
    pub fn mark_interrupt(&mut self) {
        self.state = PromptState::Interrupt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_prompt_emits_text_and_advances() {
        let mut mgr = PromptManager::new();
        assert_eq!(mgr.require_has_prompt("> "), "> ");
        assert_eq!(mgr.state, PromptState::AtPrompt);
    }

    #[test]
    fn at_prompt_is_silent() {
        let mut mgr = PromptManager::new();
        mgr.require_has_prompt("> ");
        assert_eq!(mgr.require_has_prompt("> "), "");
    }

    #[test]
    fn user_input_is_silent() {
        let mut mgr = PromptManager::new();
        mgr.require_has_prompt("> ");
        mgr.mark_user_data();
        assert_eq!(mgr.require_has_prompt("> "), "");
    }

    #[test]
    fn interrupt_reemits_with_leading_newline() {
        let mut mgr = PromptManager::new();
        mgr.require_has_prompt("> ");
        mgr.mark_interrupt();
        assert_eq!(mgr.require_has_prompt("> "), "\n> ");
        assert_eq!(mgr.state, PromptState::AtPrompt);
    }
}

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

//! The prompted line editor atop the Telnet wire layer: the line buffer,
//! the server-echo FSM, the prompt manager, and the async `Terminal` that
//! composes them with a byte transport.

mod buffer;
mod echo;
mod error;
mod prompt;
mod terminal;

pub use buffer::{Annotation, LineBuffer};
pub use echo::EchoOptionState;
pub use error::{TerminalError, TerminalResult};
pub use prompt::{PromptManager, PromptState};
pub use terminal::{Terminal, WriteItem, READ_SIZE};

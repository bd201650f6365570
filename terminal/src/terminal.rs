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

//! Composes the wire layer with an async byte transport (C8): `write`,
//! `input`, `input_secret`, `sleep`, `close`.

use std::collections::VecDeque;
use std::time::Duration;

use redclay_telnet::consts::option::{ECHO, TIMING_MARK};
use redclay_telnet::{CommandCode, Host, OptionCode, OptionNegotiation, StreamParser, StreamStuffer, StreamUpdate, Tokenizer};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

use crate::buffer::{Annotation, LineBuffer};
use crate::echo::EchoOptionState;
use crate::error::{TerminalError, TerminalResult};
use crate::prompt::PromptManager;

/// Bytes read from the transport per loop iteration.
pub const READ_SIZE: usize = 4096;

/// One item accepted by [`Terminal::write`].
#[derive(Debug, Clone)]
pub enum WriteItem {
    /// Decoded user-facing text, CRLF-stuffed and IAC-stuffed on the wire.
    UserData(String),
    /// A negotiation reply.
    OptionNegotiation(OptionNegotiation),
}

impl From<String> for WriteItem {
    fn from(s: String) -> Self {
        WriteItem::UserData(s)
    }
}

impl From<&str> for WriteItem {
    fn from(s: &str) -> Self {
        WriteItem::UserData(s.to_string())
    }
}

impl From<OptionNegotiation> for WriteItem {
    fn from(n: OptionNegotiation) -> Self {
        WriteItem::OptionNegotiation(n)
    }
}

/// The prompted line editor. Owns exactly one tokenizer, parser, stuffer,
/// line buffer, and echo FSM; a [`PromptManager`] is constructed fresh for
/// the lifetime of each `input`/`input_secret` call.
pub struct Terminal<T> {
    transport: T,
    tokenizer: Tokenizer,
    parser: StreamParser,
    stuffer: StreamStuffer,
    line_buffer: LineBuffer,
    echo: EchoOptionState,
    pending: VecDeque<StreamUpdate>,
}

impl<T> Terminal<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a duplex byte transport (typically a `TcpStream` half-pair or,
    /// in tests, an in-memory duplex pipe).
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            tokenizer: Tokenizer::new(),
            parser: StreamParser::new(),
            stuffer: StreamStuffer::new(),
            line_buffer: LineBuffer::new(),
            echo: EchoOptionState::new(),
            pending: VecDeque::new(),
        }
    }

    /// Writes zero or more items. `drain` forces a transport flush once all
    /// items are written. Empty `UserData` items are a no-op.
    pub async fn write<I>(&mut self, items: I, drain: bool) -> TerminalResult<()>
    where
        I: IntoIterator,
        I::Item: Into<WriteItem>,
    {
        for item in items {
            match item.into() {
                WriteItem::UserData(s) if s.is_empty() => {}
                WriteItem::UserData(s) => {
                    let bytes = self.stuffer.stuff_user_data(&s)?;
                    self.transport.write_all(&bytes).await?;
                }
                WriteItem::OptionNegotiation(n) => {
                    let bytes = self.stuffer.stuff_option_negotiation(n);
                    self.transport.write_all(&bytes).await?;
                }
            }
        }
        if drain {
            self.transport.flush().await?;
        }
        Ok(())
    }

    /// Flushes, then suspends for `secs` seconds.
    pub async fn sleep(&mut self, secs: f64) -> TerminalResult<()> {
        self.transport.flush().await?;
        tokio::time::sleep(Duration::from_secs_f64(secs)).await;
        Ok(())
    }

    /// Flushes and closes the transport.
    pub async fn close(&mut self) -> TerminalResult<()> {
        self.transport.flush().await?;
        self.transport.shutdown().await?;
        Ok(())
    }

    /// Reads a logical input line, re-emitting `prompt` as needed. Returns
    /// the line including its trailing `'\n'`.
    #[instrument(skip(self))]
    pub async fn input(&mut self, prompt: &str) -> TerminalResult<String> {
        let mut prompt_mgr = PromptManager::new();
        self.read_loop(prompt, &mut prompt_mgr).await
    }

    /// As [`input`](Self::input), but suppresses peer echo for the duration
    /// (password entry). The prompt is shown, then the server announces
    /// `WILL ECHO`; once a line is read, a literal `"\n"` is written locally
    /// (the peer's own echoed line feed was suppressed along with the rest
    /// of its echo) before the server withdraws with `WONT ECHO`.
    #[instrument(skip(self))]
    pub async fn input_secret(&mut self, prompt: &str) -> TerminalResult<String> {
        let mut prompt_mgr = PromptManager::new();
        let text = prompt_mgr.require_has_prompt(prompt);
        self.write([text.as_str()], true).await?;
        if let Some(state) = self.echo.local_request(true) {
            self.send_echo(state).await?;
        }

        let result = self.read_loop(prompt, &mut prompt_mgr).await;

        self.write(["\n"], true).await?;
        if let Some(state) = self.echo.local_request(false) {
            self.send_echo(state).await?;
        }
        result
    }

    async fn send_echo(&mut self, state: bool) -> TerminalResult<()> {
        self.write(
            [OptionNegotiation {
                option: OptionCode::Echo,
                raw: ECHO,
                host: Host::Local,
                state,
            }],
            true,
        )
        .await
    }

    async fn read_loop(&mut self, prompt: &str, prompt_mgr: &mut PromptManager) -> TerminalResult<String> {
        let mut buf = vec![0u8; READ_SIZE];
        loop {
            if self.pending.is_empty() {
                let text = prompt_mgr.require_has_prompt(prompt);
                self.write([text.as_str()], true).await?;
                let n = self.transport.read(&mut buf).await?;
                if n == 0 {
                    return Err(TerminalError::ConnectionClosed);
                }
                let tokens = self.tokenizer.tokenize(&buf[..n]);
                self.pending.extend(self.parser.feed_all(tokens));
            }

            if let Some(update) = self.pending.pop_front() {
                self.dispatch(update, prompt_mgr).await?;
            }

            if self.line_buffer.has_line() {
                let (annotations, line) = self.line_buffer.pop();
                for annotation in annotations {
                    self.apply_annotation(annotation).await?;
                }
                if let Some(line) = line {
                    if !line.is_empty() {
                        return Ok(line);
                    }
                }
            }
        }
    }

    async fn apply_annotation(&mut self, annotation: Annotation) -> TerminalResult<()> {
        match annotation {
            Annotation::TimingMark => {
                self.write(
                    [OptionNegotiation {
                        option: OptionCode::TimingMark,
                        raw: TIMING_MARK,
                        host: Host::Local,
                        state: true,
                    }],
                    true,
                )
                .await
            }
        }
    }

    async fn dispatch(&mut self, update: StreamUpdate, prompt_mgr: &mut PromptManager) -> TerminalResult<()> {
        match update {
            StreamUpdate::UserData(s) => {
                self.line_buffer.append(&s);
                prompt_mgr.mark_user_data();
                Ok(())
            }
            StreamUpdate::OptionNegotiation(n) if n.option == OptionCode::Echo => {
                let reply = match n.host {
                    Host::Local => {
                        if n.state {
                            self.echo.peer_do_echo()
                        } else {
                            self.echo.peer_dont_echo()
                        }
                    }
                    Host::Peer => EchoOptionState::peer_directed_echo(n.state),
                };
                if let Some(state) = reply {
                    let host = n.host;
                    self.write(
                        [OptionNegotiation {
                            option: OptionCode::Echo,
                            raw: ECHO,
                            host,
                            state,
                        }],
                        true,
                    )
                    .await?;
                }
                Ok(())
            }
            StreamUpdate::OptionNegotiation(n) if n.option == OptionCode::TimingMark => {
                if n.state && n.host == Host::Local {
                    self.line_buffer.annotate(Annotation::TimingMark);
                }
                Ok(())
            }
            StreamUpdate::OptionNegotiation(n) => {
                if n.state {
                    self.write([n.refuse()], true).await?;
                }
                Ok(())
            }
            StreamUpdate::OptionSubnegotiation { option, raw } => {
                debug!(?option, raw, "ignoring subnegotiation payload");
                Ok(())
            }
            StreamUpdate::Command {
                code: CommandCode::InterruptProcess,
                ..
            } => {
                self.line_buffer.clear();
                prompt_mgr.mark_interrupt();
                Ok(())
            }
            StreamUpdate::Command { code, raw } => {
                debug!(?code, raw, "ignoring command");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simple_line_scenario() {
        let (mut client, server) = tokio::io::duplex(4096);
        let mut term = Terminal::new(server);
        client.write_all(b"abc\r\n").await.unwrap();
        let line = term.input("> ").await.unwrap();
        assert_eq!(line, "abc\n");
    }

    #[tokio::test]
    async fn unknown_option_refused() {
        let (mut client, server) = tokio::io::duplex(4096);
        let mut term = Terminal::new(server);
        client
            .write_all(&[b'a', b'b', b'c', 255, 251, 42, b'\r', b'\n'])
            .await
            .unwrap();
        let line = term.input("> ").await.unwrap();
        assert_eq!(line, "abc\n");
    }

    #[tokio::test]
    async fn bare_interrupt_clears_and_reprompts() {
        let (mut client, server) = tokio::io::duplex(4096);
        let mut term = Terminal::new(server);
        client.write_all(&[b'a', b'b', b'c', 255, 244]).await.unwrap();
        client.write_all(b"def\r\n").await.unwrap();
        let line = term.input("> ").await.unwrap();
        assert_eq!(line, "def\n");
    }

    #[tokio::test]
    async fn eof_raises_connection_closed() {
        let (client, server) = tokio::io::duplex(4096);
        let mut term = Terminal::new(server);
        drop(client);
        let err = term.input("> ").await.unwrap_err();
        assert!(matches!(err, TerminalError::ConnectionClosed));
    }
}

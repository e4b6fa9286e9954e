// src/terminal.rs
use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;

use crate::error::RequestFailure;
use crate::message::ChatResponse;
use crate::render::render;
use crate::services::backend::ChatBackend;
use crate::services::scroll::ScrollState;
use crate::services::widget::ChatWidget;

pub const QUIT_COMMAND: &str = "/quit";
pub const SCROLL_UP_COMMAND: &str = "/up";
pub const SCROLL_DOWN_COMMAND: &str = "/down";
pub const INPUT_DISABLED_NOTICE: &str = "(input disabled while sending)";

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Wipe the screen before every frame.
    Clear,
    /// Write frames one after another; ticks of the typing indicator are skipped.
    Append,
}

impl Redraw {
    /// `Clear` only for a real terminal that understands ANSI escapes.
    pub fn detect(is_tty: bool, term: Option<&str>) -> Self {
        match term {
            _ if !is_tty => Redraw::Append,
            Some("dumb") => Redraw::Append,
            _ => Redraw::Clear,
        }
    }
}

struct InFlight {
    result: Result<ChatResponse, RequestFailure>,
    quit: bool,
    error: Option<io::Error>,
}

/// Line reader that tolerates invalid UTF-8 and survives being cancelled by
/// `select!`: a partial line stays in `buf` until the next call.
struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
}

impl<R> LineReader<R>
where
    R: AsyncBufRead + Unpin,
{
    fn new(inner: R) -> Self {
        Self { inner, buf: Vec::new() }
    }

    async fn next_line(&mut self) -> io::Result<Option<String>> {
        let read = self.inner.read_until(b'\n', &mut self.buf).await?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }
        let mut bytes = std::mem::take(&mut self.buf);
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
    }
}

pub struct Terminal<W> {
    output: W,
    scroll: ScrollState,
    redraw: Redraw,
    tick: Duration,
    notice: Option<&'static str>,
}

impl<W> Terminal<W>
where
    W: AsyncWrite + Unpin,
{
    pub fn new(output: W, viewport: usize, redraw: Redraw) -> Self {
        Self {
            output,
            scroll: ScrollState::new(viewport),
            redraw,
            tick: Duration::from_millis(300),
            notice: None,
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    /// Drive one chat session until `/quit` or end of input. `/up` and `/down`
    /// page through the transcript.
    pub async fn run<R, B>(&mut self, input: R, widget: &mut ChatWidget, backend: Arc<B>) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        B: ChatBackend + 'static,
    {
        let mut lines = LineReader::new(input);

        loop {
            self.draw(widget, 0).await?;

            let Some(line) = lines.next_line().await? else { break };
            match line.trim() {
                QUIT_COMMAND => break,
                SCROLL_UP_COMMAND => {
                    self.scroll.scroll_up(self.scroll.height());
                    continue;
                }
                SCROLL_DOWN_COMMAND => {
                    let total = render(widget.state()).transcript_lines(0).len();
                    self.scroll.scroll_down(self.scroll.height(), total);
                    continue;
                }
                _ => {}
            }

            widget.set_input(line);
            let Some(text) = widget.begin_submit() else { continue };

            let backend = Arc::clone(&backend);
            let request = tokio::spawn(async move { backend.send(&text).await });
            let outcome = self.await_reply(request, &mut lines, widget).await;
            widget.complete(outcome.result);

            if let Some(err) = outcome.error {
                return Err(err);
            }
            if outcome.quit {
                break;
            }
        }

        self.draw(widget, 0).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    /// Wait for the in-flight request while keeping the indicator moving.
    /// Never returns before the request has been joined, so the caller can
    /// always fold exactly one result into the widget.
    async fn await_reply<R>(
        &mut self,
        mut request: JoinHandle<Result<ChatResponse, RequestFailure>>,
        lines: &mut LineReader<R>,
        widget: &ChatWidget,
    ) -> InFlight
    where
        R: AsyncBufRead + Unpin,
    {
        let mut ticker = tokio::time::interval(self.tick);
        ticker.tick().await;

        let mut tick = 0;
        let mut input_open = true;
        let mut quit = false;
        let mut error = None;

        let result = loop {
            if error.is_none() && (tick == 0 || self.redraw == Redraw::Clear) {
                if let Err(err) = self.draw(widget, tick).await {
                    error = Some(err);
                }
            }
            tokio::select! {
                joined = &mut request => {
                    break joined.unwrap_or_else(|e| Err(RequestFailure::new(e)));
                }
                _ = ticker.tick() => tick += 1,
                line = lines.next_line(), if input_open => match line {
                    Ok(Some(line)) if line.trim() == QUIT_COMMAND => {
                        tracing::info!("quit while a request is in flight, aborting it");
                        request.abort();
                        quit = true;
                        input_open = false;
                    }
                    Ok(Some(_)) => {
                        tracing::debug!("dropped input while a request is in flight");
                        self.notice = Some(INPUT_DISABLED_NOTICE);
                        tick += 1;
                    }
                    Ok(None) => input_open = false,
                    Err(err) => {
                        tracing::warn!(error = %err, "reading input failed");
                        input_open = false;
                        error = Some(err);
                    }
                },
            }
        };

        InFlight { result, quit, error }
    }

    async fn draw(&mut self, widget: &ChatWidget, tick: usize) -> io::Result<()> {
        let frame = render(widget.state());
        let lines = frame.transcript_lines(tick);
        self.scroll.on_messages_changed(widget.messages().len());

        let mut out = String::new();
        match self.redraw {
            Redraw::Clear => out.push_str(CLEAR_SCREEN),
            Redraw::Append => out.push('\n'),
        }
        for line in self.scroll.window(&lines) {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&"─".repeat(40));
        out.push('\n');
        out.push_str(&frame.input.line());
        out.push('\n');
        if let Some(notice) = self.notice.take() {
            out.push_str(notice);
            out.push('\n');
        }
        out.push_str("> ");

        self.output.write_all(out.as_bytes()).await?;
        self.output.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn line_reader_replaces_invalid_utf8() {
        let mut reader = LineReader::new(&b"ok\r\n\xff\xfe\ntail"[..]);
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("ok"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("\u{FFFD}\u{FFFD}"));
        assert_eq!(reader.next_line().await.unwrap().as_deref(), Some("tail"));
        assert_eq!(reader.next_line().await.unwrap(), None);
    }

    #[test]
    fn clear_only_on_capable_terminals() {
        assert_eq!(Redraw::detect(true, Some("xterm-256color")), Redraw::Clear);
        assert_eq!(Redraw::detect(true, None), Redraw::Clear);
        assert_eq!(Redraw::detect(true, Some("dumb")), Redraw::Append);
        assert_eq!(Redraw::detect(false, Some("xterm")), Redraw::Append);
    }
}

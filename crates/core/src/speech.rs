//! Speech capture seam.
//!
//! Recognisers differ per platform, so the core only sees a narrow capability: something that can
//! be started and stopped and that reports results and an end event to a [`TranscriptSink`].
//! Recognition runs synchronously inside [`SpeechCapture::start`].

use crate::{CoreError, CoreResult};
use std::io::BufRead;

/// Receives recognition events.
pub trait TranscriptSink {
    /// A (possibly interim) transcript. Later results replace earlier ones.
    fn on_result(&mut self, transcript: &str);

    /// Recognition finished.
    fn on_end(&mut self);
}

/// A speech recogniser.
pub trait SpeechCapture {
    /// Run recognition, reporting events to `sink` until the utterance ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying device or stream fails.
    fn start(&mut self, sink: &mut dyn TranscriptSink) -> CoreResult<()>;

    /// Abort recognition. Safe to call when not started.
    fn stop(&mut self);
}

/// Keeps the latest transcript and whether capture is still running.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    transcript: String,
    listening: bool,
}

impl TranscriptBuffer {
    /// Clear the previous transcript and mark capture as running.
    pub fn begin(&mut self) {
        self.transcript.clear();
        self.listening = true;
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn into_transcript(self) -> String {
        self.transcript
    }
}

impl TranscriptSink for TranscriptBuffer {
    fn on_result(&mut self, transcript: &str) {
        self.transcript.clear();
        self.transcript.push_str(transcript);
    }

    fn on_end(&mut self) {
        self.listening = false;
    }
}

/// Run one capture and return the final transcript (possibly empty).
///
/// # Errors
///
/// Propagates the capture's error.
pub fn capture_transcript(capture: &mut dyn SpeechCapture) -> CoreResult<String> {
    let mut buffer = TranscriptBuffer::default();
    buffer.begin();

    capture.start(&mut buffer)?;
    if buffer.is_listening() {
        capture.stop();
        buffer.on_end();
    }

    tracing::debug!(chars = buffer.transcript().chars().count(), "captured transcript");
    Ok(buffer.into_transcript())
}

/// Treats lines of text as recognition results.
///
/// Blank lines are skipped; the first non-blank line is the utterance, after which capture ends.
/// End of input also ends capture. Used where a transcript arrives from a pipe or a dictation
/// tool instead of a microphone.
pub struct LineCapture<R> {
    reader: R,
    stopped: bool,
}

impl<R: BufRead> LineCapture<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            stopped: false,
        }
    }
}

impl<R: BufRead> SpeechCapture for LineCapture<R> {
    fn start(&mut self, sink: &mut dyn TranscriptSink) -> CoreResult<()> {
        self.stopped = false;
        let mut line = String::new();

        while !self.stopped {
            line.clear();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(CoreError::TranscriptRead)?;
            if read == 0 {
                break;
            }

            let utterance = line.trim();
            if !utterance.is_empty() {
                sink.on_result(utterance);
                break;
            }
        }

        sink.on_end();
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

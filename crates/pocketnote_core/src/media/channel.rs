use crate::media::MediaEvent;
use log::debug;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Creates a connected completion sender/inbox pair.
pub fn media_channel() -> (MediaSender, MediaInbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MediaSender { tx }, MediaInbox { rx })
}

/// Completion handle given to host collaborators.
#[derive(Debug, Clone)]
pub struct MediaSender {
    tx: UnboundedSender<MediaEvent>,
}

impl MediaSender {
    /// Delivers one completion.
    ///
    /// Returns `false` when the owning workflow is already gone; the event is
    /// dropped in that case.
    pub fn send(&self, event: MediaEvent) -> bool {
        let label = event.label();
        match self.tx.send(event) {
            Ok(()) => true,
            Err(_) => {
                debug!("event=media_dropped module=media kind={label} reason=inbox_closed");
                false
            }
        }
    }

    pub fn captured(&self, locator: impl Into<String>) -> bool {
        self.send(MediaEvent::Captured {
            locator: locator.into(),
        })
    }

    pub fn capture_cancelled(&self, locator: impl Into<String>) -> bool {
        self.send(MediaEvent::CaptureCancelled {
            locator: locator.into(),
        })
    }

    pub fn capture_failed(&self, locator: impl Into<String>, reason: impl Into<String>) -> bool {
        self.send(MediaEvent::CaptureFailed {
            locator: locator.into(),
            reason: reason.into(),
        })
    }

    pub fn picked(&self, locator: impl Into<String>) -> bool {
        self.send(MediaEvent::Picked {
            locator: locator.into(),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving side owned by exactly one workflow.
#[derive(Debug)]
pub struct MediaInbox {
    rx: UnboundedReceiver<MediaEvent>,
}

impl MediaInbox {
    /// Takes every completion received so far without waiting.
    pub fn drain(&mut self) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    /// Waits for the next completion.
    ///
    /// Resolves to `None` once every sender has been dropped.
    pub async fn next(&mut self) -> Option<MediaEvent> {
        self.rx.recv().await
    }
}

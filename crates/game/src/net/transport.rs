use std::sync::mpsc;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport is not open")]
    NotOpen,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outbound half of whatever carries frames to the relay. Sends are
/// fire-and-forget: no acknowledgment, no retry, no queueing. A send on a
/// closed transport fails immediately so the caller can surface it.
pub trait Transport {
    fn is_open(&self) -> bool;

    fn send(&mut self, frame: &str) -> Result<(), TransportError>;
}

/// In-process transport over an mpsc channel. The receiving half plays the
/// relay; dropping it closes the transport.
#[derive(Debug)]
pub struct ChannelTransport {
    tx: mpsc::Sender<String>,
    open: bool,
}

impl ChannelTransport {
    pub fn pair() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx, open: true }, rx)
    }
}

impl Transport for ChannelTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn send(&mut self, frame: &str) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }
        match self.tx.send(frame.to_string()) {
            Ok(()) => Ok(()),
            Err(_) => {
                self.open = false;
                Err(TransportError::NotOpen)
            }
        }
    }
}

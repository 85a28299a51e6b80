use std::io::{self, Read, Write};
use std::net::TcpStream;

use volley::{Transport, TransportError};

/// Client end of the relay link: newline-delimited JSON frames over a
/// nonblocking TCP stream.
pub struct TcpTransport {
    stream: TcpStream,
    recv_buf: Vec<u8>,
    open: bool,
}

impl TcpTransport {
    pub fn connect(addr: &str) -> io::Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;
        stream.set_nonblocking(true)?;

        Ok(Self {
            stream,
            recv_buf: Vec::new(),
            open: true,
        })
    }

    /// Drains whatever complete frames the socket has pending. Returns
    /// immediately when nothing is waiting.
    pub fn poll_frames(&mut self) -> io::Result<Vec<String>> {
        let mut chunk = [0u8; 1024];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    self.open = false;
                    break;
                }
                Ok(n) => self.recv_buf.extend_from_slice(&chunk[..n]),
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) => {
                    self.open = false;
                    return Err(e);
                }
            }
        }

        let mut frames = Vec::new();
        while let Some(pos) = self.recv_buf.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.recv_buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line[..pos]).into_owned();
            if !line.is_empty() {
                frames.push(line);
            }
        }

        Ok(frames)
    }
}

impl Transport for TcpTransport {
    fn is_open(&self) -> bool {
        self.open
    }

    fn send(&mut self, frame: &str) -> Result<(), TransportError> {
        if !self.open {
            return Err(TransportError::NotOpen);
        }

        let mut data = Vec::with_capacity(frame.len() + 1);
        data.extend_from_slice(frame.as_bytes());
        data.push(b'\n');

        match self.stream.write_all(&data) {
            Ok(()) => Ok(()),
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::BrokenPipe
                        | io::ErrorKind::ConnectionReset
                        | io::ErrorKind::ConnectionAborted
                ) =>
            {
                self.open = false;
                Err(TransportError::NotOpen)
            }
            Err(e) => Err(TransportError::Io(e)),
        }
    }
}

//! Line-framed transport for one client connection

use crate::error::SessionError;
use shared::MAX_LINE_LEN;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Reads and writes newline-terminated messages over any byte stream
///
/// Generic over the stream so sessions run the same over TCP and over
/// in-memory pipes in tests.
#[derive(Debug)]
pub struct Connection<S> {
    stream: BufReader<S>,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }

    /// Receives one message without its line terminator
    ///
    /// End of stream is reported as [`SessionError::ConnectionClosed`].
    pub async fn recv(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        let read = (&mut self.stream)
            .take(MAX_LINE_LEN)
            .read_line(&mut line)
            .await?;

        if read == 0 {
            return Err(SessionError::ConnectionClosed);
        }
        if !line.ends_with('\n') {
            if read as u64 == MAX_LINE_LEN {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "message too long").into());
            }
            // peer closed mid-line
            return Err(SessionError::ConnectionClosed);
        }

        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    pub async fn send(&mut self, message: &str) -> Result<(), SessionError> {
        let mut frame = String::with_capacity(message.len() + 1);
        frame.push_str(message);
        frame.push('\n');

        let stream = self.stream.get_mut();
        stream.write_all(frame.as_bytes()).await?;
        stream.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_send_and_recv_lines() {
        let (client, server) = duplex(1024);
        let mut client = Connection::new(client);
        let mut server = Connection::new(server);

        client.send("alice&secret").await.unwrap();
        client.send("").await.unwrap();

        assert_eq!(server.recv().await.unwrap(), "alice&secret");
        assert_eq!(server.recv().await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_crlf_is_stripped() {
        let (mut client, server) = duplex(1024);
        let mut server = Connection::new(server);

        client.write_all(b"hm-start\r\n").await.unwrap();

        assert_eq!(server.recv().await.unwrap(), "hm-start");
    }

    #[tokio::test]
    async fn test_eof_is_connection_closed() {
        let (client, server) = duplex(1024);
        let mut server = Connection::new(server);
        drop(client);

        assert!(matches!(
            server.recv().await,
            Err(SessionError::ConnectionClosed)
        ));
    }

    #[tokio::test]
    async fn test_oversized_line_is_rejected() {
        let (mut client, server) = duplex(4096);
        let mut server = Connection::new(server);

        let long = vec![b'a'; MAX_LINE_LEN as usize + 10];
        client.write_all(&long).await.unwrap();

        assert!(matches!(server.recv().await, Err(SessionError::Transport(_))));
    }
}

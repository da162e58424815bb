//! Terminal chat client
//!
//! Sends the nickname as its very first write, then forwards input lines to
//! the server and prints every inbound chunk on its own line. The server
//! echoes our own messages back, so nothing is echoed locally.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

use crate::error::AppError;
use crate::message::{validate_name, READ_BUFFER_LEN};

pub struct ChatClient {
    stream: TcpStream,
    nickname: String,
}

impl ChatClient {
    /// Validate the nickname, connect and introduce ourselves
    pub async fn connect(addr: &str, nickname: &str) -> Result<Self, AppError> {
        validate_name(nickname)?;

        let mut stream = TcpStream::connect(addr).await?;
        stream.write_all(nickname.as_bytes()).await?;
        debug!("Connected to {} as '{}'", addr, nickname);

        Ok(Self {
            stream,
            nickname: nickname.to_string(),
        })
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Chat until `input` ends or the server closes the connection
    pub async fn run<I, O>(self, input: I, mut output: O) -> Result<(), AppError>
    where
        I: AsyncBufRead + Unpin,
        O: AsyncWrite + Unpin + Send + 'static,
    {
        let (mut reader, mut writer) = self.stream.into_split();

        let mut inbound = tokio::spawn(async move {
            let mut buf = vec![0u8; READ_BUFFER_LEN];
            loop {
                let n = reader.read(&mut buf).await?;
                if n == 0 {
                    return Ok::<_, std::io::Error>(());
                }
                output.write_all(&buf[..n]).await?;
                output.write_all(b"\n").await?;
                output.flush().await?;
            }
        });

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) if line.trim().is_empty() => continue,
                    Some(line) => writer.write_all(line.as_bytes()).await?,
                    None => break,
                },
                result = &mut inbound => {
                    debug!("Server closed the connection");
                    return match result {
                        Ok(io_result) => io_result.map_err(AppError::from),
                        Err(_) => Ok(()),
                    };
                }
            }
        }

        let _ = writer.shutdown().await;
        inbound.abort();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{duplex, BufReader};
    use tokio::net::TcpListener;

    use super::*;
    use crate::error::ClientError;

    #[tokio::test]
    async fn test_rejects_long_nickname_before_connecting() {
        let result = ChatClient::connect("127.0.0.1:1", &"n".repeat(25)).await;
        assert!(matches!(
            result,
            Err(AppError::Client(ClientError::NicknameTooLong(25)))
        ));
    }

    #[tokio::test]
    async fn test_sends_nickname_then_lines() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let client = ChatClient::connect(&addr, "alice").await.unwrap();
        assert_eq!(client.nickname(), "alice");
        let (mut server, _) = listener.accept().await.unwrap();

        let mut name = [0u8; 5];
        server.read_exact(&mut name).await.unwrap();
        assert_eq!(&name, b"alice");

        let (output, mut display) = duplex(256);
        let input = BufReader::new(&b"hi there\n   \n"[..]);
        client.run(input, output).await.unwrap();

        let mut sent = Vec::new();
        server.read_to_end(&mut sent).await.unwrap();
        assert_eq!(sent, b"hi there");

        drop(server);
        let mut shown = Vec::new();
        display.read_to_end(&mut shown).await.unwrap();
        assert!(shown.is_empty());
    }

    #[tokio::test]
    async fn test_prints_inbound_with_newline() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let client = ChatClient::connect(&addr, "bob").await.unwrap();
        let (mut server, _) = listener.accept().await.unwrap();
        let mut name = [0u8; 3];
        server.read_exact(&mut name).await.unwrap();

        let (output, mut display) = duplex(256);
        // stdin that never ends
        let (_keep_open, input) = duplex(16);
        let run = tokio::spawn(client.run(BufReader::new(input), output));

        server.write_all(b"bob: hello").await.unwrap();
        let mut shown = [0u8; 11];
        display.read_exact(&mut shown).await.unwrap();
        assert_eq!(&shown, b"bob: hello\n");

        drop(server);
        run.await.unwrap().unwrap();
    }
}

//! Headless line client.
//!
//! Sends `NAME` on connect, then forwards input lines to the server and
//! server lines to the output verbatim. Rendering a board is left to
//! whatever reads the output.

use anyhow::Result;
use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, instrument};

/// Connects to `host`:`port` and relays stdin/stdout until either side ends.
#[instrument]
pub async fn run_client(host: &str, port: u16, name: &str) -> Result<()> {
    let stream = TcpStream::connect((host, port)).await.map_err(|e| {
        tracing::error!(error = %e, "Cannot connect to server");
        anyhow::anyhow!("Cannot connect to server at {}:{}: {}", host, port, e)
    })?;
    info!("Connected to server");

    relay(stream, tokio::io::stdin(), &mut tokio::io::stdout(), name).await
}

/// Relays between a server connection and a local input/output pair.
///
/// Returns when the server closes the connection or the input ends; in the
/// latter case the connection is closed, which the server treats as a
/// disconnect.
pub async fn relay<S, I, O>(server: S, input: I, output: &mut O, name: &str) -> Result<()>
where
    S: AsyncRead + AsyncWrite,
    I: AsyncRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let (read, write) = tokio::io::split(server);
    let mut from_server = FramedRead::new(read, LinesCodec::new());
    let mut to_server = FramedWrite::new(write, LinesCodec::new());
    let mut input = FramedRead::new(input, LinesCodec::new());

    to_server.send(format!("NAME {}", name)).await?;

    loop {
        tokio::select! {
            line = from_server.next() => match line {
                Some(line) => {
                    let line = line?;
                    output.write_all(line.as_bytes()).await?;
                    output.write_all(b"\n").await?;
                    output.flush().await?;
                }
                None => {
                    info!("Server closed the connection");
                    break;
                }
            },
            line = input.next() => match line {
                Some(line) => {
                    let line = line?;
                    debug!(%line, "Sending");
                    to_server.send(line).await?;
                }
                None => {
                    info!("Input ended; disconnecting");
                    SinkExt::<String>::close(&mut to_server).await?;
                    break;
                }
            },
        }
    }

    Ok(())
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use bytes::Bytes;
use tokio::io::{
    self, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
    BufWriter,
};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::fixture::HostConfigFixture;
use crate::http::req::{BodyKind, RequestError, RequestHead, drain_body};
use crate::http::protocol::status::StatusCode;
use crate::http::res::{Response, interim};

/// Pause after a failed accept so fd exhaustion does not spin the loop.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(50);
/// After a rejection the unread request is drained for a bounded time so the
/// close does not turn into a reset that discards the error reply.
const LINGER_TIMEOUT: Duration = Duration::from_secs(1);
const LINGER_BYTES: u64 = 64 * 1024;

/// A bound listener that answers every request with the hostconfig fixture.
///
/// Binding is the only fallible step: once `bind` returns the server is
/// listening, and `serve` runs until its future is dropped.
pub struct FixtureServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    body: Bytes,
    config: Arc<ServerConfig>,
}

impl FixtureServer {
    pub async fn bind(config: ServerConfig, fixture: &HostConfigFixture) -> anyhow::Result<Self> {
        let body = fixture.to_json()?;
        let listener = TcpListener::bind(config.addr)
            .await
            .with_context(|| format!("failed to bind fixture server on {}", config.addr))?;
        let local_addr = listener.local_addr()?;

        info!("fixture server listening on: http://{}", local_addr);

        Ok(Self {
            listener,
            local_addr,
            body,
            config: Arc::new(config),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept loop. Connections run as tasks owned by this future, so dropping
    /// it (or aborting the task running it) tears them down as well.
    pub async fn serve(self) -> anyhow::Result<()> {
        let mut connections = JoinSet::new();

        loop {
            while connections.try_join_next().is_some() {}

            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    warn!(error = %err, "failed to accept connection");
                    sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            let body = self.body.clone();
            let config = Arc::clone(&self.config);
            connections.spawn(async move {
                if let Err(err) = handle_connection(socket, peer, body, config).await {
                    debug!(%peer, error = %err, "connection ended with error");
                }
            });
        }
    }

    pub fn spawn(self) -> ServerHandle {
        let local_addr = self.local_addr;
        ServerHandle {
            local_addr,
            task: tokio::spawn(self.serve()),
        }
    }
}

/// Binds the devstack fixture on `config.addr` and starts serving it.
pub async fn start(config: ServerConfig) -> anyhow::Result<ServerHandle> {
    let fixture = HostConfigFixture::devstack();
    let server = FixtureServer::bind(config, &fixture).await?;
    Ok(server.spawn())
}

pub struct ServerHandle {
    local_addr: SocketAddr,
    task: JoinHandle<anyhow::Result<()>>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Waits for the accept loop to finish, which only happens on panic or abort.
    pub async fn join(self) -> anyhow::Result<()> {
        self.task.await?
    }

    /// Stops accepting, drops open connections and releases the port.
    pub async fn shutdown(self) {
        self.task.abort();
        let _ = self.task.await;
    }
}

async fn handle_connection(
    socket: TcpStream,
    peer: SocketAddr,
    body: Bytes,
    config: Arc<ServerConfig>,
) -> anyhow::Result<()> {
    let (reader, writer) = socket.into_split();
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);

    loop {
        // Idle wait: nothing of the next request has arrived yet.
        match timeout(config.keep_alive_timeout, reader.fill_buf()).await {
            Ok(Ok(buf)) if buf.is_empty() => return Ok(()),
            Ok(Ok(_)) => {}
            Ok(Err(err)) => return Err(err.into()),
            Err(_) => {
                debug!(%peer, "idle connection timed out");
                return Ok(());
            }
        }

        let head = match timeout(
            config.header_timeout,
            RequestHead::read_from(&mut reader, &config.limits),
        )
        .await
        {
            Ok(Ok(head)) => head,
            Ok(Err(err)) => return reject(&mut reader, &mut writer, peer, err).await,
            Err(_) => return reject(&mut reader, &mut writer, peer, RequestError::Timeout).await,
        };

        if head.method.is_tunnel() {
            debug!(%peer, target = %head.target, "dropping CONNECT request");
            return Ok(());
        }

        let keep_alive = head.keep_alive();
        let body_kind = match head.body_kind() {
            Ok(kind) => kind,
            Err(err) => return reject(&mut reader, &mut writer, peer, err).await,
        };

        if body_kind != BodyKind::Empty && head.expects_continue() {
            writer.write_all(&interim(StatusCode::Continue)).await?;
            writer.flush().await?;
        }
        if let Err(err) = drain_body(&mut reader, body_kind, &config.limits).await {
            return reject(&mut reader, &mut writer, peer, err).await;
        }

        debug!(%peer, method = %head.method, target = %head.target, "serving hostconfig fixture");
        Response::json(body.clone(), keep_alive)
            .write_to(&mut writer, head.method.sends_body())
            .await?;

        if !keep_alive {
            writer.shutdown().await?;
            return Ok(());
        }
    }
}

/// Answers an unframeable request with its status and closes; a vanished
/// peer just ends the connection.
async fn reject<R, W>(
    reader: &mut R,
    writer: &mut W,
    peer: SocketAddr,
    err: RequestError,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(status) = err.status() else {
        return match err {
            RequestError::Io(e) => Err(e.into()),
            _ => Ok(()),
        };
    };

    debug!(%peer, error = %err, "rejecting request");
    Response::failure(status).write_to(writer, true).await?;
    writer.shutdown().await?;

    let mut rest = (&mut *reader).take(LINGER_BYTES);
    let _ = timeout(LINGER_TIMEOUT, io::copy(&mut rest, &mut io::sink())).await;
    Ok(())
}

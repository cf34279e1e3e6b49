use std::path::Path;

use anyhow::{Context, Result};
use tokio::fs;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::protocol::{ClientMessage, Command, ErrorCode, ErrorResponse, ServerMessage};
use crate::source::SuggestionClient;
use crate::widget::{TypeaheadWidget, WidgetOptions};

pub struct TypeaheadServer {
    config: ServerConfig,
    client: SuggestionClient,
    options: WidgetOptions,
}

impl TypeaheadServer {
    pub fn new(config: ServerConfig, client: SuggestionClient, options: WidgetOptions) -> Self {
        Self {
            config,
            client,
            options,
        }
    }

    pub async fn run(&self) -> Result<()> {
        self.prepare_socket_path().await?;
        if self.config.socket_path.exists() {
            fs::remove_file(&self.config.socket_path)
                .await
                .with_context(|| {
                    format!(
                        "failed to cleanup stale socket {}",
                        self.config.socket_path.display()
                    )
                })?;
        }

        let listener = UnixListener::bind(&self.config.socket_path).with_context(|| {
            format!(
                "failed to bind unix socket at {}",
                self.config.socket_path.display()
            )
        })?;
        info!(
            "typeahead daemon listening on {}",
            self.config.socket_path.display()
        );

        loop {
            let (stream, _) = listener.accept().await?;
            let client = self.client.clone();
            let options = self.options.clone();
            tokio::spawn(async move {
                if let Err(error) = handle_connection(stream, client, options).await {
                    warn!("connection closed with error: {error:#}");
                }
            });
        }
    }

    async fn prepare_socket_path(&self) -> Result<()> {
        if let Some(parent) = Path::new(&self.config.socket_path).parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("failed to create socket directory {}", parent.display())
            })?;
        }
        Ok(())
    }
}

async fn handle_connection(
    stream: UnixStream,
    client: SuggestionClient,
    options: WidgetOptions,
) -> Result<()> {
    let (reader, writer) = stream.into_split();
    serve(reader, writer, client, options).await
}

async fn serve<R, W>(reader: R, writer: W, client: SuggestionClient, options: WidgetOptions) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (widget, mut outputs) = TypeaheadWidget::mount(client, options);
    let (lines_tx, lines_rx) = mpsc::unbounded_channel::<ServerMessage>();

    let forward_tx = lines_tx.clone();
    let forwarder = tokio::spawn(async move {
        while let Some(output) = outputs.recv().await {
            if forward_tx.send(output.into()).is_err() {
                break;
            }
        }
    });
    let writer_task = tokio::spawn(write_lines(writer, lines_rx));

    let mut lines = BufReader::new(reader).lines();
    let read_result = async {
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ClientMessage>(&line) {
                Ok(message) => match message.into_command() {
                    Command::Ui(event) => {
                        widget.send(event);
                    }
                    Command::SetChosen(chosen) => {
                        widget.set_chosen(chosen);
                    }
                },
                Err(error) => {
                    error!("invalid client JSON: {error}");
                    let _ = lines_tx.send(ServerMessage::Error(ErrorResponse {
                        code: ErrorCode::InvalidRequest,
                        message: format!("invalid JSON payload: {error}"),
                    }));
                }
            }
        }
        anyhow::Ok(())
    }
    .await;

    widget.dispose().await;
    drop(lines_tx);
    let _ = forwarder.await;
    writer_task.await.context("writer task panicked")??;
    read_result
}

async fn write_lines<W>(mut writer: W, mut lines: mpsc::UnboundedReceiver<ServerMessage>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = lines.recv().await {
        let payload = serde_json::to_string(&message)?;
        writer.write_all(payload.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}

use anyhow::Context;

use retention_alerts::{
    inbox, AlertBoard, AlertSnapshot, HttpSnapshotSource, LiveAlertSync, PullEndpoint,
    SnapshotFetcher,
};
use retention_core::config::FeedConfig;
use retention_core::RetentionConfig;

use crate::cli::Command;

pub async fn run(command: Command, config: RetentionConfig) -> anyhow::Result<()> {
    match command {
        Command::Watch { .. } => watch(&config).await,
        Command::Today => today(&config).await,
    }
}

/// Mount the engine and redraw on every store change until Ctrl-C.
async fn watch(config: &RetentionConfig) -> anyhow::Result<()> {
    let sync = LiveAlertSync::mount_live(&config.feed).context("failed to mount alert sync")?;
    let mut updates = sync.subscribe();
    let mut push_status = sync.watch_push_status();

    println!("{}", sync.board());

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::info!("interrupted, shutting down");
                break;
            }
            Ok(()) = updates.changed() => {
                let snapshot = updates.borrow_and_update().clone();
                render(&snapshot);
            }
            Ok(()) = push_status.changed() => {
                let status = *push_status.borrow_and_update();
                tracing::info!(?status, "push channel status changed");
            }
        }
    }

    sync.unmount().await;
    Ok(())
}

async fn today(config: &RetentionConfig) -> anyhow::Result<()> {
    println!("{}", fetch_today(&config.feed).await?);
    Ok(())
}

/// One pull of the today feed. Nothing is stored, so the inbox is dropped.
async fn fetch_today(feed: &FeedConfig) -> anyhow::Result<AlertBoard> {
    let (sender, _) = inbox::channel();
    let fetcher = SnapshotFetcher::new(HttpSnapshotSource::new(feed)?, sender);
    let endpoint = PullEndpoint::today_from(feed);
    let alerts = fetcher
        .fetch_once(&endpoint)
        .await
        .with_context(|| format!("failed to fetch {}", endpoint.url))?;
    Ok(AlertBoard::from_set(&alerts))
}

fn render(snapshot: &AlertSnapshot) {
    if let (Some(origin), Some(at)) = (snapshot.origin(), snapshot.received_at()) {
        println!("-- revision {} via {origin:?} at {} --", snapshot.revision(), at.format("%H:%M:%S"));
    }
    println!("{}", snapshot.board());
}

#[cfg(test)]
mod tests {
    use super::*;
    use retention_core::AlertCategory;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answers a single request with `body`.
    async fn serve_once(body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => return,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            assert!(String::from_utf8_lossy(&request).starts_with("GET /alertas/hoje "));
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn today_fetches_the_today_feed_once() {
        let base_url = serve_once(
            r#"[{"cliente_id":"c1","nome_cliente":"Ana","motivo":"segunda"},{"cliente_id":"c2","nome_cliente":"Bruno","itens_faltantes":["Leite"]}]"#,
        )
        .await;
        let feed = FeedConfig {
            base_url,
            ..FeedConfig::default()
        };

        let board = fetch_today(&feed).await.unwrap();
        assert_eq!(board.badge(), 2);
        assert_eq!(board.section(AlertCategory::MissedExpectedDay).entries.len(), 1);
        assert_eq!(board.section(AlertCategory::MissingItem).entries.len(), 1);
    }
}

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::BufReader;

use real_estate_chat::config::Config;
use real_estate_chat::services::backend::HttpBackend;
use real_estate_chat::services::widget::ChatWidget;
use real_estate_chat::terminal::{Redraw, Terminal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(std::io::stderr)
        .init();

    let backend = Arc::new(HttpBackend::new(config.endpoint.clone()));
    tracing::info!(endpoint = %backend.endpoint(), "real estate assistant starting");

    let term = std::env::var("TERM").ok();
    let redraw = Redraw::detect(std::io::stdout().is_terminal(), term.as_deref());

    let mut widget = ChatWidget::new();
    let mut terminal = Terminal::new(tokio::io::stdout(), config.viewport, redraw);
    terminal
        .run(BufReader::new(tokio::io::stdin()), &mut widget, backend)
        .await
        .context("terminal session failed")?;

    tracing::info!(messages = widget.messages().len(), "session ended");
    Ok(())
}

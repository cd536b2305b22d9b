//! ER Builds Client - composition root binary
//!
//! Native builds expose a small command line over the same services the
//! pages use:
//!
//! - `suggest <category> <text>` prints the suggestion rows for `text`
//! - `unread` prints the unread notification count

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "erbuilds_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = erbuilds_client::ClientConfig::from_env();
    let platform = erbuilds_client::infrastructure::platform::create_platform();
    let services = erbuilds_client::ClientServices::new(&config, platform);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("suggest") => {
            let category = args
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("usage: suggest <category> <text>"))?;
            let text = args[2..].join(" ");
            suggest(&services, &config, category, &text).await
        }
        Some("unread") => {
            let badge = services.notifications().poll_once().await;
            println!("{}", badge.count());
            Ok(())
        }
        _ => {
            eprintln!("usage: erbuilds-client <suggest <category> <text> | unread>");
            Ok(())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn suggest(
    services: &erbuilds_client::ClientServices,
    config: &erbuilds_client::ClientConfig,
    category: &str,
    text: &str,
) -> anyhow::Result<()> {
    use erbuilds_client::application::services::DropdownView;

    let category: erbuilds_domain::CatalogCategory = category.parse()?;
    tracing::info!(%category, text, "Looking up suggestions");

    let engine = erbuilds_client::SuggestionEngine::new(
        format!("cli_{}", category),
        category,
        services.catalog(),
        services.platform().sleep(),
        config.debounce_ms,
    );
    engine.input(text).await;

    match engine.view() {
        DropdownView::Rows(rows) => {
            for row in rows {
                println!("{}  {}", row.icon(), row.name);
                if let Some(snippet) = row.snippet {
                    println!("    {}", snippet);
                }
            }
        }
        view => {
            if let Some(message) = view.message() {
                println!("{}", message);
            }
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    tracing::info!("Starting ER Builds client");

    let config = erbuilds_client::ClientConfig::from_env();
    let platform = erbuilds_client::infrastructure::platform::create_platform();
    let services = erbuilds_client::ClientServices::new(&config, platform);

    let poller = services.notifications();
    wasm_bindgen_futures::spawn_local(async move { poller.run().await });
}

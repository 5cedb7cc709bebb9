//! `zincsaver resolve <url>`: one broker round trip, printed.

use {
    anyhow::{Result, bail},
    zincsaver_cobalt::{
        Broker, CobaltClient, CobaltResponse, DownloadRequest, SourceUrl, is_supported_url,
    },
    zincsaver_config::ZincConfig,
    zincsaver_media::items_from_response,
};

pub async fn handle_resolve(config: &ZincConfig, url: &str) -> Result<()> {
    let Some(source) = SourceUrl::parse(url) else {
        bail!("not an absolute url: {url}");
    };
    if !is_supported_url(source.as_str()) {
        bail!("{source} is not on a supported site");
    }

    let client = CobaltClient::new(&config.cobalt)?;
    let raw = client.fetch(&DownloadRequest::new(source.clone())).await?;
    println!("{}", serde_json::to_string_pretty(&raw)?);

    let response = CobaltResponse::decode(&raw)?;
    println!("\n{response:#?}");

    let items = items_from_response(response, &source)?;
    println!();
    if items.is_empty() {
        println!("no deliverable media");
    }
    for item in &items {
        println!("{:<10} {}", item.kind.to_string(), item.url);
    }
    Ok(())
}

use forwarder::runtime::boot;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, api_key) = boot::boot()?;
    tracing::info!(
        "Configuration ready: forwarding to {} ({})",
        config.output.server_url,
        if api_key.is_some() { "authenticated" } else { "anonymous" }
    );
    Ok(())
}

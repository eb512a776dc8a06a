use agent_inbox_http::{AgentInboxClient, InboxMessage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = AgentInboxClient::from_env().map_err(anyhow::Error::msg)?;

    let health = client.health().await?;
    println!("backend: {} (version {})", health.status, health.version);

    let message = InboxMessage::new("demo-conversation", "demo-user", "What can you do?")
        .with_meta("channel", "demo");

    // deliver() never fails: on exhaustion it returns the fallback reply.
    let reply = client.deliver(&message).await;
    println!("{reply}");

    Ok(())
}

//! Check the ZTF observation queue for a user.
//!
//! Usage: `check_queue <username> [--all]`
//!
//! Reads `KOWALSKI_HOST` and `KOWALSKI_API_TOKEN` from the environment,
//! connects to the trigger service and prints either the current ToO queue
//! summaries (default) or the names of all queues (`--all`).

use anyhow::{bail, Context, Result};

use too_rust::{QueueConfig, TriggerQueue};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (username, all) = match args.as_slice() {
        [username] => (username.clone(), false),
        [username, flag] if flag == "--all" => (username.clone(), true),
        _ => bail!("usage: check_queue <username> [--all]"),
    };

    let config = QueueConfig::from_env().context("reading queue configuration")?;
    let queue = TriggerQueue::new(username.clone(), &config)
        .await
        .context("connecting to Kowalski")?;

    if all {
        println!("Checking all queues for {}", username);
        let names = queue.list_all_queue_names().await?;
        if names.is_empty() {
            println!("Currently, no triggers are in the ZTF observation queue.");
        } else {
            println!("The current ZTF observation queue:\n{}", names.join("\n"));
        }
    } else {
        println!("Checking ToO queue for {}", username);
        let summaries = queue.list_too_queue_summaries().await?;
        if summaries.is_empty() {
            println!("Currently, no ToO triggers are in the ZTF observation queue.");
        } else {
            println!(
                "The current ZTF ToO observation queue:\n{}",
                summaries.join("\n")
            );
        }
    }

    Ok(())
}

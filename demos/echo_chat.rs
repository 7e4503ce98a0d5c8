//! Multi-turn streaming demo using the echo provider.
//!
//! The echo provider needs no credentials or network access, so this runs
//! anywhere:
//!
//! ```bash
//! cargo run --example echo_chat
//! ```

use std::io::Write;
use std::sync::Arc;

use chatstream::{Error, MemorySettings, ProviderFactory};
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let factory = ProviderFactory::new(Arc::new(MemorySettings::new()));
    let mut provider = factory.create("echo-1", "echobot")?;

    for message in ["Hello there", "Fragments arrive one word at a time"] {
        println!("> {message}");

        let mut stream = provider.send_message_stream(message).await?;
        while let Some(fragment) = stream.next().await {
            print!("{}", fragment?);
            std::io::stdout().flush().unwrap();
        }
        println!("\n");
    }

    Ok(())
}

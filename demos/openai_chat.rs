//! Streams a chat completion from OpenAI, carrying history across turns.
//!
//! Credentials come from the environment:
//!
//! ```bash
//! export OPENAI_API_KEY=your_api_key_here
//! cargo run --example openai_chat
//! ```

use std::io::Write;
use std::sync::Arc;

use chatstream::{EnvSettings, Error, ProviderFactory};
use futures_util::StreamExt;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let factory = ProviderFactory::new(Arc::new(EnvSettings));
    let mut provider = match factory.create("gpt-4o-mini", "openai") {
        Ok(provider) => provider,
        Err(err) => {
            println!("Could not create provider: {err}");
            return Ok(());
        }
    };

    let messages = [
        "Name three rivers in Europe. Answer in one short sentence.",
        "Which of those is the longest?",
    ];

    for message in messages {
        println!("> {message}");

        let mut stream = provider.send_message_stream(message).await?;
        while let Some(fragment) = stream.next().await {
            match fragment {
                Ok(text) => {
                    print!("{text}");
                    std::io::stdout().flush().unwrap();
                }
                Err(err) => {
                    println!("\nStream error: {err}");
                    break;
                }
            }
        }
        println!("\n");
    }

    Ok(())
}

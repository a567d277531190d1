use crate::core::confirm::Confirmer;
use crate::domain::error::HotloadResult;
use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Asks on stderr and reads the answer from stdin
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsolePrompt;

#[async_trait]
impl Confirmer for ConsolePrompt {
    async fn confirm(&self, prompt: &str) -> HotloadResult<bool> {
        let mut stderr = tokio::io::stderr();
        stderr
            .write_all(format!("{} (y/N): ", prompt).as_bytes())
            .await?;
        stderr.flush().await?;

        let mut reader = BufReader::new(tokio::io::stdin());
        read_answer(&mut reader).await
    }
}

/// Read one line and interpret it as yes/no; anything but yes is no
pub async fn read_answer<R: AsyncBufRead + Unpin>(reader: &mut R) -> HotloadResult<bool> {
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(is_yes(&line))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

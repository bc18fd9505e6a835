//! Terminal console over stdin/stdout

use async_trait::async_trait;
use chat_core::{ChatError, Console, Result};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin, Stdout};

const PROMPT_MARKER: &str = "> ";

fn console_error(err: io::Error) -> ChatError {
    ChatError::Console(err.to_string())
}

pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
    stdout: Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn read_line(&mut self) -> Result<Option<String>> {
        self.stdout.write_all(PROMPT_MARKER.as_bytes()).await.map_err(console_error)?;
        self.stdout.flush().await.map_err(console_error)?;

        self.lines.next_line().await.map_err(console_error)
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.stdout.write_all(line.as_bytes()).await.map_err(console_error)?;
        self.stdout.write_all(b"\n").await.map_err(console_error)?;
        self.stdout.flush().await.map_err(console_error)
    }
}

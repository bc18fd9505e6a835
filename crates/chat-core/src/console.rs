//! User Console
//!
//! Line-oriented surface the loop prints prompts to and reads answers from.

use async_trait::async_trait;
use std::collections::VecDeque;

use crate::error::Result;

/// Line-oriented user surface
#[async_trait]
pub trait Console: Send {
    /// Block for one line of input; `None` once input is exhausted
    async fn read_line(&mut self) -> Result<Option<String>>;

    /// Show one block of text to the user
    async fn write_line(&mut self, line: &str) -> Result<()>;
}

/// In-memory console fed from a fixed script (for development/testing)
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: Vec::new(),
        }
    }

    /// Everything written so far, one entry per `write_line`
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Inputs not yet consumed
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}

//! Action Directives
//!
//! A classifier reply of the form `actionName:argument` names a local action
//! instead of text for the user. The set of actions is fixed and owned by an
//! [`ActionTable`]; anything that does not resolve is treated as prose.

use async_trait::async_trait;
use std::fmt;

use crate::error::Result;

/// A reply split on its first colon
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive<'a> {
    /// Left of the colon
    pub name: &'a str,

    /// Right of the colon
    pub argument: &'a str,
}

impl<'a> Directive<'a> {
    /// Parse `actionName:argument`.
    ///
    /// Returns `None` when there is no colon, either side is empty, or the
    /// argument is more than one token; such replies are shown to the user
    /// as prose.
    pub fn parse(text: &'a str) -> Option<Self> {
        let (name, argument) = text.trim().split_once(':')?;
        let name = name.trim();
        let argument = argument.trim();

        if name.is_empty() || argument.is_empty() {
            return None;
        }

        if argument.contains(char::is_whitespace) || name.contains(char::is_whitespace) {
            return None;
        }

        Some(Self { name, argument })
    }
}

impl fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.argument)
    }
}

/// Static action table consulted for every classifier reply
#[async_trait]
pub trait ActionTable: Send + Sync {
    /// Resolved action, holding its argument
    type Action: fmt::Debug + Send + Sync;

    /// Directive names this table answers to
    fn names(&self) -> Vec<&'static str>;

    /// Resolve a directive, or `None` if its name is not in the table
    fn resolve(&self, directive: &Directive<'_>) -> Option<Self::Action>;

    /// Run the action and render its result for the user
    async fn invoke(&self, action: &Self::Action) -> Result<String>;
}

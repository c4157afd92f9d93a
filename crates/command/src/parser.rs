//! Command grammar: `<action> <quantity> [unit] [of] <resource-phrase>`.

use std::sync::OnceLock;

use regex::Regex;

use labtrack_core::{Action, DomainError, DomainResult, Quantity, ResourceName};

/// Transient result of parsing one instruction.
///
/// Constructed by [`CommandParser::parse`], consumed by the resolver and
/// the mutator, then discarded. `resource_token` is the raw phrase in
/// canonical form; it has not been matched against the catalog yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub action: Action,
    pub quantity: Quantity,
    pub resource_token: ResourceName,
}

static USE_GRAMMAR: OnceLock<Regex> = OnceLock::new();
static RETURN_GRAMMAR: OnceLock<Regex> = OnceLock::new();

/// Grammar for one action verb, anchored at the verb itself.
///
/// The unit vocabulary and the filler word "of" are recognized without
/// word boundaries, matching the established command format: `"use 10
/// gloves"` consumes the `g` as a unit and leaves `"loves"` as the
/// phrase, which the resolver is then free to repair.
fn grammar(action: Action) -> &'static Regex {
    let (slot, pattern) = match action {
        Action::Use => (
            &USE_GRAMMAR,
            r"^use\s+(\d+)\s*(?:units|ml|g|pcs|pairs)?\s*(?:of)?\s*(.+)$",
        ),
        Action::Return => (
            &RETURN_GRAMMAR,
            r"^return\s+(\d+)\s*(?:units|ml|g|pcs|pairs)?\s*(?:of)?\s*(.+)$",
        ),
    };
    slot.get_or_init(|| Regex::new(pattern).expect("hard-coded grammar pattern"))
}

/// Parser for free-text inventory commands.
///
/// Pure: same text in, same result out. Resolution against the catalog is
/// a separate step.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommandParser;

impl CommandParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse one instruction into a [`ParsedCommand`].
    ///
    /// Action detection is substring containment, "use" before "return".
    /// A phrase like "underuse" therefore classifies as USE; this is a
    /// known limitation of the command format, kept rather than silently
    /// changed. The grammar is applied at the first occurrence of the
    /// action verb, so leading politeness ("please use 3 ...") is
    /// tolerated.
    pub fn parse(&self, text: &str) -> DomainResult<ParsedCommand> {
        let lowered = text.to_lowercase();

        let action = if lowered.contains("use") {
            Action::Use
        } else if lowered.contains("return") {
            Action::Return
        } else {
            return Err(DomainError::parse("no action verb (use/return) found"));
        };

        // `contains` above guarantees the verb is present.
        let start = lowered
            .find(action.as_str())
            .ok_or_else(|| DomainError::parse("no action verb (use/return) found"))?;

        let caps = grammar(action)
            .captures(&lowered[start..])
            .ok_or_else(|| DomainError::parse("text does not match <action> <qty> [unit] [of] <resource>"))?;

        let quantity = caps[1]
            .parse::<u64>()
            .ok()
            .and_then(|n| Quantity::new(n).ok())
            .ok_or_else(|| DomainError::parse("quantity must be a positive integer"))?;

        let resource_token = ResourceName::new(&caps[2]);
        if resource_token.is_empty() {
            return Err(DomainError::parse("resource phrase is empty"));
        }

        Ok(ParsedCommand {
            action,
            quantity,
            resource_token,
        })
    }
}

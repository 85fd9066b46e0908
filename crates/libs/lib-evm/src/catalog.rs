//! # Static Token Catalog
//!
//! The ordered token list the UI picks from. Loaded once at startup; entries
//! are immutable for the life of the session. The first two entries seed the
//! default sell/buy pair.

use crate::types::{Token, TokenPair};
use lib_core::error::{Result, SwapError};
use std::collections::HashMap;

/// Embedded mainnet token list.
const BUILTIN_TOKENS: &str = include_str!("assets/tokens.json");

/// Ordered, read-only token catalog with a symbol lookup.
pub struct TokenCatalog {
    tokens: Vec<Token>,
    /// Map of uppercase symbol to catalog index.
    by_symbol: HashMap<String, usize>,
}

impl TokenCatalog {
    /// Build the catalog shipped with the binary.
    pub fn builtin() -> Self {
        // The embedded list is validated by tests; a parse failure here is a
        // build defect, not a runtime condition.
        Self::from_json(BUILTIN_TOKENS).expect("embedded token list is valid")
    }

    /// Build a catalog from a JSON array of token records.
    pub fn from_json(json: &str) -> Result<Self> {
        let tokens: Vec<Token> = serde_json::from_str(json)
            .map_err(|e| SwapError::Config(format!("invalid token list: {e}")))?;

        if tokens.len() < 2 {
            return Err(SwapError::Config(
                "token list needs at least two entries for the default pair".to_string(),
            ));
        }

        let by_symbol = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.symbol.to_uppercase(), i))
            .collect();

        Ok(Self { tokens, by_symbol })
    }

    /// The default selection: catalog entries 0 and 1.
    pub fn default_pair(&self) -> TokenPair {
        TokenPair::new(self.tokens[0].clone(), self.tokens[1].clone())
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Case-insensitive symbol lookup.
    pub fn by_symbol(&self, symbol: &str) -> Option<&Token> {
        self.by_symbol
            .get(&symbol.to_uppercase())
            .map(|&i| &self.tokens[i])
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

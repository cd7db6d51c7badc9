//! Parse chemical formulas into per element atom counts
//!
//! Formulas use Hill style notation ("C6H12O6", "C10H12N5O13P3") with
//! optional parenthesized groups ("Ca(OH)2").

use indexmap::IndexMap;
use thiserror::Error;

/// Atom counts per element symbol
pub type ElementCounts = IndexMap<String, i64>;

/*
Formula Grammar:
formula -> group+
group -> element count? | "(" formula ")" count?
element -> UPPER LOWER*
count -> DIGIT+
 */

/// Parse a chemical formula into element counts
///
/// # Examples
/// ```rust
/// use thermorev_core::equilibrium::formula::parse_formula;
/// let counts = parse_formula("C6H12O6").unwrap();
/// assert_eq!(counts.get("C"), Some(&6));
/// assert_eq!(counts.get("H"), Some(&12));
/// assert_eq!(counts.get("O"), Some(&6));
/// ```
pub fn parse_formula(formula: &str) -> Result<ElementCounts, FormulaError> {
    let mut parser = FormulaParser::new(formula);
    let counts = parser.formula(0)?;
    if !parser.is_at_end() {
        // A stray closing parenthesis terminates the top level formula early
        return Err(FormulaError::UnmatchedParenthesis(formula.to_string()));
    }
    if counts.is_empty() {
        return Err(FormulaError::Empty);
    }
    Ok(counts)
}

struct FormulaParser {
    source: Vec<char>,
    current: usize,
}

impl FormulaParser {
    fn new(source: &str) -> Self {
        FormulaParser {
            source: source.chars().collect(),
            current: 0,
        }
    }

    /// Parse a sequence of groups until the end of input or a closing
    /// parenthesis at nesting `depth`
    fn formula(&mut self, depth: usize) -> Result<ElementCounts, FormulaError> {
        let mut counts = ElementCounts::new();
        while !self.is_at_end() {
            match self.peek() {
                ')' => {
                    if depth == 0 {
                        return Ok(counts);
                    }
                    break;
                }
                '(' => {
                    self.advance();
                    let inner = self.formula(depth + 1)?;
                    if self.is_at_end() || self.peek() != ')' {
                        return Err(FormulaError::UnmatchedParenthesis(self.source_string()));
                    }
                    self.advance();
                    let multiplier = self.count();
                    for (element, count) in inner {
                        *counts.entry(element).or_insert(0) += count * multiplier;
                    }
                }
                'A'..='Z' => {
                    let element = self.element();
                    let count = self.count();
                    *counts.entry(element).or_insert(0) += count;
                }
                c => return Err(FormulaError::UnexpectedCharacter(c, self.source_string())),
            }
        }
        Ok(counts)
    }

    /// Read an element symbol, an uppercase letter followed by lowercase letters
    fn element(&mut self) -> String {
        let mut element = String::new();
        element.push(self.advance());
        while !self.is_at_end() && self.peek().is_ascii_lowercase() {
            element.push(self.advance());
        }
        element
    }

    /// Read a count, defaulting to 1 when absent
    fn count(&mut self) -> i64 {
        let mut digits = String::new();
        while !self.is_at_end() && self.peek().is_ascii_digit() {
            digits.push(self.advance());
        }
        if digits.is_empty() {
            1
        } else {
            digits.parse().unwrap_or(1)
        }
    }

    fn advance(&mut self) -> char {
        let char_at_current = self.source[self.current];
        self.current += 1;
        char_at_current
    }

    fn peek(&self) -> char {
        self.source[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn source_string(&self) -> String {
        self.source.iter().collect()
    }
}

#[derive(Clone, Debug, Error)]
pub enum FormulaError {
    #[error("Unexpected character {0:?} in formula {1:?}")]
    UnexpectedCharacter(char, String),
    #[error("Unmatched parenthesis in formula {0:?}")]
    UnmatchedParenthesis(String),
    #[error("Formula is empty")]
    Empty,
}

use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Result, XattenError};

/// Parse a chemical formula into element symbol → atom count.
///
/// Handles nested parentheses, fractional and scientific stoichiometry
/// (`Fe0.7Mg0.3O`, `Fe.7Mg.3O`, `Zn1.e-5Fe3O4`) and treats `D` as `H`.
/// Symbols are only checked for shape here (an uppercase letter followed
/// by lowercase letters); whether they name a tabulated element is decided
/// by the caller.
///
/// # Examples
/// ```
/// let atoms = xatten::chemparser::chemparse("Mn(SO4)2").unwrap();
/// assert_eq!(atoms["O"], 8.0);
/// ```
pub fn chemparse(formula: &str) -> Result<BTreeMap<String, f64>> {
    let compact: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(XattenError::InvalidFormula("empty formula".to_string()));
    }

    let mut parser = Parser {
        chars: compact.chars().peekable(),
        formula,
    };
    let mut atoms = BTreeMap::new();
    parser.group(&mut atoms, 0)?;
    if let Some(c) = parser.chars.next() {
        return Err(parser.error(&format!("unexpected '{c}'")));
    }
    Ok(atoms)
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
    formula: &'a str,
}

impl Parser<'_> {
    fn error(&self, what: &str) -> XattenError {
        XattenError::InvalidFormula(format!("{}: {what}", self.formula))
    }

    /// Parse terms until end of input or a closing parenthesis, adding the
    /// element counts into `out`.
    fn group(&mut self, out: &mut BTreeMap<String, f64>, depth: usize) -> Result<()> {
        let mut local: BTreeMap<String, f64> = BTreeMap::new();
        let mut terms = 0;

        while let Some(&c) = self.chars.peek() {
            match c {
                '(' => {
                    self.chars.next();
                    self.group(&mut local, depth + 1)?;
                    if self.chars.next() != Some(')') {
                        return Err(self.error("expected closing parenthesis"));
                    }
                    // multiplier applies to the whole parenthesised group
                    let count = self.count()?;
                    for (sym, n) in std::mem::take(&mut local) {
                        *out.entry(sym).or_insert(0.0) += n * count;
                    }
                }
                ')' if depth > 0 => break,
                c if c.is_ascii_uppercase() => {
                    let sym = self.symbol();
                    let count = self.count()?;
                    *out.entry(sym).or_insert(0.0) += count;
                }
                _ => return Err(self.error(&format!("unrecognized character '{c}'"))),
            }
            terms += 1;
        }

        if terms == 0 {
            return Err(self.error("empty group"));
        }
        Ok(())
    }

    fn symbol(&mut self) -> String {
        let mut sym = String::new();
        if let Some(c) = self.chars.next() {
            sym.push(c);
        }
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_lowercase() {
                break;
            }
            sym.push(c);
            self.chars.next();
        }
        if sym == "D" { "H".to_string() } else { sym }
    }

    /// Optional stoichiometric count; 1 when absent.
    fn count(&mut self) -> Result<f64> {
        let mut text = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || c == '.' {
                text.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        if text.is_empty() {
            return Ok(1.0);
        }

        // exponent only after a mantissa, e.g. "1.e-5"
        if matches!(self.chars.peek(), Some('e') | Some('E')) {
            let mut ahead = self.chars.clone();
            ahead.next();
            if matches!(ahead.peek(), Some('+') | Some('-')) {
                ahead.next();
            }
            if ahead.peek().is_some_and(|c| c.is_ascii_digit()) {
                text.push('e');
                self.chars.next();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '+' || sign == '-' {
                        text.push(sign);
                        self.chars.next();
                    }
                }
                while let Some(&c) = self.chars.peek() {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    text.push(c);
                    self.chars.next();
                }
            }
        }

        let normalized = if text.starts_with('.') {
            format!("0{text}")
        } else {
            text
        };
        normalized
            .parse::<f64>()
            .map_err(|_| self.error(&format!("invalid number '{normalized}'")))
    }
}

//! Template placeholder rendering.
//!
//! Templates use `$name` and `${name}` placeholders; `$$` is a literal dollar.
//! Names start with an ASCII letter or `_` and continue with ASCII letters,
//! digits or `_`.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::WeaveError;
use crate::substitution::SubstitutionMap;

/// Renders `template`, replacing every placeholder from `substitutions`.
///
/// # Errors
///
/// Returns [`WeaveError::UnresolvedPlaceholder`] when a placeholder has no
/// value and [`WeaveError::MalformedPlaceholder`] for a `$` that starts
/// neither a name, a braced name, nor an escape.
pub fn render(template: &str, substitutions: &SubstitutionMap) -> Result<String, WeaveError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match next_placeholder(&mut chars, offset)? {
            Token::Dollar => out.push('$'),
            Token::Name(name) => {
                let value = substitutions
                    .get(&name)
                    .ok_or_else(|| WeaveError::unresolved_placeholder(&name))?;
                out.push_str(value);
            }
        }
    }

    Ok(out)
}

enum Token {
    Dollar,
    Name(String),
}

/// Reads the placeholder following a `$` found at `offset`.
fn next_placeholder(
    chars: &mut Peekable<CharIndices<'_>>,
    offset: usize,
) -> Result<Token, WeaveError> {
    if chars.next_if(|&(_, c)| c == '$').is_some() {
        return Ok(Token::Dollar);
    }

    let braced = chars.next_if(|&(_, c)| c == '{').is_some();
    let name = extract_name(chars);
    if name.is_empty() || (braced && chars.next_if(|&(_, c)| c == '}').is_none()) {
        return Err(WeaveError::malformed_placeholder(offset));
    }
    Ok(Token::Name(name))
}

fn extract_name(chars: &mut Peekable<CharIndices<'_>>) -> String {
    let mut name = String::new();
    if let Some((_, first)) = chars.next_if(|&(_, c)| c.is_ascii_alphabetic() || c == '_') {
        name.push(first);
        while let Some((_, c)) = chars.next_if(|&(_, c)| c.is_ascii_alphanumeric() || c == '_') {
            name.push(c);
        }
    }
    name
}

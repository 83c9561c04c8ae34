//! Composite (row) values and their literal codec.
//!
//! A composite value is a flat ordered tuple of optionally-null fields:
//!
//! ```text
//! composite_lit := '(' (item (',' item)*)? ')' | 'ROW' '(' ... ')'
//! ```
//!
//! Items follow the shared token rules with `(`/`)` as the structural
//! characters. An *empty unquoted* item is the null sentinel; `""` is the
//! empty string. The record syntax has no null keyword, so the unquoted word
//! `NULL` is the four-character string — only arrays treat it as the
//! sentinel.
//!
//! Raw parsing keeps fields as uninterpreted text; an ordered list of
//! [`ElementCodec`]s can decode them positionally. An attribute-name index
//! (supplied externally by a schema catalog) adds by-name access; without it
//! only positional access is defined.
//!
//! ## Examples
//!
//! ```rust
//! use pglit::parse_composite;
//!
//! let row = parse_composite("(,NULL,\"NULL\",\"\")").unwrap();
//! assert_eq!(row.field(0), Some(None));
//! assert_eq!(row.field(1), Some(Some("NULL")));
//! assert_eq!(row.field(2), Some(Some("NULL")));
//! assert_eq!(row.field(3), Some(Some("")));
//! ```

use crate::codec::ElementCodec;
use crate::options::{CompositeOptions, OutputMode};
use crate::scan::{self, RawToken, Scanner, COMPOSITE_RULES};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Characters that force quoting of composite field text.
const COMPOSITE_SPECIALS: &[char] = &['(', ')', ','];

/// A composite (row) value: ordered raw fields plus an optional
/// attribute-name index.
///
/// Immutable once constructed. Fields are raw literal text (`None` is SQL
/// null); decoding through element codecs is a separate step so the caller's
/// type registry stays in charge of leaf types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Composite {
    fields: Vec<Option<String>>,
    names: Option<IndexMap<String, usize>>,
}

impl Composite {
    /// Constructs a composite from raw fields, positional access only.
    #[must_use]
    pub fn new(fields: Vec<Option<String>>) -> Self {
        Composite {
            fields,
            names: None,
        }
    }

    /// Constructs a composite with an attribute-name index.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the name count differs from the field
    /// count, or a custom error on duplicate names.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pglit::Composite;
    ///
    /// let row = Composite::with_names(
    ///     vec![Some("42".to_string()), None],
    ///     ["id", "note"],
    /// )
    /// .unwrap();
    /// assert_eq!(row.get("id"), Some(Some("42")));
    /// assert_eq!(row.get("note"), Some(None));
    /// assert_eq!(row.get("missing"), None);
    /// ```
    pub fn with_names<I, S>(fields: Vec<Option<String>>, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = IndexMap::new();
        for (position, name) in names.into_iter().enumerate() {
            let name = name.into();
            if index.insert(name.clone(), position).is_some() {
                return Err(Error::custom(format!("duplicate attribute name {name:?}")));
            }
        }
        if index.len() != fields.len() {
            return Err(Error::dimension_mismatch(index.len(), fields.len()));
        }
        Ok(Composite {
            fields,
            names: Some(index),
        })
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The raw fields in positional order.
    #[must_use]
    pub fn fields(&self) -> &[Option<String>] {
        &self.fields
    }

    /// The attribute names in positional order, if an index was supplied.
    pub fn names(&self) -> Option<impl Iterator<Item = &str>> {
        self.names
            .as_ref()
            .map(|index| index.keys().map(String::as_str))
    }

    /// Positional access. Outer `None` means the position does not exist;
    /// inner `None` is SQL null.
    #[must_use]
    pub fn field(&self, position: usize) -> Option<Option<&str>> {
        self.fields.get(position).map(Option::as_deref)
    }

    /// By-name access through the attribute index.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        let position = *self.names.as_ref()?.get(name)?;
        self.field(position)
    }

    /// Decodes all fields positionally through the given element codecs.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] on arity mismatch, or any error from an
    /// element codec.
    pub fn decode<V>(&self, codecs: &[&dyn ElementCodec<Value = V>]) -> Result<Vec<Option<V>>> {
        if codecs.len() != self.fields.len() {
            return Err(Error::dimension_mismatch(codecs.len(), self.fields.len()));
        }
        self.fields
            .iter()
            .zip(codecs)
            .map(|(field, codec)| field.as_deref().map(|text| codec.parse(text)).transpose())
            .collect()
    }

    /// Serializes the composite in literal mode.
    ///
    /// Equivalent to [`to_text_with`](Composite::to_text_with) using
    /// [`CompositeOptions::default`].
    ///
    /// # Errors
    ///
    /// Currently infallible in literal mode without type names; kept
    /// fallible for interface symmetry with the array codec.
    pub fn to_text(&self) -> Result<String> {
        self.to_text_with(&CompositeOptions::default())
    }

    /// Serializes the composite under the given options.
    ///
    /// Literal mode produces the record literal `(v1,v2,...)` with null
    /// fields empty and quoting per the shared rules. Constructor mode
    /// produces a SQL row expression, spelled `ROW(...)` when the bare
    /// parenthesized form would be ambiguous with a scalar parenthesized
    /// expression (zero or exactly one field); with declared type names each
    /// field is cast (`value::type`, `NULL::type`).
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if declared type names differ in arity
    /// from the fields.
    pub fn to_text_with(&self, options: &CompositeOptions) -> Result<String> {
        if let Some(type_names) = &options.type_names {
            if type_names.len() != self.fields.len() {
                return Err(Error::dimension_mismatch(
                    type_names.len(),
                    self.fields.len(),
                ));
            }
        }
        match options.mode {
            OutputMode::Literal => Ok(self.literal_text()),
            OutputMode::Constructor => Ok(self.constructor_text(options)),
        }
    }

    fn literal_text(&self) -> String {
        let mut out = String::from("(");
        for (position, field) in self.fields.iter().enumerate() {
            if position > 0 {
                out.push(',');
            }
            if let Some(text) = field {
                if scan::needs_quoting(text, COMPOSITE_SPECIALS, &[]) {
                    scan::quote_into(&mut out, text);
                } else {
                    out.push_str(text);
                }
            }
        }
        out.push(')');
        out
    }

    fn constructor_text(&self, options: &CompositeOptions) -> String {
        // `(x)` would read as a parenthesized scalar; `()` is not valid SQL.
        let ambiguous = self.fields.len() <= 1;
        let mut out = String::from(if ambiguous { "ROW(" } else { "(" });
        for (position, field) in self.fields.iter().enumerate() {
            if position > 0 {
                out.push(',');
            }
            match field {
                None => out.push_str("NULL"),
                Some(text) => {
                    out.push('\'');
                    out.push_str(&text.replace('\'', "''"));
                    out.push('\'');
                }
            }
            if let Some(type_names) = &options.type_names {
                out.push_str("::");
                out.push_str(&type_names[position]);
            }
        }
        out.push(')');
        out
    }
}

/// Parses a composite literal into raw fields.
///
/// Accepts both the bare `(...)` form and the `ROW(...)` spelling.
pub fn parse(text: &str) -> Result<Composite> {
    let mut s = Scanner::new(text);
    s.skip_whitespace();
    if s.eat_ci("ROW") {
        s.skip_whitespace();
    }
    s.expect('(')?;
    s.skip_whitespace();
    let mut fields = Vec::new();
    if !s.eat(')') {
        loop {
            match s.scan_token(&COMPOSITE_RULES)? {
                RawToken::Empty | RawToken::Null => fields.push(None),
                RawToken::Unquoted(text) | RawToken::Quoted(text) => fields.push(Some(text)),
            }
            let sep_pos = s.pos();
            match s.bump() {
                Some(',') => {}
                Some(')') => break,
                Some(ch) => {
                    return Err(Error::syntax(
                        sep_pos,
                        format!("expected ',' or ')', found '{ch}'"),
                    ));
                }
                None => return Err(Error::syntax(sep_pos, "unexpected end of input")),
            }
        }
    }
    s.expect_end()?;
    Ok(Composite::new(fields))
}

/// Parses a composite literal and decodes each field through the
/// corresponding element codec.
pub fn parse_decoded<V>(
    text: &str,
    codecs: &[&dyn ElementCodec<Value = V>],
) -> Result<Vec<Option<V>>> {
    parse(text)?.decode(codecs)
}

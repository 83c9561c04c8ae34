//! Per-type output configuration for the array and composite codecs.
//!
//! Configuration is set once at type-registration time and is read-only
//! thereafter; parse and serialize calls never mutate it, so one options
//! value can be shared across threads.
//!
//! ## Examples
//!
//! ```rust
//! use pglit::{ArrayOptions, FromStrCodec, OutputMode};
//!
//! let codec = FromStrCodec::<i64>::new();
//! let array = pglit::parse_array("{1,2,3}", &codec).unwrap();
//!
//! let options = ArrayOptions::new().with_mode(OutputMode::Constructor);
//! let sql = array.to_text_with(&codec, &options).unwrap();
//! assert_eq!(sql, "ARRAY['1','2','3']");
//! ```

/// Default maximum array nesting depth, matching the engine's own
/// dimensionality cap.
pub const DEFAULT_MAX_DEPTH: usize = 6;

/// Output syntax for arrays and composites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Engine literal syntax: `{...}` for arrays (with bounds decoration
    /// where needed), `(...)` for composites.
    #[default]
    Literal,
    /// SQL constructor syntax: `ARRAY[...]` for arrays, `ROW(...)` for
    /// composites. Cannot express custom array lower bounds.
    Constructor,
}

/// What to do when constructor-mode output would lose custom lower bounds.
///
/// Constructor syntax has no spelling for bounds decoration. The engine's
/// own behavior is a silent drop; the default here is to refuse instead, so
/// callers are told about the loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    /// Fail with [`Error::BoundsLoss`](crate::Error::BoundsLoss).
    #[default]
    Error,
    /// Drop the bounds deliberately, producing a 1-based array.
    Drop,
}

/// Configuration for array serialization.
///
/// # Examples
///
/// ```rust
/// use pglit::{ArrayOptions, BoundsPolicy, OutputMode};
///
/// let options = ArrayOptions::new()
///     .with_mode(OutputMode::Constructor)
///     .with_bounds_policy(BoundsPolicy::Drop);
/// assert_eq!(options.mode, OutputMode::Constructor);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayOptions {
    pub mode: OutputMode,
    pub bounds_policy: BoundsPolicy,
    /// Maximum nesting depth accepted by `parse`; guards against unbounded
    /// recursion on adversarial input.
    pub max_depth: usize,
    /// When set, literal output is wrapped as `'...'::<cast>` for embedding
    /// in SQL text. The cast is the full target type, e.g. `int4[]`.
    pub cast: Option<String>,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        ArrayOptions {
            mode: OutputMode::default(),
            bounds_policy: BoundsPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            cast: None,
        }
    }
}

impl ArrayOptions {
    /// Creates default options: literal mode, bounds loss is an error,
    /// nesting capped at [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output syntax.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the constructor-mode bounds-loss policy.
    #[must_use]
    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    /// Sets the maximum nesting depth accepted by `parse`.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Wraps literal output in a quoted string with a trailing type cast.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pglit::{ArrayOptions, FromStrCodec};
    ///
    /// let codec = FromStrCodec::<i64>::new();
    /// let array = pglit::parse_array("{1,2}", &codec).unwrap();
    /// let options = ArrayOptions::new().with_cast("int4[]");
    /// assert_eq!(
    ///     array.to_text_with(&codec, &options).unwrap(),
    ///     "'{1,2}'::int4[]"
    /// );
    /// ```
    #[must_use]
    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.cast = Some(cast.into());
        self
    }
}

/// Configuration for composite serialization.
///
/// # Examples
///
/// ```rust
/// use pglit::{Composite, CompositeOptions, OutputMode};
///
/// let row = Composite::new(vec![Some("1".to_string()), None]);
/// let options = CompositeOptions::new()
///     .with_mode(OutputMode::Constructor)
///     .with_type_names(["int4", "text"]);
/// assert_eq!(
///     row.to_text_with(&options).unwrap(),
///     "('1'::int4,NULL::text)"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CompositeOptions {
    pub mode: OutputMode,
    /// Declared attribute types for constructor-mode casts; when absent the
    /// fields are emitted untyped and left to contextual inference.
    pub type_names: Option<Vec<String>>,
}

impl CompositeOptions {
    /// Creates default options: literal mode, no attribute casts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output syntax.
    #[must_use]
    pub fn with_mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the declared attribute type names, in positional order.
    #[must_use]
    pub fn with_type_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_names = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

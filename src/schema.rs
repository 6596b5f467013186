//! Column schemas and fixed-width text rendering.
//!
//! Every column of a text log is declared with a printf-style conversion, e.g.,
//! `%+9.4f` or `%20s`. The width of the conversion sets the width of the column
//! title in the header line as well as the width of each rendered value.
use std::fmt::Display;

/// Kind of value held by a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Float,
}

/// A parsed printf-style column conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    spec: &'static str,
    width: usize,
    precision: usize,
    plus: bool,
    kind: Kind,
}

impl ColumnFormat {
    /// Precision used by `%f` when none is given.
    const DEFAULT_PRECISION: usize = 6;

    /// Parse a conversion of the form `%[+]<width>[.<precision>](f|s)`.
    ///
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(spec: &'static str) -> Option<Self> {
        let rest = spec.strip_prefix('%')?;
        let (plus, rest) = match rest.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let (kind, rest) = if let Some(rest) = rest.strip_suffix('f') {
            (Kind::Float, rest)
        } else if let Some(rest) = rest.strip_suffix('s') {
            (Kind::Text, rest)
        } else {
            return None;
        };
        let (width, precision) = match rest.split_once('.') {
            Some((w, p)) => (w.parse().ok()?, p.parse().ok()?),
            None => (rest.parse().ok()?, Self::DEFAULT_PRECISION),
        };

        Some(ColumnFormat {
            spec,
            width,
            precision,
            plus,
            kind,
        })
    }

    /// The conversion as declared.
    #[must_use]
    pub fn spec(&self) -> &'static str {
        self.spec
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn precision(&self) -> usize {
        self.precision
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Right-justify `title` to the column width.
    #[must_use]
    pub fn title(&self, title: &str) -> String {
        format!("{title:>width$}", width = self.width)
    }

    /// Render a numeric value. NaN renders as `nan`, or `+nan` if the conversion
    /// carries the `+` flag.
    #[must_use]
    pub fn float(&self, value: f64) -> String {
        let (width, precision) = (self.width, self.precision);
        if value.is_nan() {
            let nan = if self.plus { "+nan" } else { "nan" };
            return format!("{nan:>width$}");
        }
        if self.plus {
            format!("{value:>+width$.precision$}")
        } else {
            format!("{value:>width$.precision$}")
        }
    }

    /// Render a text value.
    #[must_use]
    pub fn text(&self, value: &str) -> String {
        self.title(value)
    }
}

impl Display for ColumnFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec)
    }
}

/// A named column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    format: ColumnFormat,
}

impl Column {
    /// # Panics
    /// If `spec` is not a valid column conversion. Column declarations are static
    /// so this only happens for a bad layout declaration.
    pub fn new<S: Into<String>>(name: S, spec: &'static str) -> Self {
        Column {
            name: name.into(),
            format: ColumnFormat::parse(spec).expect("column format to be valid"),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn format(&self) -> &ColumnFormat {
        &self.format
    }
}

/// Ordered set of columns for a single packet type.
///
/// The first column is always the record `time` and the last always its `latency`.
#[derive(Debug, Clone)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub const TIME: &'static str = "time";
    pub const LATENCY: &'static str = "latency";

    /// Create a schema wrapping packet `fields` with the `time` and `latency` columns.
    #[must_use]
    pub fn with_fields(fields: Vec<Column>) -> Self {
        let mut columns = Vec::with_capacity(fields.len() + 2);
        columns.push(Column::new(Self::TIME, "%20s"));
        columns.extend(fields);
        columns.push(Column::new(Self::LATENCY, "%7.0f"));
        Schema { columns }
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    /// Index of the column named `name`.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// The column title line, without a line terminator.
    #[must_use]
    pub fn header(&self) -> String {
        let mut line = String::new();
        for col in &self.columns {
            line.push_str(&col.format.title(&col.name));
            line.push(' ');
        }
        line
    }
}

//! Position provider for whitespace-delimited `id x y` text tables.
//!
//! Each content line holds a node identifier followed by its two
//! coordinates. Blank lines and lines starting with `#` are ignored, and a
//! first content line whose three fields are all non-numeric is taken as a
//! header. A leading byte-order mark is ignored.
use std::io::BufRead;

use geonet_core::{NodeId, Point, Positions, PositionsError};
use thiserror::Error;

/// Errors raised while loading a position table.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PositionProviderError {
    /// The input contained no position rows.
    #[error("position input contained no rows")]
    EmptyInput,
    /// A row could not be parsed.
    #[error("line {line}: {reason}")]
    MalformedLine {
        /// One-based line number.
        line: usize,
        /// What was wrong with the row.
        reason: String,
    },
    /// A node identifier appeared twice.
    #[error("line {line}: node {node} is listed more than once")]
    DuplicateNode {
        /// One-based line number of the repeated row.
        line: usize,
        /// The repeated identifier.
        node: NodeId,
    },
    /// A coordinate was NaN or infinite.
    #[error("line {line}: coordinates must be finite")]
    NonFiniteCoordinate {
        /// One-based line number.
        line: usize,
    },
    /// Reading the underlying source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Named position table read from text.
#[derive(Clone, Debug)]
pub struct PositionProvider {
    name: String,
    positions: Positions,
}

impl PositionProvider {
    /// Wraps an existing position table.
    ///
    /// # Examples
    /// ```
    /// use geonet_core::{NodeId, Point, Positions};
    /// use geonet_providers_positions::PositionProvider;
    ///
    /// let positions = Positions::try_from_iter([(NodeId::new(1), Point::new(0.0, 0.0))])?;
    /// let provider = PositionProvider::new("demo", positions);
    /// assert_eq!(provider.name(), "demo");
    /// assert_eq!(provider.positions().len(), 1);
    /// # Ok::<(), geonet_core::PositionsError>(())
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, positions: Positions) -> Self {
        Self {
            name: name.into(),
            positions,
        }
    }

    /// Parses `id x y` rows from `reader`.
    ///
    /// # Errors
    /// Returns [`PositionProviderError::EmptyInput`] when no row is found,
    /// [`PositionProviderError::MalformedLine`] for rows without exactly
    /// three fields or with unparsable numbers,
    /// [`PositionProviderError::DuplicateNode`] and
    /// [`PositionProviderError::NonFiniteCoordinate`] for rows the table
    /// rejects, and [`PositionProviderError::Io`] when reading fails.
    ///
    /// # Examples
    /// ```
    /// use std::io::Cursor;
    /// use geonet_core::NodeId;
    /// use geonet_providers_positions::PositionProvider;
    ///
    /// let input = "id x y\n# corner\n1 0 0\n2 3.5 -1\n";
    /// let provider = PositionProvider::try_from_reader("demo", Cursor::new(input))?;
    /// assert_eq!(provider.positions().len(), 2);
    /// assert_eq!(provider.positions().get(NodeId::new(2)).map(|p| p.x()), Some(3.5));
    /// # Ok::<(), geonet_providers_positions::PositionProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, PositionProviderError> {
        let mut positions = Positions::new();
        let mut seen_content = false;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            let raw = if index == 0 {
                line.strip_prefix('\u{feff}').unwrap_or(line.as_str())
            } else {
                line.as_str()
            };
            let content = raw.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            let first_row = !seen_content;
            seen_content = true;

            let fields: Vec<&str> = content.split_whitespace().collect();
            let [id, x, y] = fields.as_slice() else {
                return Err(PositionProviderError::MalformedLine {
                    line: number,
                    reason: format!("expected 3 fields (id x y), found {}", fields.len()),
                });
            };
            let Ok(id) = id.parse::<u64>() else {
                if first_row && is_header(x, y) {
                    tracing::debug!(line = number, "skipping position header");
                    continue;
                }
                return Err(malformed(number, "id", id));
            };
            let x = x.parse::<f64>().map_err(|_| malformed(number, "x", x))?;
            let y = y.parse::<f64>().map_err(|_| malformed(number, "y", y))?;

            positions
                .insert(NodeId::new(id), Point::new(x, y))
                .map_err(|err| match err {
                    PositionsError::DuplicateNode { node } => {
                        PositionProviderError::DuplicateNode { line: number, node }
                    }
                    _ => PositionProviderError::NonFiniteCoordinate { line: number },
                })?;
        }

        if positions.is_empty() {
            return Err(PositionProviderError::EmptyInput);
        }
        Ok(Self::new(name, positions))
    }

    /// Name of the data source, used in reports.
    #[must_use]
    #[rustfmt::skip]
    pub fn name(&self) -> &str { &self.name }

    /// The loaded position table.
    #[must_use]
    #[rustfmt::skip]
    pub fn positions(&self) -> &Positions { &self.positions }

    /// Consumes the provider and returns the position table.
    #[must_use]
    #[rustfmt::skip]
    pub fn into_positions(self) -> Positions { self.positions }
}

fn is_header(x: &str, y: &str) -> bool {
    x.parse::<f64>().is_err() && y.parse::<f64>().is_err()
}

fn malformed(line: usize, field: &str, raw: &str) -> PositionProviderError {
    PositionProviderError::MalformedLine {
        line,
        reason: format!("{field} field {raw:?} is not a valid number"),
    }
}

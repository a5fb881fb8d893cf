//! Builder for configuring [`Session`] instances.
//!
//! Exposes the header ordering and the first automatic label used by
//! [`Session::place_node`].

use crate::{matrix::LabelOrder, session::Session};

/// Configures and constructs [`Session`] instances.
///
/// # Examples
/// ```
/// use reachgraph_core::{LabelOrder, SessionBuilder};
///
/// let session = SessionBuilder::new()
///     .with_label_order(LabelOrder::Natural)
///     .with_first_label(10)
///     .build();
/// assert_eq!(session.label_order(), LabelOrder::Natural);
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    label_order: LabelOrder,
    first_label: u64,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            label_order: LabelOrder::Lexicographic,
            first_label: 1,
        }
    }
}

impl SessionBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use reachgraph_core::{LabelOrder, SessionBuilder};
    ///
    /// let builder = SessionBuilder::new();
    /// assert_eq!(builder.label_order(), LabelOrder::Lexicographic);
    /// assert_eq!(builder.first_label(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the order used for matrix headers and [`Session::labels`].
    #[must_use]
    pub const fn with_label_order(mut self, order: LabelOrder) -> Self {
        self.label_order = order;
        self
    }

    /// Returns the configured label order.
    #[must_use]
    pub const fn label_order(&self) -> LabelOrder {
        self.label_order
    }

    /// Sets the number rendered as the first automatic label.
    ///
    /// # Examples
    /// ```
    /// use reachgraph_core::SessionBuilder;
    ///
    /// let mut session = SessionBuilder::new().with_first_label(7).build();
    /// let id = session.place_node()?;
    /// assert_eq!(session.graph().node(id).map(|node| node.label()), Some("7"));
    /// # Ok::<(), reachgraph_core::GraphError>(())
    /// ```
    #[must_use]
    pub const fn with_first_label(mut self, first: u64) -> Self {
        self.first_label = first;
        self
    }

    /// Returns the configured first automatic label.
    #[must_use]
    pub const fn first_label(&self) -> u64 {
        self.first_label
    }

    /// Constructs an empty [`Session`] with this configuration.
    #[must_use]
    pub fn build(self) -> Session {
        Session::configured(self.label_order, self.first_label)
    }
}

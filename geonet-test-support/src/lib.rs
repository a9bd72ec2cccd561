//! Test helpers shared by the geonet crates.
//!
//! [`trace_capture`] records spans and events so suites can assert on
//! instrumentation, and [`ci`] reads the environment knobs that tune property
//! tests in CI.

pub mod ci;

pub mod trace_capture {
    //! In-memory capture of tracing spans and events.

    use std::collections::BTreeMap;
    use std::fmt;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    use tracing::field::{Field, Visit};
    use tracing::span::{Attributes, Id, Record};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;
    use tracing_subscriber::{Layer, Registry};

    type Fields = BTreeMap<String, String>;

    /// Layer that keeps every closed span and every event in memory.
    ///
    /// Clones share storage, so a test can hand one clone to a subscriber and
    /// inspect the other afterwards.
    #[derive(Clone, Default)]
    pub struct RecordingLayer {
        spans: Arc<Mutex<Vec<SpanRecord>>>,
        events: Arc<Mutex<Vec<EventRecord>>>,
    }

    impl RecordingLayer {
        /// Closed spans in completion order.
        ///
        /// # Examples
        /// ```
        /// use geonet_test_support::trace_capture::RecordingLayer;
        ///
        /// assert!(RecordingLayer::default().spans().is_empty());
        /// ```
        #[must_use]
        pub fn spans(&self) -> Vec<SpanRecord> {
            lock(&self.spans).clone()
        }

        /// Events in emission order.
        #[must_use]
        pub fn events(&self) -> Vec<EventRecord> {
            lock(&self.events).clone()
        }

        /// Closed spans called `name`, in completion order.
        #[must_use]
        pub fn spans_named(&self, name: &str) -> Vec<SpanRecord> {
            lock(&self.spans)
                .iter()
                .filter(|span| span.name == name)
                .cloned()
                .collect()
        }

        /// First closed span called `name`, if any.
        #[must_use]
        pub fn span_named(&self, name: &str) -> Option<SpanRecord> {
            lock(&self.spans).iter().find(|span| span.name == name).cloned()
        }

        /// Events emitted at exactly `level`.
        #[must_use]
        pub fn events_at(&self, level: Level) -> Vec<EventRecord> {
            lock(&self.events)
                .iter()
                .filter(|event| event.level == level)
                .cloned()
                .collect()
        }
    }

    /// Runs `body` with a fresh [`RecordingLayer`] as the thread's default
    /// subscriber and returns the body's output with the layer.
    ///
    /// # Examples
    /// ```
    /// use geonet_test_support::trace_capture::capture;
    ///
    /// let ((), layer) = capture(|| {
    ///     let span = tracing::info_span!("demo", nodes = 3_u64);
    ///     let _entered = span.enter();
    ///     tracing::info!(edges = 2_u64, "done");
    /// });
    /// assert_eq!(layer.span_named("demo").and_then(|s| s.field("nodes").map(str::to_owned)), Some("3".into()));
    /// assert_eq!(layer.events()[0].message.as_deref(), Some("done"));
    /// ```
    pub fn capture<T>(body: impl FnOnce() -> T) -> (T, RecordingLayer) {
        let layer = RecordingLayer::default();
        let subscriber = Registry::default().with(layer.clone());
        let output = tracing::subscriber::with_default(subscriber, body);
        (output, layer)
    }

    /// A closed span with every field recorded on it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpanRecord {
        /// Span name from the callsite metadata.
        pub name: String,
        /// Name of the enclosing span, if any.
        pub parent: Option<String>,
        /// Fields recorded at creation or through `Span::record`.
        pub fields: BTreeMap<String, String>,
    }

    impl SpanRecord {
        /// Recorded value of `key`, rendered with `Debug` (strings unquoted).
        #[must_use]
        pub fn field(&self, key: &str) -> Option<&str> {
            self.fields.get(key).map(String::as_str)
        }
    }

    /// An emitted event.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct EventRecord {
        /// Event level.
        pub level: Level,
        /// Event target, usually the emitting module path.
        pub target: String,
        /// Formatted `message` field, when the event carries one.
        pub message: Option<String>,
        /// Remaining structured fields.
        pub fields: BTreeMap<String, String>,
    }

    impl EventRecord {
        /// Recorded value of `key`.
        #[must_use]
        pub fn field(&self, key: &str) -> Option<&str> {
            self.fields.get(key).map(String::as_str)
        }
    }

    struct PendingSpan {
        name: &'static str,
        parent: Option<String>,
        fields: Fields,
    }

    impl<S> Layer<S> for RecordingLayer
    where
        S: Subscriber + for<'span> LookupSpan<'span>,
    {
        fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            let mut fields = Fields::new();
            attrs.record(&mut FieldWriter(&mut fields));
            let parent = span.parent().map(|parent| parent.name().to_owned());
            span.extensions_mut().insert(PendingSpan {
                name: attrs.metadata().name(),
                parent,
                fields,
            });
        }

        fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(id) else {
                return;
            };
            if let Some(pending) = span.extensions_mut().get_mut::<PendingSpan>() {
                values.record(&mut FieldWriter(&mut pending.fields));
            }
        }

        fn on_close(&self, id: Id, ctx: Context<'_, S>) {
            let Some(span) = ctx.span(&id) else {
                return;
            };
            let Some(pending) = span.extensions_mut().remove::<PendingSpan>() else {
                return;
            };
            lock(&self.spans).push(SpanRecord {
                name: pending.name.to_owned(),
                parent: pending.parent,
                fields: pending.fields,
            });
        }

        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = Fields::new();
            event.record(&mut FieldWriter(&mut fields));
            let message = fields.remove("message");
            let metadata = event.metadata();
            lock(&self.events).push(EventRecord {
                level: *metadata.level(),
                target: metadata.target().to_owned(),
                message,
                fields,
            });
        }
    }

    struct FieldWriter<'a>(&'a mut Fields);

    impl Visit for FieldWriter<'_> {
        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name().to_owned(), value.to_owned());
        }

        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name().to_owned(), format!("{value:?}"));
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

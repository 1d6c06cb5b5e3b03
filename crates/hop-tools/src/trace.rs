#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A small search trace event.
///
/// This is intentionally "dumb data" so it can be recorded during a search and rendered later by
/// tooling. `subject` is usually the rendered task, `detail` carries the method name, the
/// resulting state or the new task list depending on `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceEvent {
    pub depth: usize,
    pub tag: Cow<'static, str>,
    pub subject: String,
    pub detail: String,
}

impl TraceEvent {
    pub fn new(depth: usize, tag: impl Into<Cow<'static, str>>) -> Self {
        Self {
            depth,
            tag: tag.into(),
            subject: String::new(),
            detail: String::new(),
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

impl<T: TraceSink + ?Sized> TraceSink for &mut T {
    fn emit(&mut self, event: TraceEvent) {
        (**self).emit(event);
    }
}

impl<T: TraceSink + ?Sized> TraceSink for Box<T> {
    fn emit(&mut self, event: TraceEvent) {
        (**self).emit(event);
    }
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl VecTraceSink {
    /// Events carrying `tag`, in emission order.
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.is(tag))
    }
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Deepest recursion level seen in the log.
    pub fn max_depth(&self) -> usize {
        self.events.iter().map(|e| e.depth).max().unwrap_or(0)
    }
}

impl TraceSink for TraceLog {
    fn emit(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

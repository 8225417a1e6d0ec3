//! Captures the statements made by proxy accessors while a clause closure
//! runs.
//!
//! Every clause method (`where_`, `order_by`, `select`, ...) activates a
//! [`Recorder`] for the duration of its closure. Operator methods on column
//! handles find the active recorder through a thread-local stack, push their
//! statement onto its innermost sink, and report errors to it. The clause
//! method returns the first recorded error.

use crate::{cx::QueryCx, Error, Result};

use entiq_core::stmt::{Expr, ExprColumn, OrderByExpr, TableAlias};

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

thread_local! {
    static ACTIVE: RefCell<Vec<Rc<Recorder>>> = const { RefCell::new(Vec::new()) };
}

pub(crate) struct Recorder {
    /// The query whose clause is being recorded
    cx: Rc<QueryCx>,
    sinks: RefCell<Vec<Sink>>,
    next_sink: Cell<usize>,
    error: RefCell<Option<Error>>,
}

struct Sink {
    id: usize,
    kind: SinkKind,
}

pub(crate) enum SinkKind {
    /// Predicate statements; a slot is emptied when its statement is
    /// absorbed into another one.
    Predicate(Vec<Option<Expr>>),

    /// Ordering items
    Order(Vec<OrderByExpr>),

    /// Closures that return their result. Nothing is recorded.
    Value,
}

/// Position of a recorded predicate statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Slot {
    sink: usize,
    index: usize,
}

/// Pops the recorder on drop, including when the closure panics.
struct Activation;

impl Activation {
    fn push(recorder: Rc<Recorder>) -> Activation {
        ACTIVE.with(|active| active.borrow_mut().push(recorder));
        Activation
    }
}

impl Drop for Activation {
    fn drop(&mut self) {
        ACTIVE.with(|active| {
            active.borrow_mut().pop();
        });
    }
}

impl SinkKind {
    pub(crate) fn predicates() -> SinkKind {
        SinkKind::Predicate(vec![])
    }

    pub(crate) fn order() -> SinkKind {
        SinkKind::Order(vec![])
    }

    /// The recorded predicate statements, in statement order.
    pub(crate) fn into_predicates(self) -> Vec<Expr> {
        match self {
            SinkKind::Predicate(slots) => slots.into_iter().flatten().collect(),
            _ => vec![],
        }
    }

    pub(crate) fn into_order(self) -> Vec<OrderByExpr> {
        match self {
            SinkKind::Order(items) => items,
            _ => vec![],
        }
    }
}

impl Recorder {
    fn new(cx: Rc<QueryCx>) -> Recorder {
        Recorder {
            cx,
            sinks: RefCell::new(vec![]),
            next_sink: Cell::new(0),
            error: RefCell::new(None),
        }
    }

    fn push_sink(&self, kind: SinkKind) -> usize {
        let id = self.next_sink.get();
        self.next_sink.set(id + 1);
        self.sinks.borrow_mut().push(Sink { id, kind });
        id
    }

    fn pop_sink(&self, id: usize) -> SinkKind {
        let mut sinks = self.sinks.borrow_mut();
        match sinks.iter().rposition(|sink| sink.id == id) {
            Some(position) => sinks.remove(position).kind,
            None => SinkKind::Value,
        }
    }

    fn set_error(&self, err: Error) {
        let mut error = self.error.borrow_mut();
        if error.is_none() {
            *error = Some(err);
        } else {
            tracing::trace!(error = %err, "discarding error after the first");
        }
    }
}

fn active() -> Option<Rc<Recorder>> {
    ACTIVE.with(|active| active.borrow().last().cloned())
}

/// Run `f` with a fresh recorder for `cx` whose only sink is `kind`.
pub(crate) fn run<R>(cx: &Rc<QueryCx>, kind: SinkKind, f: impl FnOnce() -> R) -> Result<(R, SinkKind)> {
    let recorder = Rc::new(Recorder::new(cx.clone()));
    let sink = recorder.push_sink(kind);

    let out = {
        let _activation = Activation::push(recorder.clone());
        f()
    };

    let kind = recorder.pop_sink(sink);

    let error = recorder.error.borrow_mut().take();
    match error {
        Some(err) => Err(err),
        None => Ok((out, kind)),
    }
}

/// Run `f` under an additional sink of the active recorder.
pub(crate) fn nested<R>(kind: SinkKind, f: impl FnOnce() -> R) -> (R, SinkKind) {
    let Some(recorder) = active() else {
        return (f(), kind);
    };

    let sink = recorder.push_sink(kind);
    let out = f();
    (out, recorder.pop_sink(sink))
}

/// The context of the query whose clause is being recorded.
pub(crate) fn current_cx() -> Option<Rc<QueryCx>> {
    active().map(|recorder| recorder.cx.clone())
}

pub(crate) fn record_error(err: Error) {
    match active() {
        Some(recorder) => recorder.set_error(err),
        None => tracing::debug!(error = %err, "error raised outside of a clause"),
    }
}

/// Record a predicate statement. Returns `None` if the innermost sink does
/// not take predicates.
pub(crate) fn record_predicate(expr: Expr) -> Option<Slot> {
    let recorder = active()?;
    let mut sinks = recorder.sinks.borrow_mut();
    let sink = sinks.last_mut()?;

    match &mut sink.kind {
        SinkKind::Predicate(slots) => {
            slots.push(Some(expr));
            Some(Slot {
                sink: sink.id,
                index: slots.len() - 1,
            })
        }
        _ => None,
    }
}

/// Replace the statement at `slot`.
pub(crate) fn replace(slot: Slot, expr: Expr) {
    with_slot(slot, |entry| *entry = Some(expr));
}

/// Remove the statement at `slot`.
pub(crate) fn take(slot: Slot) {
    with_slot(slot, |entry| *entry = None);
}

fn with_slot(slot: Slot, f: impl FnOnce(&mut Option<Expr>)) {
    let Some(recorder) = active() else {
        return;
    };
    let mut sinks = recorder.sinks.borrow_mut();

    if let Some(Sink {
        kind: SinkKind::Predicate(slots),
        ..
    }) = sinks.iter_mut().find(|sink| sink.id == slot.sink)
    {
        if let Some(entry) = slots.get_mut(slot.index) {
            f(entry);
        }
    }
}

pub(crate) fn record_order(item: OrderByExpr) {
    let Some(recorder) = active() else {
        return;
    };

    let recorded = match recorder.sinks.borrow_mut().last_mut() {
        Some(Sink {
            kind: SinkKind::Order(items),
            ..
        }) => {
            items.push(item);
            true
        }
        _ => false,
    };

    if !recorded {
        recorder.set_error(Error::invalid_statement(
            "`asc` and `desc` can only be used inside `order_by`",
        ));
    }
}

/// Resolve a column of the table `alias` bound in `cx` relative to the
/// query being recorded.
pub(crate) fn resolve_column(cx: &Rc<QueryCx>, alias: TableAlias, column: usize) -> Result<ExprColumn> {
    let Some(recorder) = active() else {
        return Ok(ExprColumn::new(alias, column));
    };

    match recorder.cx.distance_to(cx.id()) {
        Some(nesting) => Ok(ExprColumn::with_nesting(nesting, alias, column)),
        None => Err(Error::invalid_statement(format!(
            "a column of `{}` was used outside of the query that bound it",
            cx.base_entity()
        ))),
    }
}

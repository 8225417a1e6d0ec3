use super::{IntoProjection, Projected, Query, Tables};
use crate::{recorder, recorder::SinkKind, Entity, Expr, PredicateOutput, Result};

use entiq_core::stmt::{self, ProjectionItem};

use std::marker::PhantomData;

/// What `having`, `order_by` and `select` closures of a grouped query
/// receive.
///
/// Keys are returned as handles over the key expressions recorded by
/// `group_by`, so a key projected in `select` is structurally equal to the
/// grouping key.
pub struct Group<T: Tables, K> {
    proxies: T::Proxies,
    keys: Vec<ProjectionItem>,
    _p: PhantomData<K>,
}

/// A query with grouping keys.
pub struct GroupQuery<T: Tables, K> {
    query: Query<T>,
    group: Group<T, K>,
    having: Vec<stmt::Expr>,
}

impl<T: Tables, K> Group<T, K> {
    fn key_at<V>(&self, index: usize) -> Expr<V> {
        match self.keys.get(index) {
            Some(item) => Expr::from_untyped(item.expr.clone(), item.ty.clone()),
            None => Expr::from_untyped(stmt::Expr::null(), stmt::Type::Null),
        }
    }

    /// Number of grouping keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    pub fn proxies(&self) -> &T::Proxies {
        &self.proxies
    }
}

impl<T: Tables, A> Group<T, (A,)> {
    pub fn key(&self) -> Expr<A> {
        self.key_at(0)
    }

    pub fn key1(&self) -> Expr<A> {
        self.key_at(0)
    }
}

impl<T: Tables, A, B> Group<T, (A, B)> {
    pub fn key1(&self) -> Expr<A> {
        self.key_at(0)
    }

    pub fn key2(&self) -> Expr<B> {
        self.key_at(1)
    }
}

impl<T: Tables, A, B, C> Group<T, (A, B, C)> {
    pub fn key1(&self) -> Expr<A> {
        self.key_at(0)
    }

    pub fn key2(&self) -> Expr<B> {
        self.key_at(1)
    }

    pub fn key3(&self) -> Expr<C> {
        self.key_at(2)
    }
}

impl<T: Tables, A, B, C, D> Group<T, (A, B, C, D)> {
    pub fn key1(&self) -> Expr<A> {
        self.key_at(0)
    }

    pub fn key2(&self) -> Expr<B> {
        self.key_at(1)
    }

    pub fn key3(&self) -> Expr<C> {
        self.key_at(2)
    }

    pub fn key4(&self) -> Expr<D> {
        self.key_at(3)
    }
}

impl<E: Entity, K> Group<E, K> {
    /// The proxy of the grouped table, for aggregates.
    pub fn group_table(&self) -> &E::Proxy {
        &self.proxies
    }
}

impl<A: Entity, B: Entity, K> Group<(A, B), K> {
    pub fn t1(&self) -> &A::Proxy {
        &self.proxies.0
    }

    pub fn t2(&self) -> &B::Proxy {
        &self.proxies.1
    }
}

impl<A: Entity, B: Entity, C: Entity, K> Group<(A, B, C), K> {
    pub fn t1(&self) -> &A::Proxy {
        &self.proxies.0
    }

    pub fn t2(&self) -> &B::Proxy {
        &self.proxies.1
    }

    pub fn t3(&self) -> &C::Proxy {
        &self.proxies.2
    }
}

impl<A: Entity, B: Entity, C: Entity, D: Entity, K> Group<(A, B, C, D), K> {
    pub fn t1(&self) -> &A::Proxy {
        &self.proxies.0
    }

    pub fn t2(&self) -> &B::Proxy {
        &self.proxies.1
    }

    pub fn t3(&self) -> &C::Proxy {
        &self.proxies.2
    }

    pub fn t4(&self) -> &D::Proxy {
        &self.proxies.3
    }
}

impl<T: Tables, K> GroupQuery<T, K> {
    pub(super) fn new(query: Query<T>, keys: Vec<ProjectionItem>) -> Self {
        let group = Group {
            proxies: query.proxies(),
            keys,
            _p: PhantomData,
        };

        GroupQuery {
            query,
            group,
            having: vec![],
        }
    }

    /// Filter groups. Statements are AND-combined with earlier `having`
    /// calls.
    pub fn having<F, R>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&Group<T, K>) -> R,
        R: PredicateOutput,
    {
        let ((), sink) = recorder::run(&self.query.cx, SinkKind::predicates(), || {
            f(&self.group).finish()
        })?;
        self.having.extend(sink.into_predicates());
        Ok(self)
    }

    pub fn order_by<F, R>(mut self, f: F) -> Result<Self>
    where
        F: FnOnce(&Group<T, K>) -> R,
    {
        let (_, sink) = recorder::run(&self.query.cx, SinkKind::order(), || f(&self.group))?;
        self.query.state.order_by.extend(sink.into_order());
        Ok(self)
    }

    /// Project the groups. Every item must be a grouping key, a constant,
    /// an aggregate, or built only from those.
    pub fn select<F, P>(self, f: F) -> Result<Projected>
    where
        F: FnOnce(&Group<T, K>) -> P,
        P: IntoProjection,
    {
        let (items, _) = recorder::run(&self.query.cx, SinkKind::Value, || {
            f(&self.group).into_projection()
        })?;

        let grouping = super::Grouping {
            keys: self.group.keys.into_iter().map(|item| item.expr).collect(),
            having: self.having,
        };

        Projected::new(self.query, stmt::Projection::new(items), Some(grouping))
    }
}

use crate::{cx::QueryCx, Entity, EntityProxy, TableHandle};

use entiq_core::stmt::TableAlias;

use std::rc::Rc;

/// The tables a query ranges over: a single entity, or a tuple of entities
/// once explicit joins are added. The first entity is the base table.
pub trait Tables: 'static {
    /// The entity rows of the query load into.
    type Base: Entity;

    /// What clause closures receive: one proxy, or a tuple of proxies.
    type Proxies;

    #[doc(hidden)]
    fn proxies(cx: &Rc<QueryCx>, aliases: &[TableAlias]) -> Self::Proxies;
}

/// Adding an explicitly joined entity `N` to a table set.
pub trait JoinWith<N: Entity>: Tables {
    type Output: Tables<Base = Self::Base>;
}

fn proxy<E: Entity>(cx: &Rc<QueryCx>, aliases: &[TableAlias], position: usize) -> E::Proxy {
    let alias = aliases.get(position).copied().unwrap_or(TableAlias::BASE);
    E::Proxy::from_table(TableHandle::new(cx.clone(), alias))
}

impl<E: Entity> Tables for E {
    type Base = E;
    type Proxies = E::Proxy;

    fn proxies(cx: &Rc<QueryCx>, aliases: &[TableAlias]) -> Self::Proxies {
        proxy::<E>(cx, aliases, 0)
    }
}

impl<E: Entity, N: Entity> JoinWith<N> for E {
    type Output = (E, N);
}

macro_rules! impl_tables_for_tuple {
    ( $first:ident $( $rest:ident )* ; $( $position:tt )* ) => {
        impl<$first: Entity, $( $rest: Entity ),*> Tables for ($first, $( $rest ),*) {
            type Base = $first;
            type Proxies = ($first::Proxy, $( $rest::Proxy ),*);

            fn proxies(cx: &Rc<QueryCx>, aliases: &[TableAlias]) -> Self::Proxies {
                (
                    proxy::<$first>(cx, aliases, 0),
                    $( proxy::<$rest>(cx, aliases, $position), )*
                )
            }
        }
    };
}

impl_tables_for_tuple!(A B; 1);
impl_tables_for_tuple!(A B C; 1 2);
impl_tables_for_tuple!(A B C D; 1 2 3);

impl<A: Entity, B: Entity, N: Entity> JoinWith<N> for (A, B) {
    type Output = (A, B, N);
}

impl<A: Entity, B: Entity, C: Entity, N: Entity> JoinWith<N> for (A, B, C) {
    type Output = (A, B, C, N);
}

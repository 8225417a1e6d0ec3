use crate::{AllColumns, Aggregate, Column, Expr, Predicate};

use entiq_core::stmt::{ProjectionItem, Type};

/// Values a `select` closure may return.
///
/// Tuples concatenate the items of their members, so
/// `(b.id(), b.all_columns())` projects the id followed by every column.
pub trait IntoProjection {
    fn into_projection(self) -> Vec<ProjectionItem>;
}

/// A single grouping key.
pub trait GroupKey {
    /// Rust type of the key value
    type Ty;

    fn into_key(self) -> ProjectionItem;
}

/// Values a `group_by` closure may return: one key or a tuple of up to four.
pub trait IntoGroupKeys {
    /// Tuple of the key value types
    type Keys;

    fn into_group_keys(self) -> Vec<ProjectionItem>;
}

impl<T> IntoProjection for Column<T> {
    fn into_projection(self) -> Vec<ProjectionItem> {
        vec![self.into_key()]
    }
}

impl<T> IntoProjection for Expr<T> {
    fn into_projection(self) -> Vec<ProjectionItem> {
        vec![self.into_key()]
    }
}

impl<T> IntoProjection for Aggregate<T> {
    fn into_projection(self) -> Vec<ProjectionItem> {
        let ty = self.ty.clone();
        vec![ProjectionItem {
            expr: self.into_untyped(),
            ty,
        }]
    }
}

impl IntoProjection for Predicate {
    fn into_projection(self) -> Vec<ProjectionItem> {
        vec![ProjectionItem {
            expr: self.detach(),
            ty: Type::Bool,
        }]
    }
}

impl IntoProjection for AllColumns {
    fn into_projection(self) -> Vec<ProjectionItem> {
        self.items
    }
}

macro_rules! impl_into_projection_for_tuple {
    ( $( $t:ident $v:ident ),+ ) => {
        impl<$( $t: IntoProjection ),+> IntoProjection for ( $( $t, )+ ) {
            fn into_projection(self) -> Vec<ProjectionItem> {
                let ( $( $v, )+ ) = self;
                let mut items = vec![];
                $( items.extend($v.into_projection()); )+
                items
            }
        }
    };
}

impl_into_projection_for_tuple!(A a);
impl_into_projection_for_tuple!(A a, B b);
impl_into_projection_for_tuple!(A a, B b, C c);
impl_into_projection_for_tuple!(A a, B b, C c, D d);
impl_into_projection_for_tuple!(A a, B b, C c, D d, E e);
impl_into_projection_for_tuple!(A a, B b, C c, D d, E e, F f);

impl<T> GroupKey for Column<T> {
    type Ty = T;

    fn into_key(self) -> ProjectionItem {
        let ty = self.ty();
        ProjectionItem {
            expr: self.to_expr().into_untyped(),
            ty,
        }
    }
}

impl<T> GroupKey for Expr<T> {
    type Ty = T;

    fn into_key(self) -> ProjectionItem {
        ProjectionItem {
            expr: self.untyped,
            ty: self.ty,
        }
    }
}

impl<K: GroupKey> IntoGroupKeys for K {
    type Keys = (K::Ty,);

    fn into_group_keys(self) -> Vec<ProjectionItem> {
        vec![self.into_key()]
    }
}

macro_rules! impl_into_group_keys_for_tuple {
    ( $( $t:ident $v:ident ),+ ) => {
        impl<$( $t: GroupKey ),+> IntoGroupKeys for ( $( $t, )+ ) {
            type Keys = ( $( $t::Ty, )+ );

            fn into_group_keys(self) -> Vec<ProjectionItem> {
                let ( $( $v, )+ ) = self;
                vec![ $( $v.into_key() ),+ ]
            }
        }
    };
}

impl_into_group_keys_for_tuple!(A a, B b);
impl_into_group_keys_for_tuple!(A a, B b, C c);
impl_into_group_keys_for_tuple!(A a, B b, C c, D d);

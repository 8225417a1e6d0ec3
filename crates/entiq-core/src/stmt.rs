mod assignments;
pub use assignments::{Assignment, Assignments};

mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_aggregate;
pub use expr_aggregate::{AggregateFunc, ExprAggregate};

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::ExprBinaryOp;

mod expr_case;
pub use expr_case::{CaseBranch, ExprCase};

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_exists;
pub use expr_exists::ExprExists;

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod expr_in_subquery;
pub use expr_in_subquery::ExprInSubquery;

mod expr_is_null;
pub use expr_is_null::ExprIsNull;

mod expr_like;
pub use expr_like::ExprLike;

mod expr_not;
pub use expr_not::ExprNot;

mod expr_or;
pub use expr_or::ExprOr;

mod join;
pub use join::{Join, JoinKind, JoinOrigin};

mod limit;
pub use limit::Limit;

mod nav_path;
pub use nav_path::NavPath;

mod op_binary;
pub use op_binary::BinaryOp;

mod op_set;
pub use op_set::{SetOp, SetOperation};

mod order_by_expr;
pub use order_by_expr::OrderByExpr;

mod projection;
pub use projection::{Projection, ProjectionItem};

mod query_plan;
pub use query_plan::QueryPlan;

mod record;
pub use record::Record;

mod source;
pub use source::Source;

mod table_alias;
pub use table_alias::TableAlias;

mod ty;
pub use ty::Type;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

pub mod visit;
pub use visit::Visit;

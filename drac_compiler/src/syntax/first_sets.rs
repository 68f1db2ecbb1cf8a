//! FIRST sets of the branching productions

use crate::tokens::CategorySet;
use crate::tokens::TokenCategory::*;

pub const DEF: CategorySet = CategorySet::of(&[Var, Identifier]);

pub const STMT: CategorySet = CategorySet::of(&[
    Identifier, If, While, Do, Break, Return, Inc, Dec, Semicolon,
]);

pub const COMP_OP: CategorySet = CategorySet::of(&[Equal, NotEqual]);

pub const REL_OP: CategorySet = CategorySet::of(&[Less, LessEqual, Greater, GreaterEqual]);

pub const ADD_OP: CategorySet = CategorySet::of(&[Plus, Minus]);

pub const MUL_OP: CategorySet = CategorySet::of(&[Mul, Div, Mod]);

pub const UNARY_OP: CategorySet = CategorySet::of(&[Plus, Minus, Not]);

pub const LITERAL: CategorySet =
    CategorySet::of(&[True, False, IntLiteral, CharLiteral, StringLiteral]);

pub const PRIMARY: CategorySet =
    CategorySet::of(&[Identifier, OpenBracket, OpenParen]).union(LITERAL);

pub const EXPR: CategorySet = UNARY_OP.union(PRIMARY);

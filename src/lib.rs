pub mod ast;
pub mod convert;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod interpret;
pub mod lexer;
pub mod line;
pub mod ops;
pub mod output;
pub mod parser;
pub mod store;
pub mod value;

pub use ast::{BinOp, Expr, Token, UnaryOp};
pub use convert::{evaluate_expression, try_evaluate};
pub use error::{Result, VarError};
pub use evaluator::{EvalError, Evaluator};
pub use filter::Datatype;
pub use interpret::Interpretation;
pub use lexer::{LexError, Lexer};
pub use line::parse_line;
pub use ops::{Options, exists, get, load, load_search, save, save_search, search, value_of};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use store::{Store, load_variables};
pub use value::Value;

/// Returns the elements as a Sexp list.
///
/// Elements may be anything Into<Sexp>, including other lists.
#[macro_export]
macro_rules! list {
    ($($elem:expr),* $(,)?) => {
        {
            let elems: Vec<$crate::sexp::Sexp> = vec![$(<$crate::sexp::Sexp>::from($elem)),*];
            $crate::sexp::Sexp::List(elems.into())
        }
    };
}

pub mod sexp;

mod fmt_io_bridge;


pub use sexp::{List, Sexp};

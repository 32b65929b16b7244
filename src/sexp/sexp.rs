//! Module for representing S-exps.
//!
//! The same type is used for parsed expressions and for evaluation results.

use std::convert::TryFrom;
use std::fmt;
use std::io::Write;
use std::iter::FromIterator;
use std::mem;
use std::ops::Deref;
use std::rc::Rc;
use std::str::FromStr;

use super::fmt_io_bridge::FmtIoBridge;
use crate::parser::{parse_sexp, ParseError};
use crate::primitive::{Primitive, Procedure};
use crate::token::Tokenizer;


/// Shared, immutable list storage. Cloning a list is a refcount bump, and
/// two clones of one list are `eq?`.
///
/// Dropping the last reference to a deeply nested list tears it down
/// iteratively, so nesting depth is bounded by memory, not by the stack.
#[derive(Clone)]
pub struct List(Rc<[Sexp]>);

#[derive(Clone)]
pub enum Sexp {
    Primitive(Primitive),
    List(List),
}


impl Sexp {
    /// The empty list, which doubles as nil.
    pub fn nil() -> Sexp {
        Sexp::List(List::default())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Sexp::List(list) if list.is_empty())
    }

    /// Only `#f` and the empty list are false.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Sexp::Primitive(Primitive::Bool(false))) && !self.is_nil()
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Sexp::List(_))
    }

    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(list) => Some(&**list),
            _ => None,
        }
    }

    pub fn as_procedure(&self) -> Option<&Procedure> {
        match self {
            Sexp::Primitive(Primitive::Procedure(procedure)) => Some(procedure),
            _ => None,
        }
    }

    /// Identity comparison. Atoms compare by value, lists by allocation (all
    /// empty lists are identical).
    pub fn is_same(&self, other: &Sexp) -> bool {
        match (self, other) {
            (Sexp::List(a), Sexp::List(b)) => {
                (a.is_empty() && b.is_empty()) || a.ptr_eq(b)
            }
            (Sexp::Primitive(a), Sexp::Primitive(b)) => same_atom(a, b),
            _ => false,
        }
    }

    /// Structural comparison, with numbers compared by value.
    pub fn is_equal(&self, other: &Sexp) -> bool {
        self.zip_all(other, same_atom)
    }

    /// Walk two trees in lockstep without recursion. Lists must match in
    /// shape, and every pair of atoms must satisfy `atoms_match`.
    fn zip_all<F>(&self, other: &Sexp, atoms_match: F) -> bool
    where
        F: Fn(&Primitive, &Primitive) -> bool,
    {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Sexp::List(a), Sexp::List(b)) => {
                    if a.ptr_eq(b) {
                        continue;
                    }
                    if a.len() != b.len() {
                        return false;
                    }
                    pending.extend(a.iter().zip(b.iter()));
                }
                (Sexp::Primitive(a), Sexp::Primitive(b)) => {
                    if !atoms_match(a, b) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }

    pub fn write_list<W, F, P>(
        &self,
        w: &mut W,
        depth: usize,
        write_primitive: &mut F,
        write_paren: &mut P,
    ) -> std::io::Result<()>
    where
        W: std::io::Write,
        F: FnMut(&mut W, &Primitive, usize) -> std::io::Result<()>,
        P: FnMut(&mut W, &str, usize) -> std::io::Result<()>,
    {
        let list = match self {
            Sexp::Primitive(primitive) => return write_primitive(w, primitive, depth),
            Sexp::List(list) => list,
        };

        // One (remaining elements, started) entry per open list.
        write_paren(w, "(", depth)?;
        let mut open = vec![(list.iter(), false)];
        loop {
            let level = open.len();
            let (elems, started) = match open.last_mut() {
                Some(top) => top,
                None => return Ok(()),
            };
            match elems.next() {
                None => {
                    open.pop();
                    write_paren(w, ")", depth + level - 1)?;
                }
                Some(val) => {
                    if *started {
                        write!(w, " ")?;
                    }
                    *started = true;
                    match val {
                        Sexp::Primitive(primitive) => write_primitive(w, primitive, depth + level)?,
                        Sexp::List(inner) => {
                            write_paren(w, "(", depth + level)?;
                            open.push((inner.iter(), false));
                        }
                    }
                }
            }
        }
    }
}


impl List {
    pub fn ptr_eq(&self, other: &List) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the shared allocation, stable while any clone lives.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const Sexp as usize
    }

    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl Deref for List {
    type Target = [Sexp];

    fn deref(&self) -> &[Sexp] {
        &self.0
    }
}

impl Default for List {
    fn default() -> Self {
        List(Rc::from(Vec::new()))
    }
}

impl From<Vec<Sexp>> for List {
    fn from(vec: Vec<Sexp>) -> Self {
        List(vec.into())
    }
}

impl Drop for List {
    fn drop(&mut self) {
        // Detach uniquely owned, non-empty children so that each list is
        // freed with only empty lists beneath it.
        let mut orphans = Vec::new();
        take_children(&mut self.0, &mut orphans);
        while let Some(mut list) = orphans.pop() {
            take_children(&mut list.0, &mut orphans);
        }
    }
}

fn same_atom(a: &Primitive, b: &Primitive) -> bool {
    match (a, b) {
        (Primitive::Number(a), Primitive::Number(b)) => a.num_eq(*b),
        _ => a == b,
    }
}

fn take_children(elems: &mut Rc<[Sexp]>, orphans: &mut Vec<List>) {
    if let Some(elems) = Rc::get_mut(elems) {
        for elem in elems.iter_mut() {
            if let Sexp::List(child) = elem {
                if child.ref_count() == 1 && !child.is_empty() {
                    orphans.push(mem::take(child));
                }
            }
        }
    }
}


impl Default for Sexp {
    fn default() -> Self {
        Sexp::nil()
    }
}

/// Exact structural equality; unlike `is_equal`, numbers of different
/// variants differ.
impl PartialEq for Sexp {
    fn eq(&self, other: &Sexp) -> bool {
        self.zip_all(other, |a, b| a == b)
    }
}

impl fmt::Debug for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.write_list(
            &mut FmtIoBridge::new(f),
            0,
            &mut |writer, primitive, _depth| write!(writer, "{}", primitive),
            &mut |writer, paren, _depth| write!(writer, "{}", paren),
        ) {
            Ok(()) => Ok(()),
            Err(_) => Err(fmt::Error),
        }
    }
}


impl<'a> TryFrom<&'a Sexp> for &'a Primitive {
    type Error = &'a Sexp;

    fn try_from(value: &'a Sexp) -> Result<Self, Self::Error> {
        if let Sexp::Primitive(primitive) = value {
            Ok(primitive)
        } else {
            Err(value)
        }
    }
}

/// Reads the first expression of the string. Empty input reads as nil.
impl FromStr for Sexp {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokenizer = Tokenizer::new();
        tokenizer.tokenize(s);

        match parse_sexp(&mut tokenizer.peekable(), 0) {
            Ok(Some(sexp)) => Ok(sexp),
            Ok(None) => Ok(Sexp::default()),
            Err(err) => Err(err),
        }
    }
}

impl FromIterator<Sexp> for Sexp {
    fn from_iter<I: IntoIterator<Item = Sexp>>(iter: I) -> Self {
        Sexp::List(iter.into_iter().collect::<Vec<_>>().into())
    }
}

impl From<Vec<Sexp>> for Sexp {
    fn from(vec: Vec<Sexp>) -> Self {
        Sexp::List(vec.into())
    }
}


#[cfg(test)]
#[path = "./sexp_test.rs"]
mod sexp_test;

//! Nesting context threaded through recursive tree passes
//!
//! A `Context` is created once per conversion call and passed by value;
//! each recursion step derives the child context with [`Context::enter`]
//! instead of mutating shared counters.

use crate::config::SpreadMode;
use crate::tree::heading_depth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub table_depth: u16,
    pub list_depth: u16,
    pub heading_depth: u16,
    pub definition_list_depth: u16,
    /// Table-cell line break sentinel, `None` when disabled
    pub sentinel: Option<char>,
    pub spread_mode: SpreadMode,
}

impl Context {
    pub fn new(sentinel: Option<char>, spread_mode: SpreadMode) -> Self {
        Self {
            table_depth: 0,
            list_depth: 0,
            heading_depth: 0,
            definition_list_depth: 0,
            sentinel,
            spread_mode,
        }
    }

    /// Context for the children of an element named `tag`
    #[must_use]
    pub fn enter(self, tag: &str) -> Self {
        let mut next = self;
        match tag {
            "table" => next.table_depth += 1,
            "ul" | "ol" => next.list_depth += 1,
            "dl" => next.definition_list_depth += 1,
            _ if heading_depth(tag).is_some() => next.heading_depth += 1,
            _ => {}
        }
        next
    }

    pub fn in_table(&self) -> bool {
        self.table_depth > 0
    }

    pub fn in_list(&self) -> bool {
        self.list_depth > 0
    }

    /// Sentinel to apply, only inside tables
    pub fn table_sentinel(&self) -> Option<char> {
        if self.in_table() { self.sentinel } else { None }
    }

    /// Tables, headings and definition lists never receive paragraphs
    pub fn forbids_paragraphs(&self) -> bool {
        self.table_depth > 0 || self.heading_depth > 0 || self.definition_list_depth > 0
    }
}

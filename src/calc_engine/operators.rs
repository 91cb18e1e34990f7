use std::collections::BTreeMap;
use std::fmt;

use log::info;

use super::node::Node;

/// Builds the binary node for an operator from its two operands.
pub type NodeConstructor = fn(Node, Node) -> Node;

#[derive(Clone, Copy)]
pub struct OperatorEntry {
    pub precedence: u32,
    pub construct: NodeConstructor,
}

/// Operator symbols with their precedence and node constructor.
///
/// Lower precedence binds more loosely and ends up nearer the root of the
/// tree. The table is built once and then shared read-only, so entries are
/// write-once: registering a symbol a second time keeps the first entry.
#[derive(Clone, Default)]
pub struct OperatorTable {
    operators: BTreeMap<char, OperatorEntry>,
}

impl OperatorTable {
    pub fn new() -> Self {
        OperatorTable::default()
    }

    /// The five arithmetic operators: `+ -` at 0, `* /` at 1 and `^` at 2.
    pub fn arithmetic() -> Self {
        let mut table = OperatorTable::new();
        table.register('+', 0, Node::add);
        table.register('-', 0, Node::sub);
        table.register('*', 1, Node::mul);
        table.register('/', 1, Node::div);
        table.register('^', 2, Node::exp);
        info!("Operator table initialized with state: {}", table);
        table
    }

    /// Returns `false` and leaves the table untouched if `symbol` is already registered.
    pub fn register(&mut self, symbol: char, precedence: u32, construct: NodeConstructor) -> bool {
        if self.operators.contains_key(&symbol) {
            return false;
        }
        self.operators.insert(symbol, OperatorEntry { precedence, construct });
        true
    }

    pub fn precedence_of(&self, symbol: char) -> Option<u32> {
        self.operators.get(&symbol).map(|entry| entry.precedence)
    }

    /// `None` stands for "no character yet" and is never an operator.
    pub fn contains(&self, symbol: Option<char>) -> bool {
        symbol.map_or(false, |c| self.operators.contains_key(&c))
    }

    pub fn constructor_for(&self, symbol: char) -> Option<NodeConstructor> {
        self.operators.get(&symbol).map(|entry| entry.construct)
    }

    pub fn max_precedence(&self) -> Option<u32> {
        self.operators.values().map(|entry| entry.precedence).max()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl fmt::Display for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (symbol, entry)) in self.operators.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", symbol, entry.precedence)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperatorTable{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_precedences() {
        let table = OperatorTable::arithmetic();
        assert_eq!(table.precedence_of('+'), Some(0));
        assert_eq!(table.precedence_of('-'), Some(0));
        assert_eq!(table.precedence_of('*'), Some(1));
        assert_eq!(table.precedence_of('/'), Some(1));
        assert_eq!(table.precedence_of('^'), Some(2));
        assert_eq!(table.precedence_of('%'), None);
        assert_eq!(table.max_precedence(), Some(2));
        assert_eq!(table.to_string(), "{*=1, +=0, -=0, /=1, ^=2}");
    }

    #[test]
    fn register_is_write_once() {
        let mut table = OperatorTable::new();
        assert!(table.register('+', 0, Node::add));
        assert!(!table.register('+', 5, Node::mul));
        assert_eq!(table.precedence_of('+'), Some(0));

        let build = table.constructor_for('+').unwrap();
        let node = build(Node::constant(2.0), Node::constant(3.0));
        assert_eq!(node.evaluate(), 5.0);
    }

    #[test]
    fn contains_handles_missing_character() {
        let table = OperatorTable::arithmetic();
        assert!(table.contains(Some('^')));
        assert!(!table.contains(Some('(')));
        assert!(!table.contains(None));
        assert!(table.constructor_for('x').is_none());
        assert!(OperatorTable::new().is_empty());
    }
}

use std::fmt;

/// A node of the expression tree.
///
/// Binary variants own both children exclusively, so a tree can never contain
/// a cycle. Every tree coming out of the parsers is evaluated without further
/// checks: division by zero yields an IEEE-754 infinity or NaN.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Constant(f64),
    Add(Box<Node>, Box<Node>),
    Sub(Box<Node>, Box<Node>),
    Mul(Box<Node>, Box<Node>),
    Div(Box<Node>, Box<Node>),
    Exp(Box<Node>, Box<Node>),
}

pub struct Step {
    pub operation: String,
    pub result: f64,
}

pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }
}

impl Node {
    pub fn constant(value: f64) -> Node {
        Node::Constant(value)
    }

    pub fn add(left: Node, right: Node) -> Node {
        Node::Add(Box::new(left), Box::new(right))
    }

    pub fn sub(left: Node, right: Node) -> Node {
        Node::Sub(Box::new(left), Box::new(right))
    }

    pub fn mul(left: Node, right: Node) -> Node {
        Node::Mul(Box::new(left), Box::new(right))
    }

    pub fn div(left: Node, right: Node) -> Node {
        Node::Div(Box::new(left), Box::new(right))
    }

    pub fn exp(left: Node, right: Node) -> Node {
        Node::Exp(Box::new(left), Box::new(right))
    }

    pub fn evaluate(&self) -> f64 {
        match self {
            Node::Constant(v) => *v,
            Node::Add(l, r) => l.evaluate() + r.evaluate(),
            Node::Sub(l, r) => l.evaluate() - r.evaluate(),
            Node::Mul(l, r) => l.evaluate() * r.evaluate(),
            Node::Div(l, r) => l.evaluate() / r.evaluate(),
            Node::Exp(l, r) => l.evaluate().powf(r.evaluate()),
        }
    }

    /// Same as [`Node::evaluate`], recording each binary step in `trace`
    /// in the order the steps are computed.
    pub fn evaluate_traced(&self, trace: &mut EvaluationTrace) -> f64 {
        let (l, op, r, apply): (_, char, _, fn(f64, f64) -> f64) = match self {
            Node::Constant(v) => return *v,
            Node::Add(l, r) => (l, '+', r, |a, b| a + b),
            Node::Sub(l, r) => (l, '-', r, |a, b| a - b),
            Node::Mul(l, r) => (l, '*', r, |a, b| a * b),
            Node::Div(l, r) => (l, '/', r, |a, b| a / b),
            Node::Exp(l, r) => (l, '^', r, f64::powf),
        };
        let left = l.evaluate_traced(trace);
        let right = r.evaluate_traced(trace);
        let result = apply(left, right);
        trace.add_step(format!("{} {} {}", left, op, right), result);
        result
    }

    /// Fully parenthesized infix form with every constant at two decimals.
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (l, op, r) = match self {
            Node::Constant(v) => return write!(f, "{:.2}", v),
            Node::Add(l, r) => (l, '+', r),
            Node::Sub(l, r) => (l, '-', r),
            Node::Mul(l, r) => (l, '*', r),
            Node::Div(l, r) => (l, '/', r),
            Node::Exp(l, r) => (l, '^', r),
        };
        write!(f, "({} {} {})", l, op, r)
    }
}

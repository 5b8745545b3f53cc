//! Boolean rules defined as expression trees

use core::ops::BitAnd;
use core::ops::BitOr;
use core::ops::Not;
use std::fmt;

use crate::efmt::{InfixFormatter, TermFormatter};
use crate::*;

/// A Boolean expression tree.
///
/// Represents a Boolean rule as a tree where internal nodes are AND or OR operations
/// and leaves are literals (or fixed Boolean values).
/// Expressions overload the ```&```, ```|```, and ```!``` operators to facilitate their definition
/// as readable rust statements. Fixed Boolean values are eliminated during construction,
/// nested operations of the same type are flattened, and negations are pushed down to the
/// literals following De Morgan's laws.
///
/// ```
/// use qmkit::{Expr, Rule, State, Variable};
///
/// // Create some variables
/// let a = Variable::from(0);
/// let b = Variable::from(1);
/// let c = Variable::from(2);
///
/// // Build expressions using these variables
/// let sub_expr = b & !c;
/// let pos_expr = a & !sub_expr;
/// let neg_expr = !&pos_expr;
///
/// // Evaluate expressions on some state
/// let state = State::new(0b100, 3);
/// assert!(pos_expr.eval(&state));
/// assert_ne!(pos_expr.eval(&state), neg_expr.eval(&state));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expr {
    /// A fixed Boolean value
    Constant(bool),

    /// A single literal
    Literal(Literal),

    /// A conjunction of at least two operands, none of them being a conjunction
    And(Vec<Expr>),

    /// A disjunction of at least two operands, none of them being a disjunction
    Or(Vec<Expr>),
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// Expression trees can use the AND and OR operators.
pub enum Operator {
    /// AND operator: all children need to be true
    And,
    /// OR operator: at least one child needs to be true
    Or,
}

impl Expr {
    /// Get the fixed value associated to this expression, or none if it is not fixed
    pub fn get_fixed(&self) -> Option<bool> {
        match self {
            Expr::Constant(b) => Some(*b),
            _ => None,
        }
    }

    /// The operator of the root node, if any
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expr::And(_) => Some(Operator::And),
            Expr::Or(_) => Some(Operator::Or),
            _ => None,
        }
    }

    /// The operands of the root node, empty for constants and literals
    pub fn operands(&self) -> &[Expr] {
        match self {
            Expr::And(c) | Expr::Or(c) => c,
            _ => &[],
        }
    }

    /// Display the expression with the names of a variable space and a custom configuration
    ///
    /// ```
    /// use qmkit::{efmt, VarSpace};
    /// # use qmkit::QmkitError;
    /// # fn main() -> Result<(), QmkitError> {
    /// let vs = VarSpace::alphabetic(3)?;
    /// let expr = vs.parse_expression("AB' + C")?;
    /// assert_eq!(format!("{}", expr.formatted(&vs, &efmt::LOGIC_FMT_CFG)), "A & !B | C");
    /// # Ok(())
    /// # }
    /// ```
    pub fn formatted<'a>(
        &'a self,
        vs: &'a VarSpace,
        cfg: &'a efmt::FormatterConfig<'a>,
    ) -> impl fmt::Display + 'a {
        FormattedExpr {
            expr: self,
            vs: Some(vs),
            cfg,
        }
    }

    pub(crate) fn fmt_expr(
        &self,
        f: &mut impl TermFormatter,
        parent: Option<Operator>,
    ) -> fmt::Result {
        match self {
            Expr::Constant(b) => f.write_bool(*b),
            Expr::Literal(lit) => f.write_literal(*lit),
            Expr::And(children) | Expr::Or(children) => {
                let op = match self {
                    Expr::And(_) => Operator::And,
                    _ => Operator::Or,
                };
                let grouped = matches!(parent, Some(p) if p.priority() > op.priority());
                if grouped {
                    write!(f, "(")?;
                }
                let mut first = true;
                for child in children {
                    match first {
                        true => first = false,
                        false => f.write_operator(op)?,
                    }
                    child.fmt_expr(f, Some(op))?;
                }
                if grouped {
                    write!(f, ")")?;
                }
                Ok(())
            }
        }
    }
}

struct FormattedExpr<'a> {
    expr: &'a Expr,
    vs: Option<&'a VarSpace>,
    cfg: &'a efmt::FormatterConfig<'a>,
}

impl fmt::Display for FormattedExpr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, self.vs, self.cfg);
        self.expr.fmt_expr(&mut ef, None)
    }
}

impl Operator {
    /// Define the priority of operators
    ///
    /// This priority controls the addition of necessary parenthesis when formatting expressions.
    pub fn priority(self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Or => 1,
        }
    }

    /// The other operator
    pub fn dual(self) -> Self {
        match self {
            Operator::And => Operator::Or,
            Operator::Or => Operator::And,
        }
    }

    /// Combine two expressions with this operator
    pub(crate) fn join(self, e1: Expr, e2: Expr) -> Expr {
        match (e1, e2) {
            (Expr::Constant(b), e) | (e, Expr::Constant(b)) => self.fixed_or(b, e),
            (e1, e2) => {
                let mut operands = Vec::new();
                self.flatten_into(e1, &mut operands);
                self.flatten_into(e2, &mut operands);
                self.wrap(operands)
            }
        }
    }

    fn flatten_into(self, e: Expr, operands: &mut Vec<Expr>) {
        match (self, e) {
            (Operator::And, Expr::And(children)) | (Operator::Or, Expr::Or(children)) => {
                operands.extend(children)
            }
            (_, e) => operands.push(e),
        }
    }

    fn wrap(self, operands: Vec<Expr>) -> Expr {
        match self {
            Operator::And => Expr::And(operands),
            Operator::Or => Expr::Or(operands),
        }
    }

    fn is_fixed_by(self, b: bool) -> bool {
        match (self, b) {
            (Operator::And, false) => true,
            (Operator::Or, true) => true,
            (Operator::And, true) => false,
            (Operator::Or, false) => false,
        }
    }

    fn fixed_or(self, b: bool, e: impl Into<Expr>) -> Expr {
        match self.is_fixed_by(b) {
            true => Expr::from(b),
            false => e.into(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operator::And => write!(f, "&"),
            Operator::Or => write!(f, "|"),
        }
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Constant(b)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        Expr::Literal(var.asserted())
    }
}

impl From<&Variable> for Expr {
    fn from(var: &Variable) -> Self {
        Self::from(*var)
    }
}

impl Rule for Expr {
    fn fmt_rule(&self, f: &mut fmt::Formatter, namer: &VarSpace) -> fmt::Result {
        let mut ef = InfixFormatter::named(f, namer);
        self.fmt_expr(&mut ef, None)
    }

    fn eval(&self, state: &State) -> bool {
        match self {
            Expr::Constant(b) => *b,
            Expr::Literal(lit) => lit.eval(state),
            Expr::And(children) => children.iter().all(|c| c.eval(state)),
            Expr::Or(children) => children.iter().any(|c| c.eval(state)),
        }
    }

    fn collect_regulators(&self, regulators: &mut VarSet) {
        match self {
            Expr::Constant(_) => (),
            Expr::Literal(lit) => regulators.insert(lit.variable),
            Expr::And(children) | Expr::Or(children) => children
                .iter()
                .for_each(|c| c.collect_regulators(regulators)),
        }
    }
}

// Display with the default configuration and generic variable names
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ef = InfixFormatter::new(f);
        self.fmt_expr(&mut ef, None)
    }
}

/* ************************************************************************************* */
/* ******************************   Operator overloading  ****************************** */
/* ************************************************************************************* */

impl Not for Expr {
    type Output = Self;
    fn not(self) -> Self::Output {
        match self {
            Expr::Constant(b) => Expr::Constant(!b),
            Expr::Literal(lit) => Expr::Literal(!lit),
            Expr::And(children) => Expr::Or(children.into_iter().map(Not::not).collect()),
            Expr::Or(children) => Expr::And(children.into_iter().map(Not::not).collect()),
        }
    }
}

impl Not for &Expr {
    type Output = Expr;
    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl<T: Into<Expr>> BitAnd<T> for Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for &Expr {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(self.clone(), rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for Variable {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(Expr::from(self), rhs.into())
    }
}

impl<T: Into<Expr>> BitAnd<T> for Literal {
    type Output = Expr;
    fn bitand(self, rhs: T) -> Self::Output {
        Operator::And.join(Expr::from(self), rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Expr {
    type Output = Self;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self, rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for &Expr {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(self.clone(), rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Variable {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(Expr::from(self), rhs.into())
    }
}

impl<T: Into<Expr>> BitOr<T> for Literal {
    type Output = Expr;
    fn bitor(self, rhs: T) -> Self::Output {
        Operator::Or.join(Expr::from(self), rhs.into())
    }
}

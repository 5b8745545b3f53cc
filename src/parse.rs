//! Read back the expressions written by the formatters.

use crate::*;
use pest::{iterators, Parser};

#[derive(Parser)]
#[grammar_inline = r####"
expr    = _{ SOI ~ disj ~ EOI }
disj    =  { conj ~ ( or_op ~ conj )* }
conj    =  { factor ~ ( and_op? ~ factor )* }
factor  =  { prefix* ~ atom ~ postfix* }
atom    = _{ bt | bf | word | "(" ~ disj ~ ")" }
prefix  =  { "!" | "~" | kw_not }
postfix =  { "'" }
or_op   = _{ "+" | "|" | kw_or }
and_op  = _{ "&" | "*" | "·" | kw_and }
bt      =  { "1" }
bf      =  { "0" }
word    = @{ !keyword ~ ("_" ~ (ASCII_DIGIT | "_")*)? ~ ASCII_ALPHA ~ (ASCII_ALPHANUMERIC | "_")* }
keyword = _{ kw_and | kw_or | kw_not }
kw_and  = @{ ^"and" ~ !(ASCII_ALPHANUMERIC | "_") }
kw_or   = @{ ^"or" ~ !(ASCII_ALPHANUMERIC | "_") }
kw_not  = @{ ^"not" ~ !(ASCII_ALPHANUMERIC | "_") }

WHITESPACE = _{ " " | "\t" | "\n" | "\r" }
"####]
struct ExpressionParser;

impl VarSpace {
    /// Parse an expression using the names of this collection.
    ///
    /// The parser accepts the output of all formatter configurations:
    /// * OR is written ```+```, ```|``` or ```or```
    /// * AND is written ```&```, ```*```, ```·```, ```and``` or by juxtaposition of the operands
    /// * negation is a prefix ```!```, ```~``` or ```not```, or a postfix quote
    /// * ```0``` and ```1``` are the constants
    ///
    /// A juxtaposed product of names without separator (```AB'C```) is split into the names of
    /// the collection. In such a word, a postfix negation applies to the last name only
    /// and a prefix negation to the first name only.
    ///
    /// ```
    /// use qmkit::{Rule, State, VarSpace};
    /// # use qmkit::QmkitError;
    /// # fn main() -> Result<(), QmkitError> {
    /// let vs = VarSpace::alphabetic(3)?;
    /// let e1 = vs.parse_expression("AB'C + (A + B)'")?;
    /// let e2 = vs.parse_expression("A & !B & C | !A & !B")?;
    /// assert_eq!(e1, e2);
    /// assert!(e1.eval(&State::new(0b000, 3)));
    /// assert!(vs.parse_expression("A + D").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_expression(&self, s: &str) -> Result<Expr, QmkitError> {
        let mut parsed = ExpressionParser::parse(Rule::expr, s)
            .map_err(|e| QmkitError::InvalidExpression(e.to_string()))?;
        match parsed.next() {
            Some(disj) => self.load_expr(disj),
            None => Err(QmkitError::InvalidExpression(s.into())),
        }
    }

    fn load_expr(&self, expr: iterators::Pair<Rule>) -> Result<Expr, QmkitError> {
        match expr.as_rule() {
            Rule::bt => Ok(Expr::from(true)),
            Rule::bf => Ok(Expr::from(false)),
            Rule::factor => self.load_factor(expr),
            Rule::disj => expr
                .into_inner()
                .filter(|p| p.as_rule() == Rule::conj)
                .try_fold(Expr::from(false), |e, p| Ok(e | self.load_expr(p)?)),
            Rule::conj => expr
                .into_inner()
                .filter(|p| p.as_rule() == Rule::factor)
                .try_fold(Expr::from(true), |e, p| Ok(e & self.load_expr(p)?)),
            // Other rules are outside of scope or hidden
            _ => Err(QmkitError::InvalidExpression(expr.as_str().into())),
        }
    }

    fn load_factor(&self, factor: iterators::Pair<Rule>) -> Result<Expr, QmkitError> {
        let text = factor.as_str().to_string();
        let mut prefix = 0;
        let mut postfix = 0;
        let mut atom = None;
        for p in factor.into_inner() {
            match p.as_rule() {
                Rule::prefix => prefix += 1,
                Rule::postfix => postfix += 1,
                _ => atom = Some(p),
            }
        }
        let atom = atom.ok_or(QmkitError::InvalidExpression(text))?;

        if atom.as_rule() != Rule::word {
            let expr = self.load_expr(atom)?;
            return Ok(match (prefix + postfix) % 2 {
                0 => expr,
                _ => !expr,
            });
        }

        let variables = self.split_word(atom.as_str())?;
        let last = variables.len().saturating_sub(1);
        Ok(variables
            .into_iter()
            .enumerate()
            .map(|(i, var)| {
                let negated = (i == 0 && prefix % 2 == 1) != (i == last && postfix % 2 == 1);
                Literal::new(var, Polarity::from_value(!negated))
            })
            .fold(Expr::from(true), |e, lit| e & lit))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn textbook_notation() -> Result<(), QmkitError> {
        let vs = VarSpace::alphabetic(4)?;
        let a = vs.get_or_err("A")?;
        let b = vs.get_or_err("B")?;
        let c = vs.get_or_err("C")?;
        let d = vs.get_or_err("D")?;

        assert_eq!(vs.parse_expression("AB' + CD")?, (a & !b) | (c & d));
        assert_eq!(vs.parse_expression("A B'C")?, a & !b & c);
        assert_eq!(
            vs.parse_expression("(A + B')(C' + D)")?,
            (a | !b) & (!c | d)
        );
        assert_eq!(vs.parse_expression("A'")?, Expr::from(!a));
        assert_eq!(vs.parse_expression("A''")?, Expr::from(a));
        assert_eq!(vs.parse_expression("(AB)'")?, !a | !b);
        assert_eq!(vs.parse_expression("0")?, Expr::from(false));
        assert_eq!(vs.parse_expression(" 1 ")?, Expr::from(true));
        Ok(())
    }

    #[test]
    fn negation_in_words() -> Result<(), QmkitError> {
        let vs = VarSpace::alphabetic(3)?;
        let a = vs.get_or_err("A")?;
        let b = vs.get_or_err("B")?;
        let c = vs.get_or_err("C")?;

        assert_eq!(vs.parse_expression("!ABC")?, !a & b & c);
        assert_eq!(vs.parse_expression("ABC'")?, a & b & !c);
        assert_eq!(vs.parse_expression("~AB'C")?, !a & !b & c);
        assert_eq!(vs.parse_expression("A·B*C")?, a & b & c);
        Ok(())
    }

    #[test]
    fn other_notations() -> Result<(), QmkitError> {
        let vs = VarSpace::from_names(["x", "y", "order"])?;
        let x = vs.get_or_err("x")?;
        let y = vs.get_or_err("y")?;
        let z = vs.get_or_err("order")?;

        assert_eq!(vs.parse_expression("x & !y | order")?, (x & !y) | z);
        assert_eq!(vs.parse_expression("(!x | y) & !order")?, (!x | y) & !z);
        assert_eq!(vs.parse_expression("x and not y or order")?, (x & !y) | z);
        assert_eq!(vs.parse_expression("not (x or y)")?, !x & !y);
        Ok(())
    }

    #[test]
    fn invalid_expressions() -> Result<(), QmkitError> {
        let vs = VarSpace::alphabetic(3)?;
        for text in ["", "A +", "(A + B", "A + + B", "A & | B", "A $ B"] {
            assert!(matches!(
                vs.parse_expression(text),
                Err(QmkitError::InvalidExpression(_))
            ));
        }
        assert_eq!(
            vs.parse_expression("AD"),
            Err(QmkitError::NoSuchVariableName("AD".into()))
        );
        Ok(())
    }
}

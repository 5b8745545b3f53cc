//! Formatting API for sums of products and products of sums

use crate::*;
use crate::cube::Symbol;

use itertools::Itertools;
use std::fmt;

/// Tokens used to print Boolean operators.
///
/// The default configuration uses the textbook notation where products juxtapose their literals,
/// sums are separated by ```+``` and complemented literals are followed by a quote: ```AB' + C```.
pub struct FormatterConfig<'a> {
    s_and: &'a str,
    s_or: &'a str,
    s_not: &'a str,
    postfix_not: bool,
}

pub static TEXTBOOK_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: "",
    s_or: " + ",
    s_not: "'",
    postfix_not: true,
};

pub static LOGIC_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: " & ",
    s_or: " | ",
    s_not: "!",
    postfix_not: false,
};

pub static LOWERCASE_FMT_CFG: FormatterConfig = FormatterConfig {
    s_and: " and ",
    s_or: " or ",
    s_not: "not ",
    postfix_not: false,
};

pub static DEFAULT_FMT_CFG: &FormatterConfig = &TEXTBOOK_FMT_CFG;

/// The two-level normal forms.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Form {
    /// Sum of products: each cube is a product of literals
    Sop,
    /// Product of sums: each cube describes false assignments and gives a sum of inverted literals
    Pos,
}

impl Form {
    /// The operator joining the literals of a term
    pub fn inner(self) -> Operator {
        match self {
            Form::Sop => Operator::And,
            Form::Pos => Operator::Or,
        }
    }

    /// The operator joining the terms
    pub fn outer(self) -> Operator {
        match self {
            Form::Sop => Operator::Or,
            Form::Pos => Operator::And,
        }
    }

    /// Polarity of the literal for a variable fixed at the given value in a cube
    pub fn polarity(self, value: bool) -> Polarity {
        match self {
            Form::Sop => Polarity::from_value(value),
            Form::Pos => Polarity::from_value(!value),
        }
    }
}

/// Define hooks to display the terms of normal forms.
///
/// A default formatter is implemented on top of [fmt::Formatter], the default methods
/// visit the cubes and call the hooks for each term and literal.
pub trait TermFormatter {
    /// Pass-through function calling an internal [fmt::Formatter].
    ///
    /// This function enables the use of the ```write!``` macro in other functions.
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result;

    /// Write a constant
    fn write_bool(&mut self, b: bool) -> fmt::Result;

    /// Write a single literal
    fn write_literal(&mut self, lit: Literal) -> fmt::Result;

    /// Write an operator between two operands
    fn write_operator(&mut self, op: Operator) -> fmt::Result;

    /// Start writing a term with the given number of literals
    fn start_term(&mut self, form: Form, size: usize) -> fmt::Result;

    /// Stop writing a term with the given number of literals
    fn end_term(&mut self, form: Form, size: usize) -> fmt::Result;

    /// Write a single cube as a term of the normal form.
    ///
    /// A full cube gives a constant term: true in a sum of products, false in a product of sums.
    fn write_cube(&mut self, cube: &Cube, form: Form) -> fmt::Result {
        if cube.is_full() {
            return self.write_bool(form == Form::Sop);
        }

        let size = cube.literal_count();
        self.start_term(form, size)?;
        let mut first = true;
        for (var, val) in cube.iter_fixed_values() {
            match first {
                true => first = false,
                false => self.write_operator(form.inner())?,
            }
            self.write_literal(Literal::new(var, form.polarity(val)))?;
        }
        self.end_term(form, size)
    }

    /// Write a list of cubes as a normal form.
    ///
    /// Terms are sorted to list asserted literals before complemented ones and fixed variables
    /// before free ones, following the order of variables.
    /// An empty list gives the neutral element of the outer operator.
    fn write_cubes(&mut self, cubes: &[Cube], form: Form) -> fmt::Result {
        if cubes.is_empty() {
            return self.write_bool(form == Form::Pos);
        }
        if cubes.iter().any(|c| c.is_full()) {
            return self.write_bool(form == Form::Sop);
        }

        let mut first = true;
        for cube in cubes.iter().sorted_by_key(|c| term_order(c)) {
            match first {
                true => first = false,
                false => self.write_operator(form.outer())?,
            }
            self.write_cube(cube, form)?;
        }
        Ok(())
    }
}

fn term_order(cube: &Cube) -> Vec<u8> {
    cube.iter_symbols()
        .map(|s| match s {
            Symbol::One => 0,
            Symbol::Zero => 1,
            Symbol::Free => 2,
        })
        .collect()
}

impl FormatterConfig<'_> {
    pub fn operator(&self, op: Operator) -> &str {
        match op {
            Operator::And => self.s_and,
            Operator::Or => self.s_or,
        }
    }

    /// Display a list of cubes in the selected normal form
    pub fn format<'a>(
        &'a self,
        cubes: &'a [Cube],
        form: Form,
        vs: &'a VarSpace,
    ) -> NormalFormFormatted<'a> {
        NormalFormFormatted {
            cubes,
            form,
            vs,
            cfg: self,
        }
    }

    /// Render a list of cubes as a sum of products
    pub fn sop(&self, cubes: &[Cube], vs: &VarSpace) -> String {
        format!("{}", self.format(cubes, Form::Sop, vs))
    }

    /// Render a list of cubes describing false assignments as a product of sums
    pub fn pos(&self, cubes: &[Cube], vs: &VarSpace) -> String {
        format!("{}", self.format(cubes, Form::Pos, vs))
    }
}

/// Render a list of cubes as a sum of products with the default configuration.
///
/// ```
/// use qmkit::{efmt, Cube, VarSpace};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let vs = VarSpace::alphabetic(3)?;
/// let cubes: Vec<Cube> = vec!["-11".parse()?, "10-".parse()?];
/// assert_eq!(efmt::to_sop(&cubes, &vs), "AB' + BC");
/// # Ok(())
/// # }
/// ```
pub fn to_sop(cubes: &[Cube], vs: &VarSpace) -> String {
    DEFAULT_FMT_CFG.sop(cubes, vs)
}

/// Render a list of cubes covering the maxterms of a function as a product of sums.
///
/// Each cube gives a sum term where the literal polarity is inverted with respect to
/// [to_sop]: a variable fixed at 1 in the cube gives a complemented literal.
///
/// ```
/// use qmkit::{efmt, Cube, VarSpace};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let vs = VarSpace::alphabetic(2)?;
/// let cubes: Vec<Cube> = vec!["00".parse()?];
/// assert_eq!(efmt::to_pos(&cubes, &vs), "(A + B)");
/// # Ok(())
/// # }
/// ```
pub fn to_pos(cubes: &[Cube], vs: &VarSpace) -> String {
    DEFAULT_FMT_CFG.pos(cubes, vs)
}

pub struct NormalFormFormatted<'a> {
    cubes: &'a [Cube],
    form: Form,
    vs: &'a VarSpace,
    cfg: &'a FormatterConfig<'a>,
}

impl fmt::Display for NormalFormFormatted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ef = InfixFormatter::with(f, Some(self.vs), self.cfg);
        ef.write_cubes(self.cubes, self.form)
    }
}

pub struct InfixFormatter<'a, 'b>(
    &'a mut fmt::Formatter<'b>,
    Option<&'a VarSpace>,
    &'a FormatterConfig<'a>,
);

impl<'a, 'b> InfixFormatter<'a, 'b> {
    pub fn new(f: &'a mut fmt::Formatter<'b>) -> Self {
        Self(f, None, DEFAULT_FMT_CFG)
    }
    pub fn named(f: &'a mut fmt::Formatter<'b>, vs: &'a VarSpace) -> Self {
        Self(f, Some(vs), DEFAULT_FMT_CFG)
    }
    pub fn with(
        f: &'a mut fmt::Formatter<'b>,
        ovs: Option<&'a VarSpace>,
        cfg: &'a FormatterConfig,
    ) -> Self {
        Self(f, ovs, cfg)
    }

    /// Open a parenthesized group
    pub fn open(&mut self) -> fmt::Result {
        write!(self, "(")
    }

    /// Close a parenthesized group
    pub fn close(&mut self) -> fmt::Result {
        write!(self, ")")
    }
}

impl TermFormatter for InfixFormatter<'_, '_> {
    fn write_fmt(&mut self, args: fmt::Arguments) -> fmt::Result {
        fmt::Formatter::write_fmt(self.0, args)
    }

    fn write_bool(&mut self, b: bool) -> fmt::Result {
        match b {
            false => write!(self, "0"),
            true => write!(self, "1"),
        }
    }

    fn write_literal(&mut self, lit: Literal) -> fmt::Result {
        let negated = lit.polarity == Polarity::Complemented;
        if negated && !self.2.postfix_not {
            write!(self, "{}", self.2.s_not)?;
        }
        match self.1 {
            None => write!(self, "{}", lit.variable)?,
            Some(vs) => vs.format_variable(self.0, lit.variable)?,
        }
        if negated && self.2.postfix_not {
            write!(self, "{}", self.2.s_not)?;
        }
        Ok(())
    }

    fn write_operator(&mut self, op: Operator) -> fmt::Result {
        let token = self.2.operator(op);
        // Juxtaposed multi-character names can not be split back unambiguously
        if token.is_empty() && self.1.map_or(false, |vs| vs.has_long_names()) {
            return write!(self, " ");
        }
        write!(self, "{}", token)
    }

    fn start_term(&mut self, form: Form, size: usize) -> fmt::Result {
        match form == Form::Pos && size > 1 {
            true => self.open(),
            false => Ok(()),
        }
    }

    fn end_term(&mut self, form: Form, size: usize) -> fmt::Result {
        match form == Form::Pos && size > 1 {
            true => self.close(),
            false => Ok(()),
        }
    }
}

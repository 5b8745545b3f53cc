//! Conversions between cubes, lists of implicants and expressions.

use crate::efmt::Form;
use crate::*;

impl Expr {
    /// The term of a normal form corresponding to a cube.
    ///
    /// A full cube gives the neutral element of the outer operator: true in a sum of products,
    /// false in a product of sums.
    fn from_cube(cube: &Cube, form: Form) -> Expr {
        if cube.is_full() {
            return Expr::from(form == Form::Sop);
        }
        let op = form.inner();
        cube.iter_fixed_values()
            .map(|(var, val)| Expr::from(Literal::new(var, form.polarity(val))))
            .reduce(|e1, e2| op.join(e1, e2))
            .unwrap_or_else(|| Expr::from(form == Form::Sop))
    }

    /// The sum term excluding all assignments of a cube.
    ///
    /// The cube describes false assignments: each fixed variable gives a literal with the
    /// opposite polarity.
    ///
    /// ```
    /// use qmkit::{Cube, Expr, VarSpace};
    /// # use qmkit::QmkitError;
    /// # fn main() -> Result<(), QmkitError> {
    /// let vs = VarSpace::alphabetic(3)?;
    /// let cube: Cube = "1-0".parse()?;
    /// assert_eq!(Expr::sum_term(&cube), vs.parse_expression("A' + C")?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn sum_term(cube: &Cube) -> Expr {
        Self::from_cube(cube, Form::Pos)
    }

    /// The product of the sum terms of a list of cubes describing false assignments
    pub fn product_of_sums(cubes: &[Cube]) -> Expr {
        cubes
            .iter()
            .fold(Expr::from(true), |expr, c| expr & Self::sum_term(c))
    }
}

/// The product of the literals fixed by the cube
impl From<&Cube> for Expr {
    fn from(cube: &Cube) -> Expr {
        Expr::from_cube(cube, Form::Sop)
    }
}

impl From<&Implicant> for Expr {
    fn from(implicant: &Implicant) -> Expr {
        Expr::from(implicant.cube())
    }
}

/// The sum of products of a list of implicants
impl From<&Implicants> for Expr {
    fn from(implicants: &Implicants) -> Expr {
        implicants
            .iter()
            .fold(Expr::from(false), |expr, p| expr | Expr::from(p))
    }
}

impl From<&Primes> for Expr {
    fn from(primes: &Primes) -> Self {
        Self::from(primes.as_implicants())
    }
}

impl From<Primes> for Implicants {
    fn from(primes: Primes) -> Self {
        primes.into_implicants()
    }
}

impl From<&Primes> for Implicants {
    fn from(primes: &Primes) -> Self {
        primes.as_implicants().clone()
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn cube_terms() -> Result<(), QmkitError> {
        let vs = VarSpace::alphabetic(3)?;
        let cube: Cube = "1-0".parse()?;
        assert_eq!(Expr::from(&cube), vs.parse_expression("AC'")?);
        assert_eq!(Expr::from(&Cube::full(3)), Expr::from(true));
        assert_eq!(Expr::sum_term(&Cube::full(3)), Expr::from(false));

        let single: Cube = "-1-".parse()?;
        assert_eq!(format!("{}", vs.named(&Expr::sum_term(&single))), "B'");
        Ok(())
    }

    #[test]
    fn normal_forms_match_truth_sets() -> Result<(), QmkitError> {
        let implicants: Implicants = "1-0; -11; 000".parse()?;
        let sop = Expr::from(&implicants);
        assert_eq!(sop.truth_set(3), implicants.truth_set(3));

        let cubes = implicants.cubes();
        let pos = Expr::product_of_sums(&cubes);
        for s in State::all(3) {
            assert_eq!(pos.eval(&s), !implicants.eval(&s));
        }

        assert_eq!(Expr::from(&Implicants::default()), Expr::from(false));
        assert_eq!(Expr::product_of_sums(&[]), Expr::from(true));
        Ok(())
    }

    #[test]
    fn primes_conversions() -> Result<(), QmkitError> {
        let table = TruthTable::new(VarSpace::alphabetic(3)?, [3, 5, 6, 7], [])?;
        let primes = Primes::from_table(&table)?;
        let expr = Expr::from(&primes);
        assert_eq!(&expr.truth_set(3), table.required());

        let implicants = Implicants::from(&primes);
        assert_eq!(implicants.len(), 3);
        assert_eq!(Implicants::from(primes).cubes(), implicants.cubes());
        Ok(())
    }
}

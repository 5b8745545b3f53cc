//! Two-level minimization of truth tables.

use crate::efmt::{FormatterConfig, DEFAULT_FMT_CFG};
use crate::*;

use bit_set::BitSet;
use log::{debug, info};

/// Configured entry point of the minimization.
///
/// The minimizer only carries the configuration used to render the normal forms,
/// the same minimizer can be used for any number of truth tables.
///
/// ```
/// use qmkit::{efmt, Minimizer, TruthTable, VarSpace};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
/// let table = TruthTable::new(VarSpace::from_names(["x", "y", "z"])?, [1, 3, 4, 5, 7], [])?;
///
/// let result = Minimizer::default().minimize(&table)?;
/// assert_eq!(result.sop(), "xy' + z");
///
/// let result = Minimizer::with_format(&efmt::LOGIC_FMT_CFG).minimize(&table)?;
/// assert_eq!(result.sop(), "x & !y | z");
/// assert_eq!(result.pos(), "(x | z) & (!y | z)");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy)]
pub struct Minimizer<'a> {
    cfg: &'a FormatterConfig<'a>,
}

impl Default for Minimizer<'static> {
    fn default() -> Self {
        Self {
            cfg: DEFAULT_FMT_CFG,
        }
    }
}

impl<'a> Minimizer<'a> {
    /// Render the results with a custom formatter configuration
    pub fn with_format(cfg: &'a FormatterConfig<'a>) -> Self {
        Self { cfg }
    }

    /// Minimize a truth table in both normal forms.
    ///
    /// The sum of products is obtained from the prime implicants of the function,
    /// the product of sums from the prime implicants of its complement: the maxterms become
    /// required and the don't-cares are kept.
    pub fn minimize(&self, table: &TruthTable) -> Result<Minimization, QmkitError> {
        let width = table.width();
        info!(
            "minimize {} variables: {} minterms, {} don't-cares",
            width,
            table.required().len(),
            table.dont_cares().len()
        );

        let (primes, cover) = solve(table.required(), table.dont_cares(), width)?;
        let maxterms = table.maxterms();
        let (pos_primes, pos_cover) = solve(&maxterms, table.dont_cares(), width)?;

        let sop_cubes = selected_cubes(&cover, &primes);
        let pos_cubes = selected_cubes(&pos_cover, &pos_primes);
        let sop = self.cfg.sop(&sop_cubes, table.space());
        let pos = self.cfg.pos(&pos_cubes, table.space());
        debug!("sop: {}", sop);
        debug!("pos: {}", pos);

        Ok(Minimization {
            table: table.clone(),
            sop,
            pos,
            primes,
            cover,
            pos_primes,
            pos_cover,
            grid: Grid::from_table(table)?,
        })
    }

    /// Minimize each output of a multi-output truth table independently.
    ///
    /// Each column is a string of output symbols for all assignments of the variable space,
    /// see [TruthTable::from_output_str]. All columns are validated before any minimization.
    pub fn minimize_outputs<S: AsRef<str>>(
        &self,
        space: &VarSpace,
        columns: &[S],
    ) -> Result<Vec<Minimization>, QmkitError> {
        let tables = columns
            .iter()
            .map(|c| TruthTable::from_output_str(space.clone(), c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        tables.iter().map(|t| self.minimize(t)).collect()
    }
}

/// Minimize a truth table with the default rendering
pub fn minimize(table: &TruthTable) -> Result<Minimization, QmkitError> {
    Minimizer::default().minimize(table)
}

/// Compute the prime implicants and a cover of the required indices.
///
/// Constant functions are answered without running the tabulation.
fn solve(
    required: &BitSet,
    dont_cares: &BitSet,
    width: usize,
) -> Result<(Primes, Cover), QmkitError> {
    if required.is_empty() {
        debug!("constant false function");
        return Ok((Primes::default(), Cover::default()));
    }
    let primes = match required.len() == 1 << width {
        true => {
            debug!("constant true function");
            Primes::full(width)
        }
        false => Primes::generate(initial_cubes(required, dont_cares, width), width)?,
    };
    let cover = Cover::solve(&primes, required)?;
    Ok((primes, cover))
}

fn selected_cubes(cover: &Cover, primes: &Primes) -> Vec<Cube> {
    cover
        .implicants(primes)
        .iter()
        .map(|i| i.cube().clone())
        .collect()
}

/// The result of a minimization: both normal forms and the intermediate results.
#[derive(Clone, Debug)]
pub struct Minimization {
    table: TruthTable,
    sop: String,
    pos: String,
    primes: Primes,
    cover: Cover,
    pos_primes: Primes,
    pos_cover: Cover,
    grid: Grid,
}

impl Minimization {
    /// The minimized truth table
    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    /// The minimal sum of products
    pub fn sop(&self) -> &str {
        &self.sop
    }

    /// The minimal product of sums
    pub fn pos(&self) -> &str {
        &self.pos
    }

    /// All prime implicants of the function, including the ones only covering don't-cares
    pub fn prime_implicants(&self) -> &Primes {
        &self.primes
    }

    /// The prime implicants which are the only cover of at least one minterm
    pub fn essential_prime_implicants(&self) -> Vec<&Implicant> {
        self.cover.essential_implicants(&self.primes)
    }

    /// The prime implicants selected in the sum of products
    pub fn solution(&self) -> Vec<&Implicant> {
        self.cover.implicants(&self.primes)
    }

    pub fn cover(&self) -> &Cover {
        &self.cover
    }

    /// The prime implicants of the complement of the function
    pub fn pos_prime_implicants(&self) -> &Primes {
        &self.pos_primes
    }

    /// The implicants of the complement selected in the product of sums, each of them gives a sum term
    pub fn pos_solution(&self) -> Vec<&Implicant> {
        self.pos_cover.implicants(&self.pos_primes)
    }

    pub fn pos_cover(&self) -> &Cover {
        &self.pos_cover
    }

    /// The sum of products as an expression
    pub fn sop_expr(&self) -> Expr {
        self.solution()
            .into_iter()
            .fold(Expr::from(false), |e, i| e | Expr::from(i))
    }

    /// The product of sums as an expression
    pub fn pos_expr(&self) -> Expr {
        Expr::product_of_sums(&selected_cubes(&self.pos_cover, &self.pos_primes))
    }

    /// The Karnaugh map of the function
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

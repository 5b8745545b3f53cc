//! Minimize Boolean functions of 2 to 6 variables into two-level normal forms.
//!
//! A [truth table](TruthTable) lists the assignment indices where a function must be true (minterms)
//! and those where its value does not matter (don't-cares). Each assignment index is read in binary,
//! the first [variable](Variable) of the [variable space](VarSpace) being the most significant bit.
//!
//! The minimization follows the Quine-McCluskey method:
//! * the [prime implicants](Primes) are obtained by merging [cubes](Cube) which differ by a single variable,
//! * a [cover](Cover) selects the essential prime implicants and completes them greedily,
//! * the selected cubes are rendered as a sum of products, the same process on the complement of the
//!   function gives the product of sums.
//!
//! ```
//! use qmkit::{minimize, TruthTable, VarSpace};
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//!
//! // f(A,B,C,D) = m(4,8,10,11,12,15) + d(9,14)
//! let table = TruthTable::new(VarSpace::alphabetic(4)?, [4, 8, 10, 11, 12, 15], [9, 14])?;
//! let result = minimize(&table)?;
//!
//! assert_eq!(result.prime_implicants().len(), 4);
//! assert_eq!(result.essential_prime_implicants().len(), 2);
//! assert_eq!(result.sop(), "AC + AD' + BC'D'");
//! # Ok(())
//! # }
//! ```
//!
//! # Cubes and implicants
//!
//! A [Cube] fixes some variables and leaves the others free. It is described by a string of symbols
//! (```1```, ```0``` or ```-```), one per variable. An [Implicant] associates a cube with the set of
//! assignment indices it covers.
//!
//! ```
//! use qmkit::{Cube, Rule, State};
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//! let cube: Cube = "1-0".parse()?;
//! assert_eq!(cube.expand().collect::<Vec<_>>(), vec![4, 6]);
//! assert!(cube.eval(&State::new(0b110, 3)));
//! # Ok(())
//! # }
//! ```
//!
//! # Expressions
//!
//! The normal forms are rendered with a [configurable notation](efmt::FormatterConfig).
//! The rendered text can be read back as an [expression](Expr) to evaluate it or to compare it
//! with the original function.
//!
//! ```
//! use qmkit::{Rule, VarSpace};
//! # use qmkit::QmkitError;
//! # fn main() -> Result<(), QmkitError> {
//! let variables = VarSpace::from_names(["x", "y", "z"])?;
//! let expr = variables.parse_expression("xy' + (y + z)'")?;
//! assert_eq!(expr.truth_set(3).iter().collect::<Vec<_>>(), vec![0, 4, 5]);
//! # Ok(())
//! # }
//! ```
//!
//! # Karnaugh maps
//!
//! A [Grid] places the assignment indices on a Karnaugh map where adjacent cells differ by a single
//! variable. The prime implicants are exactly the valid groups of the map.

mod convert;
mod cover;
mod cube;
mod error;
mod expr;
mod grid;
mod implicants;
mod minimize;
mod parse;
mod primes;
mod rules;
mod space;
mod states;
mod terms;
mod variable;

pub mod efmt;
pub mod tools;

use efmt::TermFormatter;

#[macro_use]
extern crate pest_derive;

// Export public structures and API
pub use cover::{Cover, CoverageMap};
pub use cube::{Cube, Symbol};
pub use error::{InternalError, QmkitError};
pub use expr::{Expr, Operator};
pub use grid::{Cell, Grid};
pub use implicants::{Implicant, Implicants, Origin};
pub use minimize::{minimize, Minimization, Minimizer};
pub use primes::Primes;
pub use rules::Rule;
pub use space::{VarSpace, MAX_VARIABLES, MIN_VARIABLES};
pub use states::State;
pub use terms::{initial_cubes, Expand, Output, TruthTable};
pub use variable::{Literal, Polarity, VarSet, Variable};

use crate::*;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static RE_UID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(_[01-9_]*)?[a-zA-Z][a-zA-Z01-9_]*$").unwrap());

/// Smallest number of variables of a truth table
pub const MIN_VARIABLES: usize = 2;

/// Largest number of variables of a truth table
pub const MAX_VARIABLES: usize = 6;

/// An ordered collection of named variables defining the inputs of a truth table.
///
/// Adding a new name to the collection creates a variable at the next position.
/// The order of insertion is the bit order of the assignment indices: the first variable is the
/// most significant bit. Names must be valid identifiers and can not be duplicated.
///
/// The collection can be used to retrieve the name associated with existing variables, which is especially useful
/// to display cubes and expressions.
///
/// ```
/// use qmkit::{Cube, VarSpace};
/// # use qmkit::QmkitError;
/// # fn main() -> Result<(), QmkitError> {
///
/// let mut variables = VarSpace::default();
/// let a = variables.add("A")?;
/// let b = variables.add("B")?;
/// assert!(variables.add("A").is_err());
///
/// let cube: Cube = "1-0".parse()?;
/// variables.add("C")?;
/// assert_eq!(format!("{}", variables.named(&cube)), "AC'");
///
/// // The associated name can be changed
/// variables.set_name(b, "Bis")?;
/// assert_eq!(variables.get("Bis"), Some(b));
/// # assert_eq!(variables.get("A"), Some(a));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct VarSpace {
    /// Names of the variables, in bit order
    names: Vec<String>,

    /// Find a variable by name
    name2uid: HashMap<String, Variable>,
}

/// A named rule associates a rule to a variable collection to provide prettier display output
struct NamedRule<'a> {
    namer: &'a VarSpace,
    rule: &'a dyn Rule,
}

impl VarSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a list of names.
    ///
    /// Returns an error if a name is invalid or duplicated, or if the number of names is not supported.
    pub fn from_names<I, S>(names: I) -> Result<Self, QmkitError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut space = Self::default();
        for name in names {
            space.add(name.as_ref())?;
        }
        space.check_width()?;
        Ok(space)
    }

    /// Build a collection of ```width``` variables named with consecutive capital letters (A, B, C...).
    pub fn alphabetic(width: usize) -> Result<Self, QmkitError> {
        if !(MIN_VARIABLES..=MAX_VARIABLES).contains(&width) {
            return Err(QmkitError::VariableCount(width));
        }
        Self::from_names((b'A'..).take(width).map(|c| (c as char).to_string()))
    }

    /// Create a new variable with the given name.
    ///
    /// Returns an error if the name is invalid, already used, or if the collection is full.
    /// In this case the collection is not modified.
    pub fn add(&mut self, name: &str) -> Result<Variable, QmkitError> {
        if !RE_UID.is_match(name) {
            return Err(QmkitError::InvalidName(name.into()));
        }
        if self.name2uid.contains_key(name) {
            return Err(QmkitError::ConflictingName(name.into()));
        }
        if self.names.len() >= MAX_VARIABLES {
            return Err(QmkitError::VariableCount(self.names.len() + 1));
        }

        let var = Variable::new(self.names.len());
        self.names.push(name.into());
        self.name2uid.insert(name.into(), var);
        Ok(var)
    }

    /// Get the number of variables
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Return whether there are no variables in this collection
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check that the number of variables can be used to define a truth table
    pub fn check_width(&self) -> Result<(), QmkitError> {
        match (MIN_VARIABLES..=MAX_VARIABLES).contains(&self.len()) {
            true => Ok(()),
            false => Err(QmkitError::VariableCount(self.len())),
        }
    }

    /// Check if a variable is part of the collection
    pub fn contains(&self, var: Variable) -> bool {
        var.uid() < self.names.len()
    }

    /// Check if a name is part of the collection
    pub fn contains_name(&self, name: &str) -> bool {
        self.name2uid.contains_key(name)
    }

    /// Search a variable with the given name
    pub fn get(&self, name: &str) -> Option<Variable> {
        self.name2uid.get(name).copied()
    }

    /// Search a variable with the given name
    pub fn get_or_err(&self, name: &str) -> Result<Variable, QmkitError> {
        self.get(name)
            .ok_or_else(|| QmkitError::NoSuchVariableName(name.into()))
    }

    /// Retrieve the name of a variable
    pub fn name(&self, var: Variable) -> Option<&str> {
        self.names.get(var.uid()).map(|s| s.as_str())
    }

    /// Change the name of a variable.
    ///
    /// Returns an error if the new name is either invalid or already associated to another variable.
    /// Renaming to the same name is accepted (in this case, the collection is not changed)
    pub fn set_name(&mut self, v: Variable, name: &str) -> Result<Variable, QmkitError> {
        let old_name = match self.names.get(v.uid()) {
            None => return Err(QmkitError::NoSuchVariableName(format!("{}", v))),
            Some(n) => n.clone(),
        };

        // Reject invalid names
        if !RE_UID.is_match(name) {
            return Err(QmkitError::InvalidName(name.into()));
        }

        // Detect conflicts or unchanged names
        if let Some(existing) = self.get(name) {
            if existing == v {
                return Ok(v);
            }
            return Err(QmkitError::ConflictingName(String::from(name)));
        }

        self.name2uid.remove(&old_name);
        self.name2uid.insert(name.into(), v);
        self.names[v.uid()] = name.into();
        Ok(v)
    }

    /// Iterate on all variables of this collection, in bit order
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        (0..self.names.len()).map(Variable::from)
    }

    /// Iterate on the names of the variables, in bit order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(|s| s.as_str())
    }

    /// Test if some variable name uses more than one character
    pub fn has_long_names(&self) -> bool {
        self.names.iter().any(|s| s.chars().nth(1).is_some())
    }

    /// Apply variable names from this collection to a rule.
    ///
    /// This operation is only useful to display rules (especially expressions) or variables.
    ///
    /// It accepts rules with variables which are not part of the collection.
    /// In this case, valid variables will be associated to their name in the collection,
    /// while missing variables will receive their default UID-based name.
    pub fn named<'a>(&'a self, rule: &'a impl Rule) -> impl fmt::Display + 'a {
        NamedRule { namer: self, rule }
    }

    /// Insert the name of a variable during a display operation.
    pub fn format_variable(&self, f: &mut fmt::Formatter, var: Variable) -> fmt::Result {
        match self.name(var) {
            None => write!(f, "{}", var),
            Some(s) => write!(f, "{}", s),
        }
    }

    /// Check that a rule uses only variables included in this collection
    pub fn check_rule(&self, rule: &dyn Rule) -> Result<(), QmkitError> {
        for v in rule.get_regulators().iter() {
            if !self.contains(v) {
                return Err(QmkitError::NoSuchVariableName(format!("{}", v)));
            }
        }
        Ok(())
    }

    /// Split a word into a sequence of variable names.
    ///
    /// Textbook expressions juxtapose the literals of a product ("AB'C"), a word is then
    /// a concatenation of variable names. An exact match is preferred, other splits are
    /// explored from the longest prefix.
    pub(crate) fn split_word(&self, word: &str) -> Result<Vec<Variable>, QmkitError> {
        self._split_word(word)
            .ok_or_else(|| QmkitError::NoSuchVariableName(word.into()))
    }

    fn _split_word(&self, word: &str) -> Option<Vec<Variable>> {
        if let Some(v) = self.get(word) {
            return Some(vec![v]);
        }
        (1..word.len()).rev().filter(|&cut| word.is_char_boundary(cut)).find_map(|cut| {
            let head = self.get(&word[..cut])?;
            let mut tail = self._split_word(&word[cut..])?;
            tail.insert(0, head);
            Some(tail)
        })
    }
}

impl fmt::Display for NamedRule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.rule.fmt_rule(f, self.namer)
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn uid_provider() -> Result<(), QmkitError> {
        let mut uids = VarSpace::default();
        assert_eq!(uids.add("a")?.uid(), 0);
        assert_eq!(uids.add("b")?.uid(), 1);
        assert_eq!(uids.add("c")?.uid(), 2);

        assert!(matches!(uids.add("3test"), Err(QmkitError::InvalidName(_))));
        assert!(matches!(uids.add("te%t"), Err(QmkitError::InvalidName(_))));
        assert!(matches!(uids.add("b"), Err(QmkitError::ConflictingName(_))));
        assert_eq!(uids.len(), 3);

        assert_eq!(uids.get_or_err("c")?, Variable::from(2));
        assert!(uids.get_or_err("pipo").is_err());
        Ok(())
    }

    #[test]
    fn width_limits() -> Result<(), QmkitError> {
        assert_eq!(
            VarSpace::from_names(["A"]),
            Err(QmkitError::VariableCount(1))
        );
        assert!(VarSpace::alphabetic(7).is_err());

        let mut vs = VarSpace::alphabetic(6)?;
        assert_eq!(vs.names().collect::<Vec<_>>(), ["A", "B", "C", "D", "E", "F"]);
        assert_eq!(vs.add("G"), Err(QmkitError::VariableCount(7)));
        Ok(())
    }

    #[test]
    fn rename() -> Result<(), QmkitError> {
        let mut vs = VarSpace::from_names(["x", "y"])?;
        let y = vs.get_or_err("y")?;
        vs.set_name(y, "z")?;
        assert!(vs.get("y").is_none());
        assert_eq!(vs.name(y), Some("z"));
        assert!(vs.set_name(y, "x").is_err());
        Ok(())
    }

    #[test]
    fn split_juxtaposed_names() -> Result<(), QmkitError> {
        let vs = VarSpace::from_names(["A", "AB", "BC"])?;
        let split = vs.split_word("ABC")?;
        assert_eq!(split, vec![Variable::from(0), Variable::from(2)]);
        assert_eq!(vs.split_word("AB")?, vec![Variable::from(1)]);
        assert_eq!(vs.split_word("AAB")?, vec![Variable::from(0), Variable::from(1)]);
        assert!(vs.split_word("ABD").is_err());
        Ok(())
    }
}

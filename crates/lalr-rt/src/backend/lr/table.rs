use crate::error::{Fault, GrammarError};
use crate::grammar::{Rule, RuleId, Symbol};
use hashbrown::HashMap;
use std::collections::BTreeSet;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Index of a state in a [`ParseTable`].
///
/// Uses u32 which is sufficient for all practical automaton sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct StateId(pub u32);

impl StateId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key for action table lookup
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Lookahead {
    /// A terminal type or, for gotos, a non-terminal
    Symbol(Symbol),
    /// The reserved end-of-input marker
    End,
}

impl Lookahead {
    #[must_use]
    pub fn symbol(name: impl Into<Symbol>) -> Self {
        Self::Symbol(name.into())
    }
}

impl fmt::Display for Lookahead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(symbol) => write!(f, "{symbol}"),
            Self::End => f.write_str("$END"),
        }
    }
}

/// LR parsing action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum Action {
    /// Shift to state (a goto when keyed by a non-terminal)
    Shift(StateId),
    /// Reduce by a rule, popping `len` entries
    Reduce { rule: RuleId, len: usize },
}

impl Action {
    #[must_use]
    pub const fn shift(state: u32) -> Self {
        Self::Shift(StateId(state))
    }

    #[must_use]
    pub const fn reduce(rule: u32, len: usize) -> Self {
        Self::Reduce {
            rule: RuleId(rule),
            len,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shift(state) => write!(f, "shift {state}"),
            Self::Reduce { rule, len } => write!(f, "reduce {rule}/{len}"),
        }
    }
}

/// Actions of one automaton state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct State {
    actions: HashMap<Symbol, Action, ahash::RandomState>,
    on_end: Option<Action>,
}

impl State {
    /// Action for a symbol lookahead
    #[must_use]
    pub fn action(&self, symbol: &str) -> Option<Action> {
        self.actions.get(symbol).copied()
    }

    /// Action for the end-of-input lookahead
    #[must_use]
    pub const fn end_action(&self) -> Option<Action> {
        self.on_end
    }

    #[must_use]
    pub fn get(&self, lookahead: &Lookahead) -> Option<Action> {
        match lookahead {
            Lookahead::Symbol(symbol) => self.action(symbol.as_str()),
            Lookahead::End => self.on_end,
        }
    }

    fn insert(&mut self, lookahead: Lookahead, action: Action) -> Option<Action> {
        match lookahead {
            Lookahead::Symbol(symbol) => self.actions.insert(symbol, action),
            Lookahead::End => self.on_end.replace(action),
        }
    }

    /// Every lookahead this state has an entry for
    #[must_use]
    pub fn expected(&self) -> BTreeSet<Lookahead> {
        self.entries().map(|(lookahead, _)| lookahead).collect()
    }

    /// All `(lookahead, action)` entries, in no particular order
    pub fn entries(&self) -> impl Iterator<Item = (Lookahead, Action)> + '_ {
        self.actions
            .iter()
            .map(|(symbol, action)| (Lookahead::Symbol(symbol.clone()), *action))
            .chain(self.on_end.map(|action| (Lookahead::End, action)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len() + usize::from(self.on_end.is_some())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// LALR(1) action table: per state, lookahead -> action.
///
/// States live in an arena indexed by [`StateId`]; recursion in the grammar
/// only ever shows up as a shift back to an earlier id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct ParseTable {
    states: Vec<State>,
}

impl ParseTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with `count` empty states, ids `0..count`
    #[must_use]
    pub fn with_states(count: usize) -> Self {
        Self {
            states: vec![State::default(); count],
        }
    }

    /// Append an empty state and return its id
    ///
    /// # Errors
    ///
    /// Returns [`Fault::TooManyStates`] once ids no longer fit a `u32`.
    pub fn add_state(&mut self) -> Result<StateId, Fault> {
        let id = next_state_id(self.states.len())?;
        self.states.push(State::default());
        Ok(id)
    }

    /// Set the action for `(state, lookahead)`, returning the one it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`Fault::UnknownState`] if `state` is not in the table.
    pub fn insert(
        &mut self,
        state: StateId,
        lookahead: Lookahead,
        action: Action,
    ) -> Result<Option<Action>, Fault> {
        let entry = self
            .states
            .get_mut(state.index())
            .ok_or(Fault::UnknownState(state))?;
        Ok(entry.insert(lookahead, action))
    }

    #[must_use]
    pub fn state(&self, state: StateId) -> Option<&State> {
        self.states.get(state.index())
    }

    /// Iterate over `(id, state)` pairs
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        (0u32..)
            .zip(&self.states)
            .map(|(id, state)| (StateId(id), state))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Check the table against the rules its reduces refer to.
    ///
    /// Rejects unknown states and rules, reduce lengths that disagree with
    /// the rule, shifts into `end` on anything but end of input, and an
    /// end-of-input shift to any state but `end`.
    ///
    /// # Errors
    ///
    /// Returns the first [`Fault`] found.
    pub fn check(&self, rules: &[Rule], start: StateId, end: StateId) -> Result<(), Fault> {
        for id in [start, end] {
            if self.state(id).is_none() {
                return Err(Fault::UnknownState(id));
            }
        }
        for (id, state) in self.states() {
            for (lookahead, action) in state.entries() {
                match action {
                    Action::Shift(target) if self.state(target).is_none() => {
                        return Err(Fault::UnknownState(target));
                    }
                    Action::Shift(target) => match lookahead {
                        Lookahead::Symbol(_) if target == end => {
                            return Err(Fault::AcceptMidStream {
                                state: id,
                                lookahead,
                            });
                        }
                        Lookahead::End if target != end => {
                            return Err(Fault::WrongAcceptState {
                                found: target,
                                expected: end,
                            });
                        }
                        _ => {}
                    },
                    Action::Reduce { rule, len } => {
                        let expected = rules
                            .get(rule.index())
                            .ok_or(Fault::UnknownRule(rule))?
                            .len();
                        if expected != len {
                            return Err(Fault::RuleLengthMismatch { rule, len, expected });
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn next_state_id(count: usize) -> Result<StateId, Fault> {
    u32::try_from(count)
        .map(StateId)
        .map_err(|_| Fault::TooManyStates { count })
}

/// Output of grammar analysis: the table plus what it refers to.
///
/// `rules` is the list reduce actions index into. Analyzers may add rules of
/// their own (an augmented start rule, say), so it need not equal the rule
/// set they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Analysis {
    pub table: ParseTable,
    pub rules: Vec<Rule>,
    pub start_state: StateId,
    pub end_state: StateId,
}

impl Analysis {
    #[must_use]
    pub const fn new(
        table: ParseTable,
        rules: Vec<Rule>,
        start_state: StateId,
        end_state: StateId,
    ) -> Self {
        Self {
            table,
            rules,
            start_state,
            end_state,
        }
    }

    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.index())
    }
}

/// Builds LALR(1) tables from a rule set.
///
/// Table construction lives outside this crate; this is the seam it plugs
/// into. Closures with the same signature are analyzers too.
pub trait Analyzer {
    /// Compute the automaton for `rules` starting at `start`.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] for grammars the analyzer cannot handle,
    /// typically [`GrammarError::Analysis`] for conflicts.
    fn analyze(&self, rules: &[Rule], start: &Symbol) -> Result<Analysis, GrammarError>;
}

impl<F> Analyzer for F
where
    F: Fn(&[Rule], &Symbol) -> Result<Analysis, GrammarError>,
{
    fn analyze(&self, rules: &[Rule], start: &Symbol) -> Result<Analysis, GrammarError> {
        self(rules, start)
    }
}

/// A precomputed analysis (loaded from disk, generated at build time)
/// answers every request with itself.
impl Analyzer for Analysis {
    fn analyze(&self, _rules: &[Rule], _start: &Symbol) -> Result<Analysis, GrammarError> {
        Ok(self.clone())
    }
}
